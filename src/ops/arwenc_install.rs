//! Implementation of `arwenc install`.

use std::path::PathBuf;

use crate::builder::BuildError;
use crate::deps::{DependencyProvisioner, LocalProvisioner};

/// Options for the install command.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Module keys to provision, in order
    pub modules: Vec<String>,

    /// Remove downloaded modules first so they are fetched again
    pub force: bool,
}

/// One provisioned module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledModule {
    pub key: String,
    pub path: PathBuf,
}

/// Provision every requested module, stopping at the first failure.
pub fn install(
    provisioner: &LocalProvisioner,
    opts: &InstallOptions,
) -> Result<Vec<InstalledModule>, BuildError> {
    let mut installed = Vec::with_capacity(opts.modules.len());

    for key in &opts.modules {
        if opts.force && provisioner.uninstall(key)? {
            tracing::debug!("forcing reinstall of {}", key);
        }
        provisioner.ensure_installed(key)?;
        installed.push(InstalledModule {
            key: key.clone(),
            path: provisioner.install_path(key)?,
        });
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn offline() -> Config {
        toml::from_str("[net]\noffline = true").unwrap()
    }

    #[test]
    fn test_install_reports_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("soll/v0.0.5")).unwrap();
        fs::create_dir_all(tmp.path().join("llvm-for-soll/v10")).unwrap();
        let deps = LocalProvisioner::new(tmp.path().to_path_buf(), offline());

        let opts = InstallOptions {
            modules: vec!["soll".into(), "llvm-for-soll".into()],
            force: false,
        };
        let installed = install(&deps, &opts).unwrap();

        assert_eq!(installed.len(), 2);
        assert_eq!(installed[0].key, "soll");
        assert_eq!(installed[0].path, tmp.path().join("soll/v0.0.5"));
        assert_eq!(installed[1].path, tmp.path().join("llvm-for-soll/v10"));
    }

    #[test]
    fn test_force_removes_before_reinstalling() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("soll/v0.0.5");
        fs::create_dir_all(&dir).unwrap();
        let deps = LocalProvisioner::new(tmp.path().to_path_buf(), offline());

        let opts = InstallOptions {
            modules: vec!["soll".into()],
            force: true,
        };
        let err = install(&deps, &opts).unwrap_err();

        // Offline, so the removed module cannot come back.
        assert!(matches!(err, BuildError::DependencyMissing { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn test_unknown_module_stops_early() {
        let tmp = TempDir::new().unwrap();
        let deps = LocalProvisioner::new(tmp.path().to_path_buf(), offline());

        let opts = InstallOptions {
            modules: vec!["cobol".into(), "soll".into()],
            force: false,
        };
        assert!(matches!(
            install(&deps, &opts),
            Err(BuildError::UnknownModule { ref key }) if key == "cobol"
        ));
    }
}
