//! Provisioner backed by a local tools directory.
//!
//! Modules are installed under `<tools_dir>/<key>/<tag>`. A module can also
//! point at a preinstalled directory (`path`) or be looked up on PATH
//! (`system = true`), in which case nothing is ever downloaded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::BuildError;
use crate::deps::archive::{download, extract_tarball};
use crate::deps::catalogue::ModuleSpec;
use crate::deps::DependencyProvisioner;
use crate::util::config::Config;
use crate::util::fs::ensure_dir;
use crate::util::hash::verify_sha256;
use crate::util::process::find_executable;

/// Installs modules by downloading vendor tarballs into a tools directory.
#[derive(Debug, Clone)]
pub struct LocalProvisioner {
    tools_dir: PathBuf,
    config: Config,
}

impl LocalProvisioner {
    /// Create a provisioner. `config.tools_dir` wins over `default_tools_dir`.
    pub fn new(default_tools_dir: PathBuf, config: Config) -> Self {
        let tools_dir = config.tools_dir.clone().unwrap_or(default_tools_dir);
        LocalProvisioner { tools_dir, config }
    }

    /// Root directory for downloaded modules.
    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Resolved catalogue entry for `key`.
    pub fn spec(&self, key: &str) -> Result<ModuleSpec, BuildError> {
        ModuleSpec::resolve(key, &self.config)
    }

    /// Remove a downloaded module so the next `ensure_installed` fetches it again.
    ///
    /// Preinstalled and system modules are left alone.
    pub fn uninstall(&self, key: &str) -> Result<bool, BuildError> {
        let spec = self.spec(key)?;
        if spec.path.is_some() || spec.system {
            return Ok(false);
        }

        let dir = self.managed_dir(&spec);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).map_err(|e| BuildError::io(&dir, e))?;
        tracing::info!("Removed {}", dir.display());
        Ok(true)
    }

    fn managed_dir(&self, spec: &ModuleSpec) -> PathBuf {
        self.tools_dir.join(&spec.key).join(&spec.tag)
    }

    fn locate_system(&self, spec: &ModuleSpec) -> Result<PathBuf, BuildError> {
        let binary = find_executable(spec.probe_name()).ok_or_else(|| {
            BuildError::DependencyMissing {
                key: spec.key.clone(),
                hint: format!("`{}` was not found on PATH", spec.probe_name()),
            }
        })?;

        let mut root = binary.as_path();
        for _ in 0..=spec.probe_depth() {
            root = root.parent().unwrap_or(root);
        }
        Ok(root.to_path_buf())
    }

    fn download_and_extract(&self, spec: &ModuleSpec, url: &str, dest: &Path) -> Result<()> {
        let parent = dest
            .parent()
            .context("install directory has no parent")?;
        ensure_dir(parent)?;

        let data = download(url)?;
        if let Some(ref expected) = spec.sha256 {
            verify_sha256(&data, expected, url)?;
        }

        // Stage next to the destination so the final rename stays on one filesystem.
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)
            .context("failed to create staging directory")?;
        extract_tarball(&data, staging.path(), spec.strip_prefix.as_deref())
            .with_context(|| format!("failed to extract {}", url))?;

        fs::rename(staging.path(), dest)
            .with_context(|| format!("failed to move install into {}", dest.display()))?;
        Ok(())
    }
}

impl DependencyProvisioner for LocalProvisioner {
    fn ensure_installed(&self, key: &str) -> Result<(), BuildError> {
        let spec = self.spec(key)?;

        if let Some(ref path) = spec.path {
            if !path.is_dir() {
                return Err(BuildError::DependencyMissing {
                    key: spec.key,
                    hint: format!("configured path {} does not exist", path.display()),
                });
            }
            tracing::debug!("Module {} preinstalled at {}", key, path.display());
            return Ok(());
        }

        if spec.system {
            let root = self.locate_system(&spec)?;
            tracing::debug!("Module {} found at {}", key, root.display());
            return Ok(());
        }

        let dest = self.managed_dir(&spec);
        if dest.is_dir() {
            tracing::debug!("Module {} already installed at {}", key, dest.display());
            return Ok(());
        }

        if self.config.net.is_offline() {
            return Err(BuildError::DependencyMissing {
                key: spec.key,
                hint: "downloads are disabled (net.offline)".to_string(),
            });
        }

        let url = spec.archive_url().ok_or_else(|| BuildError::DependencyMissing {
            key: spec.key.clone(),
            hint: "no download url is configured".to_string(),
        })?;

        tracing::info!("Installing {} ({})", key, spec.tag);
        self.download_and_extract(&spec, &url, &dest)
            .map_err(|e| BuildError::Install {
                key: key.to_string(),
                message: format!("{:#}", e),
            })?;

        if !dest.join(spec.probe).exists() {
            tracing::warn!(
                "Module {} installed but {} is missing from {}",
                key,
                spec.probe,
                dest.display()
            );
        }
        Ok(())
    }

    fn install_path(&self, key: &str) -> Result<PathBuf, BuildError> {
        let spec = self.spec(key)?;

        if let Some(path) = spec.path {
            return Ok(path);
        }
        if spec.system {
            return self.locate_system(&spec);
        }
        Ok(self.managed_dir(&spec))
    }
}
