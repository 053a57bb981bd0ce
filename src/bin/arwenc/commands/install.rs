//! `arwenc install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use arwenc::deps::LocalProvisioner;
use arwenc::ops::{install, InstallOptions};
use arwenc::util::GlobalContext;

pub fn execute(args: InstallArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config(ctx.cwd());
    let provisioner = LocalProvisioner::new(ctx.tools_dir(), config);

    let opts = InstallOptions {
        modules: args.modules,
        force: args.force,
    };

    for module in install(&provisioner, &opts)? {
        eprintln!("   Installed {} -> {}", module.key, module.path.display());
    }

    Ok(())
}
