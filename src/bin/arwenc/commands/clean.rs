//! `arwenc clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use arwenc::ops::clean;
use arwenc::util::GlobalContext;

pub fn execute(args: CleanArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let removed = clean(&ctx.project_dir(args.path.as_deref()))?;
    if removed.is_empty() {
        eprintln!("     Nothing to clean");
    }
    for path in removed {
        eprintln!("     Removed {}", path.display());
    }

    Ok(())
}
