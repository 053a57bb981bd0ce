//! `arwenc detect` command

use anyhow::Result;

use crate::cli::DetectArgs;
use arwenc::ops::classify_directory;
use arwenc::util::GlobalContext;

pub fn execute(args: DetectArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (_, kind) = classify_directory(&ctx.project_dir(args.path.as_deref()))?;

    println!("{}", kind);
    Ok(())
}
