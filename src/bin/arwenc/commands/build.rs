//! `arwenc build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use arwenc::ops::build_project_with_context;
use arwenc::util::GlobalContext;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(verbose);

    let directory = ctx.project_dir(args.path.as_deref());
    let config = ctx.load_config(&directory);

    let outcome = build_project_with_context(&directory, args.debug, &ctx, &config)?;

    eprintln!(
        "    Finished `{}` -> {}",
        outcome.kind,
        outcome.artifacts.hex_arwen.display()
    );
    if ctx.is_verbose() {
        for path in [&outcome.artifacts.wasm, &outcome.artifacts.hex] {
            eprintln!("             {}", path.display());
        }
    }

    Ok(())
}
