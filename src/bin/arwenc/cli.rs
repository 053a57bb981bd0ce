//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// arwenc - builds smart-contract projects into Arwen VM bytecode
#[derive(Parser)]
#[command(name = "arwenc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the contract project in a directory
    Build(BuildArgs),

    /// Print the detected source kind of a directory
    Detect(DetectArgs),

    /// Provision toolchain modules
    Install(InstallArgs),

    /// Remove derived artifacts (.ll .o .wasm .hex .hex.arwen)
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Build with debug flags and the debug host-function list
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Module keys (llvm-for-c, soll, llvm-for-soll, rust)
    #[arg(required = true)]
    pub modules: Vec<String>,

    /// Remove downloaded modules first and fetch them again
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
