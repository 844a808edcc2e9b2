use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build an executable.
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// The output file. Defaults to the input file name without its extension.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the LLVM IR to this path, or to stdout for `-`. Without `--output`,
        /// no executable is built.
        #[arg(long, value_name = "PATH")]
        emit_ir: Option<String>,

        /// Seed for the random failure, for reproducible builds.
        #[arg(long)]
        seed: Option<u64>,

        /// Program used instead of clang to build the executable from LLVM IR.
        #[arg(long, value_name = "PROGRAM")]
        backend: Option<String>,

        /// Extra argument passed to the backend program. May be repeated.
        #[arg(long = "backend-arg", value_name = "ARG", allow_hyphen_values = true)]
        backend_args: Vec<String>,

        /// Program that reads every diagnostic message from its stdin.
        #[arg(long, value_name = "PROGRAM")]
        narrate: Option<String>,

        /// Don't print progress messages.
        #[arg(short, long, action)]
        quiet: bool,
    },

    /// Check a program for errors without building it.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[arg(long, short, action)]
    pub source: bool,

    /// Reject indented and empty lines.
    #[arg(long, action)]
    pub strict_layout: bool,
}
