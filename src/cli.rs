//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blogen static blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared input-directory arguments for Build and Tags commands
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Input directory with pages (markdown page folders)
    #[arg(long, default_value = "")]
    pub pages: PathBuf,

    /// Input directory with metadata (settings, language, tags, stacks)
    #[arg(long, default_value = ".metadata")]
    pub metadata: PathBuf,

    /// Input directory with a skin (templates & assets)
    #[arg(long, default_value = ".skin")]
    pub skin: PathBuf,

    /// Override the skin's assets directory
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Clears the output directory, then builds the whole blog into it
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory to write generated files in
        #[arg(long)]
        output: PathBuf,

        /// External url of the blog; overrides the `url` metadata setting
        #[arg(long)]
        url: Option<String>,

        /// Serve the output directory after building
        #[arg(long)]
        serve: bool,
    },

    /// Prints every tag used by at least one note
    Tags {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_tags(&self) -> bool {
        matches!(self.command, Commands::Tags { .. })
    }
}
