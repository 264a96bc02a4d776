//! Blogen - a static blog generator for Markdown page folders.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod page;
mod pagination;
mod render;
mod serve;
mod utils;

use anyhow::Result;
use build::{build_blog, print_used_tags};
use clap::Parser;
use cli::{Cli, Commands};
use serve::serve_output;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build {
            input,
            output,
            url,
            serve,
        } => {
            let metadata = build_blog(input, output, url.as_deref())?;
            if *serve {
                serve_output(&metadata)?;
            }
            Ok(())
        }
        Commands::Tags { input } => print_used_tags(input),
    }
}
