mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Generate {
            common,
            override_existing,
            templates,
        } => commands::generate::run(common, override_existing, templates),
        Commands::Cleanup { common } => commands::cleanup::run(common),
    }
}
