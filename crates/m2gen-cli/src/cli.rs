use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "m2gen",
    about = "Generate a Maven settings.xml for CI jobs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build settings.xml from the inputs and write it
    Generate {
        #[command(flatten)]
        common: CommonArgs,

        /// Replace an existing settings file
        #[arg(long = "override")]
        override_existing: bool,

        /// Load templates from this directory instead of the built-in set
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,
    },

    /// Remove the settings file written by an earlier generate
    Cleanup {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
pub struct CommonArgs {
    /// Set an input (can be repeated: -i servers='[...]')
    #[arg(short, long = "input", value_name = "NAME=VALUE")]
    pub input: Vec<String>,

    /// TOML file with inputs, overridden by --input
    #[arg(long, value_name = "FILE")]
    pub inputs_file: Option<PathBuf>,

    /// Settings file location (default: ~/.m2/settings.xml)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Where run state is kept outside GitHub Actions
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Log format (default: actions when GITHUB_ACTIONS=true)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Console,
    Actions,
}
