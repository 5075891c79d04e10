pub mod discover;

use std::path::PathBuf;

use arpsweep_common::config::{Config, DEFAULT_OUTPUT};
use clap::{ArgAction, Parser};

/// The interface and subnet are always detected; flags only shape output.
#[derive(Parser)]
#[command(name = "arpsweep", version)]
#[command(about = "Find live hosts on the local IPv4 subnet with ARP.")]
pub struct CommandLine {
    /// Where to write the discovered devices as JSON
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Log every probe
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print only warnings and the final summary
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> Config {
        Config {
            output: self.output,
            quiet: self.quiet,
            verbose: self.verbose,
            no_progress: self.no_progress,
        }
    }
}
