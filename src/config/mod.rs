pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Flags shared by both binaries. What to collect or report on is decided by
/// the config file, not the command line.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(about = "Collect league rosters and report where the players went to college")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roster-etl.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}
