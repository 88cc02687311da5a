//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "An interactive mm:ss countdown timer")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Countdown duration in minutes
    #[arg(short, long, default_value = "25")]
    pub minutes: u64,

    /// Do not start counting down until a `start` command is entered
    #[arg(long)]
    pub paused: bool,

    /// Print timer snapshots as JSON lines instead of mm:ss
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
