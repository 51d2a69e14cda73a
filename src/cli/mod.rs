//! Command-line interface for the ward-server binary.
//!
//! Flags override the corresponding environment variables; everything not
//! given on the command line falls back to [`Config::from_env`] defaults.
//!
//! [`Config::from_env`]: crate::utils::config::Config::from_env

use clap::Parser;

/// Ward - hospital virtual assistant server.
#[derive(Parser, Debug)]
#[command(
    name = "ward-server",
    version,
    about = "Ward - hospital virtual assistant server",
    long_about = "A hospital virtual assistant: keyword triage over patient messages,\n\
                  per-patient symptom memory, and replies from a locally hosted model."
)]
pub struct Cli {
    /// Bind address (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database path (overrides DATABASE_PATH; omit for in-memory)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
