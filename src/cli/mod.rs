//! CLI interface for fastloop
//!
//! Without a subcommand, runs a single decision cycle (dry run unless
//! `--live`). The `config` subcommand prints the resolved configuration.

mod run;

pub use run::{render_outcome, RunArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fastloop")]
#[command(about = "Single-pass momentum trader for Polymarket crypto up/down markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration
    Config,
}
