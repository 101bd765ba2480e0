//! # Freedom CLI Module
//!
//! This module implements the CLI interface for Freedom.
//!
//! ## Available Commands
//!
//! - `collect` - Show raw platform facts
//! - `classify` - Classify platform facts (default)
//! - `policy` - Show the effective classification policy

mod commands;

use clap::{Parser, Subcommand};
use freedom::config::{CONFIG_ENV, DEFAULT_CONFIG_FILE};
use freedom::settings::{Overrides, Settings};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use commands::*;
pub use freedom::error::CliError;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Freedom - how much of this machine is open?
///
/// Collects the OS, CPU architecture, firmware and display connectors, and
/// classifies each as open, proprietary or unknown.
#[derive(Parser, Debug)]
#[command(name = "freedom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML config file (overrides FREEDOM_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding graphics device nodes
    #[arg(long, global = true)]
    pub device_dir: Option<PathBuf>,

    /// Filename prefix of card nodes
    #[arg(long, global = true)]
    pub card_prefix: Option<String>,

    /// Firmware family of this machine (e.g. Coreboot, UEFI)
    #[arg(long, global = true)]
    pub firmware: Option<String>,

    /// Seconds to wait for device collection before giving up
    #[arg(short, long, global = true, default_value = "10")]
    pub timeout: u64,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect and show raw platform facts
    Collect,

    /// Classify platform facts
    Classify {
        /// Classify a saved `collect --json-mode` payload instead of this machine
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the effective classification policy as TOML
    Policy,
}

impl Cli {
    /// Flag values for settings resolution. `FREEDOM_CONFIG` stands in for
    /// a missing `--config`.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self
                .config
                .clone()
                .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from)),
            device_dir: self.device_dir.clone(),
            card_prefix: self.card_prefix.clone(),
            firmware: self.firmware.clone(),
            json_mode: self.json_mode,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::resolve(&cli.overrides(), Path::new(DEFAULT_CONFIG_FILE))?;

    match cli.command {
        Some(Commands::Collect) => cmd_collect(&settings).await,
        Some(Commands::Classify { input }) => cmd_classify(&settings, input.as_deref()).await,
        Some(Commands::Policy) => cmd_policy(&settings),
        None => cmd_classify(&settings, None).await,
    }
}
