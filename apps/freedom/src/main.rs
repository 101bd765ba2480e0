//! # Freedom - Platform Freedom Report
//!
//! The main binary around `freedom-core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  apps/freedom (THE BINARY)                │
//! │                                                           │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────┐   │
//! │  │    CLI      │   │   Config    │   │    Reports     │   │
//! │  │   (clap)    │   │   (toml)    │   │ (text / JSON)  │   │
//! │  └──────┬──────┘   └──────┬──────┘   └───────┬────────┘   │
//! │         └─────────────────┼──────────────────┘            │
//! │                           ▼                               │
//! │                  ┌─────────────────┐                      │
//! │                  │  freedom-core   │                      │
//! │                  │  (THE LOGIC)    │                      │
//! │                  └─────────────────┘                      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! freedom                         # classify this machine
//! freedom collect --json-mode     # raw facts as a JSON envelope
//! freedom --firmware Coreboot classify
//! freedom classify -i saved.json
//! freedom policy > freedom.toml
//! ```

mod cli;

use clap::Parser;
use freedom_core::{Envelope, ErrorStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse first so --verbose can pick the default filter.
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    let json_mode = cli.json_mode;
    if let Err(e) = cli::execute(cli).await {
        let status = e.status_code();
        if json_mode {
            let envelope: Envelope<()> = Envelope::failure(e.to_string(), status);
            match serde_json::to_string_pretty(&envelope) {
                Ok(json) => println!("{}", json),
                Err(ser) => tracing::error!("Cannot render error envelope: {}", ser),
            }
        }
        tracing::error!("Error: {}", e);
        std::process::exit(status);
    }
}

/// Initialize tracing: FREEDOM_LOG_FORMAT=json enables machine-parseable output.
///
/// Logs go to stderr; stdout carries the report.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("FREEDOM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "freedom=debug,freedom_core=debug"
    } else {
        "freedom=info,freedom_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
