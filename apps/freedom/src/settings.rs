//! # Settings
//!
//! Effective run settings and the time-bounded collection wrapper.
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! command-line flags.

use crate::config::AppConfig;
use crate::error::CliError;
use freedom_core::{Collector, CollectorConfig, FreedomPolicy, Platform, SystemData};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on a collection pass.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// OVERRIDES
// =============================================================================

/// Values supplied on the command line. `None` leaves the config value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// Explicitly named config file; it must exist.
    pub config: Option<PathBuf>,
    pub device_dir: Option<PathBuf>,
    pub card_prefix: Option<String>,
    pub firmware: Option<String>,
    pub json_mode: bool,
    pub timeout: Duration,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            config: None,
            device_dir: None,
            card_prefix: None,
            firmware: None,
            json_mode: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Effective settings: defaults, then config file, then CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub collector: CollectorConfig,
    pub policy: FreedomPolicy,
    pub json_mode: bool,
    pub timeout: Duration,
}

impl Settings {
    /// Load the config file (`overrides.config`, else `default_file` if present)
    /// and layer the flag overrides on top.
    pub fn resolve(overrides: &Overrides, default_file: &Path) -> Result<Self, CliError> {
        let (config, loaded_from) =
            AppConfig::load_or_default(overrides.config.as_deref(), default_file)?;
        match &loaded_from {
            Some(path) => tracing::debug!("Loaded config from {:?}", path),
            None => tracing::debug!("No config file, using built-in defaults"),
        }

        let mut collector = config.collector_config();
        if let Some(dir) = &overrides.device_dir {
            collector.device_dir = dir.clone();
        }
        if let Some(prefix) = &overrides.card_prefix {
            collector.card_prefix = prefix.clone();
        }
        if let Some(firmware) = &overrides.firmware {
            collector.firmware = Some(firmware.clone());
        }

        Ok(Self {
            collector,
            policy: config.policy()?,
            json_mode: overrides.json_mode,
            timeout: overrides.timeout,
        })
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

/// Run the blocking collector on a worker thread, bounded by `timeout`.
///
/// A device query that never returns leaves the worker blocked. The binary
/// exits on error, so the worker is abandoned rather than joined.
pub async fn collect_with_timeout<P>(
    collector: Collector<P>,
    timeout: Duration,
) -> Result<SystemData, CliError>
where
    P: Platform + Send + 'static,
{
    let worker = tokio::task::spawn_blocking(move || collector.collect());

    match tokio::time::timeout(timeout, worker).await {
        Err(_) => {
            tracing::warn!("Collection did not finish within {:?}", timeout);
            Err(CliError::Timeout(timeout))
        }
        Ok(Err(join_error)) => Err(CliError::Worker(join_error.to_string())),
        Ok(Ok(result)) => Ok(result?),
    }
}
