//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::CliError;
use freedom::report::{DataReport, FreedomReport, render_policy_toml};
use freedom::settings::{Settings, collect_with_timeout};
use freedom_core::{Classifier, Collector, Envelope, SystemData};
use serde::Serialize;
use std::path::Path;

/// Maximum size of a saved SystemData file accepted by `classify --input`.
const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

/// Collect from the running system within the configured bound.
async fn collect_system(settings: &Settings) -> Result<SystemData, CliError> {
    collect_with_timeout(Collector::system(settings.collector.clone()), settings.timeout).await
}

/// Print a payload as a success envelope, or its text rendering.
fn emit<T: Serialize>(json_mode: bool, payload: T, text: String) -> Result<(), CliError> {
    if json_mode {
        let json = serde_json::to_string_pretty(&Envelope::success(payload))
            .map_err(|e| CliError::Serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", text);
    }
    Ok(())
}

// =============================================================================
// COLLECT COMMAND
// =============================================================================

/// Collect and show raw platform facts.
pub async fn cmd_collect(settings: &Settings) -> Result<(), CliError> {
    let data = collect_system(settings).await?;
    tracing::info!(
        "Collected {} connector(s) from {:?}",
        data.connector_count(),
        settings.collector.device_dir
    );

    let text = DataReport::from_data(&data).render_text();
    emit(settings.json_mode, &data, text)
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Classify this machine, or a saved SystemData file.
pub async fn cmd_classify(settings: &Settings, input: Option<&Path>) -> Result<(), CliError> {
    let data = match input {
        Some(path) => load_system_data(path)?,
        None => collect_system(settings).await?,
    };

    let freedom = Classifier::new(settings.policy.clone()).classify(&data)?;
    let report = FreedomReport::new(&data, freedom);
    tracing::info!(
        "Classified: {} open, {} proprietary, {} unknown",
        report.tally.open,
        report.tally.proprietary,
        report.tally.unknown
    );

    let text = report.render_text();
    emit(settings.json_mode, report, text)
}

/// Load a SystemData record saved by `collect --json-mode`.
///
/// Accepts either the bare record or the full envelope.
fn load_system_data(path: &Path) -> Result<SystemData, CliError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CliError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(CliError::Io(format!(
            "Input file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    if let Ok(envelope) = serde_json::from_str::<Envelope<SystemData>>(&text) {
        return envelope
            .into_result()
            .map_err(|(_, message)| CliError::Serialization(message));
    }
    serde_json::from_str(&text).map_err(|e| CliError::Serialization(e.to_string()))
}

// =============================================================================
// POLICY COMMAND
// =============================================================================

/// Show the effective policy.
pub fn cmd_policy(settings: &Settings) -> Result<(), CliError> {
    let text = render_policy_toml(&settings.policy)
        .map_err(|e| CliError::Serialization(e.to_string()))?;
    emit(settings.json_mode, &settings.policy, text)
}
