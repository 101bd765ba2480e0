//! # Collector Module
//!
//! Gathers raw platform facts into a [`SystemData`].
//!
//! ## Failure semantics
//!
//! Only two conditions are fatal:
//! - the host identity query fails (`IdentityUnavailable`)
//! - the device directory cannot be opened (`DeviceDirectoryUnavailable`)
//!
//! Everything after that is best effort. A device that is missing, not a
//! character device, not openable, or that rejects the resource query is
//! skipped, as is any connector whose detail query fails. No retries.

use crate::platform::{GraphicsDevice, Platform};
use crate::primitives::{DEFAULT_CARD_PREFIX, DEFAULT_DEVICE_DIR};
use crate::{CollectionError, SystemData};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Where and what the collector scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Directory holding graphics device nodes.
    pub device_dir: PathBuf,
    /// Filename prefix selecting card nodes inside `device_dir`.
    pub card_prefix: String,
    /// Firmware family supplied by the caller; the collector does not detect it.
    pub firmware: Option<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            card_prefix: DEFAULT_CARD_PREFIX.to_string(),
            firmware: None,
        }
    }
}

// =============================================================================
// COLLECTOR
// =============================================================================

/// Collects [`SystemData`] through a [`Platform`].
///
/// Stateless between calls: every `collect()` starts from scratch.
#[derive(Debug, Clone)]
pub struct Collector<P: Platform> {
    platform: P,
    config: CollectorConfig,
}

impl<P: Platform> Collector<P> {
    /// Create a collector over the given platform.
    #[must_use]
    pub fn new(platform: P, config: CollectorConfig) -> Self {
        Self { platform, config }
    }

    /// Get the active configuration.
    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Run one collection pass.
    pub fn collect(&self) -> Result<SystemData, CollectionError> {
        let identity = self.platform.host_identity().map_err(|e| {
            tracing::warn!("Host identity query failed: {}", e);
            CollectionError::IdentityUnavailable(e.to_string())
        })?;

        let device_dir = &self.config.device_dir;
        let entries = self.platform.list_dir(device_dir).map_err(|e| {
            tracing::warn!("Cannot open device directory {:?}: {}", device_dir, e);
            CollectionError::DeviceDirectoryUnavailable {
                path: device_dir.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let cards = self.matching_entries(entries);
        tracing::debug!(
            "Scanning {} card node(s) under {:?}",
            cards.len(),
            device_dir
        );

        let mut connector_types = Vec::new();
        for name in cards {
            let path = device_dir.join(&name);
            connector_types.extend(self.scan_device(&path));
        }

        Ok(SystemData::new(
            &identity.os_name,
            &identity.architecture,
            self.config.firmware.as_deref().unwrap_or(""),
            connector_types,
        ))
    }

    /// Keep entries carrying the card prefix, sorted for a stable scan order.
    fn matching_entries(&self, mut entries: Vec<OsString>) -> Vec<OsString> {
        let prefix = self.config.card_prefix.as_bytes();
        entries.retain(|name| name.as_encoded_bytes().starts_with(prefix));
        entries.sort();
        entries
    }

    /// Connector types of one device; empty on any device-level failure.
    fn scan_device(&self, path: &Path) -> Vec<u32> {
        if !self.platform.is_char_device(path) {
            tracing::debug!("Skipping {:?}: not a character device", path);
            return Vec::new();
        }

        let device = match self.platform.open_device(path) {
            Ok(device) => device,
            Err(e) => {
                tracing::debug!("Skipping {:?}: open failed: {}", path, e);
                return Vec::new();
            }
        };

        let connector_ids = match device.connector_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!("Skipping {:?}: resource query failed: {}", path, e);
                return Vec::new();
            }
        };

        let types: Vec<u32> = connector_ids
            .into_iter()
            .filter_map(|id| match device.connector_type(id) {
                Ok(connector_type) => Some(connector_type),
                Err(e) => {
                    tracing::debug!("Skipping connector {} on {:?}: {}", id, path, e);
                    None
                }
            })
            .collect();

        tracing::debug!("{:?}: {} connector(s)", path, types.len());
        types
        // `device` drops here, closing the handle before the next entry.
    }
}

#[cfg(target_os = "linux")]
impl Collector<crate::platform::LinuxPlatform> {
    /// Collector over the running kernel with the given configuration.
    #[must_use]
    pub fn system(config: CollectorConfig) -> Self {
        Self::new(crate::platform::LinuxPlatform, config)
    }
}

/// Collect platform facts from the running system with default paths.
#[cfg(target_os = "linux")]
pub fn collect() -> Result<SystemData, CollectionError> {
    Collector::system(CollectorConfig::default()).collect()
}

// =============================================================================
// TESTS
// =============================================================================
