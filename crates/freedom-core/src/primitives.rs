//! # Primitives
//!
//! Default paths and capacity limits for the Freedom CORE.
//!
//! The paths are only defaults: [`CollectorConfig`](crate::CollectorConfig)
//! carries the values actually used, so tests can point the collector at a
//! scratch directory instead of real hardware.

/// Default directory scanned for graphics devices.
pub const DEFAULT_DEVICE_DIR: &str = "/dev/dri/";

/// Default filename prefix of a graphics card node inside [`DEFAULT_DEVICE_DIR`].
///
/// Render nodes (`renderD128`) and control nodes do not carry this prefix
/// and are ignored.
pub const DEFAULT_CARD_PREFIX: &str = "card";

// =============================================================================
// BOUNDED STRING CAPACITIES
// =============================================================================

/// Maximum length of `SystemData::os_name`, in characters.
pub const OS_NAME_CAPACITY: usize = 128;

/// Maximum length of `SystemData::architecture`, in characters.
pub const ARCHITECTURE_CAPACITY: usize = 32;

/// Maximum length of `SystemData::firmware`, in characters.
pub const FIRMWARE_CAPACITY: usize = 64;

/// Upper bound on resource-list re-queries when connectors appear mid-query.
pub const MAX_RESOURCE_ATTEMPTS: usize = 3;

/// Truncate `value` to at most `capacity` characters.
///
/// Truncation is silent and always lands on a char boundary.
#[must_use]
pub fn truncate_chars(value: &str, capacity: usize) -> String {
    match value.char_indices().nth(capacity) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}
