//! # Core Type Definitions
//!
//! This module contains all data types shared by the collector and classifier:
//! - Raw platform facts (`SystemData`)
//! - Derived classification (`FreedomCode`, `SystemFreedom`)
//! - Display connector decoding (`ConnectorKind`)
//! - Result envelope (`Envelope`, `ErrorStatus`)
//! - Error types (`CollectionError`, `ClassificationError`)
//!
//! ## Ownership
//!
//! Records are created fresh on every call, hold no back-references and are
//! owned solely by the caller after return. Dropping a record releases its
//! connector list exactly once, including records that were never populated.

mod connector;
mod envelope;

pub use connector::ConnectorKind;
pub use envelope::{Envelope, ErrorStatus};

use crate::primitives::{
    ARCHITECTURE_CAPACITY, FIRMWARE_CAPACITY, OS_NAME_CAPACITY, truncate_chars,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// FREEDOM CODE
// =============================================================================

/// Ordinal freedom classification of a single platform attribute.
///
/// Serialized as the bare integer code (`-1`, `0`, `1`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i8", into = "i8")]
pub enum FreedomCode {
    /// Not present in the policy table.
    #[default]
    Unknown,
    /// Known to be proprietary.
    Proprietary,
    /// Known to be openly specified or open source.
    Open,
}

impl FreedomCode {
    /// Get the ordinal integer code.
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            FreedomCode::Unknown => -1,
            FreedomCode::Proprietary => 0,
            FreedomCode::Open => 1,
        }
    }

    /// Get the lowercase label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FreedomCode::Unknown => "unknown",
            FreedomCode::Proprietary => "proprietary",
            FreedomCode::Open => "open",
        }
    }
}

impl TryFrom<i8> for FreedomCode {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(FreedomCode::Unknown),
            0 => Ok(FreedomCode::Proprietary),
            1 => Ok(FreedomCode::Open),
            other => Err(format!("invalid freedom code {other}, expected -1, 0 or 1")),
        }
    }
}

impl From<FreedomCode> for i8 {
    fn from(code: FreedomCode) -> Self {
        code.code()
    }
}

impl std::fmt::Display for FreedomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

// =============================================================================
// SYSTEM DATA
// =============================================================================

/// Raw platform facts produced by the collector.
///
/// Strings are bounded: values longer than the capacities in
/// [`primitives`](crate::primitives) are silently truncated on construction,
/// including when a record is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SystemDataRepr")]
pub struct SystemData {
    os_name: String,
    architecture: String,
    firmware: String,
    connector_types: Vec<u32>,
}

#[derive(Deserialize)]
struct SystemDataRepr {
    os_name: String,
    architecture: String,
    #[serde(default)]
    firmware: String,
    #[serde(default)]
    connector_types: Vec<u32>,
}

impl From<SystemDataRepr> for SystemData {
    fn from(repr: SystemDataRepr) -> Self {
        Self::new(
            &repr.os_name,
            &repr.architecture,
            &repr.firmware,
            repr.connector_types,
        )
    }
}

impl SystemData {
    /// Create a record, truncating each string to its capacity.
    #[must_use]
    pub fn new(
        os_name: &str,
        architecture: &str,
        firmware: &str,
        connector_types: Vec<u32>,
    ) -> Self {
        Self {
            os_name: truncate_chars(os_name, OS_NAME_CAPACITY),
            architecture: truncate_chars(architecture, ARCHITECTURE_CAPACITY),
            firmware: truncate_chars(firmware, FIRMWARE_CAPACITY),
            connector_types,
        }
    }

    /// Create an empty record (all strings empty, no connectors).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Host kernel/OS identifier, e.g. `"Linux"`.
    #[must_use]
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// CPU architecture identifier, e.g. `"x86_64"`.
    #[must_use]
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Firmware family identifier; empty when undetermined.
    #[must_use]
    pub fn firmware(&self) -> &str {
        &self.firmware
    }

    /// Connector-type codes, one per successfully queried connector.
    #[must_use]
    pub fn connector_types(&self) -> &[u32] {
        &self.connector_types
    }

    /// Number of connectors collected.
    #[must_use]
    pub fn connector_count(&self) -> usize {
        self.connector_types.len()
    }

    /// Decode the connector codes into named kinds.
    #[must_use]
    pub fn connector_kinds(&self) -> Vec<ConnectorKind> {
        self.connector_types
            .iter()
            .map(|&code| ConnectorKind::from_code(code))
            .collect()
    }

    /// Consume the record, keeping only the connector list.
    #[must_use]
    pub fn into_connector_types(self) -> Vec<u32> {
        self.connector_types
    }
}

// =============================================================================
// SYSTEM FREEDOM
// =============================================================================

/// Per-category freedom codes derived from a [`SystemData`].
///
/// `connectors` is reserved for connector-level classification and is left
/// empty by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemFreedom {
    /// Operating system code.
    pub os: FreedomCode,
    /// CPU architecture code.
    pub architecture: FreedomCode,
    /// Firmware code.
    pub firmware: FreedomCode,
    /// Per-connector codes.
    #[serde(default)]
    pub connectors: Vec<FreedomCode>,
}

impl SystemFreedom {
    /// Create a record with every category unknown.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// The three category codes, in `os, architecture, firmware` order.
    #[must_use]
    pub fn categories(&self) -> [FreedomCode; 3] {
        [self.os, self.architecture, self.firmware]
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Fatal failures of platform collection.
///
/// Per-device problems (permission denied, not a character device, failed
/// resource query) are never reported here; they only reduce the yield.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The host identity query (`uname`) failed.
    #[error("System detection failure: host identity query failed: {0}")]
    IdentityUnavailable(String),

    /// The device directory could not be opened.
    #[error("System detection failure: device directory '{path}' unavailable: {reason}")]
    DeviceDirectoryUnavailable { path: String, reason: String },
}

impl ErrorStatus for CollectionError {
    fn status_code(&self) -> i32 {
        match self {
            CollectionError::IdentityUnavailable(_) => 1,
            CollectionError::DeviceDirectoryUnavailable { .. } => 2,
        }
    }
}

/// Classification failures.
///
/// Classifying a record never fails; these errors come from building a
/// policy table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassificationError {
    /// A policy entry had an empty match value.
    #[error("Invalid policy entry for {category}: match value must not be empty")]
    InvalidPolicyEntry { category: String },
}

impl ErrorStatus for ClassificationError {
    fn status_code(&self) -> i32 {
        match self {
            ClassificationError::InvalidPolicyEntry { .. } => 3,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
