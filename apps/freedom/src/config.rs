//! # Configuration
//!
//! TOML configuration for the `freedom` binary.
//!
//! ```toml
//! [collector]
//! device_dir = "/dev/dri/"
//! card_prefix = "card"
//! firmware = "Coreboot"
//!
//! [policy]
//! extend_reference = true
//!
//! [policy.architecture]
//! x86_64 = 0
//! aarch64 = 0
//! ```
//!
//! Lookup order: `--config`, then `FREEDOM_CONFIG`, then `./freedom.toml`.
//! An explicitly named file must exist; the default file is optional.

use freedom_core::{
    Category, ClassificationError, CollectorConfig, ErrorStatus, FreedomCode, FreedomPolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FREEDOM_CONFIG";

/// Config file picked up from the working directory when nothing else is named.
pub const DEFAULT_CONFIG_FILE: &str = "freedom.toml";

// =============================================================================
// ERRORS
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Cannot read config file '{path}': {message}")]
    Read { path: String, message: String },

    /// The file is not valid TOML or has unexpected fields.
    #[error("Cannot parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    /// The policy section holds an invalid entry.
    #[error(transparent)]
    Policy(#[from] ClassificationError),
}

impl ErrorStatus for ConfigError {
    fn status_code(&self) -> i32 {
        match self {
            ConfigError::Policy(e) => e.status_code(),
            ConfigError::Read { .. } | ConfigError::Parse { .. } => 4,
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub collector: CollectorSection,
    pub policy: PolicySection,
}

/// `[collector]`: where to look for graphics devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorSection {
    pub device_dir: PathBuf,
    pub card_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
}

impl Default for CollectorSection {
    fn default() -> Self {
        let defaults = CollectorConfig::default();
        Self {
            device_dir: defaults.device_dir,
            card_prefix: defaults.card_prefix,
            firmware: defaults.firmware,
        }
    }
}

/// `[policy]`: lookup table entries layered over (or replacing) the reference table.
///
/// Table names are checked: a misspelled `[policy.*]` table is a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySection {
    /// Start from the reference table (`true`) or from an empty one.
    pub extend_reference: bool,
    pub os: BTreeMap<String, FreedomCode>,
    pub architecture: BTreeMap<String, FreedomCode>,
    pub firmware: BTreeMap<String, FreedomCode>,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            extend_reference: true,
            os: BTreeMap::new(),
            architecture: BTreeMap::new(),
            firmware: BTreeMap::new(),
        }
    }
}

impl PolicySection {
    /// A standalone section reproducing `policy` exactly.
    #[must_use]
    pub fn standalone(policy: &FreedomPolicy) -> Self {
        let table = |category: Category| -> BTreeMap<String, FreedomCode> {
            policy
                .entries(category)
                .map(|(value, code)| (value.to_string(), code))
                .collect()
        };
        Self {
            extend_reference: false,
            os: table(Category::Os),
            architecture: table(Category::Architecture),
            firmware: table(Category::Firmware),
        }
    }

    fn table(&self, category: Category) -> &BTreeMap<String, FreedomCode> {
        match category {
            Category::Os => &self.os,
            Category::Architecture => &self.architecture,
            Category::Firmware => &self.firmware,
        }
    }

    /// Build the effective policy. Every entry goes through `FreedomPolicy::set`.
    pub fn build(&self) -> Result<FreedomPolicy, ClassificationError> {
        let mut policy = if self.extend_reference {
            FreedomPolicy::reference()
        } else {
            FreedomPolicy::empty()
        };
        for category in Category::ALL {
            for (value, code) in self.table(category) {
                policy.set(category, value.as_str(), *code)?;
            }
        }
        Ok(policy)
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Parse configuration text. `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Load the named file, or the default file if present, or built-in defaults.
    ///
    /// Returns the path actually loaded, if any.
    pub fn load_or_default(
        explicit: Option<&Path>,
        default_file: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None if default_file.is_file() => {
                Ok((Self::load(default_file)?, Some(default_file.to_path_buf())))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Collector configuration from the `[collector]` section.
    #[must_use]
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            device_dir: self.collector.device_dir.clone(),
            card_prefix: self.collector.card_prefix.clone(),
            firmware: self.collector.firmware.clone(),
        }
    }

    /// Effective policy from the `[policy]` section.
    pub fn policy(&self) -> Result<FreedomPolicy, ConfigError> {
        Ok(self.policy.build()?)
    }
}
