//! # Classifier Module
//!
//! Maps raw [`SystemData`] fields to [`FreedomCode`]s through a lookup table.
//!
//! ## Reference Policy
//!
//! | Category | Value | Code |
//! |----------|-------|------|
//! | os | `Linux`, `BSD` | 1 (open) |
//! | os | `Windows`, `MacOS` | 0 (proprietary) |
//! | architecture | `RISC-V` | 1 (open) |
//! | architecture | `x86`, `arm` | 0 (proprietary) |
//! | firmware | `Coreboot` | 1 (open) |
//!
//! Anything else is -1 (unknown).
//!
//! ## Known Limitation
//!
//! Matching is exact and case-sensitive, with no normalization. Real kernels
//! report `x86_64`, `aarch64` and `Darwin`, none of which the reference table
//! recognizes. Callers that want them classified add entries to a
//! [`FreedomPolicy`] rather than relying on the classifier to guess.
//!
//! Each category stands alone; combining codes into an aggregate score is
//! left to the caller.

use crate::{ClassificationError, FreedomCode, SystemData, SystemFreedom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CATEGORY
// =============================================================================

/// A classified platform attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Os,
    Architecture,
    Firmware,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 3] = [Category::Os, Category::Architecture, Category::Firmware];

    /// Get the category name used in config files and reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Category::Os => "os",
            Category::Architecture => "architecture",
            Category::Firmware => "firmware",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// Exact-match lookup tables, one per category.
///
/// Uses BTreeMap so the table serializes in a stable order. Deserialized
/// entries are validated the same way as [`FreedomPolicy::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyTables")]
pub struct FreedomPolicy {
    os: BTreeMap<String, FreedomCode>,
    architecture: BTreeMap<String, FreedomCode>,
    firmware: BTreeMap<String, FreedomCode>,
}

/// Unvalidated wire form of [`FreedomPolicy`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyTables {
    #[serde(default)]
    os: BTreeMap<String, FreedomCode>,
    #[serde(default)]
    architecture: BTreeMap<String, FreedomCode>,
    #[serde(default)]
    firmware: BTreeMap<String, FreedomCode>,
}

impl TryFrom<PolicyTables> for FreedomPolicy {
    type Error = ClassificationError;

    fn try_from(tables: PolicyTables) -> Result<Self, Self::Error> {
        let mut policy = Self::empty();
        for (category, table) in [
            (Category::Os, tables.os),
            (Category::Architecture, tables.architecture),
            (Category::Firmware, tables.firmware),
        ] {
            for (value, code) in table {
                policy.set(category, value, code)?;
            }
        }
        Ok(policy)
    }
}

impl Default for FreedomPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

impl FreedomPolicy {
    /// A policy with no entries; everything classifies as unknown.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            os: BTreeMap::new(),
            architecture: BTreeMap::new(),
            firmware: BTreeMap::new(),
        }
    }

    /// The built-in reference table.
    #[must_use]
    pub fn reference() -> Self {
        let entries = [
            (Category::Os, "Linux", FreedomCode::Open),
            (Category::Os, "BSD", FreedomCode::Open),
            (Category::Os, "Windows", FreedomCode::Proprietary),
            (Category::Os, "MacOS", FreedomCode::Proprietary),
            (Category::Architecture, "RISC-V", FreedomCode::Open),
            (Category::Architecture, "x86", FreedomCode::Proprietary),
            (Category::Architecture, "arm", FreedomCode::Proprietary),
            (Category::Firmware, "Coreboot", FreedomCode::Open),
        ];

        let mut policy = Self::empty();
        for (category, value, code) in entries {
            policy.table_mut(category).insert(value.to_string(), code);
        }
        policy
    }

    /// Look up a value. Absent values are [`FreedomCode::Unknown`].
    #[must_use]
    pub fn lookup(&self, category: Category, value: &str) -> FreedomCode {
        self.table(category)
            .get(value)
            .copied()
            .unwrap_or(FreedomCode::Unknown)
    }

    /// Add or override an entry. Returns the previous code, if any.
    pub fn set(
        &mut self,
        category: Category,
        value: impl Into<String>,
        code: FreedomCode,
    ) -> Result<Option<FreedomCode>, ClassificationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ClassificationError::InvalidPolicyEntry {
                category: category.name().to_string(),
            });
        }
        Ok(self.table_mut(category).insert(value, code))
    }

    /// Layer `other` over this policy; its entries win on conflict.
    pub fn extend(&mut self, other: FreedomPolicy) -> Result<(), ClassificationError> {
        let FreedomPolicy {
            os,
            architecture,
            firmware,
        } = other;
        for (category, table) in [
            (Category::Os, os),
            (Category::Architecture, architecture),
            (Category::Firmware, firmware),
        ] {
            for (value, code) in table {
                self.set(category, value, code)?;
            }
        }
        Ok(())
    }

    /// Entries of one category, in sorted order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, FreedomCode)> {
        self.table(category)
            .iter()
            .map(|(value, code)| (value.as_str(), *code))
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.os.len() + self.architecture.len() + self.firmware.len()
    }

    /// Whether the policy has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self, category: Category) -> &BTreeMap<String, FreedomCode> {
        match category {
            Category::Os => &self.os,
            Category::Architecture => &self.architecture,
            Category::Firmware => &self.firmware,
        }
    }

    fn table_mut(&mut self, category: Category) -> &mut BTreeMap<String, FreedomCode> {
        match category {
            Category::Os => &mut self.os,
            Category::Architecture => &mut self.architecture,
            Category::Firmware => &mut self.firmware,
        }
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Pure classifier: no I/O, no hidden state.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    policy: FreedomPolicy,
}

impl Classifier {
    /// Create a classifier with the given policy.
    #[must_use]
    pub fn new(policy: FreedomPolicy) -> Self {
        Self { policy }
    }

    /// Create a classifier with the reference policy.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(FreedomPolicy::reference())
    }

    /// Get the active policy.
    #[must_use]
    pub fn policy(&self) -> &FreedomPolicy {
        &self.policy
    }

    /// Classify a record.
    ///
    /// Never fails; unrecognized values are [`FreedomCode::Unknown`].
    /// `connectors` is left empty.
    pub fn classify(&self, data: &SystemData) -> Result<SystemFreedom, ClassificationError> {
        Ok(SystemFreedom {
            os: self.policy.lookup(Category::Os, data.os_name()),
            architecture: self.policy.lookup(Category::Architecture, data.architecture()),
            firmware: self.policy.lookup(Category::Firmware, data.firmware()),
            connectors: Vec::new(),
        })
    }
}

/// Classify a record with the reference policy.
pub fn classify(data: &SystemData) -> Result<SystemFreedom, ClassificationError> {
    Classifier::reference().classify(data)
}

// =============================================================================
// TESTS
// =============================================================================
