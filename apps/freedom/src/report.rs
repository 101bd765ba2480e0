//! # Report Rendering
//!
//! Turns core records into what the CLI prints: serializable report structs
//! for JSON mode and plain-text renderings otherwise.

use freedom_core::{Category, FreedomCode, FreedomPolicy, SystemData, SystemFreedom};
use serde::{Deserialize, Serialize};

use crate::config::PolicySection;

// =============================================================================
// SYSTEM DATA REPORT
// =============================================================================

/// A connector with its decoded name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorEntry {
    pub code: u32,
    pub name: String,
}

/// Collected platform facts, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataReport {
    pub os_name: String,
    pub architecture: String,
    pub firmware: String,
    pub connectors: Vec<ConnectorEntry>,
}

impl DataReport {
    /// Build from a collected record.
    #[must_use]
    pub fn from_data(data: &SystemData) -> Self {
        Self {
            os_name: data.os_name().to_string(),
            architecture: data.architecture().to_string(),
            firmware: data.firmware().to_string(),
            connectors: data
                .connector_kinds()
                .into_iter()
                .map(|kind| ConnectorEntry {
                    code: kind.code(),
                    name: kind.to_string(),
                })
                .collect(),
        }
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("System Data\n");
        out.push_str(&format!("  OS:           {}\n", or_dash(&self.os_name)));
        out.push_str(&format!("  Architecture: {}\n", or_dash(&self.architecture)));
        out.push_str(&format!("  Firmware:     {}\n", or_dash(&self.firmware)));
        out.push_str(&format!("  Connectors:   {}\n", self.connectors.len()));
        for connector in &self.connectors {
            out.push_str(&format!("    - {} (type {})\n", connector.name, connector.code));
        }
        out
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

// =============================================================================
// FREEDOM REPORT
// =============================================================================

/// How many categories landed on each code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub open: usize,
    pub proprietary: usize,
    pub unknown: usize,
}

impl Tally {
    /// Count the category codes of a classification.
    #[must_use]
    pub fn of(freedom: &SystemFreedom) -> Self {
        freedom
            .categories()
            .into_iter()
            .fold(Self::default(), |mut tally, code| {
                match code {
                    FreedomCode::Open => tally.open += 1,
                    FreedomCode::Proprietary => tally.proprietary += 1,
                    FreedomCode::Unknown => tally.unknown += 1,
                }
                tally
            })
    }
}

/// Classification together with the facts it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreedomReport {
    pub system: DataReport,
    pub freedom: SystemFreedom,
    pub tally: Tally,
}

impl FreedomReport {
    /// Build from a record and its classification.
    #[must_use]
    pub fn new(data: &SystemData, freedom: SystemFreedom) -> Self {
        Self {
            system: DataReport::from_data(data),
            tally: Tally::of(&freedom),
            freedom,
        }
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn render_text(&self) -> String {
        let rows = [
            (Category::Os, &self.system.os_name, self.freedom.os),
            (
                Category::Architecture,
                &self.system.architecture,
                self.freedom.architecture,
            ),
            (Category::Firmware, &self.system.firmware, self.freedom.firmware),
        ];

        let mut out = String::new();
        out.push_str("System Freedom\n");
        for (category, value, code) in rows {
            out.push_str(&format!(
                "  {:<13} {:<20} {}\n",
                format!("{}:", category),
                or_dash(value),
                code
            ));
        }
        out.push_str(&format!(
            "  Connectors:   {} detected (not classified)\n",
            self.system.connectors.len()
        ));
        out.push_str(&format!(
            "\nTally: {} open, {} proprietary, {} unknown\n",
            self.tally.open, self.tally.proprietary, self.tally.unknown
        ));
        out
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// `[policy]` wrapper so the rendered text is a valid config file.
#[derive(Serialize)]
struct PolicyFile {
    policy: PolicySection,
}

/// Render a policy as a `[policy]` config section that reproduces it exactly.
pub fn render_policy_toml(policy: &FreedomPolicy) -> Result<String, toml::ser::Error> {
    toml::to_string(&PolicyFile {
        policy: PolicySection::standalone(policy),
    })
}
