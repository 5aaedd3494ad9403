//! # Disclosure Kinds
//!
//! The three threshold disclosures an investigator can request. They run
//! the same predicate; a kind contributes only a name and the range of
//! values a report draft may hold for it. The predicate itself compares
//! any two values, so a lower minimum never turns a passing claim into a
//! failing one.
//!
//! | Kind | Unit | Bounds |
//! |---|---|---|
//! | `Severity` | 1 (minor) to 10 (critical) | `1..=10` |
//! | `FinancialImpact` | thousands of currency units | `0..=u64::MAX` |
//! | `WitnessCount` | corroborating witnesses | `0..=1_000_000` |

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which attribute of a report a threshold disclosure speaks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureKind {
    Severity,
    FinancialImpact,
    WitnessCount,
}

impl DisclosureKind {
    pub const ALL: [DisclosureKind; 3] = [
        DisclosureKind::Severity,
        DisclosureKind::FinancialImpact,
        DisclosureKind::WitnessCount,
    ];

    /// Stable identifier, matching the circuit names of the deployed contract.
    pub fn name(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::FinancialImpact => "financial_impact",
            Self::WitnessCount => "witness_count",
        }
    }

    /// Human-readable label for presentation layers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Severity => "Severity",
            Self::FinancialImpact => "Financial impact ($K)",
            Self::WitnessCount => "Witness count",
        }
    }

    /// Inclusive range of values accepted when a report is drafted.
    pub fn bounds(self) -> RangeInclusive<u64> {
        match self {
            Self::Severity => 1..=10,
            Self::FinancialImpact => 0..=u64::MAX,
            Self::WitnessCount => 0..=1_000_000,
        }
    }

    pub fn contains(self, value: u64) -> bool {
        self.bounds().contains(&value)
    }
}

impl fmt::Display for DisclosureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisclosureKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "severity" => Ok(Self::Severity),
            "financial" | "financial_impact" | "financial-impact" => Ok(Self::FinancialImpact),
            "witnesses" | "witness_count" | "witness-count" => Ok(Self::WitnessCount),
            other => Err(CoreError::UnknownDisclosureKind(other.to_string())),
        }
    }
}
