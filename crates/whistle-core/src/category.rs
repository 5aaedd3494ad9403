//! Report categories offered to members when drafting a report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Fraud,
    Safety,
    Harassment,
    Corruption,
    Other,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 5] = [
        ReportCategory::Fraud,
        ReportCategory::Safety,
        ReportCategory::Harassment,
        ReportCategory::Corruption,
        ReportCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fraud => "fraud",
            Self::Safety => "safety",
            Self::Harassment => "harassment",
            Self::Corruption => "corruption",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fraud => "Financial Fraud",
            Self::Safety => "Safety Violation",
            Self::Harassment => "Harassment",
            Self::Corruption => "Corruption",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or(CoreError::UnknownCategory(wanted))
    }
}
