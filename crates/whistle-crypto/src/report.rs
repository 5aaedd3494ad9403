//! # Report Drafts and Report Hashes
//!
//! A [`ReportDraft`] is the member's full report. It stays on the member's
//! machine; only [`report_hash`] of it is filed on the ledger.
//!
//! ```text
//! report_hash = SHA256( JCS(draft) )
//! ```
//!
//! The draft carries a random 32-byte nonce so that two members filing the
//! same narrative on the same second still produce different hashes, and so
//! that a short description cannot be recovered by hashing guesses.
//! `created_at` is truncated to whole seconds in UTC before hashing.

use chrono::{DateTime, SubsecRound, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use whistle_core::{CanonicalBytes, DisclosureKind, ReportCategory, ReportHash};

use crate::error::CryptoError;

/// The private content of a misconduct report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub category: ReportCategory,
    pub description: String,
    /// 1 (minor) to 10 (critical).
    pub severity: u64,
    /// Estimated impact in thousands of currency units.
    pub financial_impact: u64,
    pub witness_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(with = "nonce_hex")]
    pub nonce: [u8; 32],
}

impl ReportDraft {
    /// Build a draft stamped with the current time and a fresh nonce.
    pub fn new(
        category: ReportCategory,
        description: impl Into<String>,
        severity: u64,
        financial_impact: u64,
        witness_count: u64,
    ) -> Result<Self, CryptoError> {
        let mut nonce = [0u8; 32];
        OsRng.fill_bytes(&mut nonce);
        let draft = Self {
            category,
            description: description.into(),
            severity,
            financial_impact,
            witness_count,
            created_at: Utc::now().trunc_subsecs(0),
            nonce,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Check every numeric field against its disclosure bounds and require
    /// a non-empty description.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.description.trim().is_empty() {
            return Err(CryptoError::InvalidDraft("description is empty".into()));
        }
        for kind in DisclosureKind::ALL {
            let bounds = kind.bounds();
            if !bounds.contains(&self.value_for(kind)) {
                return Err(CryptoError::InvalidDraft(format!(
                    "{kind} must be within {}..={}",
                    bounds.start(),
                    bounds.end()
                )));
            }
        }
        Ok(())
    }

    /// The draft's value for a disclosure kind. This is the private
    /// `actual` input of a threshold disclosure.
    pub fn value_for(&self, kind: DisclosureKind) -> u64 {
        match kind {
            DisclosureKind::Severity => self.severity,
            DisclosureKind::FinancialImpact => self.financial_impact,
            DisclosureKind::WitnessCount => self.witness_count,
        }
    }
}

/// Compute the ledger hash of a report draft.
pub fn report_hash(draft: &ReportDraft) -> Result<ReportHash, CryptoError> {
    let canonical = CanonicalBytes::new(draft)?;
    let hash = Sha256::digest(canonical.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Ok(ReportHash::from_bytes(bytes))
}

mod nonce_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&whistle_core::hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        whistle_core::hex::decode_32(&s).map_err(serde::de::Error::custom)
    }
}
