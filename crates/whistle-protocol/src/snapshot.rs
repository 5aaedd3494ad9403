//! # Public State Snapshots
//!
//! JSON form of the registry, the ledger and the next sequence number.
//! Nothing private appears in a snapshot: the state it captures is public
//! by construction.
//!
//! Loading rebuilds state through the same `register`/`submit` paths that
//! live operations use and then checks the stored ids and sequence numbers
//! against what those paths would have produced. A snapshot that could not
//! have been produced by a valid history is refused.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use whistle_core::{RecordId, SequenceNumber};

use crate::error::SnapshotError;
use crate::ledger::{ReportLedger, ReportRecord};
use crate::registry::{MembershipRecord, MembershipRegistry};
use crate::state::ProtocolState;

/// Serialized public protocol state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSnapshot {
    pub version: u32,
    pub next_sequence: SequenceNumber,
    pub members: Vec<MembershipRecord>,
    pub reports: Vec<ReportRecord>,
}

impl ProtocolSnapshot {
    pub const VERSION: u32 = 1;

    pub fn capture(state: &ProtocolState) -> Self {
        Self {
            version: Self::VERSION,
            next_sequence: state.next_sequence(),
            members: state.registry().records().to_vec(),
            reports: state.ledger().records().to_vec(),
        }
    }

    /// Validate and rebuild protocol state.
    pub fn restore(self) -> Result<ProtocolState, SnapshotError> {
        if self.version != Self::VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut seen = HashSet::new();
        for seq in self
            .members
            .iter()
            .map(|m| m.registered_at)
            .chain(self.reports.iter().map(|r| r.submitted_at))
        {
            if seq >= self.next_sequence {
                return Err(SnapshotError::Corrupt(format!(
                    "{seq} is not below next sequence {}",
                    self.next_sequence
                )));
            }
            if !seen.insert(seq) {
                return Err(SnapshotError::Corrupt(format!("{seq} used twice")));
            }
        }

        let mut registry = MembershipRegistry::new();
        let mut last = None;
        for (pos, m) in self.members.into_iter().enumerate() {
            check_position("member", pos, m.id)?;
            check_increasing("member", &mut last, m.registered_at)?;
            registry
                .register(m.commitment, m.wallet_ref, m.registered_at)
                .map_err(|e| SnapshotError::Corrupt(format!("member {}: {e}", m.id)))?;
        }

        let mut ledger = ReportLedger::new();
        let mut last = None;
        for (pos, r) in self.reports.into_iter().enumerate() {
            check_position("report", pos, r.id)?;
            check_increasing("report", &mut last, r.submitted_at)?;
            ledger
                .submit(r.report_hash, r.submitted_at)
                .map_err(|e| SnapshotError::Corrupt(format!("report {}: {e}", r.id)))?;
        }

        Ok(ProtocolState {
            registry,
            ledger,
            next_sequence: self.next_sequence,
        })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| SnapshotError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl From<&ProtocolState> for ProtocolSnapshot {
    fn from(state: &ProtocolState) -> Self {
        Self::capture(state)
    }
}

fn check_position(what: &str, pos: usize, id: RecordId) -> Result<(), SnapshotError> {
    if id.value() != pos as u64 {
        return Err(SnapshotError::Corrupt(format!(
            "{what} at position {pos} has id {id}"
        )));
    }
    Ok(())
}

fn check_increasing(
    what: &str,
    last: &mut Option<SequenceNumber>,
    seq: SequenceNumber,
) -> Result<(), SnapshotError> {
    if let Some(prev) = *last {
        if seq <= prev {
            return Err(SnapshotError::Corrupt(format!(
                "{what} {seq} does not follow {prev}"
            )));
        }
    }
    *last = Some(seq);
    Ok(())
}
