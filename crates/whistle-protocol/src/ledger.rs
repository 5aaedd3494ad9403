//! # Report Ledger
//!
//! Append-only public set of filed report hashes.
//!
//! ## Unlinkability
//!
//! A [`ReportRecord`] holds the report hash, its position and the sequence
//! number at which it was filed. It has no field for the secret, the
//! commitment, the wallet or the registry record that authorized it, so two
//! filings of the same hash under different valid secrets (against the same
//! prior history) serialize identically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use whistle_core::{ProtocolError, RecordId, ReportHash, SequenceNumber};

/// A filed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: RecordId,
    pub report_hash: ReportHash,
    pub submitted_at: SequenceNumber,
}

/// The public set of filed reports.
#[derive(Debug, Clone, Default)]
pub struct ReportLedger {
    records: Vec<ReportRecord>,
    index: HashMap<ReportHash, usize>,
}

impl ReportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report hash. Fails with `DuplicateReport` if present.
    pub fn submit(
        &mut self,
        report_hash: ReportHash,
        at: SequenceNumber,
    ) -> Result<RecordId, ProtocolError> {
        if self.index.contains_key(&report_hash) {
            return Err(ProtocolError::DuplicateReport);
        }
        let pos = self.records.len();
        let id = RecordId(pos as u64);
        self.index.insert(report_hash, pos);
        self.records.push(ReportRecord {
            id,
            report_hash,
            submitted_at: at,
        });
        Ok(id)
    }

    pub fn contains(&self, report_hash: &ReportHash) -> bool {
        self.index.contains_key(report_hash)
    }

    /// Look up a filed report by hash.
    pub fn verify_report(&self, report_hash: &ReportHash) -> Option<&ReportRecord> {
        self.index.get(report_hash).map(|&pos| &self.records[pos])
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(b: u8) -> ReportHash {
        ReportHash::from_bytes([b; 32])
    }

    #[test]
    fn submit_and_verify() {
        let mut ledger = ReportLedger::new();
        let id = ledger.submit(hash(1), SequenceNumber(4)).unwrap();
        assert_eq!(id, RecordId(0));
        let rec = ledger.verify_report(&hash(1)).unwrap();
        assert_eq!(rec.report_hash, hash(1));
        assert_eq!(rec.submitted_at, SequenceNumber(4));
    }

    #[test]
    fn unknown_hash_not_verified() {
        let ledger = ReportLedger::new();
        assert!(ledger.verify_report(&hash(2)).is_none());
        assert!(!ledger.contains(&hash(2)));
    }

    #[test]
    fn duplicate_report_rejected() {
        let mut ledger = ReportLedger::new();
        ledger.submit(hash(1), SequenceNumber(0)).unwrap();
        assert_eq!(
            ledger.submit(hash(1), SequenceNumber(1)),
            Err(ProtocolError::DuplicateReport)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn submission_order_preserved() {
        let mut ledger = ReportLedger::new();
        for b in [5u8, 3, 9] {
            ledger.submit(hash(b), SequenceNumber(b as u64)).unwrap();
        }
        let order: Vec<_> = ledger.records().iter().map(|r| r.report_hash).collect();
        assert_eq!(order, vec![hash(5), hash(3), hash(9)]);
    }

    #[test]
    fn serialized_record_has_no_member_fields() {
        let mut ledger = ReportLedger::new();
        ledger.submit(hash(1), SequenceNumber(0)).unwrap();
        let value = serde_json::to_value(&ledger.records()[0]).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "report_hash", "submitted_at"]);
    }
}
