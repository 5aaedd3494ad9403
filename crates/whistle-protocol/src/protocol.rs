//! # Shared Protocol Handle
//!
//! Thread-safe, cloneable handle over [`ProtocolState`].
//!
//! Writes (`register`, `submit_report`) run their whole check-then-append
//! span under one write lock, so two concurrent registrations of the same
//! commitment cannot both succeed. Reads take the read lock and see a
//! consistent snapshot. The lock is `parking_lot` and never held across an
//! `.await`; a panicking writer does not poison it.

use std::sync::Arc;

use parking_lot::RwLock;

use whistle_core::{Commitment, DisclosureKind, ProtocolError, RecordId, ReportHash, WalletRef};
use whistle_crypto::MembershipSecret;

use crate::ledger::ReportRecord;
use crate::operation::{Operation, Outcome};
use crate::snapshot::ProtocolSnapshot;
use crate::state::ProtocolState;

/// Cloneable handle to shared protocol state.
#[derive(Debug, Clone, Default)]
pub struct Protocol {
    state: Arc<RwLock<ProtocolState>>,
}

impl Protocol {
    /// Start from empty registry and ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: ProtocolState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Apply an operation under the lock mode it needs.
    pub fn dispatch(&self, op: Operation) -> Result<Outcome, ProtocolError> {
        let name = op.name();
        let _span = tracing::debug_span!("dispatch", operation = name).entered();
        let op = match self.state.read().evaluate(op) {
            Ok(outcome) => return outcome,
            Err(write) => write,
        };
        self.state.write().apply(op)
    }

    pub fn register(
        &self,
        commitment: Commitment,
        wallet_ref: WalletRef,
    ) -> Result<RecordId, ProtocolError> {
        self.state.write().register(commitment, wallet_ref)
    }

    pub fn prove_membership(&self, secret: &MembershipSecret) -> bool {
        self.state.read().prove_membership(secret)
    }

    pub fn submit_report(
        &self,
        report_hash: ReportHash,
        secret: &MembershipSecret,
    ) -> Result<RecordId, ProtocolError> {
        self.state.write().submit_report(report_hash, secret)
    }

    pub fn verify_report(&self, report_hash: &ReportHash) -> Option<ReportRecord> {
        self.state.read().verify_report(report_hash).cloned()
    }

    pub fn prove_threshold(
        &self,
        kind: DisclosureKind,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.state.read().prove_threshold(kind, minimum, actual, secret)
    }

    pub fn prove_severity(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.state.read().prove_severity(minimum, actual, secret)
    }

    pub fn prove_financial_impact(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.state.read().prove_financial_impact(minimum, actual, secret)
    }

    pub fn prove_witness_count(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.state.read().prove_witness_count(minimum, actual, secret)
    }

    /// Capture the public state.
    pub fn snapshot(&self) -> ProtocolSnapshot {
        ProtocolSnapshot::capture(&self.state.read())
    }

    pub fn member_count(&self) -> usize {
        self.state.read().registry().len()
    }

    pub fn report_count(&self) -> usize {
        self.state.read().ledger().len()
    }
}
