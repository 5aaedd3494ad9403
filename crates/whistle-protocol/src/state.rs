//! # Protocol State
//!
//! The registry, the ledger and the shared sequence counter, with the
//! protocol operations as methods.
//!
//! ## Write ordering
//!
//! Every committed write consumes exactly one sequence number. The number
//! is reserved before the write is attempted but the counter only advances
//! after the write succeeds, so a rejected operation leaves state untouched.
//!
//! `submit_report` checks for a duplicate hash before checking membership.
//! The ledger is public, so the order reveals nothing, and a duplicate is
//! rejected the same way whoever presents it.

use whistle_core::{
    Commitment, DisclosureKind, ProtocolError, RecordId, ReportHash, SequenceNumber, WalletRef,
};
use whistle_crypto::MembershipSecret;

use crate::circuit::{
    evaluate_threshold, FinancialImpact, Severity, ThresholdCircuit, ThresholdKind, WitnessCount,
};
use crate::ledger::{ReportLedger, ReportRecord};
use crate::registry::MembershipRegistry;

/// Public protocol state.
#[derive(Debug, Clone, Default)]
pub struct ProtocolState {
    pub(crate) registry: MembershipRegistry,
    pub(crate) ledger: ReportLedger,
    pub(crate) next_sequence: SequenceNumber,
}

impl ProtocolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &ReportLedger {
        &self.ledger
    }

    /// The sequence number the next committed write will receive.
    pub fn next_sequence(&self) -> SequenceNumber {
        self.next_sequence
    }

    /// Reserve the current sequence number and compute its successor.
    fn reserve_sequence(&self) -> Result<(SequenceNumber, SequenceNumber), ProtocolError> {
        let at = self.next_sequence;
        let next = at.next().ok_or(ProtocolError::SequenceExhausted)?;
        Ok((at, next))
    }

    /// Add a commitment to the registry.
    pub fn register(
        &mut self,
        commitment: Commitment,
        wallet_ref: WalletRef,
    ) -> Result<RecordId, ProtocolError> {
        match self.try_register(commitment, wallet_ref) {
            Ok((id, at)) => {
                tracing::info!(
                    operation = "register",
                    record_id = id.value(),
                    seq = at.value(),
                    "membership registered"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::debug!(operation = "register", error = %e, "registration rejected");
                Err(e)
            }
        }
    }

    fn try_register(
        &mut self,
        commitment: Commitment,
        wallet_ref: WalletRef,
    ) -> Result<(RecordId, SequenceNumber), ProtocolError> {
        if self.registry.is_registered(&commitment) {
            return Err(ProtocolError::DuplicateCommitment);
        }
        let (at, next) = self.reserve_sequence()?;
        let id = self.registry.register(commitment, wallet_ref, at)?;
        self.next_sequence = next;
        Ok((id, at))
    }

    /// Whether `secret` belongs to a registered member.
    pub fn prove_membership(&self, secret: &MembershipSecret) -> bool {
        let ok = self.registry.contains_secret(secret);
        tracing::debug!(operation = "prove_membership", ok, "membership evaluated");
        ok
    }

    /// File a report hash under a valid membership secret.
    pub fn submit_report(
        &mut self,
        report_hash: ReportHash,
        secret: &MembershipSecret,
    ) -> Result<RecordId, ProtocolError> {
        match self.try_submit(report_hash, secret) {
            Ok((id, at)) => {
                tracing::info!(
                    operation = "submit_report",
                    record_id = id.value(),
                    seq = at.value(),
                    "report filed"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::debug!(operation = "submit_report", error = %e, "report rejected");
                Err(e)
            }
        }
    }

    fn try_submit(
        &mut self,
        report_hash: ReportHash,
        secret: &MembershipSecret,
    ) -> Result<(RecordId, SequenceNumber), ProtocolError> {
        if self.ledger.contains(&report_hash) {
            return Err(ProtocolError::DuplicateReport);
        }
        if !self.registry.contains_secret(secret) {
            return Err(ProtocolError::UnregisteredMembership);
        }
        let (at, next) = self.reserve_sequence()?;
        let id = self.ledger.submit(report_hash, at)?;
        self.next_sequence = next;
        Ok((id, at))
    }

    /// Look up a filed report.
    pub fn verify_report(&self, report_hash: &ReportHash) -> Option<&ReportRecord> {
        self.ledger.verify_report(report_hash)
    }

    /// Evaluate a threshold disclosure of any kind.
    pub fn prove_threshold(
        &self,
        kind: DisclosureKind,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        let result = evaluate_threshold(kind, &self.registry, minimum, actual, secret);
        log_disclosure(kind, minimum, &result);
        result
    }

    fn prove_typed<K: ThresholdKind>(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        let result = ThresholdCircuit::<K>::prove(&self.registry, minimum, actual, secret);
        log_disclosure(K::KIND, minimum, &result);
        result
    }

    /// Severity (1 to 10) is at least `minimum`.
    pub fn prove_severity(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.prove_typed::<Severity>(minimum, actual, secret)
    }

    /// Financial impact is at least `minimum` thousand.
    pub fn prove_financial_impact(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.prove_typed::<FinancialImpact>(minimum, actual, secret)
    }

    /// At least `minimum` witnesses.
    pub fn prove_witness_count(
        &self,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        self.prove_typed::<WitnessCount>(minimum, actual, secret)
    }
}

// The minimum is public input; the actual value is never logged.
fn log_disclosure(kind: DisclosureKind, minimum: u64, result: &Result<bool, ProtocolError>) {
    match result {
        Ok(_) => tracing::debug!(operation = kind.name(), minimum, "disclosure holds"),
        Err(e) => tracing::debug!(operation = kind.name(), minimum, error = %e, "disclosure rejected"),
    }
}
