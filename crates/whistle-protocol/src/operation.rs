//! # Operations
//!
//! The closed set of protocol operations as a single enum, and their
//! outcomes. [`ProtocolState::apply`] is the one place an operation is
//! routed to its implementation; the lock-guarded
//! [`Protocol::dispatch`](crate::Protocol::dispatch) builds on it.
//!
//! Operations that carry a secret own it. Applying the operation consumes
//! it, so the secret is zeroized as soon as the evaluation returns.

use std::fmt;

use whistle_core::{Commitment, DisclosureKind, ProtocolError, RecordId, ReportHash, WalletRef};
use whistle_crypto::MembershipSecret;

use crate::state::ProtocolState;

/// A protocol operation with its inputs.
pub enum Operation {
    Register {
        commitment: Commitment,
        wallet_ref: WalletRef,
    },
    ProveMembership {
        secret: MembershipSecret,
    },
    SubmitReport {
        report_hash: ReportHash,
        secret: MembershipSecret,
    },
    ProveSeverity {
        minimum: u64,
        actual: u64,
        secret: MembershipSecret,
    },
    ProveFinancialImpact {
        minimum: u64,
        actual: u64,
        secret: MembershipSecret,
    },
    ProveWitnessCount {
        minimum: u64,
        actual: u64,
        secret: MembershipSecret,
    },
}

/// Result of a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Registered(RecordId),
    Membership(bool),
    ReportFiled(RecordId),
    Disclosure(bool),
}

impl Operation {
    /// Build the threshold operation for a runtime-selected kind.
    pub fn disclosure(
        kind: DisclosureKind,
        minimum: u64,
        actual: u64,
        secret: MembershipSecret,
    ) -> Self {
        match kind {
            DisclosureKind::Severity => Self::ProveSeverity {
                minimum,
                actual,
                secret,
            },
            DisclosureKind::FinancialImpact => Self::ProveFinancialImpact {
                minimum,
                actual,
                secret,
            },
            DisclosureKind::WitnessCount => Self::ProveWitnessCount {
                minimum,
                actual,
                secret,
            },
        }
    }

    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register_membership",
            Self::ProveMembership { .. } => "prove_membership",
            Self::SubmitReport { .. } => "submit_report",
            Self::ProveSeverity { .. } => "prove_severity",
            Self::ProveFinancialImpact { .. } => "prove_financial_impact",
            Self::ProveWitnessCount { .. } => "prove_witness_count",
        }
    }

    /// Whether applying this operation may change state.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Register { .. } | Self::SubmitReport { .. })
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register {
                commitment,
                wallet_ref,
            } => f
                .debug_struct("Register")
                .field("commitment", commitment)
                .field("wallet_ref", wallet_ref)
                .finish(),
            Self::ProveMembership { .. } => f.debug_struct("ProveMembership").finish_non_exhaustive(),
            Self::SubmitReport { report_hash, .. } => f
                .debug_struct("SubmitReport")
                .field("report_hash", report_hash)
                .finish_non_exhaustive(),
            Self::ProveSeverity { minimum, .. }
            | Self::ProveFinancialImpact { minimum, .. }
            | Self::ProveWitnessCount { minimum, .. } => f
                .debug_struct(self.name())
                .field("minimum", minimum)
                .finish_non_exhaustive(),
        }
    }
}

impl ProtocolState {
    /// Route an operation to its implementation.
    pub fn apply(&mut self, op: Operation) -> Result<Outcome, ProtocolError> {
        match op {
            Operation::Register {
                commitment,
                wallet_ref,
            } => self.register(commitment, wallet_ref).map(Outcome::Registered),
            Operation::SubmitReport {
                report_hash,
                secret,
            } => self
                .submit_report(report_hash, &secret)
                .map(Outcome::ReportFiled),
            read => match self.evaluate(read) {
                Ok(outcome) => outcome,
                Err(write) => self.apply(write),
            },
        }
    }

    /// Evaluate a read-only operation. A write operation is handed back
    /// untouched so the caller can route it under a write lock.
    pub(crate) fn evaluate(
        &self,
        op: Operation,
    ) -> Result<Result<Outcome, ProtocolError>, Operation> {
        let outcome = match op {
            Operation::ProveMembership { secret } => {
                Ok(Outcome::Membership(self.prove_membership(&secret)))
            }
            Operation::ProveSeverity {
                minimum,
                actual,
                secret,
            } => self
                .prove_severity(minimum, actual, &secret)
                .map(Outcome::Disclosure),
            Operation::ProveFinancialImpact {
                minimum,
                actual,
                secret,
            } => self
                .prove_financial_impact(minimum, actual, &secret)
                .map(Outcome::Disclosure),
            Operation::ProveWitnessCount {
                minimum,
                actual,
                secret,
            } => self
                .prove_witness_count(minimum, actual, &secret)
                .map(Outcome::Disclosure),
            write @ (Operation::Register { .. } | Operation::SubmitReport { .. }) => {
                return Err(write)
            }
        };
        Ok(outcome)
    }
}
