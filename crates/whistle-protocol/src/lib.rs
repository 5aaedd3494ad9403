//! # whistle-protocol — Anonymous Membership and Threshold Disclosure
//!
//! The state machine behind anonymous reporting:
//!
//! - [`MembershipRegistry`] — append-only set of commitments.
//! - [`ReportLedger`] — append-only set of report hashes.
//! - [`ProtocolState`] — both sets plus the shared sequence counter, with
//!   `register`, `prove_membership`, `submit_report` and the threshold
//!   disclosures as methods.
//! - [`ThresholdCircuit`] — one generic predicate over the sealed
//!   [`ThresholdKind`] markers [`Severity`], [`FinancialImpact`] and
//!   [`WitnessCount`].
//! - [`Operation`] / [`Outcome`] — the closed operation set, routed by
//!   [`ProtocolState::apply`].
//! - [`Protocol`] — `Arc<RwLock<_>>` handle for concurrent callers.
//! - [`ProtocolSnapshot`] — JSON persistence of public state.
//!
//! ## Security Invariant
//!
//! Nothing in this crate stores, logs or returns a secret, or says which
//! registry entry a secret matched. Ledger records carry no field that
//! could link a report to its filer. Threshold disclosures reveal one bit
//! and never log the private value.
//!
//! ## Crate Policy
//!
//! - Depends on `whistle-core` and `whistle-crypto` only.
//! - No `unsafe`, no `.unwrap()` outside tests.
//! - Every rejected operation leaves state unchanged.

pub mod circuit;
pub mod error;
pub mod ledger;
pub mod operation;
pub mod protocol;
pub mod registry;
pub mod snapshot;
pub mod state;

pub use circuit::{
    evaluate_threshold, FinancialImpact, Severity, ThresholdCircuit, ThresholdClaim, ThresholdKind,
    WitnessCount,
};
pub use error::SnapshotError;
pub use ledger::{ReportLedger, ReportRecord};
pub use operation::{Operation, Outcome};
pub use protocol::Protocol;
pub use registry::{MembershipRecord, MembershipRegistry};
pub use snapshot::ProtocolSnapshot;
pub use state::ProtocolState;
