//! # Error Types
//!
//! - [`ProtocolError`] — the outcomes of evaluating a protocol
//!   predicate against current state. All are recoverable, data-driven
//!   results; retrying with the same inputs reproduces the same error.
//! - [`CoreError`] — parsing failures for the types in this crate.
//! - [`CanonicalizationError`] — JCS serialization failures.
//!
//! ## Security Invariant
//!
//! No variant carries a secret, a commitment derived from a caller's
//! secret, or a private actual value. `ThresholdNotMet` names the disclosure
//! kind only, so error messages can be logged and rendered without leaking
//! what the member kept private.

use thiserror::Error;

use crate::disclosure::DisclosureKind;

/// Outcome of a rejected protocol operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The commitment is already present in the membership registry.
    /// Callers should treat this as "already a member".
    #[error("commitment is already registered")]
    DuplicateCommitment,

    /// A report with this hash is already on the ledger.
    #[error("report hash is already on the ledger")]
    DuplicateReport,

    /// The secret's commitment is absent from the registry. Also raised
    /// under the name `InvalidSecret`; see [`ProtocolError::invalid_secret`].
    #[error("not a recognized member")]
    UnregisteredMembership,

    /// Membership held but the private value is below the public minimum.
    #[error("{kind} threshold not met")]
    ThresholdNotMet {
        kind: DisclosureKind,
    },

    /// The protocol-wide sequence counter is exhausted.
    #[error("sequence number space exhausted")]
    SequenceExhausted,
}

impl ProtocolError {
    /// The error a caller raises when wrapping a failed membership proof.
    /// Semantically identical to `UnregisteredMembership`.
    pub const fn invalid_secret() -> Self {
        Self::UnregisteredMembership
    }

    /// Whether this is an expected negative answer (as opposed to a
    /// rejected write). Presentation layers render these as plain results.
    pub fn is_negative_result(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredMembership | Self::ThresholdNotMet { .. }
        )
    }
}

/// Failure parsing a core type from its textual form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("expected {expected} hex chars, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex digit at offset {0}")]
    InvalidHex(usize),

    #[error("unknown report category: {0}")]
    UnknownCategory(String),

    #[error("unknown disclosure kind: {0}")]
    UnknownDisclosureKind(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
