//! # Threshold Disclosure Circuits
//!
//! One predicate, three instances. A member holding a registered secret
//! asserts that a private `actual` value is at least a public `minimum`,
//! revealing a single bit.
//!
//! ```text
//! 1. commit(secret) is registered          else UnregisteredMembership
//! 2. actual >= minimum                     else ThresholdNotMet
//! ```
//!
//! Nothing else is checked. A claim that holds for `minimum` holds for every
//! smaller minimum. Range limits on report values belong to the draft
//! ([`whistle_crypto::ReportDraft::validate`]), not to the predicate.
//!
//! The kind is a type parameter. `ThresholdCircuit<Severity>` and
//! `ThresholdCircuit<WitnessCount>` are distinct types sharing one
//! implementation. [`ThresholdKind`] is sealed: the set of disclosures is
//! closed.
//!
//! A claim is evaluated against the registry only. It is not bound to any
//! ledger entry, so a passing disclosure says nothing about which report,
//! if any, the member filed.

use std::fmt;
use std::marker::PhantomData;

use whistle_core::{DisclosureKind, ProtocolError};
use whistle_crypto::MembershipSecret;

use crate::registry::MembershipRegistry;

// ─── Kind Markers ────────────────────────────────────────────────────

/// Severity disclosure, scale 1 to 10.
#[derive(Debug, Clone, Copy)]
pub struct Severity;

/// Financial impact disclosure, in thousands of currency units.
#[derive(Debug, Clone, Copy)]
pub struct FinancialImpact;

/// Witness count disclosure.
#[derive(Debug, Clone, Copy)]
pub struct WitnessCount;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Severity {}
    impl Sealed for super::FinancialImpact {}
    impl Sealed for super::WitnessCount {}
}

/// Marker trait for the disclosure kinds. Sealed.
pub trait ThresholdKind: private::Sealed + fmt::Debug + Send + Sync + 'static {
    const KIND: DisclosureKind;
}

impl ThresholdKind for Severity {
    const KIND: DisclosureKind = DisclosureKind::Severity;
}
impl ThresholdKind for FinancialImpact {
    const KIND: DisclosureKind = DisclosureKind::FinancialImpact;
}
impl ThresholdKind for WitnessCount {
    const KIND: DisclosureKind = DisclosureKind::WitnessCount;
}

// ─── Claim ───────────────────────────────────────────────────────────

/// An ephemeral threshold assertion. Consumed by evaluation; the secret is
/// zeroized when the claim drops.
pub struct ThresholdClaim {
    kind: DisclosureKind,
    minimum: u64,
    actual: u64,
    secret: MembershipSecret,
}

impl ThresholdClaim {
    pub fn new(kind: DisclosureKind, minimum: u64, actual: u64, secret: MembershipSecret) -> Self {
        Self {
            kind,
            minimum,
            actual,
            secret,
        }
    }

    pub fn kind(&self) -> DisclosureKind {
        self.kind
    }

    pub fn minimum(&self) -> u64 {
        self.minimum
    }

    /// Evaluate against a registry and drop the claim.
    pub fn evaluate(self, registry: &MembershipRegistry) -> Result<bool, ProtocolError> {
        evaluate_threshold(self.kind, registry, self.minimum, self.actual, &self.secret)
    }
}

impl fmt::Debug for ThresholdClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdClaim")
            .field("kind", &self.kind)
            .field("minimum", &self.minimum)
            .field("actual", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ─── Circuit ─────────────────────────────────────────────────────────

/// The threshold predicate for one disclosure kind.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdCircuit<K: ThresholdKind> {
    _kind: PhantomData<K>,
}

impl<K: ThresholdKind> ThresholdCircuit<K> {
    pub fn kind() -> DisclosureKind {
        K::KIND
    }

    /// Returns `Ok(true)` when the claim holds. Every failure is an `Err`.
    pub fn prove(
        registry: &MembershipRegistry,
        minimum: u64,
        actual: u64,
        secret: &MembershipSecret,
    ) -> Result<bool, ProtocolError> {
        evaluate_threshold(K::KIND, registry, minimum, actual, secret)
    }
}

/// Kind-dispatched form of [`ThresholdCircuit::prove`].
pub fn evaluate_threshold(
    kind: DisclosureKind,
    registry: &MembershipRegistry,
    minimum: u64,
    actual: u64,
    secret: &MembershipSecret,
) -> Result<bool, ProtocolError> {
    if !registry.contains_secret(secret) {
        return Err(ProtocolError::UnregisteredMembership);
    }
    if actual < minimum {
        return Err(ProtocolError::ThresholdNotMet { kind });
    }
    Ok(true)
}
