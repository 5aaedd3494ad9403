//! # Membership Registry
//!
//! Append-only public set of commitments. Each record is created exactly
//! once by a successful registration and never modified.
//!
//! ## Invariants
//!
//! - No two records share a commitment.
//! - `records()[i].id == RecordId(i)`.
//! - Registration sequence numbers strictly increase with record id.
//!
//! ## Membership testing
//!
//! [`MembershipRegistry::contains_secret`] recomputes the commitment of
//! the supplied secret and scans the whole registry in constant time per
//! entry. The answer is a bare `bool`: which record matched is never
//! returned, logged or stored.
//!
//! The uniqueness index is a `HashSet` because registration works on
//! public commitments only; no secret is involved in that lookup.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use whistle_core::{Commitment, ProtocolError, RecordId, SequenceNumber, WalletRef};
use whistle_crypto::{commit, contains_commitment_ct, MembershipSecret};

/// A registered commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub id: RecordId,
    pub commitment: Commitment,
    pub wallet_ref: WalletRef,
    pub registered_at: SequenceNumber,
}

/// The public set of registered membership commitments.
#[derive(Debug, Clone, Default)]
pub struct MembershipRegistry {
    records: Vec<MembershipRecord>,
    index: HashSet<Commitment>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commitment. Fails with `DuplicateCommitment` if present.
    ///
    /// The caller allocates the sequence number.
    pub fn register(
        &mut self,
        commitment: Commitment,
        wallet_ref: WalletRef,
        at: SequenceNumber,
    ) -> Result<RecordId, ProtocolError> {
        if self.index.contains(&commitment) {
            return Err(ProtocolError::DuplicateCommitment);
        }
        let id = RecordId(self.records.len() as u64);
        self.index.insert(commitment);
        self.records.push(MembershipRecord {
            id,
            commitment,
            wallet_ref,
            registered_at: at,
        });
        Ok(id)
    }

    /// Whether a public commitment is registered. Constant time in the
    /// position of the match.
    pub fn contains(&self, commitment: &Commitment) -> bool {
        contains_commitment_ct(self.records.iter().map(|r| &r.commitment), commitment)
    }

    /// Whether the commitment of `secret` is registered.
    pub fn contains_secret(&self, secret: &MembershipSecret) -> bool {
        self.contains(&commit(secret))
    }

    pub fn is_registered(&self, commitment: &Commitment) -> bool {
        self.index.contains(commitment)
    }

    pub fn records(&self) -> &[MembershipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
