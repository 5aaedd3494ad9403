//! # Commitment Derivation and Membership Scan
//!
//! `commit(secret) = SHA256(secret)`.
//!
//! # SHA-256 exception: raw secret bytes
//!
//! Every other digest in the workspace is computed over `CanonicalBytes`.
//! The commitment hashes the 32 raw secret bytes instead, because that is
//! the preimage the on-chain membership circuit recomputes. Hashing a JSON
//! rendering of the secret would produce commitments the circuit cannot
//! match.
//!
//! ## Security Invariant
//!
//! [`contains_commitment_ct`] compares the needle against every entry with
//! `subtle::ConstantTimeEq` and folds the results without branching, so
//! the time taken depends on the registry length only, not on the
//! position of a match.

use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

use whistle_core::Commitment;

use crate::secret::MembershipSecret;

/// Derive the public commitment for a secret.
pub fn commit(secret: &MembershipSecret) -> Commitment {
    let hash = Sha256::digest(secret.expose_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Commitment::from_bytes(bytes)
}

/// Test whether `needle` appears in `haystack` without early exit.
pub fn contains_commitment_ct<'a, I>(haystack: I, needle: &Commitment) -> bool
where
    I: IntoIterator<Item = &'a Commitment>,
{
    let needle = &needle.as_bytes()[..];
    let mut found = Choice::from(0u8);
    for candidate in haystack {
        found |= candidate.as_bytes()[..].ct_eq(needle);
    }
    found.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::generate_secret;

    #[test]
    fn commit_known_vector() {
        // SHA-256 of 32 zero bytes.
        let secret = MembershipSecret::from_bytes([0u8; 32]);
        assert_eq!(
            commit(&secret).to_hex(),
            "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925"
        );
    }

    #[test]
    fn commit_is_deterministic() {
        let secret = generate_secret();
        assert_eq!(commit(&secret), commit(&secret));
    }

    #[test]
    fn distinct_secrets_distinct_commitments() {
        assert_ne!(commit(&generate_secret()), commit(&generate_secret()));
    }

    #[test]
    fn commitment_differs_from_secret() {
        let secret = MembershipSecret::from_bytes([0x11; 32]);
        assert_ne!(commit(&secret).as_bytes(), secret.expose_bytes());
    }

    #[test]
    fn scan_finds_match_at_any_position() {
        let set: Vec<Commitment> = (0u8..16).map(|i| Commitment::from_bytes([i; 32])).collect();
        for c in &set {
            assert!(contains_commitment_ct(&set, c));
        }
    }

    #[test]
    fn scan_misses_absent_commitment() {
        let set: Vec<Commitment> = (0u8..16).map(|i| Commitment::from_bytes([i; 32])).collect();
        assert!(!contains_commitment_ct(&set, &Commitment::from_bytes([0xee; 32])));
    }

    #[test]
    fn scan_of_empty_set_is_false() {
        let empty: Vec<Commitment> = Vec::new();
        assert!(!contains_commitment_ct(&empty, &Commitment::from_bytes([0; 32])));
    }

    #[test]
    fn scan_rejects_near_miss() {
        let mut bytes = [0x42; 32];
        let set = vec![Commitment::from_bytes(bytes)];
        bytes[31] ^= 1;
        assert!(!contains_commitment_ct(&set, &Commitment::from_bytes(bytes)));
    }
}
