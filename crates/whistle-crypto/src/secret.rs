//! # Membership Secrets
//!
//! A [`MembershipSecret`] is the only thing a member holds. Losing it makes
//! membership unprovable, which is the protocol's only form of revocation.
//!
//! ## Security Invariants
//!
//! - Drawn from `OsRng`. Never derived from employee ids, departments or any
//!   other identity attribute: a commitment over guessable fields could be
//!   brute-forced back to the person who registered it.
//! - Zeroized on drop.
//! - Not `Clone`, not `Serialize`. `Debug` prints `[REDACTED]`.
//! - The only way to see the bytes as text is [`MembershipSecret::expose_hex`],
//!   which returns a zeroizing buffer.

use std::fmt;

use rand_core::{OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use whistle_core::hex;

use crate::error::CryptoError;

/// A member's 32-byte secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MembershipSecret([u8; 32]);

impl MembershipSecret {
    pub const LEN: usize = 32;

    /// Generate a fresh secret from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let secret = Self(bytes);
        bytes.zeroize();
        secret
    }

    /// Wrap existing secret bytes (e.g. restored from the member's backup).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a secret the member saved as hex.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode_32(s).map_err(CryptoError::MalformedSecret)?;
        let secret = Self(bytes);
        bytes.zeroize();
        Ok(secret)
    }

    /// Render the secret as hex, for showing it once to its owner.
    pub fn expose_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0))
    }

    pub(crate) fn expose_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for MembershipSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MembershipSecret([REDACTED])")
    }
}

/// Generate a new membership secret.
pub fn generate_secret() -> MembershipSecret {
    MembershipSecret::generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secrets_differ() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a.expose_bytes(), b.expose_bytes());
    }

    #[test]
    fn generated_secret_is_not_all_zero() {
        let s = generate_secret();
        assert_ne!(s.expose_bytes(), &[0u8; 32]);
    }

    #[test]
    fn debug_is_redacted() {
        let s = MembershipSecret::from_bytes([0xab; 32]);
        let dbg = format!("{s:?}");
        assert_eq!(dbg, "MembershipSecret([REDACTED])");
        assert!(!dbg.contains("ab"));
    }

    #[test]
    fn hex_round_trip() {
        let s = generate_secret();
        let restored = MembershipSecret::from_hex(&s.expose_hex()).unwrap();
        assert_eq!(restored.expose_bytes(), s.expose_bytes());
    }

    #[test]
    fn from_hex_rejects_short_input() {
        assert!(matches!(
            MembershipSecret::from_hex("abcd"),
            Err(CryptoError::MalformedSecret(_))
        ));
    }

    #[test]
    fn zeroize_clears_bytes() {
        let mut s = MembershipSecret::from_bytes([0x77; 32]);
        s.zeroize();
        assert_eq!(s.expose_bytes(), &[0u8; 32]);
    }
}
