//! # Wallet Signer Port
//!
//! The protocol core never signs anything itself. Funding, balancing and
//! signing transactions belong to the member's wallet, which the core
//! reaches through the narrow [`Signer`] trait:
//!
//! - `sign(payload) -> Signature` over an opaque byte string.
//! - `wallet_ref()` — the reference recorded next to a registration.
//!
//! [`LocalSigner`] is an in-process Ed25519 implementation used by the CLI
//! and tests. Its verifying key bytes are its `WalletRef`, so anyone can
//! check a signature against a registry entry with [`verify_signature`].
//!
//! ## Security Invariant
//!
//! `LocalSigner` does not implement `Serialize` or `Clone`; `Debug` prints
//! only the wallet reference. The signing key zeroizes on drop.

use std::fmt;

use ed25519_dalek::{Signer as _, Verifier as _};
use rand_core::OsRng;
use zeroize::Zeroizing;

use whistle_core::{hex, WalletRef};

use crate::error::CryptoError;

/// Abstract wallet signing backend.
pub trait Signer: Send + Sync {
    /// Sign an opaque payload.
    fn sign(&self, payload: &[u8]) -> Signature;

    /// The wallet reference this signer stands for.
    fn wallet_ref(&self) -> WalletRef;
}

/// An Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a signature from 128 hex chars.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let s = s.trim();
        if s.len() != 128 || !s.is_ascii() {
            return Err(CryptoError::VerificationFailed(format!(
                "signature hex must be 128 chars, got {}",
                s.len()
            )));
        }
        let hi = hex::decode_32(&s[..64]).map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;
        let lo = hex::decode_32(&s[64..]).map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&hi);
        out[32..].copy_from_slice(&lo);
        Ok(Self(out))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// In-memory Ed25519 wallet signer.
pub struct LocalSigner {
    key: ed25519_dalek::SigningKey,
}

impl LocalSigner {
    /// Generate a new random key using the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// Create from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Load from a hex-encoded 32-byte seed (the key file format).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let seed = Zeroizing::new(
            hex::decode_32(s).map_err(|e| CryptoError::MalformedKey(e.to_string()))?,
        );
        Ok(Self::from_seed(&seed))
    }

    /// The seed as hex, for writing the key file.
    pub fn seed_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.key.to_bytes()))
    }
}

impl Signer for LocalSigner {
    fn sign(&self, payload: &[u8]) -> Signature {
        Signature(self.key.sign(payload).to_bytes())
    }

    fn wallet_ref(&self) -> WalletRef {
        WalletRef::from_bytes(self.key.verifying_key().to_bytes())
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("wallet_ref", &self.wallet_ref())
            .finish()
    }
}

/// Verify a signature made by the wallet behind `wallet`.
pub fn verify_signature(
    wallet: &WalletRef,
    payload: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let vk = ed25519_dalek::VerifyingKey::from_bytes(wallet.as_bytes())
        .map_err(|e| CryptoError::MalformedKey(format!("wallet ref is not an Ed25519 key: {e}")))?;
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    vk.verify(payload, &sig)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}
