//! # whistle-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the whistle protocol:
//!
//! - **Membership secrets**: 32 random bytes from the OS CSPRNG, zeroized on
//!   drop, never serialized, redacted in `Debug`.
//! - **Commitments**: `SHA256(secret)` with no salt and no identity fields.
//! - **Constant-time registry scan**: membership testing that touches every
//!   registered commitment regardless of where (or whether) a match sits.
//! - **Report hashing**: SHA-256 over the canonical form of a report draft.
//! - **Wallet signer**: the `Signer` port plus an in-process Ed25519 signer.
//!
//! ## Crate Policy
//!
//! - Depends only on `whistle-core` internally.
//! - No mocking of cryptographic operations in tests.
//! - No `unsafe`.

pub mod commitment;
pub mod error;
pub mod report;
pub mod secret;
pub mod signer;

pub use commitment::{commit, contains_commitment_ct};
pub use error::CryptoError;
pub use report::{report_hash, ReportDraft};
pub use secret::{generate_secret, MembershipSecret};
pub use signer::{verify_signature, LocalSigner, Signature, Signer};
