//! # Cryptographic Error Types
//!
//! None of these variants carry secret material. A malformed secret is
//! reported by the parse failure (length or offset), never by content.

use thiserror::Error;
use whistle_core::{CanonicalizationError, CoreError};

#[derive(Error, Debug)]
pub enum CryptoError {
    /// A membership secret could not be parsed.
    #[error("malformed membership secret: {0}")]
    MalformedSecret(CoreError),

    /// A wallet key or wallet reference could not be parsed.
    #[error("malformed wallet key: {0}")]
    MalformedKey(String),

    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// A report draft field is outside its accepted range.
    #[error("invalid report draft: {0}")]
    InvalidDraft(String),

    /// Report content could not be canonicalized.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
