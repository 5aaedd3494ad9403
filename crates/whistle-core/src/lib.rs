//! # whistle-core — Foundational Types for the Whistle Protocol
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for every 32-byte value.** `Commitment`,
//!    `ReportHash` and `WalletRef` are distinct types. A report hash cannot
//!    be registered as a membership commitment by accident.
//!
//! 2. **`CanonicalBytes` newtype.** Report content is hashed only after JCS
//!    canonicalization, so the same draft always yields the same hash.
//!
//! 3. **Single `DisclosureKind` enum.** The three threshold disclosures
//!    share one algorithm; the enum carries only their names and bounds.
//!
//! 4. **Errors never carry private data.** No `ProtocolError` variant has a
//!    field that could hold a secret or an actual (undisclosed) value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `whistle-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod category;
pub mod digest;
pub mod disclosure;
pub mod error;
pub mod hex;
pub mod identity;

pub use canonical::CanonicalBytes;
pub use category::ReportCategory;
pub use digest::{Commitment, ReportHash};
pub use disclosure::DisclosureKind;
pub use error::{CanonicalizationError, CoreError, ProtocolError};
pub use identity::{RecordId, SequenceNumber, WalletRef};
