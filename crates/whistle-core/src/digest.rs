//! # Commitments and Report Hashes
//!
//! Two public 32-byte digests live in protocol state:
//!
//! - [`Commitment`] — `SHA256(secret)`, one per member, stored in the
//!   membership registry.
//! - [`ReportHash`] — a digest of report content computed on the member's
//!   machine, stored in the report ledger.
//!
//! Both serialize as lowercase hex strings. Construction from a secret or
//! from report content lives in `whistle-crypto`; this module only defines
//! the types so that every crate agrees on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::hex;

macro_rules! digest_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wrap raw digest bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The raw 32 digest bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Lowercase hex rendering (64 chars, no prefix).
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            /// Parse from 64 hex chars, optionally `0x`-prefixed.
            pub fn from_hex(s: &str) -> Result<Self, CoreError> {
                hex::decode_32(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}...)", stringify!($name), &self.to_hex()[..12])
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

digest_newtype!(
    /// Public commitment to a membership secret: `SHA256(secret)`.
    ///
    /// Registered exactly once. Reveals nothing about the secret under the
    /// preimage resistance of SHA-256.
    Commitment
);

digest_newtype!(
    /// Digest of report content. The content itself never reaches the
    /// ledger; investigators receive it out of band and check it against
    /// this hash.
    ReportHash
);
