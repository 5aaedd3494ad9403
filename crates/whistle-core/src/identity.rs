//! # Record Identifiers
//!
//! - [`RecordId`] — position of a record inside its own set. Registry and
//!   ledger ids are independent and both start at zero.
//! - [`SequenceNumber`] — protocol-wide transition counter shared by both
//!   sets. Every committed write consumes exactly one.
//! - [`WalletRef`] — opaque reference to the wallet that submitted a
//!   registration. The core never interprets it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::hex;

/// Index of a record within the registry or the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Global ordering of committed state transitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(pub u64);

impl SequenceNumber {
    pub const GENESIS: Self = Self(0);

    pub fn value(self) -> u64 {
        self.0
    }

    /// The following sequence number, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq:{}", self.0)
    }
}

/// Reference to the submitting wallet (a 32-byte address or public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalletRef([u8; 32]);

impl WalletRef {
    /// Placeholder reference for registrations made without a wallet.
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        hex::decode_32(s).map(Self)
    }
}

impl Default for WalletRef {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for WalletRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletRef({}...)", &self.to_hex()[..12])
    }
}

impl fmt::Display for WalletRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for WalletRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WalletRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
