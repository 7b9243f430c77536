//! Content addresses
//!
//! Every object in the store is named by the SHA-256 digest of its framed
//! encoding. Two objects with the same bytes always share an address.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::object::ObjectType;

/// Length of a content address in bytes
pub const ADDRESS_LEN: usize = 32;

/// Errors produced when parsing a hex content address
#[derive(Debug, Error, PartialEq)]
pub enum AddressParseError {
    /// Not exactly 64 hex digits
    #[error("invalid content address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Identifier of a stored object, derived from its content
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentAddress([u8; ADDRESS_LEN]);

impl ContentAddress {
    /// Computes the address of an object body of the given type
    ///
    /// The digest covers `"<type> <len>\0<body>"` so a blob and a tree with
    /// identical bodies never collide.
    pub fn for_object(object_type: ObjectType, body: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(object_type.as_str().as_bytes());
        hasher.update(b" ");
        hasher.update(body.len().to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(body);

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// Wraps raw digest bytes
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns the lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the first 12 hex digits, for log output
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", self.short())
    }
}

impl FromStr for ContentAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for ContentAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}
