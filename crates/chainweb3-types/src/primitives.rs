//! Fixed-width byte types ([`Hash`], [`Address`]) and opaque [`Data`].
//!
//! All three render as lowercase `0x`-prefixed hex and parse hex with or
//! without the prefix.
//!
//! # Length contract
//!
//! The fixed-width types have two families of constructors:
//!
//! - `from_slice_lossy` / `from_hex` accept input of any length. Shorter
//!   input is zero-padded on the right, longer input keeps its first
//!   `LEN` bytes and drops the rest. Nothing is reported.
//! - `try_from_slice` / `from_hex_exact` (and `FromStr`, `TryFrom<&[u8]>`,
//!   serde `Deserialize`) reject anything that is not exactly `LEN` bytes
//!   with [`HexError::LengthMismatch`].
//!
//! The wire decoder uses the lossy family; callers who build values from
//! their own input should prefer the strict one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HexError;

/// Size of a [`Hash`] in bytes.
pub const HASH_LENGTH: usize = 32;

/// Size of an [`Address`] in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Strip an optional `0x` / `0X` prefix.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string (optionally `0x`-prefixed) into bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(strip_hex_prefix(s)).map_err(|e| HexError::Malformed {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// Encode bytes as lowercase `0x`-prefixed hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Number of bytes in this type.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            #[inline]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Build from any number of bytes: right-pads with zeros or
            /// truncates to the first `LEN` bytes. See the module docs.
            pub fn from_slice_lossy(bytes: &[u8]) -> Self {
                let mut out = [0u8; $len];
                let n = bytes.len().min($len);
                out[..n].copy_from_slice(&bytes[..n]);
                Self(out)
            }

            /// Build from exactly `LEN` bytes.
            pub fn try_from_slice(bytes: &[u8]) -> Result<Self, HexError> {
                if bytes.len() != $len {
                    return Err(HexError::LengthMismatch {
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                Ok(Self::from_slice_lossy(bytes))
            }

            /// Parse hex of any decoded length, applying the lossy length
            /// contract. Fails only on malformed hex.
            pub fn from_hex(s: &str) -> Result<Self, HexError> {
                Ok(Self::from_slice_lossy(&decode_hex(s)?))
            }

            /// Parse hex that must decode to exactly `LEN` bytes.
            pub fn from_hex_exact(s: &str) -> Result<Self, HexError> {
                Self::try_from_slice(&decode_hex(s)?)
            }

            /// Canonical lowercase `0x`-prefixed hex.
            pub fn to_hex(&self) -> String {
                encode_hex(&self.0)
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = HexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex_exact(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = HexError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Self::try_from_slice(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
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
                Self::from_hex_exact(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte hash: block hashes, transaction hashes, state/receipt roots.
    Hash,
    HASH_LENGTH
);

fixed_bytes!(
    /// A 20-byte account or contract address.
    Address,
    ADDRESS_LENGTH
);

/// Variable-length opaque bytes: bytecode, call input, signature parts,
/// log payloads, blooms.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Data(Vec<u8>);

impl Data {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse hex (optionally `0x`-prefixed). `"0x"` and `""` give empty data.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        decode_hex(s).map(Self)
    }

    /// Canonical lowercase `0x`-prefixed hex; empty data renders as `"0x"`.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data({})", self.to_hex())
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Data {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Data {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
