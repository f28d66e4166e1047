//! Hex address literals.
//!
//! An [`Address`] is a `0x`-prefixed string of exactly 40 hex digits, parsed
//! into an [`alloy_primitives::Address`]. Any case is accepted and the text is
//! kept as written, so a record passes its values through to a deployment
//! driver unmodified. EIP-55 checksums are not enforced.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A well-formed hex address literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    raw: alloy_primitives::Address,
    text: Cow<'static, str>,
}

/// Compile-time checked [`Address`] for static records.
macro_rules! literal {
    ($s:literal) => {
        $crate::address::Address::from_static(::alloy_primitives::address!($s), $s)
    };
}

pub(crate) use literal;

impl Address {
    /// Validate and wrap an address string.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if !s.starts_with("0x") {
            return Err(AddressError::MissingPrefix);
        }
        let raw = alloy_primitives::Address::from_str(s)?;
        Ok(Address {
            raw,
            text: Cow::Owned(s.to_string()),
        })
    }

    /// Pair a literal with the value `address!` decoded from it. Only
    /// reachable through [`literal!`], which passes the same literal to both.
    pub(crate) const fn from_static(raw: alloy_primitives::Address, text: &'static str) -> Self {
        Address {
            raw,
            text: Cow::Borrowed(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Decoded 20-byte address for drivers that encode calldata.
    pub fn raw(&self) -> alloy_primitives::Address {
        self.raw
    }
}

/// Rendered with the EIP-55 checksum.
impl From<alloy_primitives::Address> for Address {
    fn from(raw: alloy_primitives::Address) -> Self {
        Address {
            raw,
            text: Cow::Owned(raw.to_checksum(None)),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(|e| serde::de::Error::custom(format!("{s:?}: {e}")))
    }
}
