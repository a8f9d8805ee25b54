//! # Raw JSON Passthrough
//!
//! [`Json`] stores an embedded JSON fragment as uninterpreted bytes. It is
//! used for schema fields whose values are arbitrary documents (`default`,
//! `example`, `enum` members) and for vendor extension values.
//!
//! ## Invariants
//!
//! - An empty capture means "absent" and encodes as `null`.
//! - Decoding `null` (or nothing) leaves the capture empty.
//! - A present capture is re-emitted byte-for-byte, unparsed and
//!   unvalidated by the byte-level API.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::CodecError;
use crate::literal::JSON_NULL;

/// An embedded JSON fragment kept verbatim.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Json {
    raw: Vec<u8>,
}

impl Json {
    /// Capture `data` verbatim. Never fails; `null` and empty input
    /// produce an absent capture.
    pub fn from_slice(data: &[u8]) -> Self {
        if data.is_empty() || data == JSON_NULL {
            return Self::default();
        }
        Self { raw: data.to_vec() }
    }

    /// Capture the compact JSON encoding of `value`.
    pub fn new(value: &impl Serialize) -> Result<Self, CodecError> {
        let raw = serde_json::to_vec(value)?;
        Ok(Self::from_slice(&raw))
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The captured bytes, empty when absent.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The bytes to emit: the capture itself, or `null` when absent.
    pub fn to_vec(&self) -> Vec<u8> {
        if self.raw.is_empty() {
            JSON_NULL.to_vec()
        } else {
            self.raw.clone()
        }
    }

    /// Decode the capture into a typed value. An absent capture decodes
    /// as `null`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(&self.to_vec())?)
    }
}

impl From<&RawValue> for Json {
    fn from(raw: &RawValue) -> Self {
        Self::from_slice(raw.get().as_bytes())
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Json({self})")
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_vec()))
    }
}

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.raw.is_empty() {
            return serializer.serialize_unit();
        }
        let text = std::str::from_utf8(&self.raw).map_err(serde::ser::Error::custom)?;
        let raw = RawValue::from_string(text.to_owned()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::from(&*raw))
    }
}
