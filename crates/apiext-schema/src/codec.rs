//! # Extension-Capturing Schema Codec
//!
//! Wraps the structural `Schema` codec so vendor extension keys survive a
//! decode/encode round trip.
//!
//! ## Decode
//!
//! The input object's entries are read once as unparsed raw fragments and
//! each key is classified once with [`partition_extensions`]:
//!
//! 1. extension keys (`x-` but not `x-kubernetes`) are captured verbatim
//!    into `extensions`;
//! 2. every other key is forwarded to the structural decode, which drops
//!    what it does not recognize.
//!
//! The structural decode never sees an extension key, and never writes
//! `extensions`. Schemas nest at most [`MAX_SCHEMA_DEPTH`] levels deep;
//! deeper input fails with `recursion limit exceeded`.
//!
//! ## Encode
//!
//! Without extensions the structural encode is the output. Otherwise the
//! structural encode is streamed into the target serializer as a map and the
//! extensions are appended before it closes: ordinary fields in field order,
//! then extensions in key order. An ordinary field whose key is also an
//! extension key is left out, so the extension wins.
//!
//! Raw fragment capture requires the `serde_json` (de)serializer; other
//! formats must be converted to JSON bytes first.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use apiext_core::{partition_extensions, Json};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::{self, Impossible, SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::props::Schema;

/// Deepest schema nesting a decode accepts, counting the root as one.
pub const MAX_SCHEMA_DEPTH: usize = 64;

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // `Schema::serialize` below resolves to the derived inherent
        // function, not this trait impl.
        if self.extensions.is_empty() {
            return Schema::serialize(self, serializer);
        }
        debug!(
            extensions = self.extensions.len(),
            "encoding schema with extensions"
        );
        Schema::serialize(
            self,
            Extending {
                inner: serializer,
                extensions: &self.extensions,
            },
        )
    }
}

/// Serializer that re-emits the derived struct encoding as a map on `inner`
/// and appends `extensions` to it.
struct Extending<'a, S> {
    inner: S,
    extensions: &'a BTreeMap<String, Json>,
}

fn not_a_struct<E: ser::Error>() -> E {
    E::custom("schema must encode as a struct")
}

macro_rules! reject_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _: $ty) -> Result<Self::Ok, Self::Error> {
                Err(not_a_struct())
            }
        )*
    };
}

impl<'a, S: Serializer> Serializer for Extending<'a, S> {
    type Ok = S::Ok;
    type Error = S::Error;
    type SerializeSeq = Impossible<S::Ok, S::Error>;
    type SerializeTuple = Impossible<S::Ok, S::Error>;
    type SerializeTupleStruct = Impossible<S::Ok, S::Error>;
    type SerializeTupleVariant = Impossible<S::Ok, S::Error>;
    type SerializeMap = Impossible<S::Ok, S::Error>;
    type SerializeStruct = ExtendedStruct<'a, S::SerializeMap>;
    type SerializeStructVariant = Impossible<S::Ok, S::Error>;

    reject_scalars! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    }

    fn serialize_none(self) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _: &T) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_unit(self) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: &T,
    ) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<S::Ok, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, S::Error> {
        Err(not_a_struct())
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, S::Error> {
        // Collisions make the field count unreliable.
        Ok(ExtendedStruct {
            map: self.inner.serialize_map(None)?,
            extensions: self.extensions,
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, S::Error> {
        Err(not_a_struct())
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

struct ExtendedStruct<'a, M> {
    map: M,
    extensions: &'a BTreeMap<String, Json>,
}

impl<M: SerializeMap> SerializeStruct for ExtendedStruct<'_, M> {
    type Ok = M::Ok;
    type Error = M::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), M::Error> {
        if self.extensions.contains_key(key) {
            return Ok(());
        }
        self.map.serialize_entry(key, value)
    }

    fn end(mut self) -> Result<M::Ok, M::Error> {
        for (key, value) in self.extensions {
            self.map.serialize_entry(key, value)?;
        }
        self.map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of schema nesting on this thread for as long as it lives.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Option<Self> {
        DEPTH.with(|depth| {
            let next = depth.get() + 1;
            if next > MAX_SCHEMA_DEPTH {
                return None;
            }
            depth.set(next);
            Some(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON schema object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Schema, A::Error> {
        // Each nested schema is decoded by a fresh JSON deserializer, so the
        // parser's own nesting limit never accumulates across levels.
        let _guard = DepthGuard::enter()
            .ok_or_else(|| <A::Error as de::Error>::custom("recursion limit exceeded"))?;

        let mut entries: Vec<(String, Box<RawValue>)> = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<Box<RawValue>>()?;
            entries.push((key, value));
        }

        let (ordinary, captured) = partition_extensions(entries);
        let structural = serde_json::to_string(&ordinary).map_err(de::Error::custom)?;
        let mut schema = decode_structural(&structural).map_err(de::Error::custom)?;

        schema.extensions = captured
            .into_iter()
            .map(|(key, value)| {
                trace!(key = %key, "captured schema extension");
                (key, Json::from(&*value))
            })
            .collect();
        if !schema.extensions.is_empty() {
            debug!(
                extensions = schema.extensions.len(),
                "decoded schema with extensions"
            );
        }
        Ok(schema)
    }
}

fn decode_structural(text: &str) -> serde_json::Result<Schema> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    // The derived inherent function: ordinary fields only.
    let schema = Schema::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(schema)
}
