//! # Shape-Discriminated Unions
//!
//! Three schema fields accept more than one JSON shape. Each is a closed
//! enum whose variant is chosen from the input's surface syntax alone:
//!
//! | type | `{` | `[` | `true`/`false` | anything else |
//! |---|---|---|---|---|
//! | [`SchemaOrBool`] | `Schema` | error | `Bool` | `MalformedUnion` |
//! | [`SchemaOrStringArray`] | `Schema` | `Strings` | `Empty` | `Empty` |
//! | [`SchemaOrArray`] | `Schema` | `Schemas` | `Empty` | `Empty` |
//!
//! Only `SchemaOrBool` rejects unrecognized shapes; the list unions decode
//! them to `Empty` without error. The byte-level `from_slice` functions are
//! the decoders; the serde impls capture the raw fragment and defer to them.

use apiext_core::{trim_whitespace, CodecError, JSON_FALSE, JSON_NULL, JSON_TRUE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::props::Schema;

fn raw_fragment<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Box<RawValue>, D::Error> {
    Box::<RawValue>::deserialize(deserializer)
}

/// First byte of a trimmed input, if it is long enough to be a container.
fn container_marker(data: &[u8]) -> Option<u8> {
    match data {
        [first, _, ..] => Some(*first),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// SchemaOrBool
// ---------------------------------------------------------------------------

/// A schema, or a boolean that allows (`true`) or forbids (`false`)
/// anything. Used by `additionalProperties` and `additionalItems`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrBool {
    Schema(Box<Schema>),
    Bool(bool),
}

impl Default for SchemaOrBool {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl SchemaOrBool {
    /// Decode from raw bytes. Empty input yields `Bool(false)`.
    ///
    /// # Errors
    ///
    /// `MalformedUnion` for any shape other than an object, `true` or
    /// `false`; `MalformedDocument` if the object is not a valid schema.
    pub fn from_slice(data: &[u8]) -> Result<Self, CodecError> {
        let data = trim_whitespace(data);
        match data.first() {
            None => Ok(Self::default()),
            Some(b'{') => Ok(Self::Schema(Box::new(Schema::from_slice(data)?))),
            _ if data == JSON_TRUE => Ok(Self::Bool(true)),
            _ if data == JSON_FALSE => Ok(Self::Bool(false)),
            _ => Err(CodecError::bool_or_schema()),
        }
    }

    /// Encode: the schema if present, otherwise the boolean literal.
    pub fn to_vec(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Schema(schema) => schema.to_vec(),
            Self::Bool(true) => Ok(JSON_TRUE.to_vec()),
            Self::Bool(false) => Ok(JSON_FALSE.to_vec()),
        }
    }

    /// Whether the union permits values: always for a schema, otherwise
    /// the boolean itself.
    pub fn allows(&self) -> bool {
        match self {
            Self::Schema(_) => true,
            Self::Bool(allows) => *allows,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            Self::Bool(_) => None,
        }
    }
}

impl From<Schema> for SchemaOrBool {
    fn from(schema: Schema) -> Self {
        Self::Schema(Box::new(schema))
    }
}

impl From<bool> for SchemaOrBool {
    fn from(allows: bool) -> Self {
        Self::Bool(allows)
    }
}

impl Serialize for SchemaOrBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Schema(schema) => schema.serialize(serializer),
            Self::Bool(allows) => serializer.serialize_bool(*allows),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaOrBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = raw_fragment(deserializer)?;
        Self::from_slice(raw.get().as_bytes()).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SchemaOrStringArray
// ---------------------------------------------------------------------------

/// A schema, or a list of property names. Used by `dependencies` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SchemaOrStringArray {
    Schema(Box<Schema>),
    Strings(Vec<String>),
    #[default]
    Empty,
}

impl SchemaOrStringArray {
    /// Decode from raw bytes, dispatching on the first byte. Shapes other
    /// than an object or array decode to `Empty`.
    pub fn from_slice(data: &[u8]) -> Result<Self, CodecError> {
        let data = trim_whitespace(data);
        match container_marker(data) {
            Some(b'{') => Ok(Self::Schema(Box::new(Schema::from_slice(data)?))),
            Some(b'[') => Ok(Self::Strings(serde_json::from_slice(data)?)),
            _ => Ok(Self::Empty),
        }
    }

    /// Encode: a non-empty string list, else the schema, else `null`.
    pub fn to_vec(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Strings(strings) if !strings.is_empty() => Ok(serde_json::to_vec(strings)?),
            Self::Schema(schema) => schema.to_vec(),
            _ => Ok(JSON_NULL.to_vec()),
        }
    }

    /// Returns true if neither a schema nor any string is held.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Schema(_) => false,
            Self::Strings(strings) => strings.is_empty(),
            Self::Empty => true,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn strings(&self) -> &[String] {
        match self {
            Self::Strings(strings) => strings,
            _ => &[],
        }
    }
}

impl From<Schema> for SchemaOrStringArray {
    fn from(schema: Schema) -> Self {
        Self::Schema(Box::new(schema))
    }
}

impl From<Vec<String>> for SchemaOrStringArray {
    fn from(strings: Vec<String>) -> Self {
        Self::Strings(strings)
    }
}

impl Serialize for SchemaOrStringArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Strings(strings) if !strings.is_empty() => strings.serialize(serializer),
            Self::Schema(schema) => schema.serialize(serializer),
            _ => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaOrStringArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = raw_fragment(deserializer)?;
        Self::from_slice(raw.get().as_bytes()).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SchemaOrArray
// ---------------------------------------------------------------------------

/// A single schema, or a list of positional schemas. Used by `items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SchemaOrArray {
    Schema(Box<Schema>),
    Schemas(Vec<Schema>),
    #[default]
    Empty,
}

impl SchemaOrArray {
    /// Decode from raw bytes, dispatching on the first byte. Shapes other
    /// than an object or array decode to `Empty`.
    pub fn from_slice(data: &[u8]) -> Result<Self, CodecError> {
        let data = trim_whitespace(data);
        match container_marker(data) {
            Some(b'{') => Ok(Self::Schema(Box::new(Schema::from_slice(data)?))),
            Some(b'[') => Ok(Self::Schemas(serde_json::from_slice(data)?)),
            _ => Ok(Self::Empty),
        }
    }

    /// Encode: a non-empty schema list, else the single schema, else `null`.
    pub fn to_vec(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Schemas(schemas) if !schemas.is_empty() => Ok(serde_json::to_vec(schemas)?),
            Self::Schema(schema) => schema.to_vec(),
            _ => Ok(JSON_NULL.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Schema(_) => false,
            Self::Schemas(schemas) => schemas.is_empty(),
            Self::Empty => true,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn schemas(&self) -> &[Schema] {
        match self {
            Self::Schemas(schemas) => schemas,
            _ => &[],
        }
    }
}

impl From<Schema> for SchemaOrArray {
    fn from(schema: Schema) -> Self {
        Self::Schema(Box::new(schema))
    }
}

impl From<Vec<Schema>> for SchemaOrArray {
    fn from(schemas: Vec<Schema>) -> Self {
        Self::Schemas(schemas)
    }
}

impl Serialize for SchemaOrArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Schemas(schemas) if !schemas.is_empty() => schemas.serialize(serializer),
            Self::Schema(schema) => schema.serialize(serializer),
            _ => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaOrArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = raw_fragment(deserializer)?;
        Self::from_slice(raw.get().as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- SchemaOrBool ------------------------------------------------------

    #[test]
    fn bool_literals() {
        assert_eq!(SchemaOrBool::from_slice(b"true").unwrap(), SchemaOrBool::Bool(true));
        assert_eq!(SchemaOrBool::from_slice(b"false").unwrap(), SchemaOrBool::Bool(false));
        assert_eq!(SchemaOrBool::Bool(true).to_vec().unwrap(), b"true");
        assert_eq!(SchemaOrBool::Bool(false).to_vec().unwrap(), b"false");
    }

    #[test]
    fn bool_empty_input_is_zero_value() {
        let value = SchemaOrBool::from_slice(b"").unwrap();
        assert_eq!(value, SchemaOrBool::Bool(false));
        assert!(!value.allows());
        assert!(value.schema().is_none());
    }

    #[test]
    fn bool_object_is_schema_and_allows() {
        let value = SchemaOrBool::from_slice(b"{}").unwrap();
        assert_eq!(value, SchemaOrBool::Schema(Box::default()));
        assert!(value.allows());
        assert_eq!(value.to_vec().unwrap(), b"{}");
    }

    #[test]
    fn bool_rejects_other_shapes() {
        for input in [&b"garbage"[..], b"null", b"1", b"[]", b"\"true\"", b"truex", b"t"] {
            let err = SchemaOrBool::from_slice(input).unwrap_err();
            assert!(err.is_malformed_union(), "{input:?}");
            assert_eq!(err.to_string(), "boolean or JSON schema expected");
        }
    }

    #[test]
    fn bool_schema_decode_failure_propagates() {
        let err = SchemaOrBool::from_slice(br#"{"type": 1}"#).unwrap_err();
        assert!(matches!(err, CodecError::MalformedDocument(_)));
    }

    #[test]
    fn bool_nested_in_schema() {
        let schema =
            Schema::from_slice(br#"{"additionalProperties": false, "additionalItems": {"type": "string"}}"#)
                .unwrap();
        assert_eq!(schema.additional_properties, Some(SchemaOrBool::Bool(false)));
        let items = schema.additional_items.as_ref().unwrap();
        assert_eq!(items.schema().unwrap().type_, "string");
        assert!(items.allows());
    }

    #[test]
    fn bool_nested_rejection_surfaces_message() {
        let err = Schema::from_slice(br#"{"additionalProperties": 3}"#).unwrap_err();
        assert!(err.to_string().contains("boolean or JSON schema expected"));
    }

    // -- SchemaOrStringArray -----------------------------------------------

    #[test]
    fn string_array_decodes_strings() {
        let value = SchemaOrStringArray::from_slice(br#"["a","b"]"#).unwrap();
        assert_eq!(value.strings(), ["a".to_string(), "b".to_string()]);
        assert_eq!(value.to_vec().unwrap(), br#"["a","b"]"#);
    }

    #[test]
    fn string_array_decodes_schema() {
        let value = SchemaOrStringArray::from_slice(br#"{"type":"integer"}"#).unwrap();
        assert_eq!(value.schema().unwrap().type_, "integer");
        assert_eq!(value.to_vec().unwrap(), br#"{"type":"integer"}"#);
    }

    #[test]
    fn string_array_other_shapes_are_empty() {
        for input in [&b""[..], b"{", b"1", b"true", b"null", b"\"s\"", b"12"] {
            let value = SchemaOrStringArray::from_slice(input).unwrap();
            assert_eq!(value, SchemaOrStringArray::Empty, "{input:?}");
        }
        assert_eq!(SchemaOrStringArray::Empty.to_vec().unwrap(), b"null");
    }

    #[test]
    fn string_array_non_string_members_fail() {
        let err = SchemaOrStringArray::from_slice(b"[1, 2]").unwrap_err();
        assert!(matches!(err, CodecError::MalformedDocument(_)));
    }

    #[test]
    fn string_array_empty_list_encodes_null() {
        let value = SchemaOrStringArray::from_slice(b"[]").unwrap();
        assert!(value.is_empty());
        assert_eq!(value.to_vec().unwrap(), b"null");
    }

    #[test]
    fn dependencies_mix_both_shapes() {
        let schema = Schema::from_slice(
            br#"{"dependencies": {"a": ["b", "c"], "d": {"required": ["e"]}, "f": 5}}"#,
        )
        .unwrap();
        assert_eq!(schema.dependencies["a"].strings().len(), 2);
        assert_eq!(schema.dependencies["d"].schema().unwrap().required, vec!["e".to_string()]);
        assert_eq!(schema.dependencies["f"], SchemaOrStringArray::Empty);
        assert_eq!(
            schema.to_vec().unwrap(),
            br#"{"dependencies":{"a":["b","c"],"d":{"required":["e"]},"f":null}}"#
        );
    }

    // -- SchemaOrArray -----------------------------------------------------

    #[test]
    fn array_decodes_single_schema() {
        let value = SchemaOrArray::from_slice(br#"{"type":"string"}"#).unwrap();
        assert_eq!(value.schema().unwrap().type_, "string");
        assert!(value.schemas().is_empty());
        assert_eq!(value.to_vec().unwrap(), br#"{"type":"string"}"#);
    }

    #[test]
    fn array_decodes_schema_list() {
        let value = SchemaOrArray::from_slice(br#"[{"type":"string"},{}]"#).unwrap();
        assert_eq!(value.schemas().len(), 2);
        assert_eq!(value.to_vec().unwrap(), br#"[{"type":"string"},{}]"#);
    }

    #[test]
    fn array_other_shapes_are_empty() {
        for input in [&b""[..], b"[", b"false", b"null", b"42"] {
            assert_eq!(SchemaOrArray::from_slice(input).unwrap(), SchemaOrArray::Empty);
        }
        assert_eq!(SchemaOrArray::Empty.to_vec().unwrap(), b"null");
        assert_eq!(SchemaOrArray::Schemas(Vec::new()).to_vec().unwrap(), b"null");
    }

    #[test]
    fn array_empty_schema_encodes_as_object() {
        let value = SchemaOrArray::from(Schema::default());
        assert_eq!(value.to_vec().unwrap(), b"{}");
    }

    #[test]
    fn items_nested_in_schema() {
        let schema = Schema::from_slice(br#"{"type":"array","items":{"type":"number"}}"#).unwrap();
        let items = schema.items.as_ref().unwrap();
        assert_eq!(items.schema().unwrap().type_, "number");

        let tuple = Schema::from_slice(br#"{"items":[{"type":"number"},{"type":"string"}]}"#).unwrap();
        assert_eq!(tuple.items.as_ref().unwrap().schemas().len(), 2);
    }

    #[test]
    fn whitespace_around_input_is_ignored() {
        assert_eq!(SchemaOrBool::from_slice(b" true\n").unwrap(), SchemaOrBool::Bool(true));
        assert_eq!(
            SchemaOrArray::from_slice(b"\n {}").unwrap(),
            SchemaOrArray::Schema(Box::default())
        );
    }
}
