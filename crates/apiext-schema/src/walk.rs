//! # Schema Tree Walk
//!
//! Depth-first, read-only traversal of a schema and every schema nested
//! inside it. Each node is reported with its RFC 6901 JSON Pointer relative
//! to the root (the root itself is `""`).
//!
//! Children are visited in a fixed order: `properties`,
//! `patternProperties`, `definitions`, `dependencies`, `items`, `allOf`,
//! `oneOf`, `anyOf`, `not`, `additionalProperties`, `additionalItems`.
//! Map-valued children follow key order.

use std::borrow::Cow;

use apiext_core::Json;

use crate::props::Schema;
use crate::union::{SchemaOrArray, SchemaOrBool, SchemaOrStringArray};

/// Escape one reference token: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_pointer_token(token: &str) -> Cow<'_, str> {
    if token.contains(['~', '/']) {
        Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(token)
    }
}

/// A vendor extension found somewhere in a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionRef<'a> {
    /// Pointer to the schema node carrying the extension.
    pub pointer: String,
    pub key: &'a str,
    pub value: &'a Json,
}

impl Schema {
    /// Visit this schema and all nested schemas, depth first.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&str, &'a Schema),
    {
        walk_node(self, "", visit);
    }

    /// Every vendor extension in the tree, in walk order.
    pub fn nested_extensions(&self) -> Vec<ExtensionRef<'_>> {
        let mut found = Vec::new();
        self.walk(&mut |pointer, node| {
            for (key, value) in &node.extensions {
                found.push(ExtensionRef {
                    pointer: pointer.to_string(),
                    key,
                    value,
                });
            }
        });
        found
    }
}

fn child(pointer: &str, segments: &[&str]) -> String {
    let mut out = String::from(pointer);
    for segment in segments {
        out.push('/');
        out.push_str(&escape_pointer_token(segment));
    }
    out
}

fn walk_node<'a, F>(schema: &'a Schema, pointer: &str, visit: &mut F)
where
    F: FnMut(&str, &'a Schema),
{
    visit(pointer, schema);

    for (field, map) in [
        ("properties", &schema.properties),
        ("patternProperties", &schema.pattern_properties),
        ("definitions", &schema.definitions),
    ] {
        for (name, nested) in map {
            walk_node(nested, &child(pointer, &[field, name.as_str()]), visit);
        }
    }

    for (name, dependency) in &schema.dependencies {
        if let SchemaOrStringArray::Schema(nested) = dependency {
            walk_node(nested, &child(pointer, &["dependencies", name.as_str()]), visit);
        }
    }

    match &schema.items {
        Some(SchemaOrArray::Schema(nested)) => walk_node(nested, &child(pointer, &["items"]), visit),
        Some(SchemaOrArray::Schemas(list)) => walk_list(list, "items", pointer, visit),
        _ => {}
    }

    walk_list(&schema.all_of, "allOf", pointer, visit);
    walk_list(&schema.one_of, "oneOf", pointer, visit);
    walk_list(&schema.any_of, "anyOf", pointer, visit);

    if let Some(nested) = &schema.not {
        walk_node(nested, &child(pointer, &["not"]), visit);
    }

    for (field, union) in [
        ("additionalProperties", &schema.additional_properties),
        ("additionalItems", &schema.additional_items),
    ] {
        if let Some(SchemaOrBool::Schema(nested)) = union {
            walk_node(nested, &child(pointer, &[field]), visit);
        }
    }
}

fn walk_list<'a, F>(list: &'a [Schema], field: &str, pointer: &str, visit: &mut F)
where
    F: FnMut(&str, &'a Schema),
{
    for (index, nested) in list.iter().enumerate() {
        walk_node(nested, &child(pointer, &[field, index.to_string().as_str()]), visit);
    }
}
