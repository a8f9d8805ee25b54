//! # apiext-schema: Schema Grammar & Shape-Discriminated Codecs
//!
//! Bidirectional JSON codecs for the recursive schema grammar used to
//! validate custom resources.
//!
//! ## Types
//!
//! - [`Schema`] (`props`): one grammar node, with ordinary typed fields
//!   plus an opaque vendor `extensions` map.
//! - [`SchemaOrBool`], [`SchemaOrStringArray`], [`SchemaOrArray`]
//!   (`union`): fields accepting several JSON shapes, discriminated by the
//!   input's surface syntax and re-emitted in one canonical shape.
//! - [`Json`]: raw passthrough for embedded documents, re-exported from
//!   `apiext-core`.
//!
//! ## Extension Capture (`codec`)
//!
//! Decoding a `Schema` captures every `x-` key outside the reserved
//! `x-kubernetes` prefix into `extensions`, values kept byte-for-byte.
//! Encoding re-injects them. Unknown reserved-prefix keys are dropped.
//!
//! ## Tree Walk (`walk`)
//!
//! [`Schema::walk`] visits every nested schema with its JSON Pointer.
//!
//! ## Crate Policy
//!
//! - Depends only on `apiext-core` internally.
//! - Codecs are pure functions of their input; no state is held across calls.
//! - Decoding requires a `serde_json` deserializer (raw fragment capture).

pub mod codec;
pub mod props;
pub mod union;
pub mod walk;

pub use apiext_core::{CodecError, Json};
pub use codec::MAX_SCHEMA_DEPTH;
pub use props::{ExternalDocumentation, Schema, ValidationRule};
pub use union::{SchemaOrArray, SchemaOrBool, SchemaOrStringArray};
pub use walk::{escape_pointer_token, ExtensionRef};
