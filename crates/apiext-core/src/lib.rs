//! # apiext-core: Foundational Codec Types
//!
//! Leaf crate of the apiext workspace. It holds the pieces every schema
//! codec shares and that carry no knowledge of the schema grammar itself:
//!
//! - [`CodecError`]: the two-variant error taxonomy (`MalformedUnion`,
//!   `MalformedDocument`).
//! - [`literal`]: the discriminant byte literals (`true`, `false`, `null`)
//!   and JSON whitespace trimming.
//! - [`extension`]: the vendor-extension key grammar (`x-` prefix with the
//!   reserved `x-kubernetes` exclusion) and harvesting helpers.
//! - [`Json`]: raw passthrough storage for embedded JSON fragments.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `apiext-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod extension;
pub mod literal;
pub mod raw;

pub use error::CodecError;
pub use extension::{
    harvest_extensions, is_extension_key, partition_extensions, EXTENSION_PREFIX,
    RESERVED_PREFIX,
};
pub use literal::{trim_whitespace, JSON_FALSE, JSON_NULL, JSON_TRUE};
pub use raw::Json;
