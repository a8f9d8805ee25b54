//! # Error Types
//!
//! The codecs fail in exactly two ways, and both are leaf-level: nothing
//! in this workspace retries or recovers from a codec error.
//!
//! - `MalformedUnion`: the input's surface shape matches none of a
//!   union's recognized discriminants. Only the boolean-or-schema union
//!   raises it; the list-or-schema unions decode unrecognized shapes to
//!   their empty variant instead.
//! - `MalformedDocument`: the underlying JSON primitive rejected the
//!   input. The `serde_json` error is carried and displayed unchanged,
//!   behind an `Arc` so the error stays `Clone`.

use std::sync::Arc;

use thiserror::Error;

/// What a boolean-or-schema union accepts, as reported in its error.
pub const BOOL_OR_SCHEMA: &str = "boolean or JSON schema";

/// Error produced by any schema codec.
#[derive(Error, Debug, Clone)]
pub enum CodecError {
    /// The input shape matched no variant of the union being decoded.
    #[error("{expected} expected")]
    MalformedUnion {
        /// Description of the accepted shapes.
        expected: &'static str,
    },

    /// The JSON primitive could not parse or emit the document.
    #[error(transparent)]
    MalformedDocument(Arc<serde_json::Error>),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument(Arc::new(err))
    }
}

impl CodecError {
    /// The error raised when a boolean-or-schema union sees any other shape.
    pub fn bool_or_schema() -> Self {
        Self::MalformedUnion {
            expected: BOOL_OR_SCHEMA,
        }
    }

    /// Returns true for the `MalformedUnion` variant.
    pub fn is_malformed_union(&self) -> bool {
        matches!(self, Self::MalformedUnion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_or_schema_message_is_exact() {
        let err = CodecError::bool_or_schema();
        assert_eq!(err.to_string(), "boolean or JSON schema expected");
        assert!(err.is_malformed_union());
    }

    #[test]
    fn malformed_document_displays_primitive_error_verbatim() {
        let inner = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let expected = inner.to_string();
        let err = CodecError::from(inner);
        assert_eq!(err.to_string(), expected);
        assert!(!err.is_malformed_union());
    }

    #[test]
    fn cloned_document_error_shares_the_primitive_error() {
        let inner = serde_json::from_slice::<serde_json::Value>(b"[1,").unwrap_err();
        let err = CodecError::from(inner);
        let copy = err.clone();
        assert_eq!(copy.to_string(), err.to_string());
        match (&err, &copy) {
            (CodecError::MalformedDocument(a), CodecError::MalformedDocument(b)) => {
                assert!(Arc::ptr_eq(a, b));
                assert!(a.is_eof());
            }
            _ => panic!("expected MalformedDocument"),
        }
    }
}
