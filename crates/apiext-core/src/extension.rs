//! # Vendor Extension Keys
//!
//! A document key is a vendor extension iff it starts with `x-` and does
//! not start with `x-kubernetes`. The reserved exclusion takes precedence:
//! `x-kubernetes-foo` matches the generic prefix but is never an extension.
//! Reserved keys are either ordinary schema fields or dropped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::raw::Json;

/// Prefix every extension key must carry.
pub const EXTENSION_PREFIX: &str = "x-";

/// Prefix reserved for fields the schema grammar owns.
pub const RESERVED_PREFIX: &str = "x-kubernetes";

/// Returns true if `key` names a vendor extension.
pub fn is_extension_key(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX) && !key.starts_with(RESERVED_PREFIX)
}

/// Split key/value entries into `(ordinary, extensions)`, classifying each
/// key once. Later duplicates replace earlier ones.
pub fn partition_extensions<V, I>(entries: I) -> (BTreeMap<String, V>, BTreeMap<String, V>)
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut ordinary = BTreeMap::new();
    let mut extensions = BTreeMap::new();
    for (key, value) in entries {
        if is_extension_key(&key) {
            extensions.insert(key, value);
        } else {
            ordinary.insert(key, value);
        }
    }
    (ordinary, extensions)
}

/// Collect the extension entries of an already-parsed JSON object.
///
/// Values are re-marshaled into [`Json`] captures; non-extension keys are
/// ignored.
pub fn harvest_extensions(all: &Map<String, Value>) -> Result<BTreeMap<String, Json>, CodecError> {
    all.iter()
        .filter(|(key, _)| is_extension_key(key))
        .map(|(key, value)| Ok((key.clone(), Json::new(value)?)))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any key under the reserved prefix is excluded, whatever follows it.
        #[test]
        fn reserved_prefix_always_excluded(suffix in ".{0,16}") {
            let key = format!("{RESERVED_PREFIX}{suffix}");
            prop_assert!(!is_extension_key(&key));
        }

        /// Keys without the generic prefix are never extensions.
        #[test]
        fn missing_prefix_never_extension(key in "[^x].{0,16}") {
            prop_assert!(!is_extension_key(&key));
        }

        /// Partitioning loses no distinct key.
        #[test]
        fn partition_is_total(keys in prop::collection::btree_set("(x-)?[a-z]{0,6}", 0..12)) {
            let entries = keys.iter().map(|k| (k.clone(), ()));
            let (ordinary, extensions) = partition_extensions(entries);
            prop_assert_eq!(ordinary.len() + extensions.len(), keys.len());
            prop_assert!(extensions.keys().all(|k| k.starts_with(EXTENSION_PREFIX)));
        }
    }
}
