//! Byte literals that carry discriminant meaning on the wire.

/// The `true` literal; selects the boolean variant with `allows = true`.
pub const JSON_TRUE: &[u8] = b"true";

/// The `false` literal; selects the boolean variant with `allows = false`.
pub const JSON_FALSE: &[u8] = b"false";

/// The `null` literal; means "absent" for raw captures and empty unions.
pub const JSON_NULL: &[u8] = b"null";

/// Strip leading and trailing JSON insignificant whitespace (RFC 8259 §2).
pub fn trim_whitespace(data: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(b, b' ' | b'\t' | b'\n' | b'\r');
    let start = data.iter().position(|b| !is_ws(b)).unwrap_or(data.len());
    let end = data.iter().rposition(|b| !is_ws(b)).map_or(start, |i| i + 1);
    &data[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_both_ends() {
        assert_eq!(trim_whitespace(b"  \r\n{}\t "), b"{}");
        assert_eq!(trim_whitespace(b"true"), JSON_TRUE);
    }

    #[test]
    fn all_whitespace_trims_to_empty() {
        assert_eq!(trim_whitespace(b" \n\t"), b"");
        assert_eq!(trim_whitespace(b""), b"");
    }

    #[test]
    fn interior_whitespace_is_kept() {
        assert_eq!(trim_whitespace(b" [1, 2] "), b"[1, 2]");
    }
}
