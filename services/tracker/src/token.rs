//! Session-token extraction from raw `key=value` strings
//!
//! Tokens arrive embedded in path segments and form fields as
//! `token=<value>`. Extraction splits on the first `=` only and returns
//! the right-hand side verbatim, so a value that itself contains `=` (or
//! equals the literal string `token`) survives intact. A string with no
//! `=` is returned unchanged.

/// Extract the bare token from a raw `token=<value>` string
pub fn extract_token(raw: &str) -> &str {
    match raw.split_once('=') {
        Some((_, value)) => value,
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_value_after_key() {
        assert_eq!(extract_token("token=XYZ123"), "XYZ123");
    }

    #[test]
    fn test_bare_value_is_returned_unchanged() {
        assert_eq!(extract_token("XYZ123"), "XYZ123");
    }

    #[test]
    fn test_value_containing_equals_survives() {
        assert_eq!(extract_token("token=a=b"), "a=b");
    }

    #[test]
    fn test_value_equal_to_literal_token() {
        assert_eq!(extract_token("token=token"), "token");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(extract_token("token="), "");
    }
}
