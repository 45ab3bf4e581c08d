// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Lucene literal escaping.
//!
//! Both front-ends route term values through [`escape_value`] so the DSL and
//! predicate paths agree on what reaches the query parser as a literal.

/// Operators and syntax characters of the classic query parser.
///
/// Backslash is handled in its own pass before these, and the multi-character
/// operators are matched as whole tokens.
const SPECIAL_TOKENS: [&str; 18] = [
    "+", "-", "&&", "||", "!", "(", ")", "{", "}", "[", "]", "^", "\"", "~", "*", "?", ":", "/",
];

/// Escape a value so the query parser reads it as a literal.
///
/// Backslashes are doubled first, exactly once; then each special token gets a
/// single leading backslash.
///
/// ```rust
/// use lucene_translate::query::escape_value;
///
/// assert_eq!(escape_value("john+doe"), "john\\+doe");
/// assert_eq!(escape_value("a&&b"), "a\\&&b");
/// assert_eq!(escape_value(""), "");
/// ```
pub fn escape_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let mut escaped = value.replace('\\', "\\\\");
    for token in SPECIAL_TOKENS {
        if escaped.contains(token) {
            escaped = escaped.replace(token, &format!("\\{}", token));
        }
    }
    escaped
}

/// Field names are never escaped in this grammar.
pub fn escape_field(field: &str) -> &str {
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(escape_value("kimchy"), "kimchy");
        assert_eq!(escape_value("hello world"), "hello world");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(escape_value(""), "");
    }

    #[test]
    fn test_escape_plus() {
        assert_eq!(escape_value("a+b"), "a\\+b");
    }

    #[test]
    fn test_escape_each_special_char() {
        for c in ['+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/'] {
            let input = format!("x{}y", c);
            assert_eq!(escape_value(&input), format!("x\\{}y", c), "char {:?}", c);
        }
    }

    #[test]
    fn test_double_operators_escaped_as_tokens() {
        assert_eq!(escape_value("a&&b"), "a\\&&b");
        assert_eq!(escape_value("a||b"), "a\\||b");
        // A lone ampersand or pipe is not an operator
        assert_eq!(escape_value("a&b|c"), "a&b|c");
    }

    #[test]
    fn test_backslash_doubled_once() {
        assert_eq!(escape_value("a\\b"), "a\\\\b");
        // Re-escaping already escaped input: the backslash pass runs once and
        // the inserted escapes are not themselves escaped again.
        assert_eq!(escape_value("a\\+b"), "a\\\\\\+b");
    }

    #[test]
    fn test_url_like_value() {
        assert_eq!(escape_value("http://x.y/z"), "http\\:\\/\\/x.y\\/z");
    }

    #[test]
    fn test_field_is_identity() {
        assert_eq!(escape_field("user.id"), "user.id");
        assert_eq!(escape_field("a+b"), "a+b");
    }
}
