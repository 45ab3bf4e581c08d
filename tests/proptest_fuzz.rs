//! Property-based tests (fuzzing) for translator resilience.
//!
//! Uses proptest to generate random/malformed inputs and verify the
//! translators never panic, only return clean errors.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;
use serde_json::{json, Value};

use lucene_translate::predicate::{Expr, FieldSchema, PredicateTranslator};
use lucene_translate::query::{escape_value, DslParser, LuceneEmitter};
use lucene_translate::TranslateError;

/// Single-character operators that must never appear unescaped in a value
const SPECIAL_CHARS: &[char] = &[
    '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/',
];

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate arbitrary JSON values (including invalid structures)
fn arbitrary_json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,   // depth
        64,  // max nodes
        10,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10)
                    .prop_map(Value::Array),
                prop::collection::hash_map(".*", inner, 0..10)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Generate well-formed DSL leaf clauses with arbitrary values
fn leaf_clause_strategy() -> impl Strategy<Value = Value> {
    let field = "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}";
    prop_oneof![
        (field, ".*").prop_map(|(f, v)| json!({"term": {f: v}})),
        (field, ".*").prop_map(|(f, v)| json!({"match": {f: v}})),
        (field, ".*").prop_map(|(f, v)| json!({"match_phrase": {f: v}})),
        (field, ".*").prop_map(|(f, v)| json!({"prefix": {f: v}})),
        (field, ".*").prop_map(|(f, v)| json!({"wildcard": {f: v}})),
        (field, ".*", 0u32..3).prop_map(|(f, v, n)| json!({"fuzzy": {f: {"value": v, "fuzziness": n}}})),
        (field, prop::collection::vec(".*", 1..5)).prop_map(|(f, v)| json!({"terms": {f: v}})),
        (field, any::<i64>(), any::<i64>()).prop_map(|(f, lo, hi)| json!({"range": {f: {"gte": lo, "lt": hi}}})),
        field.prop_map(|f| json!({"exists": {"field": f}})),
    ]
}

/// Generate bool trees of well-formed clauses, at most `depth` levels deep
fn dsl_query_strategy() -> impl Strategy<Value = Value> {
    leaf_clause_strategy().prop_recursive(
        4,   // stays within the default depth limit of 5
        64,
        6,
        |inner| {
            (
                prop::collection::vec(inner.clone(), 0..4),
                prop::collection::vec(inner.clone(), 0..4),
                prop::collection::vec(inner.clone(), 0..4),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(must, filter, must_not, should)| {
                    json!({"bool": {
                        "must": must,
                        "filter": filter,
                        "must_not": must_not,
                        "should": should,
                    }})
                })
        },
    )
}

/// Inverse of escaping: drop each backslash and keep the next char literally
fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// DSL Parser Fuzz Tests
// =============================================================================

proptest! {
    /// Parsing should never panic on arbitrary bytes
    #[test]
    fn fuzz_parser_from_random_bytes(bytes in prop::collection::vec(any::<u8>(), 0..10000)) {
        let input = String::from_utf8_lossy(&bytes);
        // Should never panic, only return Err
        let _ = DslParser::new().parse(&input);
    }

    /// Parsing should handle arbitrary JSON gracefully
    #[test]
    fn fuzz_parser_from_arbitrary_json(json in arbitrary_json_strategy()) {
        let serialized = serde_json::to_string(&json).unwrap();
        // Either parses (if JSON happens to match a query shape) or fails cleanly
        if let Ok(node) = DslParser::new().parse(&serialized) {
            let _ = LuceneEmitter::emit(&node);
        }
    }

    /// Arbitrary JSON wrapped in a "query" key is handled the same way
    #[test]
    fn fuzz_parser_wrapped_json(json in arbitrary_json_strategy()) {
        prop_assume!(json.get("query").is_none());
        let direct = DslParser::new().parse(&serde_json::to_string(&json).unwrap());
        let wrapped = DslParser::new().parse(&json!({"query": json}).to_string());
        prop_assert_eq!(direct.is_ok(), wrapped.is_ok());
    }

    /// Truncated documents fail with a format error
    #[test]
    fn fuzz_parser_truncated_json(query in dsl_query_strategy(), cut in 1usize..16) {
        let serialized = serde_json::to_string(&query).unwrap();
        let end = serialized.len().saturating_sub(cut);
        if end > 0 && serialized.is_char_boundary(end) {
            let result = DslParser::new().parse(&serialized[..end]);
            let is_format_error = matches!(result, Err(TranslateError::Format { .. }));
            prop_assert!(is_format_error);
        }
    }

    /// Well-formed queries within the limits always translate
    #[test]
    fn fuzz_wellformed_queries_translate(query in dsl_query_strategy()) {
        let serialized = serde_json::to_string(&query).unwrap();
        prop_assume!(serialized.len() <= 100 * 1024);
        let result = DslParser::new().translate(&serialized);
        prop_assert!(result.is_ok(), "{:?} for {}", result, serialized);
    }

    /// Same input, same output
    #[test]
    fn fuzz_translation_is_deterministic(query in dsl_query_strategy()) {
        let serialized = serde_json::to_string(&query).unwrap();
        let parser = DslParser::new();
        let first = parser.translate(&serialized);
        let second = parser.translate(&serialized);
        prop_assert_eq!(first, second);
    }

    /// Depth is counted along one path; sibling count never trips the guard
    #[test]
    fn fuzz_depth_independent_of_siblings(siblings in 1usize..300) {
        let clauses: Vec<Value> = (0..siblings)
            .map(|i| json!({"term": {"f": i.to_string()}}))
            .collect();
        let query = json!({"bool": {"should": [{"bool": {"must": clauses}}]}});
        prop_assert!(DslParser::new().parse(&query.to_string()).is_ok());
    }
}

// =============================================================================
// Escaping Fuzz Tests
// =============================================================================

proptest! {
    /// Escaping never loses information
    #[test]
    fn fuzz_escape_roundtrip(s in ".*") {
        prop_assert_eq!(unescape(&escape_value(&s)), s);
    }

    /// No single-character operator survives unescaped
    #[test]
    fn fuzz_escape_leaves_no_bare_operator(s in "[a-z+\\-!(){}\\[\\]^\"~*?:/\\\\ ]{0,40}") {
        let escaped = escape_value(&s);
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                chars.next();
            } else {
                prop_assert!(!SPECIAL_CHARS.contains(&c), "bare '{}' in {}", c, escaped);
            }
        }
    }

    /// Values without special characters pass through untouched
    #[test]
    fn fuzz_escape_plain_identity(s in "[a-zA-Z0-9 _.,]{0,40}") {
        prop_assert_eq!(escape_value(&s), s);
    }
}

// =============================================================================
// Predicate Translator Fuzz Tests
// =============================================================================

proptest! {
    /// Equality on a text field is exactly `field:escaped(value)`
    #[test]
    fn fuzz_predicate_equality(value in ".*") {
        let schema = FieldSchema::new().text("name");
        let translator = PredicateTranslator::new(&schema);
        let result = translator.translate(&Expr::field("name").eq(value.as_str())).unwrap();
        prop_assert_eq!(result, format!("name:{}", escape_value(&value)));
    }

    /// Numeric comparisons accept any finite integer and keep it unescaped
    #[test]
    fn fuzz_predicate_numeric_range(n in any::<i64>()) {
        let schema = FieldSchema::new().numeric("price");
        let translator = PredicateTranslator::new(&schema);
        let result = translator.translate(&Expr::field("price").ge(n)).unwrap();
        prop_assert_eq!(result, format!("price:[{} TO *]", n));
    }
}
