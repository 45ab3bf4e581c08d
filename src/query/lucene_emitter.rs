// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Lucene Emitter
//!
//! Renders a [`QueryNode`] as a classic Lucene query string.
//!
//! # Lucene Query Syntax
//!
//! ```text
//! field:value               - Term (escaped)
//! field:(v1 OR v2)          - Terms
//! field:(hello world)       - Match (value left to the analyzer, unescaped)
//! field:"hello world"       - Match phrase
//! field:val*                - Prefix
//! field:v?l*e               - Wildcard (verbatim)
//! field:value~2             - Fuzzy
//! field:/jo.*n/             - Regexp
//! _exists_:field            - Exists
//! _id:("1" "2")             - Ids
//! field:{10 TO 20]          - Range ({ } exclusive, [ ] inclusive, * open)
//! +must +filter -must_not +(should1 OR should2)  - Bool
//! ```

use super::escape::{escape_field, escape_value};
use super::query_node::{BoolQuery, QueryNode, RangeQuery};

/// Fuzziness emitted when a fuzzy clause carries none
pub const DEFAULT_FUZZINESS: u32 = 2;

/// Lucene query emitter
pub struct LuceneEmitter;

impl LuceneEmitter {
    /// Emit a Lucene query string for a query AST.
    ///
    /// Total: every well-formed node has a rendering.
    pub fn emit(node: &QueryNode) -> String {
        Self::emit_with_fuzziness(node, DEFAULT_FUZZINESS)
    }

    /// Emit with a different fallback fuzziness for fuzzy clauses without one
    pub fn emit_with_fuzziness(node: &QueryNode, default_fuzziness: u32) -> String {
        Self::emit_node(node, default_fuzziness).trim().to_string()
    }

    fn emit_node(node: &QueryNode, default_fuzziness: u32) -> String {
        match node {
            QueryNode::Term { field, value } => {
                format!("{}:{}", escape_field(field), escape_value(value))
            }
            QueryNode::Terms { field, values } => {
                let values = values
                    .iter()
                    .map(|v| escape_value(v))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                format!("{}:({})", escape_field(field), values)
            }
            QueryNode::Match { field, value } => format!("{}:({})", escape_field(field), value),
            QueryNode::MatchPhrase { field, value } => {
                format!("{}:\"{}\"", escape_field(field), value)
            }
            QueryNode::Prefix { field, value } => {
                format!("{}:{}*", escape_field(field), escape_value(value))
            }
            QueryNode::Wildcard { field, value } => format!("{}:{}", escape_field(field), value),
            QueryNode::Fuzzy {
                field,
                value,
                fuzziness,
            } => format!(
                "{}:{}~{}",
                escape_field(field),
                escape_value(value),
                fuzziness.unwrap_or(default_fuzziness)
            ),
            QueryNode::Regexp { field, value } => format!("{}:/{}/", escape_field(field), value),
            QueryNode::Exists { field } => format!("_exists_:{}", escape_field(field)),
            QueryNode::Ids { values } => {
                let values = values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("_id:({})", values)
            }
            QueryNode::Range(range) => Self::emit_range(range),
            QueryNode::Bool(bool_query) => Self::emit_bool(bool_query, default_fuzziness),
        }
    }

    /// Bracket policy: the open bracket follows `gt` alone and the close
    /// bracket follows `lt` alone, while the value prefers `gte`/`lte`.
    /// With both `gte` and `gt` set this yields `{gte ...`; that is the
    /// established output and is kept as-is.
    fn emit_range(range: &RangeQuery) -> String {
        let open = if range.gt.is_some() { '{' } else { '[' };
        let start = range.gte.as_deref().or(range.gt.as_deref()).unwrap_or("*");
        let close = if range.lt.is_some() { '}' } else { ']' };
        let end = range.lte.as_deref().or(range.lt.as_deref()).unwrap_or("*");

        format!("{}:{}{} TO {}{}", escape_field(&range.field), open, start, end, close)
    }

    fn emit_bool(query: &BoolQuery, default_fuzziness: u32) -> String {
        let mut clauses: Vec<String> = Vec::new();

        for node in query.must.iter().chain(query.filter.iter()) {
            clauses.push(format!("+{}", Self::emit_clause(node, default_fuzziness)));
        }
        for node in &query.must_not {
            clauses.push(format!("-{}", Self::emit_clause(node, default_fuzziness)));
        }

        if !query.should.is_empty() {
            let should = query
                .should
                .iter()
                .map(|n| Self::emit_with_fuzziness(n, default_fuzziness))
                .collect::<Vec<_>>()
                .join(" OR ");
            // Alongside required clauses at least one should must match;
            // on its own the group stays optional.
            if clauses.is_empty() {
                clauses.push(format!("({})", should));
            } else {
                clauses.push(format!("+({})", should));
            }
        }

        clauses.join(" ")
    }

    /// Nested bool clauses are grouped before they get a +/- prefix
    fn emit_clause(node: &QueryNode, default_fuzziness: u32) -> String {
        let emitted = Self::emit_with_fuzziness(node, default_fuzziness);
        match node {
            QueryNode::Bool(_) => format!("({})", emitted),
            _ => emitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::query_node::BoolQuery;

    #[test]
    fn test_term() {
        assert_eq!(LuceneEmitter::emit(&QueryNode::term("user.id", "kimchy")), "user.id:kimchy");
    }

    #[test]
    fn test_term_escaped() {
        assert_eq!(LuceneEmitter::emit(&QueryNode::term("name", "john+doe")), "name:john\\+doe");
        assert_eq!(LuceneEmitter::emit(&QueryNode::term("time", "12:30")), "time:12\\:30");
    }

    #[test]
    fn test_terms() {
        let node = QueryNode::terms("tag", ["search", "open"]);
        assert_eq!(LuceneEmitter::emit(&node), "tag:(search OR open)");

        let node = QueryNode::terms("tag", ["c++", "rust"]);
        assert_eq!(LuceneEmitter::emit(&node), "tag:(c\\+\\+ OR rust)");
    }

    #[test]
    fn test_match_is_unescaped() {
        let node = QueryNode::match_query("msg", "hello world");
        assert_eq!(LuceneEmitter::emit(&node), "msg:(hello world)");

        let node = QueryNode::match_query("msg", "quick AND (fox OR dog)");
        assert_eq!(LuceneEmitter::emit(&node), "msg:(quick AND (fox OR dog))");
    }

    #[test]
    fn test_match_phrase() {
        let node = QueryNode::match_phrase("msg", "hello world");
        assert_eq!(LuceneEmitter::emit(&node), "msg:\"hello world\"");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(LuceneEmitter::emit(&QueryNode::prefix("user", "ki")), "user:ki*");
        assert_eq!(LuceneEmitter::emit(&QueryNode::prefix("path", "a/b")), "path:a\\/b*");
    }

    #[test]
    fn test_wildcard_verbatim() {
        let node = QueryNode::wildcard("user", "ki*y?");
        assert_eq!(LuceneEmitter::emit(&node), "user:ki*y?");
    }

    #[test]
    fn test_fuzzy() {
        assert_eq!(LuceneEmitter::emit(&QueryNode::fuzzy("user", "ki", None)), "user:ki~2");
        assert_eq!(LuceneEmitter::emit(&QueryNode::fuzzy("user", "ki", Some(1))), "user:ki~1");
        assert_eq!(
            LuceneEmitter::emit_with_fuzziness(&QueryNode::fuzzy("user", "ki", None), 1),
            "user:ki~1"
        );
    }

    #[test]
    fn test_regexp() {
        let node = QueryNode::regexp("user", "k.*y");
        assert_eq!(LuceneEmitter::emit(&node), "user:/k.*y/");
    }

    #[test]
    fn test_exists_and_ids() {
        assert_eq!(LuceneEmitter::emit(&QueryNode::exists("user")), "_exists_:user");
        assert_eq!(
            LuceneEmitter::emit(&QueryNode::ids(["1", "4", "100"])),
            "_id:(\"1\" \"4\" \"100\")"
        );
    }

    #[test]
    fn test_range_inclusive() {
        let node = RangeQuery::new("age").gte("10").lte("20").build();
        assert_eq!(LuceneEmitter::emit(&node), "age:[10 TO 20]");
    }

    #[test]
    fn test_range_exclusive() {
        let node = RangeQuery::new("age").gt("10").lt("20").build();
        assert_eq!(LuceneEmitter::emit(&node), "age:{10 TO 20}");
    }

    #[test]
    fn test_range_open_ends() {
        assert_eq!(LuceneEmitter::emit(&RangeQuery::new("p").lte("500").build()), "p:[* TO 500]");
        assert_eq!(LuceneEmitter::emit(&RangeQuery::new("p").gt("5").build()), "p:{5 TO *]");
        assert_eq!(LuceneEmitter::emit(&RangeQuery::new("p").build()), "p:[* TO *]");
    }

    #[test]
    fn test_range_gte_and_gt_tie_break() {
        // gte supplies the value, gt's presence alone picks the bracket
        let node = RangeQuery::new("age").gte("10").gt("5").build();
        assert_eq!(LuceneEmitter::emit(&node), "age:{10 TO *]");

        let node = RangeQuery::new("age").lte("20").lt("30").build();
        assert_eq!(LuceneEmitter::emit(&node), "age:[* TO 20}");
    }

    #[test]
    fn test_bool_full() {
        let node = BoolQuery::new()
            .must(QueryNode::term("brand", "apple"))
            .should(QueryNode::match_query("color", "red"))
            .should(QueryNode::match_query("color", "blue"))
            .filter(RangeQuery::new("price").lte("500").build())
            .build();
        assert_eq!(
            LuceneEmitter::emit(&node),
            "+brand:apple +price:[* TO 500] +(color:(red) OR color:(blue))"
        );
    }

    #[test]
    fn test_bool_clause_order() {
        let node = BoolQuery::new()
            .should(QueryNode::term("brand", "apple"))
            .should(QueryNode::term("brand", "samsung"))
            .must_not(QueryNode::term("condition", "used"))
            .must(QueryNode::term("category", "smartphone"))
            .build();
        assert_eq!(
            LuceneEmitter::emit(&node),
            "+category:smartphone -condition:used +(brand:apple OR brand:samsung)"
        );
    }

    #[test]
    fn test_bool_should_only() {
        let node = BoolQuery::new()
            .should(QueryNode::term("a", "1"))
            .should(QueryNode::term("b", "2"))
            .build();
        assert_eq!(LuceneEmitter::emit(&node), "(a:1 OR b:2)");
    }

    #[test]
    fn test_nested_bool_parenthesized() {
        let inner = BoolQuery::new()
            .must(QueryNode::term("a", "1"))
            .must_not(QueryNode::term("b", "2"))
            .build();
        let node = BoolQuery::new()
            .must(inner.clone())
            .must_not(inner)
            .build();
        assert_eq!(LuceneEmitter::emit(&node), "+(+a:1 -b:2) -(+a:1 -b:2)");
    }

    #[test]
    fn test_nested_bool_in_should_not_wrapped() {
        let inner = BoolQuery::new()
            .should(QueryNode::term("a", "1"))
            .should(QueryNode::term("b", "2"))
            .build();
        let node = BoolQuery::new()
            .must(QueryNode::term("c", "3"))
            .should(inner)
            .build();
        assert_eq!(LuceneEmitter::emit(&node), "+c:3 +((a:1 OR b:2))");
    }

    #[test]
    fn test_minimum_should_match_is_inert() {
        let base = BoolQuery::new()
            .must(QueryNode::term("a", "1"))
            .should(QueryNode::term("b", "2"))
            .should(QueryNode::term("c", "3"));
        let with_msm = base.clone().minimum_should_match(2).build();
        assert_eq!(LuceneEmitter::emit(&base.build()), LuceneEmitter::emit(&with_msm));
    }

    #[test]
    fn test_empty_bool() {
        assert_eq!(LuceneEmitter::emit(&BoolQuery::new().build()), "");
    }
}
