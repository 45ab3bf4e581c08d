// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! DSL Parser
//!
//! Parses an Elasticsearch-style JSON query document into a [`QueryNode`].
//!
//! # Guards
//!
//! ```text
//! input ──► empty?            ──► Validation
//!       ──► > max bytes?      ──► Validation      (checked before any decoding)
//!       ──► malformed JSON?   ──► Format          (line/column from the decoder)
//!       ──► node depth > max? ──► NestingTooDeep  (root = 1, +1 per bool clause entry)
//! ```
//!
//! The root may be wrapped as `{"query": {...}}`. A node is dispatched on the
//! first recognized key in a fixed priority order, so an object carrying both
//! `term` and `match` is read as `term`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::lucene_emitter::LuceneEmitter;
use super::query_node::{BoolQuery, QueryNode, RangeQuery};
use crate::config::TranslatorConfig;
use crate::error::{Result, TranslateError};
use crate::metrics::{self, LatencyTimer, FRONTEND_DSL};

/// Recognized clause keys, in dispatch priority order.
pub const RECOGNIZED_KEYS: [&str; 12] = [
    "bool",
    "term",
    "terms",
    "match",
    "match_phrase",
    "prefix",
    "wildcard",
    "fuzzy",
    "regexp",
    "exists",
    "ids",
    "range",
];

/// Bool clause lists, in the order they are read.
const BOOL_CLAUSES: [&str; 4] = ["must", "should", "must_not", "filter"];

/// Query DSL parser.
///
/// Stateless between calls: the depth counter lives on the call stack, so a
/// single parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DslParser {
    config: TranslatorConfig,
}

impl DslParser {
    /// Parser with the default limits (100 KiB, depth 5)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON query document into a query AST
    pub fn parse(&self, json: &str) -> Result<QueryNode> {
        let _timer = LatencyTimer::new(FRONTEND_DSL);
        metrics::observe(FRONTEND_DSL, self.parse_document(json))
    }

    /// Parse and emit in one step, using this parser's fuzziness default
    pub fn translate(&self, json: &str) -> Result<String> {
        let node = self.parse(json)?;
        Ok(LuceneEmitter::emit_with_fuzziness(&node, self.config.default_fuzziness))
    }

    fn parse_document(&self, json: &str) -> Result<QueryNode> {
        if json.is_empty() {
            warn!("Rejected empty query document");
            return Err(TranslateError::Validation(
                "JSON input cannot be empty".to_string(),
            ));
        }

        let limit = self.config.max_input_bytes;
        if json.len() > limit {
            warn!(bytes = json.len(), limit, "Rejected oversized query document");
            return Err(TranslateError::Validation(format!(
                "JSON input exceeds the maximum size limit of {}KB",
                limit / 1024
            )));
        }

        let root: Value = serde_json::from_str(json)?;
        let query = root.get("query").unwrap_or(&root);
        let node = self.parse_node(query, 1)?;
        metrics::record_input_bytes(json.len());

        debug!(kind = node.kind(), bytes = json.len(), depth = node.depth(), "Parsed query DSL");
        Ok(node)
    }

    fn parse_node(&self, value: &Value, depth: usize) -> Result<QueryNode> {
        let max = self.config.max_nesting_depth;
        if depth > max {
            warn!(depth, max, "Rejected query nesting");
            return Err(TranslateError::NestingTooDeep { max });
        }

        let obj = value
            .as_object()
            .ok_or_else(|| TranslateError::UnsupportedQuery(value.to_string()))?;

        let (key, body) = RECOGNIZED_KEYS
            .iter()
            .find_map(|key| obj.get(*key).map(|body| (*key, body)))
            .ok_or_else(|| TranslateError::UnsupportedQuery(value.to_string()))?;

        match key {
            "bool" => self.parse_bool(body, depth),
            "term" => {
                let (field, value) = leaf("term", body, "value")?;
                Ok(QueryNode::Term { field, value })
            }
            "terms" => parse_terms(body),
            "match" => {
                let (field, value) = leaf("match", body, "query")?;
                Ok(QueryNode::Match { field, value })
            }
            "match_phrase" => {
                let (field, value) = leaf("match_phrase", body, "query")?;
                Ok(QueryNode::MatchPhrase { field, value })
            }
            "prefix" => {
                let (field, value) = leaf("prefix", body, "value")?;
                Ok(QueryNode::Prefix { field, value })
            }
            "wildcard" => {
                let (field, value) = leaf("wildcard", body, "value")?;
                Ok(QueryNode::Wildcard { field, value })
            }
            "fuzzy" => parse_fuzzy(body),
            "regexp" => {
                let (field, value) = leaf("regexp", body, "value")?;
                Ok(QueryNode::Regexp { field, value })
            }
            "exists" => parse_exists(body),
            "ids" => parse_ids(body),
            "range" => parse_range(body),
            _ => Err(TranslateError::UnsupportedQuery(value.to_string())),
        }
    }

    fn parse_bool(&self, body: &Value, depth: usize) -> Result<QueryNode> {
        let obj = body.as_object().ok_or_else(|| invalid("bool", "expected an object"))?;
        let mut query = BoolQuery::new();

        for clause in BOOL_CLAUSES {
            let Some(entries) = obj.get(clause) else { continue };
            // A single query object is shorthand for a one-element list
            let entries = match entries {
                Value::Array(items) => items.iter().collect::<Vec<_>>(),
                Value::Object(_) => vec![entries],
                _ => {
                    return Err(invalid(
                        "bool",
                        format!("'{}' must be an array of queries", clause),
                    ))
                }
            };

            let mut nodes = Vec::with_capacity(entries.len());
            for entry in entries {
                nodes.push(self.parse_node(entry, depth + 1)?);
            }

            match clause {
                "must" => query.must = nodes,
                "should" => query.should = nodes,
                "must_not" => query.must_not = nodes,
                _ => query.filter = nodes,
            }
        }

        if let Some(msm) = obj.get("minimum_should_match") {
            query.minimum_should_match = match msm {
                Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
                Value::String(s) => s.trim().parse::<i32>().ok(),
                _ => None,
            };
            debug!(minimum_should_match = %msm, "minimum_should_match accepted; it does not affect the emitted query");
        }

        Ok(QueryNode::Bool(query))
    }
}

fn invalid(clause: &'static str, reason: impl Into<String>) -> TranslateError {
    TranslateError::InvalidClause {
        clause,
        reason: reason.into(),
    }
}

/// First property of a clause body as (field, value)
fn first_field<'a>(clause: &'static str, body: &'a Value) -> Result<(String, &'a Value)> {
    let obj: &Map<String, Value> = body
        .as_object()
        .ok_or_else(|| invalid(clause, "expected an object"))?;
    let (field, value) = obj
        .iter()
        .next()
        .ok_or_else(|| invalid(clause, "expected a field name"))?;
    if field.is_empty() {
        return Err(invalid(clause, "field name cannot be empty"));
    }
    Ok((field.clone(), value))
}

/// Scalar JSON value as text: strings as-is, numbers and booleans by their JSON form
fn scalar_text(clause: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(clause, format!("expected a scalar value, got {}", other))),
    }
}

/// Single-field clause in short (`{"f": "v"}`) or long (`{"f": {"value": "v"}}`) form
fn leaf(clause: &'static str, body: &Value, long_key: &str) -> Result<(String, String)> {
    let (field, value) = first_field(clause, body)?;
    let value = match value {
        Value::Object(obj) => {
            let inner = obj
                .get(long_key)
                .ok_or_else(|| invalid(clause, format!("missing '{}' for field '{}'", long_key, field)))?;
            scalar_text(clause, inner)?
        }
        other => scalar_text(clause, other)?,
    };
    Ok((field, value))
}

fn parse_terms(body: &Value) -> Result<QueryNode> {
    let (field, values) = first_field("terms", body)?;
    let values = values
        .as_array()
        .ok_or_else(|| invalid("terms", "expected an array of values"))?
        .iter()
        .map(|v| scalar_text("terms", v))
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(invalid("terms", "value list cannot be empty"));
    }
    Ok(QueryNode::Terms { field, values })
}

fn parse_fuzzy(body: &Value) -> Result<QueryNode> {
    let (field, raw) = first_field("fuzzy", body)?;
    let (value, fuzziness) = match raw {
        Value::Object(obj) => {
            let value = obj
                .get("value")
                .ok_or_else(|| invalid("fuzzy", format!("missing 'value' for field '{}'", field)))?;
            // "AUTO" and other non-integer forms fall back to the default distance
            let fuzziness = match obj.get("fuzziness") {
                Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
                _ => None,
            };
            (scalar_text("fuzzy", value)?, fuzziness)
        }
        other => (scalar_text("fuzzy", other)?, None),
    };
    Ok(QueryNode::Fuzzy {
        field,
        value,
        fuzziness,
    })
}

fn parse_exists(body: &Value) -> Result<QueryNode> {
    let field = body
        .get("field")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("exists", "expected a 'field' string"))?;
    if field.is_empty() {
        return Err(invalid("exists", "field name cannot be empty"));
    }
    Ok(QueryNode::Exists {
        field: field.to_string(),
    })
}

fn parse_ids(body: &Value) -> Result<QueryNode> {
    let values = body
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("ids", "expected a 'values' array"))?
        .iter()
        .map(|v| scalar_text("ids", v))
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(invalid("ids", "value list cannot be empty"));
    }
    Ok(QueryNode::Ids { values })
}

fn parse_range(body: &Value) -> Result<QueryNode> {
    let (field, bounds) = first_field("range", body)?;
    let bounds = bounds
        .as_object()
        .ok_or_else(|| invalid("range", format!("expected bounds object for field '{}'", field)))?;

    let bound = |key: &str| -> Result<Option<String>> {
        match bounds.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => scalar_text("range", v).map(Some),
        }
    };

    Ok(QueryNode::Range(RangeQuery {
        gte: bound("gte")?,
        gt: bound("gt")?,
        lte: bound("lte")?,
        lt: bound("lt")?,
        field,
    }))
}
