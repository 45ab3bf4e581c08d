// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Predicate Translator
//!
//! Translates a predicate [`Expr`] straight to Lucene syntax, without going
//! through the DSL AST. Composition and range brackets follow the same
//! conventions as the DSL emitter.
//!
//! # Translation Rules
//!
//! ```text
//! f == v              f:v
//! f != v              NOT (f:v)
//! a && b              (a) AND (b)
//! a || b              (a) OR (b)
//! f > v               f:{v TO *]
//! f >= v              f:[v TO *]
//! f < v               f:[* TO v}
//! f <= v              f:[* TO v]
//! f.contains(v)       f:*v*
//! f.starts_with(v)    f:v*
//! f.ends_with(v)      f:*v
//! lucene_match(f, q)  f:(q)        q is not escaped
//! ```
//!
//! Values are escaped, except on fields declared numeric (or boolean), where
//! they are checked against the declared type and emitted in canonical form.
//! No case folding is applied on any path.

use std::collections::HashMap;
use tracing::debug;

use super::expr::{BinaryOp, Expr, Literal, CONTAINS, ENDS_WITH, LUCENE_MATCH, STARTS_WITH};
use super::schema::{FieldType, FieldTypeLookup};
use crate::error::{Result, TranslateError};
use crate::metrics::{self, LatencyTimer, FRONTEND_PREDICATE};
use crate::query::{escape_field, escape_value};

/// Query string that matches every document
pub const MATCH_ALL: &str = "*:*";

/// Supplies values for [`Expr::Variable`] operands.
pub trait ValueResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Literal>;
}

impl ValueResolver for HashMap<String, Literal> {
    fn resolve(&self, name: &str) -> Option<Literal> {
        self.get(name).cloned()
    }
}

/// Resolver with no bindings: every variable is unbound
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl ValueResolver for NoBindings {
    fn resolve(&self, _name: &str) -> Option<Literal> {
        None
    }
}

/// Adapts a closure into a [`ValueResolver`]
pub struct FnResolver<F>(pub F);

impl<F> ValueResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<Literal> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<Literal> {
        (self.0)(name)
    }
}

/// Predicate -> Lucene translator
pub struct PredicateTranslator<'a> {
    fields: &'a dyn FieldTypeLookup,
    resolver: &'a dyn ValueResolver,
}

impl<'a> PredicateTranslator<'a> {
    /// Translator over a field schema, with no variable bindings
    pub fn new(fields: &'a dyn FieldTypeLookup) -> Self {
        Self {
            fields,
            resolver: &NoBindings,
        }
    }

    /// Use `resolver` to bind [`Expr::Variable`] operands
    pub fn with_resolver(mut self, resolver: &'a dyn ValueResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Translate one predicate
    pub fn translate(&self, expr: &Expr) -> Result<String> {
        let _timer = LatencyTimer::new(FRONTEND_PREDICATE);
        let result = metrics::observe(FRONTEND_PREDICATE, self.translate_expr(expr));
        if let Ok(query) = &result {
            debug!(query = %query, "Translated predicate");
        }
        result
    }

    /// Translate several predicates that must all hold.
    ///
    /// Each new predicate is combined with the accumulated query as
    /// `(acc) AND (next)`; with no predicates the result is [`MATCH_ALL`].
    pub fn translate_all(&self, exprs: &[Expr]) -> Result<String> {
        let mut combined: Option<String> = None;
        for expr in exprs {
            let query = self.translate(expr)?;
            combined = Some(match combined {
                None => query,
                Some(acc) => format!("({}) AND ({})", acc, query),
            });
        }
        Ok(combined.unwrap_or_else(|| MATCH_ALL.to_string()))
    }

    fn translate_expr(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Binary { op, left, right } => match op {
                BinaryOp::AndAlso => Ok(format!(
                    "({}) AND ({})",
                    self.translate_expr(left)?,
                    self.translate_expr(right)?
                )),
                BinaryOp::OrElse => Ok(format!(
                    "({}) OR ({})",
                    self.translate_expr(left)?,
                    self.translate_expr(right)?
                )),
                BinaryOp::Equal => self.equality(*op, left, right),
                BinaryOp::NotEqual => Ok(format!("NOT ({})", self.equality(*op, left, right)?)),
                BinaryOp::GreaterThan
                | BinaryOp::GreaterThanOrEqual
                | BinaryOp::LessThan
                | BinaryOp::LessThanOrEqual => self.comparison(*op, left, right),
                other => Err(TranslateError::UnsupportedOperation(format!(
                    "binary operator '{}'",
                    other
                ))),
            },
            Expr::Call {
                method,
                receiver,
                args,
            } => self.method_call(method, receiver.as_deref(), args),
            Expr::Field(name) => match self.fields.field_type(name) {
                // A boolean field on its own reads as "is true"
                Some(FieldType::Boolean) => Ok(format!("{}:true", escape_field(name))),
                _ => Err(TranslateError::UnsupportedOperation(format!(
                    "field '{}' used as a predicate",
                    name
                ))),
            },
            Expr::Unary { op, .. } => Err(TranslateError::UnsupportedOperation(format!(
                "unary operator '{}'",
                op
            ))),
            other => Err(TranslateError::UnsupportedOperation(format!(
                "{} used as a predicate",
                other.describe()
            ))),
        }
    }

    fn equality(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<String> {
        let (field, value, _) = self.split_operands(op, left, right)?;
        let value = self.render_value(field, &self.value(value)?)?;
        Ok(format!("{}:{}", escape_field(field), value))
    }

    fn comparison(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<String> {
        let (field, value, op) = self.split_operands(op, left, right)?;
        let value = self.render_value(field, &self.value(value)?)?;
        let field = escape_field(field);

        Ok(match op {
            BinaryOp::GreaterThan => format!("{}:{{{} TO *]", field, value),
            BinaryOp::GreaterThanOrEqual => format!("{}:[{} TO *]", field, value),
            BinaryOp::LessThan => format!("{}:[* TO {}}}", field, value),
            _ => format!("{}:[* TO {}]", field, value),
        })
    }

    /// Find which operand is the entity's field; returns (field, value operand,
    /// operator as seen from the field's side).
    fn split_operands<'e>(
        &self,
        op: BinaryOp,
        left: &'e Expr,
        right: &'e Expr,
    ) -> Result<(&'e str, &'e Expr, BinaryOp)> {
        match (left, right) {
            (Expr::Field(_), Expr::Field(_)) => Err(TranslateError::UnsupportedOperation(format!(
                "'{}' between two fields",
                op
            ))),
            (Expr::Field(field), value) => Ok((field.as_str(), value, op)),
            (value, Expr::Field(field)) => Ok((field.as_str(), value, op.mirrored())),
            _ => Err(TranslateError::UnsupportedOperation(format!(
                "'{}' without a field operand",
                op
            ))),
        }
    }

    /// Concrete value of a non-field operand
    fn value(&self, expr: &Expr) -> Result<Literal> {
        match expr {
            Expr::Literal(lit) => Ok(lit.clone()),
            Expr::Variable(name) => self
                .resolver
                .resolve(name)
                .ok_or_else(|| TranslateError::UnboundValue(format!("variable '{}'", name))),
            other => Err(TranslateError::UnboundValue(other.describe())),
        }
    }

    /// Value text for `field`, checked against its declared type
    fn render_value(&self, field: &str, value: &Literal) -> Result<String> {
        let mismatch = |expected: FieldType| TranslateError::TypeMismatch {
            field: field.to_string(),
            expected: expected.as_str(),
            value: value.to_string(),
        };

        match self.fields.field_type(field) {
            Some(FieldType::Numeric) => match value {
                Literal::Integer(i) => Ok(i.to_string()),
                Literal::Float(x) if x.is_finite() => Ok(x.to_string()),
                Literal::Text(s) if s.trim().parse::<f64>().map_or(false, f64::is_finite) => {
                    Ok(s.trim().to_string())
                }
                _ => Err(mismatch(FieldType::Numeric)),
            },
            Some(FieldType::Boolean) => match value {
                Literal::Bool(b) => Ok(b.to_string()),
                Literal::Text(s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                    Ok(s.to_ascii_lowercase())
                }
                _ => Err(mismatch(FieldType::Boolean)),
            },
            // Text, keyword and undeclared fields render null as the bare word
            _ if *value == Literal::Null => Ok(value.to_string()),
            _ => Ok(escape_value(&value.to_string())),
        }
    }

    fn method_call(&self, method: &str, receiver: Option<&Expr>, args: &[Expr]) -> Result<String> {
        match method {
            CONTAINS | STARTS_WITH | ENDS_WITH => {
                let field = match receiver {
                    Some(Expr::Field(field)) => field,
                    _ => {
                        return Err(TranslateError::UnsupportedOperation(format!(
                            "method '{}' requires a field receiver",
                            method
                        )))
                    }
                };
                let [arg] = args else {
                    return Err(TranslateError::UnsupportedOperation(format!(
                        "method '{}' expects 1 argument, got {}",
                        method,
                        args.len()
                    )));
                };
                let value = escape_value(&self.value(arg)?.to_string());
                let field = escape_field(field);

                Ok(match method {
                    CONTAINS => format!("{}:*{}*", field, value),
                    STARTS_WITH => format!("{}:{}*", field, value),
                    _ => format!("{}:*{}", field, value),
                })
            }
            LUCENE_MATCH => {
                let (field, fragment) = match (receiver, args) {
                    (None, [Expr::Field(field), fragment]) => (field, fragment),
                    _ => {
                        return Err(TranslateError::UnsupportedOperation(format!(
                            "'{}' expects (field, query) arguments",
                            LUCENE_MATCH
                        )))
                    }
                };
                // Caller asserts the fragment is already valid Lucene syntax
                let fragment = self.value(fragment)?.to_string();
                Ok(format!("{}:({})", escape_field(field), fragment))
            }
            other => Err(TranslateError::UnsupportedOperation(format!(
                "method '{}'",
                other
            ))),
        }
    }
}
