/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Value coercion for command-line values
//!
//! Every value an operator types (`--off-value`, the value half of a rule,
//! a variable value, an evaluation target property) goes through [`coerce`].
//! The raw text is evaluated as an expression against an empty binding set;
//! when that fails the literal text is kept unchanged. This lets operators
//! write `true`, `123`, `[1, 2]` or `5+3` without type flags.

mod eval;
mod lexer;
mod parser;


use parser::ExpressionParser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Variables visible to an expression
pub type Bindings = Map<String, Value>;

/// Reasons an expression did not produce a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("undefined reference: {0}")]
    UndefinedReference(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

/// Evaluate an expression against a set of bindings.
///
/// # Errors
///
/// Returns an [`EvalError`] for syntax errors, references to names absent
/// from `bindings`, operator type mismatches and arithmetic faults.
pub fn evaluate(expression: &str, bindings: &Bindings) -> Result<Value, EvalError> {
    let expr = ExpressionParser::new().parse(expression)?;
    eval::eval(&expr, bindings)
}

/// A command-line value after coercion.
///
/// Either the typed result of evaluating the raw text, or the raw text itself
/// when evaluation failed. Both serialize to the bare JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Typed(Value),
    Literal(String),
}

impl CoercedValue {
    pub fn is_literal(&self) -> bool {
        matches!(self, CoercedValue::Literal(_))
    }

    /// JSON form sent over the wire
    pub fn to_json(&self) -> Value {
        match self {
            CoercedValue::Typed(value) => value.clone(),
            CoercedValue::Literal(raw) => Value::String(raw.clone()),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            CoercedValue::Typed(value) => value,
            CoercedValue::Literal(raw) => Value::String(raw),
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Typed(value) => write!(f, "{value}"),
            CoercedValue::Literal(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for CoercedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CoercedValue::Typed(value) => value.serialize(serializer),
            CoercedValue::Literal(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Values read back from the service are already typed.
impl<'de> Deserialize<'de> for CoercedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(CoercedValue::Typed)
    }
}

/// Coerce a raw command-line string into a typed value.
///
/// Never fails: evaluation errors fall back to the literal string.
pub fn coerce(raw: &str) -> CoercedValue {
    match evaluate(raw, &Bindings::new()) {
        Ok(value) => CoercedValue::Typed(value),
        Err(e) => {
            tracing::trace!(raw, error = %e, "value kept as literal string");
            CoercedValue::Literal(raw.to_string())
        }
    }
}

/// Coerce the value half of `key:value` pairs, preserving their order.
pub fn coerce_pairs<'a, I>(pairs: I) -> Vec<(String, CoercedValue)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, raw)| (key.to_string(), coerce(raw)))
        .collect()
}
