/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Tree-walking evaluator for parsed value expressions

use super::parser::Expr;
use super::{Bindings, EvalError};
use serde_json::{Map, Number, Value};

pub(crate) fn eval(expr: &Expr, bindings: &Bindings) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Identifier(path) => resolve(path, bindings),
        Expr::List(items) => items
            .iter()
            .map(|item| eval(item, bindings))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expr::Map(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(key.clone(), eval(value, bindings)?);
            }
            Ok(Value::Object(map))
        }
        Expr::Unary { op, operand } => unary(op, eval(operand, bindings)?),
        Expr::Binary { op, left, right } => match *op {
            // Short-circuit before touching the right operand
            "&&" => {
                if !as_bool(op, &eval(left, bindings)?)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(as_bool(op, &eval(right, bindings)?)?))
            }
            "||" => {
                if as_bool(op, &eval(left, bindings)?)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(as_bool(op, &eval(right, bindings)?)?))
            }
            _ => binary(op, eval(left, bindings)?, eval(right, bindings)?),
        },
        Expr::Ternary {
            condition,
            then,
            otherwise,
        } => {
            if as_bool("?:", &eval(condition, bindings)?)? {
                eval(then, bindings)
            } else {
                eval(otherwise, bindings)
            }
        }
        Expr::Call { name, args } => {
            let args = args
                .iter()
                .map(|arg| eval(arg, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, args)
        }
    }
}

fn resolve(path: &str, bindings: &Bindings) -> Result<Value, EvalError> {
    let mut segments = path.split('.');
    let root = segments.next().unwrap_or_default();
    let mut current = bindings
        .get(root)
        .ok_or_else(|| EvalError::UndefinedReference(path.to_string()))?;
    for segment in segments {
        current = current
            .get(segment)
            .ok_or_else(|| EvalError::UndefinedReference(path.to_string()))?;
    }
    Ok(current.clone())
}

/// Numeric view of a JSON number that keeps integers exact.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(op: &str, value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Num::Int(i)),
                None => n
                    .as_f64()
                    .map(Num::Float)
                    .ok_or_else(|| type_error(op, value)),
            },
            _ => Err(type_error(op, value)),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }
}

fn float(value: f64) -> Result<Value, EvalError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| EvalError::Arithmetic(format!("result {value} is not a finite number")))
}

fn overflow(op: &str) -> EvalError {
    EvalError::Arithmetic(format!("integer overflow in '{op}'"))
}

fn type_error(op: &str, value: &Value) -> EvalError {
    EvalError::Type(format!("operator '{op}' does not apply to {value}"))
}

fn as_bool(op: &str, value: &Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| type_error(op, value))
}

fn unary(op: &str, operand: Value) -> Result<Value, EvalError> {
    match op {
        "!" => Ok(Value::Bool(!as_bool(op, &operand)?)),
        "+" => Num::of(op, &operand).map(|_| operand),
        "-" => match Num::of(op, &operand)? {
            Num::Int(i) => i.checked_neg().map(Value::from).ok_or_else(|| overflow(op)),
            Num::Float(f) => float(-f),
        },
        _ => Err(EvalError::Syntax(format!("unknown unary operator '{op}'"))),
    }
}

fn binary(op: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        "==" => Ok(Value::Bool(loosely_equal(&left, &right))),
        "!=" => Ok(Value::Bool(!loosely_equal(&left, &right))),
        "<" | ">" | "<=" | ">=" => compare(op, &left, &right),
        "in" => contains(&left, &right),
        "+" => {
            if let (Value::String(l), Value::String(r)) = (&left, &right) {
                return Ok(Value::String(format!("{l}{r}")));
            }
            arithmetic(op, &left, &right, i64::checked_add, |l, r| l + r)
        }
        "-" => arithmetic(op, &left, &right, i64::checked_sub, |l, r| l - r),
        "*" => arithmetic(op, &left, &right, i64::checked_mul, |l, r| l * r),
        "/" => {
            let (l, r) = (Num::of(op, &left)?, Num::of(op, &right)?);
            float(l.as_f64() / r.as_f64())
        }
        "%" => match (Num::of(op, &left)?, Num::of(op, &right)?) {
            (Num::Int(_), Num::Int(0)) => {
                Err(EvalError::Arithmetic("integer modulo by zero".to_string()))
            }
            (Num::Int(l), Num::Int(r)) => l.checked_rem(r).map(Value::from).ok_or_else(|| overflow(op)),
            _ => Err(EvalError::Type(
                "operator '%' requires integer operands".to_string(),
            )),
        },
        "**" => {
            let (l, r) = (Num::of(op, &left)?, Num::of(op, &right)?);
            float(l.as_f64().powf(r.as_f64()))
        }
        _ => Err(EvalError::Syntax(format!("unknown operator '{op}'"))),
    }
}

fn arithmetic(
    op: &str,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (Num::of(op, left)?, Num::of(op, right)?) {
        (Num::Int(l), Num::Int(r)) => int_op(l, r).map(Value::from).ok_or_else(|| overflow(op)),
        (l, r) => float(float_op(l.as_f64(), r.as_f64())),
    }
}

/// Equality where `1 == 1.0` holds
fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
            (Some(l), Some(r)) => l == r,
            _ => l.as_f64() == r.as_f64(),
        },
        _ => left == right,
    }
}

fn compare(op: &str, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::String(l), Value::String(r)) => l.partial_cmp(r),
        _ => {
            let (l, r) = (Num::of(op, left)?, Num::of(op, right)?);
            match (l, r) {
                (Num::Int(l), Num::Int(r)) => l.partial_cmp(&r),
                (l, r) => l.as_f64().partial_cmp(&r.as_f64()),
            }
        }
    };
    let ordering = ordering.ok_or_else(|| type_error(op, left))?;
    let result = match op {
        "<" => ordering.is_lt(),
        ">" => ordering.is_gt(),
        "<=" => ordering.is_le(),
        _ => ordering.is_ge(),
    };
    Ok(Value::Bool(result))
}

fn contains(needle: &Value, haystack: &Value) -> Result<Value, EvalError> {
    match haystack {
        Value::Array(items) => Ok(Value::Bool(
            items.iter().any(|item| loosely_equal(item, needle)),
        )),
        Value::Object(map) => match needle {
            Value::String(key) => Ok(Value::Bool(map.contains_key(key))),
            other => Err(type_error("in", other)),
        },
        other => Err(type_error("in", other)),
    }
}

fn call(name: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    let [arg]: [Value; 1] = args.try_into().map_err(|args: Vec<Value>| {
        EvalError::Type(format!(
            "{name}() takes exactly one argument, {} given",
            args.len()
        ))
    })?;
    match (name, &arg) {
        ("len", Value::String(s)) => Ok(Value::from(s.chars().count())),
        ("len", Value::Array(items)) => Ok(Value::from(items.len())),
        ("len", Value::Object(map)) => Ok(Value::from(map.len())),
        ("upper", Value::String(s)) => Ok(Value::String(s.to_uppercase())),
        ("lower", Value::String(s)) => Ok(Value::String(s.to_lowercase())),
        ("trim", Value::String(s)) => Ok(Value::String(s.trim().to_string())),
        ("abs", _) => match Num::of(name, &arg)? {
            Num::Int(i) => i.checked_abs().map(Value::from).ok_or_else(|| overflow(name)),
            Num::Float(f) => float(f.abs()),
        },
        ("len" | "upper" | "lower" | "trim", _) => Err(type_error(name, &arg)),
        _ => Err(EvalError::UndefinedReference(format!("{name}()"))),
    }
}
