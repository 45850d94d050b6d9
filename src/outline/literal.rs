//! Literal evaluation: turns constant-expression nodes into plain values.
//!
//! Evaluation never fails. Expression kinds that are not literals degrade
//! to [`Value::None`], and a bare name that does not spell a literal
//! (`True`, `None`, `42`) degrades to its own text.

use std::fmt;

use serde::Serialize;

use super::ast::{Expr, Number};
use super::common::parse_number_literal;

/// A plain value, displayed the way Python's `str()` would show it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Numeric text that does not fit `Int`/`Float` (big or imaginary)
    NumText(String),
    Str(String),
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

impl Value {
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Python `repr()`-style rendering, used for nested elements
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => repr_str(s),
            other => other.to_string(),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
            Number::Text(text) => Value::NumText(text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::NumText(text) | Value::Str(text) => f.write_str(text),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                write!(f, "[{}]", inner.join(", "))
            }
            Value::Dict(pairs) => {
                let inner: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
                    .collect();
                write!(f, "{{{}}}", inner.join(", "))
            }
        }
    }
}

// ============ Evaluation ============

/// Evaluate a single constant expression
/// Dict key equality: `1`, `1.0` and `True` are the same key
fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_key(x, y))
        }
        _ => match (numeric_key(a), numeric_key(b)) {
            (Some(x), Some(y)) => x == y,
            (None, None) => a == b,
            _ => false,
        },
    }
}

fn numeric_key(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

pub fn evaluate(expr: &Expr) -> Value {
    match expr {
        Expr::Num(number) => Value::from(number.clone()),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::Name(name) => parse_name_literal(name).unwrap_or_else(|| Value::Str(name.clone())),
        Expr::List(elts) | Expr::Tuple(elts) => Value::List(evaluate_list(elts)),
        Expr::Dict { keys, values } => {
            let keys = evaluate_list(keys);
            let values = evaluate_list(values);
            let mut pairs: Vec<(Value, Value)> = Vec::new();
            for (key, value) in keys.into_iter().zip(values) {
                // later duplicates replace the value but keep the first position
                match pairs.iter_mut().find(|(k, _)| same_key(k, &key)) {
                    Some(slot) => slot.1 = value,
                    None => pairs.push((key, value)),
                }
            }
            Value::Dict(pairs)
        }
        Expr::Unsupported { .. } => Value::None,
    }
}

/// Evaluate every expression in order; unsupported ones become `Value::None`
pub fn evaluate_list(exprs: &[Expr]) -> Vec<Value> {
    exprs.iter().map(evaluate).collect()
}

/// Resolve an identifier that spells a literal constant
fn parse_name_literal(name: &str) -> Option<Value> {
    match name {
        "True" => Some(Value::Bool(true)),
        "False" => Some(Value::Bool(false)),
        "None" => Some(Value::None),
        other => parse_number_literal(other).map(Value::from),
    }
}

// ============ Formatting ============

fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        let sci = format!("{:e}", x);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        };
    }

    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Expr {
        Expr::Name(s.to_string())
    }

    #[test]
    fn test_evaluate_scalars() {
        assert_eq!(evaluate(&Expr::Num(Number::Int(3))), Value::Int(3));
        assert_eq!(evaluate(&Expr::Str("foo".into())), Value::Str("foo".into()));
        assert_eq!(evaluate(&name("True")), Value::Bool(true));
        assert_eq!(evaluate(&name("None")), Value::None);
        assert_eq!(evaluate(&name("12")), Value::Int(12));
        assert_eq!(evaluate(&name("Animal")), Value::Str("Animal".into()));
    }

    #[test]
    fn test_evaluate_unsupported_is_none() {
        let expr = Expr::Unsupported { kind: "call".into() };
        assert_eq!(evaluate(&expr), Value::None);

        let list = Expr::List(vec![Expr::Num(Number::Int(1)), expr]);
        assert_eq!(evaluate(&list), Value::List(vec![Value::Int(1), Value::None]));
    }

    #[test]
    fn test_evaluate_dict_truncates_to_shorter() {
        let expr = Expr::Dict {
            keys: vec![Expr::Str("a".into()), Expr::Str("b".into())],
            values: vec![Expr::Num(Number::Int(1))],
        };
        assert_eq!(
            evaluate(&expr),
            Value::Dict(vec![(Value::Str("a".into()), Value::Int(1))])
        );
    }

    #[test]
    fn test_evaluate_dict_duplicate_key() {
        let expr = Expr::Dict {
            keys: vec![name("k"), name("j"), name("k")],
            values: vec![
                Expr::Num(Number::Int(1)),
                Expr::Num(Number::Int(2)),
                Expr::Num(Number::Int(3)),
            ],
        };
        assert_eq!(evaluate(&expr).to_string(), "{'k': 3, 'j': 2}");
    }

    #[test]
    fn test_evaluate_dict_equal_numeric_keys_collapse() {
        let expr = Expr::Dict {
            keys: vec![
                Expr::Num(Number::Int(1)),
                name("True"),
                Expr::Num(Number::Float(1.0)),
                name("False"),
                Expr::Num(Number::Int(0)),
            ],
            values: vec![
                Expr::Str("x".into()),
                Expr::Str("y".into()),
                Expr::Str("z".into()),
                Expr::Str("no".into()),
                Expr::Str("zero".into()),
            ],
        };
        assert_eq!(evaluate(&expr).to_string(), "{1: 'z', False: 'zero'}");

        let distinct = Expr::Dict {
            keys: vec![Expr::Num(Number::Int(1)), Expr::Str("1".into())],
            values: vec![Expr::Num(Number::Int(1)), Expr::Num(Number::Int(2))],
        };
        assert_eq!(evaluate(&distinct).to_string(), "{1: 1, '1': 2}");
    }

    #[test]
    fn test_display_like_python_str() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(1e20).to_string(), "1e+20");
        assert_eq!(Value::Float(1e-5).to_string(), "1e-05");
        assert_eq!(
            Value::List(vec![Value::Str("a".into()), Value::Int(1), Value::None]).to_string(),
            "['a', 1, None]"
        );
        assert_eq!(Value::Str("it's".into()).repr(), "\"it's\"");
    }
}
