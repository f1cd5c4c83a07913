//! Raw input coercion.
//!
//! Form inputs deliver text. Before a value reaches the engine it is coerced
//! according to the kind of input it came from.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The kind of input control a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Checkbox,
}

impl FromStr for InputKind {
    type Err = std::convert::Infallible;

    /// Unknown kinds (`"email"`, `"textarea"`, ...) are plain text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "number" | "range" => Self::Number,
            "checkbox" => Self::Checkbox,
            _ => Self::Text,
        })
    }
}

/// Coerce a raw input string into a form value.
///
/// - `Number`: blank input becomes the empty-string sentinel; integral input a
///   JSON integer (including `1.0`); other finite input a JSON float.
///   Unparsable or non-finite text becomes `null`, which `required` rejects.
/// - `Checkbox`: `true` for `true`/`on`/`checked`/`1`, any case.
/// - `Text`: passed through unchanged.
pub fn coerce(raw: &str, kind: InputKind) -> Value {
    match kind {
        InputKind::Text => Value::String(raw.to_string()),
        InputKind::Checkbox => Value::Bool(matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "checked" | "1"
        )),
        InputKind::Number => coerce_number(raw),
    }
}

fn coerce_number(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => number_value(n),
        _ => Value::Null,
    }
}

/// Integral floats within `i64` range are stored as integers so that `1` and
/// `1.0` compare equal as JSON values.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
