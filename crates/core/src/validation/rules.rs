//! Rule descriptors and the built-in rule constructors.
//!
//! A rule is a pure function of `(candidate value, all current values)` that
//! yields an error message on failure. Built-in rules are tagged descriptors
//! so they stay inspectable (`rule_type`); [`custom`] wraps an arbitrary
//! closure for anything the built-ins do not cover.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::error::CoreError;
use crate::field::FormField;
use crate::types::Values;

/// Heuristic address shape check: something, `@`, something, `.`, something,
/// with no whitespace. Says nothing about deliverability.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Signature of a caller-defined rule.
pub type RuleFn<K> = Arc<dyn Fn(Option<&Value>, &Values<K>) -> Option<String> + Send + Sync>;

/// What a rule checks.
#[derive(Clone)]
pub enum RuleKind<K> {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
    Matches(Regex),
    Equals(K),
    Custom(RuleFn<K>),
}

impl<K: fmt::Debug> fmt::Debug for RuleKind<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            Self::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
            Self::Min(n) => f.debug_tuple("Min").field(n).finish(),
            Self::Max(n) => f.debug_tuple("Max").field(n).finish(),
            Self::Email => f.write_str("Email"),
            Self::Matches(re) => f.debug_tuple("Matches").field(&re.as_str()).finish(),
            Self::Equals(other) => f.debug_tuple("Equals").field(other).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A single validation rule with an optional message override.
#[derive(Debug, Clone)]
pub struct Rule<K> {
    kind: RuleKind<K>,
    message: Option<String>,
}

impl<K: FormField> Rule<K> {
    fn new(kind: RuleKind<K>) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Replace the default failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(&self) -> &RuleKind<K> {
        &self.kind
    }

    /// Stable identifier of the rule kind, used in reports.
    pub fn rule_type(&self) -> &'static str {
        match self.kind {
            RuleKind::Required => "required",
            RuleKind::MinLength(_) => "min_length",
            RuleKind::MaxLength(_) => "max_length",
            RuleKind::Min(_) => "min",
            RuleKind::Max(_) => "max",
            RuleKind::Email => "email",
            RuleKind::Matches(_) => "matches",
            RuleKind::Equals(_) => "equals",
            RuleKind::Custom(_) => "custom",
        }
    }

    /// Evaluate the rule. `None` means the value passes.
    pub fn check(&self, value: Option<&Value>, values: &Values<K>) -> Option<String> {
        let failed = match &self.kind {
            RuleKind::Required => is_blank(value) || value == Some(&Value::Bool(false)),
            RuleKind::MinLength(min) => {
                !is_blank(value) && length(value).is_some_and(|len| len < *min)
            }
            RuleKind::MaxLength(max) => length(value).is_some_and(|len| len > *max),
            RuleKind::Min(min) => out_of_range(value, |n| n < *min),
            RuleKind::Max(max) => out_of_range(value, |n| n > *max),
            RuleKind::Email => fails_pattern(&EMAIL_RE, value),
            RuleKind::Matches(re) => fails_pattern(re, value),
            RuleKind::Equals(other) => !same_value(value, values.get(other)),
            RuleKind::Custom(f) => {
                return f(value, values)
                    .filter(|msg| !msg.is_empty())
                    .map(|msg| self.message.clone().unwrap_or(msg));
            }
        };
        failed.then(|| self.message())
    }

    fn message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match &self.kind {
            RuleKind::Required => "This field is required".to_string(),
            RuleKind::MinLength(n) => format!("Must be at least {n} characters"),
            RuleKind::MaxLength(n) => format!("Must be at most {n} characters"),
            RuleKind::Min(n) => format!("Must be at least {n}"),
            RuleKind::Max(n) => format!("Must be at most {n}"),
            RuleKind::Email => "Invalid email address".to_string(),
            RuleKind::Matches(_) => "Invalid format".to_string(),
            RuleKind::Equals(other) => format!("Must match {}", other.label()),
            RuleKind::Custom(_) => "Invalid value".to_string(),
        }
    }
}

/// Fails on undefined, `null`, blank strings, empty lists and unchecked
/// checkboxes. `0` is a value, not an absence: unlike a plain falsiness
/// check, a numeric zero satisfies `required`.
pub fn required<K: FormField>() -> Rule<K> {
    Rule::new(RuleKind::Required)
}

/// Minimum length in characters (or items, for lists). Blank values pass.
pub fn min_length<K: FormField>(min: usize) -> Rule<K> {
    Rule::new(RuleKind::MinLength(min))
}

/// Maximum length in characters (or items, for lists).
pub fn max_length<K: FormField>(max: usize) -> Rule<K> {
    Rule::new(RuleKind::MaxLength(max))
}

/// Inclusive lower bound. Undefined and blank values pass; text that is
/// not a number fails.
pub fn min<K: FormField>(min: f64) -> Rule<K> {
    Rule::new(RuleKind::Min(min))
}

/// Inclusive upper bound. Undefined and blank values pass; text that is
/// not a number fails.
pub fn max<K: FormField>(max: f64) -> Rule<K> {
    Rule::new(RuleKind::Max(max))
}

/// Shape-only email heuristic. Blank values pass.
pub fn email<K: FormField>() -> Rule<K> {
    Rule::new(RuleKind::Email)
}

/// Value must match `pattern`. Blank values pass.
pub fn matches<K: FormField>(pattern: Regex) -> Rule<K> {
    Rule::new(RuleKind::Matches(pattern))
}

/// Like [`matches`], compiling the pattern first.
pub fn try_matches<K: FormField>(pattern: &str) -> Result<Rule<K>, CoreError> {
    let re = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(matches(re))
}

/// Value must equal the current value of `other`.
pub fn equals<K: FormField>(other: K) -> Rule<K> {
    Rule::new(RuleKind::Equals(other))
}

/// Caller-defined rule. Must be pure; an empty message counts as a pass.
pub fn custom<K, F>(f: F) -> Rule<K>
where
    K: FormField,
    F: Fn(Option<&Value>, &Values<K>) -> Option<String> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Custom(Arc::new(f)))
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

fn length(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Range check shared by `min` and `max`. Blank values are left to
/// `required`; a non-blank string that is not a number is out of range.
fn out_of_range(value: Option<&Value>, violates: impl Fn(f64) -> bool) -> bool {
    if is_blank(value) {
        return false;
    }
    match numeric(value) {
        Some(n) => violates(n),
        None => value.is_some_and(Value::is_string),
    }
}

/// Value equality where numbers compare by magnitude, so `1` equals `1.0`.
fn same_value(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn fails_pattern(re: &Regex, value: Option<&Value>) -> bool {
    if is_blank(value) {
        return false;
    }
    match value.and_then(Value::as_str) {
        Some(s) => !re.is_match(s),
        None => true,
    }
}
