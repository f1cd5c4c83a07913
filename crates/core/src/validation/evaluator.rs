//! Whole-record evaluation outside a form session.
//!
//! Used for dry-run checks of records that arrive as JSON (imports, fixtures)
//! rather than through interactive editing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::Schema;
use crate::error::CoreError;
use crate::field::FormField;
use crate::types::Values;

/// Aggregated result of evaluating a schema against one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
    /// Record keys that match no field of the form. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_fields: Vec<String>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Evaluate every field that carries rules against `values`.
pub fn evaluate_record<K: FormField>(schema: &Schema<K>, values: &Values<K>) -> ValidationResult {
    let errors: Vec<FieldViolation> = schema
        .fields()
        .filter_map(|field| {
            let value = values.get(&field);
            schema
                .first_failure(field, value, values)
                .map(|(rule, message)| FieldViolation {
                    field: field.name().to_string(),
                    rule_type: rule.rule_type().to_string(),
                    message,
                    value: value.cloned(),
                })
        })
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        unknown_fields: Vec::new(),
    }
}

/// Parse a JSON record and evaluate it. Fails only when `record` is not an
/// object.
pub fn evaluate_json<K: FormField>(
    schema: &Schema<K>,
    record: &Value,
) -> Result<ValidationResult, CoreError> {
    let object = record
        .as_object()
        .ok_or_else(|| CoreError::NotAnObject(json_kind(record)))?;
    let (values, unknown_fields) = values_from_json::<K>(object);
    let mut result = evaluate_record(schema, &values);
    result.unknown_fields = unknown_fields;
    Ok(result)
}

/// Map wire-named keys onto typed fields. Keys that name no field are
/// returned alongside.
pub fn values_from_json<K: FormField>(record: &Map<String, Value>) -> (Values<K>, Vec<String>) {
    let mut values = Values::new();
    let mut unknown = Vec::new();
    for (key, value) in record {
        match K::from_name(key) {
            Some(field) => {
                values.insert(field, value.clone());
            }
            None => unknown.push(key.clone()),
        }
    }
    (values, unknown)
}

/// Inverse of [`values_from_json`], keyed by wire names.
pub fn values_to_json<K: FormField>(values: &Values<K>) -> Map<String, Value> {
    values
        .iter()
        .map(|(field, value)| (field.name().to_string(), value.clone()))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{max, min, required};
    use assert_matches::assert_matches;
    use serde_json::json;

    crate::form_fields! {
        enum F {
            Title => ("title", "Title"),
            Credits => ("credits", "Credits"),
            Notes => ("notes", "Notes"),
        }
    }

    fn schema() -> Schema<F> {
        Schema::new()
            .field(F::Title, [required()])
            .field(F::Credits, [required(), min(1.0), max(30.0)])
    }

    #[test]
    fn valid_record_has_no_errors() {
        let result = evaluate_json(&schema(), &json!({"title": "Algebra", "credits": 5})).unwrap();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.unknown_fields.is_empty());
    }

    #[test]
    fn collects_one_violation_per_field() {
        let result = evaluate_json(&schema(), &json!({"title": "", "credits": 40})).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);

        let credits = result.errors.iter().find(|v| v.field == "credits").unwrap();
        assert_eq!(credits.rule_type, "max");
        assert_eq!(credits.value, Some(json!(40)));
    }

    #[test]
    fn missing_field_violation_has_no_value() {
        let result = evaluate_json(&schema(), &json!({"credits": 2})).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "title");
        assert_eq!(result.errors[0].value, None);
    }

    #[test]
    fn unknown_keys_are_reported_not_validated() {
        let record = json!({"title": "A", "credits": 3, "colour": "red"});
        let result = evaluate_json(&schema(), &record).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.unknown_fields, vec!["colour".to_string()]);
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert_matches!(
            evaluate_json(&schema(), &json!([1, 2])),
            Err(CoreError::NotAnObject("array"))
        );
    }

    #[test]
    fn json_conversion_preserves_wire_names() {
        let record = json!({"notes": "n", "title": "t"});
        let (values, _) = values_from_json::<F>(record.as_object().unwrap());
        assert_eq!(values.get(&F::Notes), Some(&json!("n")));
        assert_eq!(Value::Object(values_to_json(&values)), record);
    }

    #[test]
    fn violations_serialize_without_null_value() {
        let result = evaluate_json(&schema(), &json!({"credits": 2})).unwrap();
        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["is_valid"], json!(false));
        assert!(body["errors"][0].get("value").is_none());
        assert!(body.get("unknown_fields").is_none());
    }
}
