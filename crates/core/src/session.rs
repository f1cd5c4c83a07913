//! Interactive form-editing session.
//!
//! A [`FormSession`] owns the values, errors and touched set of one editing
//! lifetime (a dialog being open, a record being edited). All mutation goes
//! through its methods; callers only ever read snapshots.
//!
//! Per field the session tracks a two-state machine:
//!
//! - **Untouched**: value changes are stored but the error entry is left
//!   alone, so nothing is reported before the user leaves the field.
//! - **Touched** (after the first blur): every value change revalidates the
//!   field immediately.
//!
//! A blur always revalidates. [`FormSession::validate_form`] rebuilds the
//! whole errors map and is the gate before saving.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{coerce, InputKind};
use crate::field::FormField;
use crate::types::{Errors, Touched, Values};
use crate::validation::evaluator::values_to_json;
use crate::validation::schema::Schema;

/// State of one form-editing session.
#[derive(Debug, Clone)]
pub struct FormSession<K: FormField> {
    schema: Arc<Schema<K>>,
    /// Values the session was created with; restored by `reset_form(None)`.
    initial: Values<K>,
    /// Values as of the last reset, for dirty tracking.
    baseline: Values<K>,
    values: Values<K>,
    errors: Errors<K>,
    touched: Touched<K>,
}

/// Serializable view of a session, keyed by wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub values: Map<String, Value>,
    pub errors: BTreeMap<String, String>,
    pub touched: Vec<String>,
    pub is_dirty: bool,
}

impl<K: FormField> FormSession<K> {
    pub fn new(schema: impl Into<Arc<Schema<K>>>, initial_values: Values<K>) -> Self {
        Self {
            schema: schema.into(),
            baseline: initial_values.clone(),
            values: initial_values.clone(),
            initial: initial_values,
            errors: Errors::new(),
            touched: Touched::new(),
        }
    }

    pub fn schema(&self) -> &Schema<K> {
        &self.schema
    }

    pub fn values(&self) -> &Values<K> {
        &self.values
    }

    pub fn errors(&self) -> &Errors<K> {
        &self.errors
    }

    pub fn touched(&self) -> &Touched<K> {
        &self.touched
    }

    pub fn initial_values(&self) -> &Values<K> {
        &self.initial
    }

    pub fn value(&self, field: K) -> Option<&Value> {
        self.values.get(&field)
    }

    pub fn error(&self, field: K) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: K) -> bool {
        self.touched.contains(&field)
    }

    /// The error a form should display next to `field`: only once the user
    /// has left the field at least once.
    pub fn visible_error(&self, field: K) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// Whether any value differs from the values of the last reset.
    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    /// Run `field`'s rules against a candidate `value` and the current
    /// values. Does not touch session state.
    pub fn validate_field(&self, field: K, value: Option<&Value>) -> Option<String> {
        self.schema.validate_field(field, value, &self.values)
    }

    /// Revalidate every field that has rules, replacing the errors map
    /// wholesale. Returns `true` when no field has an error.
    pub fn validate_form(&mut self) -> bool {
        let errors: Errors<K> = self
            .schema
            .fields()
            .filter_map(|field| {
                self.validate_field(field, self.values.get(&field))
                    .map(|msg| (field, msg))
            })
            .collect();

        tracing::debug!(error_count = errors.len(), "Form validated");
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Store a raw input value after coercing it by `kind`. Revalidates only
    /// if the field is already touched.
    pub fn handle_change(&mut self, field: K, raw: &str, kind: InputKind) {
        self.set_field_value(field, coerce(raw, kind));
    }

    /// Mark `field` touched and revalidate it.
    pub fn handle_blur(&mut self, field: K) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Programmatic counterpart of [`handle_change`](Self::handle_change)
    /// for an already-typed value.
    pub fn set_field_value(&mut self, field: K, value: impl Into<Value>) {
        self.values.insert(field, value.into());
        if self.is_touched(field) {
            self.revalidate(field);
        }
    }

    /// Merge `partial` into the values without revalidating anything. Call
    /// [`validate_form`](Self::validate_form) afterwards if errors must
    /// reflect the new values.
    pub fn set_multiple_values(&mut self, partial: impl IntoIterator<Item = (K, Value)>) {
        self.values.extend(partial);
    }

    /// Start over with `new_values`, or with the values the session was
    /// created with. Clears errors and touched state.
    pub fn reset_form(&mut self, new_values: Option<Values<K>>) {
        let values = new_values.unwrap_or_else(|| self.initial.clone());
        tracing::debug!(field_count = values.len(), "Form reset");
        self.baseline = values.clone();
        self.values = values;
        self.errors.clear();
        self.touched.clear();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: values_to_json(&self.values),
            errors: self
                .errors
                .iter()
                .map(|(field, msg)| (field.name().to_string(), msg.clone()))
                .collect(),
            touched: self.touched.iter().map(|f| f.name().to_string()).collect(),
            is_dirty: self.is_dirty(),
        }
    }

    /// End the session, handing back the edited values.
    pub fn into_values(self) -> Values<K> {
        self.values
    }

    fn revalidate(&mut self, field: K) {
        match self.validate_field(field, self.values.get(&field)) {
            Some(msg) => {
                tracing::trace!(field = field.name(), error = %msg, "Field invalid");
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{equals, min, min_length, required};
    use serde_json::json;

    crate::form_fields! {
        enum F {
            Title => ("title", "Title"),
            Weight => ("weight", "Weight"),
            Password => ("password", "Password"),
            Confirm => ("confirm", "Confirm password"),
            Notes => ("notes", "Notes"),
        }
    }

    fn schema() -> Schema<F> {
        Schema::new()
            .field(F::Title, [required(), min_length(5).with_message("too short")])
            .field(F::Weight, [min(0.1).with_message("too small")])
            .field(F::Confirm, [equals(F::Password).with_message("Fields do not match")])
    }

    fn session(pairs: &[(F, Value)]) -> FormSession<F> {
        FormSession::new(schema(), pairs.iter().cloned().collect())
    }

    #[test]
    fn new_session_starts_clean() {
        let s = session(&[(F::Title, json!(""))]);
        assert!(s.errors().is_empty());
        assert!(s.touched().is_empty());
        assert!(!s.is_dirty());
        assert_eq!(s.value(F::Title), Some(&json!("")));
    }

    #[test]
    fn change_on_untouched_field_does_not_validate() {
        let mut s = session(&[(F::Title, json!("Algebra"))]);
        s.handle_change(F::Title, "", InputKind::Text);
        assert_eq!(s.value(F::Title), Some(&json!("")));
        assert_eq!(s.error(F::Title), None);
    }

    #[test]
    fn change_on_untouched_field_keeps_stale_error() {
        let mut s = session(&[(F::Title, json!(""))]);
        assert!(!s.validate_form());
        s.handle_change(F::Title, "Algebra", InputKind::Text);
        assert_eq!(s.error(F::Title), Some("This field is required"));
    }

    #[test]
    fn blur_touches_and_validates() {
        let mut s = session(&[(F::Title, json!("abc"))]);
        s.handle_blur(F::Title);
        assert!(s.is_touched(F::Title));
        assert_eq!(s.error(F::Title), Some("too short"));
    }

    #[test]
    fn change_on_touched_field_revalidates() {
        let mut s = session(&[(F::Title, json!("abc"))]);
        s.handle_blur(F::Title);
        s.handle_change(F::Title, "Algebra", InputKind::Text);
        assert_eq!(s.error(F::Title), None);
        s.handle_change(F::Title, "", InputKind::Text);
        assert_eq!(s.error(F::Title), Some("This field is required"));
    }

    #[test]
    fn numeric_change_coerces_and_revalidates() {
        let mut s = session(&[(F::Weight, json!(1))]);
        s.handle_blur(F::Weight);
        assert_eq!(s.error(F::Weight), None);

        s.handle_change(F::Weight, "0", InputKind::Number);
        assert_eq!(s.value(F::Weight), Some(&json!(0)));
        assert_eq!(s.error(F::Weight), Some("too small"));
    }

    #[test]
    fn set_field_value_follows_touched_gating() {
        let mut s = session(&[(F::Weight, json!(1))]);
        s.set_field_value(F::Weight, 0);
        assert_eq!(s.error(F::Weight), None);

        s.handle_blur(F::Weight);
        assert_eq!(s.error(F::Weight), Some("too small"));
        s.set_field_value(F::Weight, 0.5);
        assert_eq!(s.error(F::Weight), None);
    }

    #[test]
    fn set_multiple_values_skips_validation() {
        let mut s = session(&[(F::Title, json!("Algebra"))]);
        s.handle_blur(F::Title);
        s.set_multiple_values([(F::Title, json!(""))]);
        assert_eq!(s.error(F::Title), None);

        assert!(!s.validate_form());
        assert_eq!(s.error(F::Title), Some("This field is required"));
    }

    #[test]
    fn validate_form_clears_stale_errors() {
        let mut s = session(&[(F::Title, json!(""))]);
        assert!(!s.validate_form());
        s.set_multiple_values([(F::Title, json!("Algebra"))]);
        assert!(s.validate_form());
        assert!(s.errors().is_empty());
    }

    #[test]
    fn validate_field_is_pure() {
        let s = session(&[(F::Password, json!("abc")), (F::Confirm, json!("abc"))]);
        assert_eq!(
            s.validate_field(F::Confirm, Some(&json!("abd"))).as_deref(),
            Some("Fields do not match")
        );
        assert!(s.errors().is_empty());
        assert_eq!(s.value(F::Confirm), Some(&json!("abc")));
    }

    #[test]
    fn fields_without_rules_never_get_errors() {
        let mut s = session(&[(F::Notes, json!(""))]);
        s.handle_blur(F::Notes);
        s.handle_change(F::Notes, "x", InputKind::Text);
        s.validate_form();
        assert_eq!(s.error(F::Notes), None);
        assert_eq!(s.validate_field(F::Notes, None), None);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut s = session(&[(F::Title, json!("Algebra"))]);
        s.handle_blur(F::Title);
        s.handle_change(F::Title, "ab", InputKind::Text);
        assert!(s.is_dirty());

        s.reset_form(None);
        assert_eq!(s.value(F::Title), Some(&json!("Algebra")));
        assert!(s.errors().is_empty());
        assert!(s.touched().is_empty());
        assert!(!s.is_dirty());
    }

    #[test]
    fn reset_with_new_values_replaces_everything() {
        let mut s = session(&[(F::Title, json!("Algebra")), (F::Notes, json!("n"))]);
        s.handle_blur(F::Title);
        s.reset_form(Some([(F::Title, json!("Geometry"))].into_iter().collect()));
        assert_eq!(s.value(F::Title), Some(&json!("Geometry")));
        assert_eq!(s.value(F::Notes), None);
        assert!(!s.is_dirty());

        s.reset_form(None);
        assert_eq!(s.value(F::Title), Some(&json!("Algebra")));
    }

    #[test]
    fn visible_error_requires_touch() {
        let mut s = session(&[(F::Title, json!(""))]);
        s.validate_form();
        assert_eq!(s.error(F::Title), Some("This field is required"));
        assert_eq!(s.visible_error(F::Title), None);
        s.handle_blur(F::Title);
        assert_eq!(s.visible_error(F::Title), Some("This field is required"));
    }

    #[test]
    fn snapshot_uses_wire_names() {
        let mut s = session(&[(F::Title, json!("abc"))]);
        s.handle_blur(F::Title);
        let snap = s.snapshot();
        assert_eq!(snap.values.get("title"), Some(&json!("abc")));
        assert_eq!(snap.errors.get("title").map(String::as_str), Some("too short"));
        assert_eq!(snap.touched, vec!["title".to_string()]);
        assert!(!snap.is_dirty);
    }

    #[test]
    fn into_values_returns_edits() {
        let mut s = session(&[]);
        s.set_field_value(F::Title, "Algebra");
        let values = s.into_values();
        assert_eq!(values.get(&F::Title), Some(&json!("Algebra")));
    }
}
