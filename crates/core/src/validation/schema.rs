//! Per-field ordered rule lists.

use std::collections::BTreeMap;

use serde_json::Value;

use super::rules::Rule;
use crate::field::FormField;
use crate::types::Values;

/// The validation contract of one form: for each field, the rules to run in
/// order. The first failing rule decides the field's error.
#[derive(Debug, Clone)]
pub struct Schema<K> {
    fields: BTreeMap<K, Vec<Rule<K>>>,
}

impl<K: FormField> Default for Schema<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FormField> Schema<K> {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Append `rules` to `field`'s rule list.
    pub fn field(mut self, field: K, rules: impl IntoIterator<Item = Rule<K>>) -> Self {
        self.fields.entry(field).or_default().extend(rules);
        self
    }

    pub fn rules_for(&self, field: K) -> &[Rule<K>] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `field` has at least one rule.
    pub fn contains(&self, field: K) -> bool {
        !self.rules_for(field).is_empty()
    }

    /// Fields that carry rules, in key order.
    pub fn fields(&self) -> impl Iterator<Item = K> + '_ {
        self.fields
            .iter()
            .filter(|(_, rules)| !rules.is_empty())
            .map(|(field, _)| *field)
    }

    /// Run `field`'s rules against `value`, stopping at the first failure.
    ///
    /// `values` is the full record the rules may consult for cross-field
    /// checks; `value` is the candidate and need not equal `values[field]`.
    pub fn validate_field(
        &self,
        field: K,
        value: Option<&Value>,
        values: &Values<K>,
    ) -> Option<String> {
        self.rules_for(field)
            .iter()
            .find_map(|rule| rule.check(value, values))
    }

    /// Like [`validate_field`](Self::validate_field), also returning the
    /// failing rule.
    pub fn first_failure(
        &self,
        field: K,
        value: Option<&Value>,
        values: &Values<K>,
    ) -> Option<(&Rule<K>, String)> {
        self.rules_for(field)
            .iter()
            .find_map(|rule| rule.check(value, values).map(|msg| (rule, msg)))
    }
}
