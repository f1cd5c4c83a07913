//! Rubric criterion editor.
//!
//! Each criterion of a rubric is edited in its own session. Weights are
//! fractions of the total grade.

use coursework_core::validation::rules::{max, max_length, min, required};
use coursework_core::{form_fields, FormSession, Schema, Values};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::RecordId;

pub const TITLE_MAX_LEN: usize = 200;
pub const MIN_WEIGHT: f64 = 0.1;
pub const MAX_WEIGHT: f64 = 1.0;

form_fields! {
    pub enum CriterionField {
        Title => ("title", "Criterion"),
        Weight => ("weight", "Weight"),
        MaxPoints => ("max_points", "Maximum points"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub id: RecordId,
    pub rubric_id: RecordId,
    pub title: String,
    pub weight: f64,
    pub max_points: u32,
}

pub fn schema() -> Schema<CriterionField> {
    Schema::new()
        .field(CriterionField::Title, [required(), max_length(TITLE_MAX_LEN)])
        .field(
            CriterionField::Weight,
            [
                required(),
                min(MIN_WEIGHT).with_message("Weight must be at least 0.1"),
                max(MAX_WEIGHT).with_message("Weight cannot exceed 1"),
            ],
        )
        .field(CriterionField::MaxPoints, [required(), min(1.0)])
}

pub fn default_values() -> Values<CriterionField> {
    [
        (CriterionField::Title, json!("")),
        (CriterionField::Weight, json!(MAX_WEIGHT)),
        (CriterionField::MaxPoints, json!(10)),
    ]
    .into_iter()
    .collect()
}

/// Seed values from an existing criterion. Every field is present on the
/// record, so nothing is defaulted.
pub fn record_values(criterion: &RubricCriterion) -> Values<CriterionField> {
    [
        (CriterionField::Title, Value::from(criterion.title.as_str())),
        (CriterionField::Weight, Value::from(criterion.weight)),
        (CriterionField::MaxPoints, Value::from(criterion.max_points)),
    ]
    .into_iter()
    .collect()
}

pub fn new_session() -> FormSession<CriterionField> {
    FormSession::new(schema(), default_values())
}

pub fn edit_session(criterion: &RubricCriterion) -> FormSession<CriterionField> {
    FormSession::new(schema(), record_values(criterion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursework_core::InputKind;

    fn criterion(id: RecordId, weight: f64) -> RubricCriterion {
        RubricCriterion {
            id,
            rubric_id: 1,
            title: format!("Criterion {id}"),
            weight,
            max_points: 10,
        }
    }

    #[test]
    fn weight_below_minimum() {
        let mut session = edit_session(&criterion(1, 0.5));
        session.handle_blur(CriterionField::Weight);
        assert_eq!(session.error(CriterionField::Weight), None);

        session.handle_change(CriterionField::Weight, "0", InputKind::Number);
        assert_eq!(session.value(CriterionField::Weight), Some(&json!(0)));
        assert_eq!(
            session.error(CriterionField::Weight),
            Some("Weight must be at least 0.1")
        );
    }

    #[test]
    fn weight_above_maximum() {
        let mut session = edit_session(&criterion(1, 0.5));
        session.handle_blur(CriterionField::Weight);
        session.handle_change(CriterionField::Weight, "1.5", InputKind::Number);
        assert_eq!(session.error(CriterionField::Weight), Some("Weight cannot exceed 1"));
    }

    #[test]
    fn new_criterion_needs_a_title() {
        let mut session = new_session();
        assert!(!session.validate_form());
        assert_eq!(session.errors().len(), 1);
        assert!(session.error(CriterionField::Title).is_some());
    }
}
