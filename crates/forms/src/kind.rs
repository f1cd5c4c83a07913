//! Name-based dispatch over the application's forms.

use std::fmt;
use std::str::FromStr;

use coursework_core::validation::evaluator::evaluate_json;
use coursework_core::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormsError;
use crate::{course, group, password, rubric};

/// Every form the application edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Course,
    Group,
    RubricCriterion,
    PasswordChange,
}

impl FormKind {
    pub const ALL: &'static [FormKind] = &[
        Self::Course,
        Self::Group,
        Self::RubricCriterion,
        Self::PasswordChange,
    ];

    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Group => "group",
            Self::RubricCriterion => "rubric_criterion",
            Self::PasswordChange => "password_change",
        }
    }

    /// Wire names of the form's fields, in declaration order.
    pub fn field_names(self) -> Vec<&'static str> {
        use coursework_core::FormField;

        fn names<K: FormField>() -> Vec<&'static str> {
            K::ALL.iter().map(|f| f.name()).collect()
        }

        match self {
            Self::Course => names::<course::CourseField>(),
            Self::Group => names::<group::GroupField>(),
            Self::RubricCriterion => names::<rubric::CriterionField>(),
            Self::PasswordChange => names::<password::PasswordField>(),
        }
    }

    /// Dry-run one JSON record against this form's schema.
    pub fn evaluate_json(self, record: &Value) -> Result<ValidationResult, FormsError> {
        let result = match self {
            Self::Course => evaluate_json(&course::schema(), record)?,
            Self::Group => evaluate_json(&group::schema(), record)?,
            Self::RubricCriterion => evaluate_json(&rubric::schema(), record)?,
            Self::PasswordChange => evaluate_json(&password::schema(), record)?,
        };
        Ok(result)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = FormsError;

    /// Accepts the snake_case name, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| FormsError::UnknownForm(s.to_string()))
    }
}
