//! Course create/edit form.

use std::sync::LazyLock;

use coursework_core::validation::rules::{matches, max, max_length, min, required};
use coursework_core::{form_fields, FormSession, Schema, Values};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::RecordId;

pub const TITLE_MAX_LEN: usize = 120;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const MIN_CREDITS: f64 = 1.0;
pub const MAX_CREDITS: f64 = 30.0;

/// Two to four capital letters followed by three digits, e.g. `CS101`.
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}[0-9]{3}$").expect("valid regex"));

form_fields! {
    pub enum CourseField {
        Title => ("title", "Title"),
        Code => ("code", "Course code"),
        Description => ("description", "Description"),
        Credits => ("credits", "Credits"),
    }
}

/// A course as returned by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: RecordId,
    pub title: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
}

pub fn schema() -> Schema<CourseField> {
    Schema::new()
        .field(CourseField::Title, [required(), max_length(TITLE_MAX_LEN)])
        .field(
            CourseField::Code,
            [
                required(),
                matches(CODE_RE.clone()).with_message("Use a code like CS101"),
            ],
        )
        .field(CourseField::Description, [max_length(DESCRIPTION_MAX_LEN)])
        .field(
            CourseField::Credits,
            [required(), min(MIN_CREDITS), max(MAX_CREDITS)],
        )
}

/// Blank values for the "new course" dialog.
pub fn default_values() -> Values<CourseField> {
    [
        (CourseField::Title, json!("")),
        (CourseField::Code, json!("")),
        (CourseField::Description, json!("")),
        (CourseField::Credits, json!("")),
    ]
    .into_iter()
    .collect()
}

/// Seed values from an existing course. Missing description and credits
/// become blank strings, matching what the inputs display when empty.
pub fn record_values(record: &CourseRecord) -> Values<CourseField> {
    [
        (CourseField::Title, Value::from(record.title.as_str())),
        (CourseField::Code, Value::from(record.code.as_str())),
        (
            CourseField::Description,
            Value::from(record.description.as_deref().unwrap_or("")),
        ),
        (
            CourseField::Credits,
            record.credits.map(Value::from).unwrap_or_else(|| json!("")),
        ),
    ]
    .into_iter()
    .collect()
}

pub fn new_session() -> FormSession<CourseField> {
    FormSession::new(schema(), default_values())
}

pub fn edit_session(record: &CourseRecord) -> FormSession<CourseField> {
    FormSession::new(schema(), record_values(record))
}
