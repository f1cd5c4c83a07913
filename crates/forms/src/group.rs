//! Student group create/edit form.

use coursework_core::validation::rules::{email, max, max_length, min, min_length, required};
use coursework_core::{form_fields, FormSession, Schema, Values};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::RecordId;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 80;
pub const MAX_GROUP_SIZE: f64 = 50.0;
pub const DEFAULT_GROUP_SIZE: u32 = 4;

form_fields! {
    pub enum GroupField {
        Name => ("name", "Group name"),
        MaxMembers => ("max_members", "Maximum members"),
        ContactEmail => ("contact_email", "Contact email"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: RecordId,
    pub course_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub max_members: Option<u32>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

pub fn schema() -> Schema<GroupField> {
    Schema::new()
        .field(
            GroupField::Name,
            [required(), min_length(NAME_MIN_LEN), max_length(NAME_MAX_LEN)],
        )
        .field(
            GroupField::MaxMembers,
            [
                required(),
                min(1.0).with_message("A group needs room for at least one member"),
                max(MAX_GROUP_SIZE),
            ],
        )
        .field(GroupField::ContactEmail, [email()])
}

pub fn default_values() -> Values<GroupField> {
    [
        (GroupField::Name, json!("")),
        (GroupField::MaxMembers, json!(DEFAULT_GROUP_SIZE)),
        (GroupField::ContactEmail, json!("")),
    ]
    .into_iter()
    .collect()
}

/// Seed values from an existing group. A group without a size limit shows
/// the default size; a missing contact email is blank.
pub fn record_values(record: &GroupRecord) -> Values<GroupField> {
    [
        (GroupField::Name, Value::from(record.name.as_str())),
        (
            GroupField::MaxMembers,
            Value::from(record.max_members.unwrap_or(DEFAULT_GROUP_SIZE)),
        ),
        (
            GroupField::ContactEmail,
            Value::from(record.contact_email.as_deref().unwrap_or("")),
        ),
    ]
    .into_iter()
    .collect()
}

pub fn new_session() -> FormSession<GroupField> {
    FormSession::new(schema(), default_values())
}

pub fn edit_session(record: &GroupRecord) -> FormSession<GroupField> {
    FormSession::new(schema(), record_values(record))
}
