//! Password change form.

use coursework_core::validation::rules::{equals, min_length, required};
use coursework_core::{form_fields, FormSession, Schema, Values};
use serde_json::json;

pub const MIN_PASSWORD_LEN: usize = 8;

form_fields! {
    pub enum PasswordField {
        Password => ("password", "Password"),
        Confirm => ("confirm", "Confirm password"),
    }
}

pub fn schema() -> Schema<PasswordField> {
    Schema::new()
        .field(
            PasswordField::Password,
            [required(), min_length(MIN_PASSWORD_LEN)],
        )
        .field(
            PasswordField::Confirm,
            [
                required(),
                equals(PasswordField::Password).with_message("Fields do not match"),
            ],
        )
}

pub fn default_values() -> Values<PasswordField> {
    [
        (PasswordField::Password, json!("")),
        (PasswordField::Confirm, json!("")),
    ]
    .into_iter()
    .collect()
}

pub fn new_session() -> FormSession<PasswordField> {
    FormSession::new(schema(), default_values())
}
