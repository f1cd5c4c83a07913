//! `coursework-forms`: the editing forms of the coursework application.
//!
//! One module per form. Each declares its field enum, its validation
//! schema, blank defaults for "create" dialogs, and the conversion that seeds
//! an "edit" session from the record the REST API returns.

pub mod course;
pub mod error;
pub mod group;
pub mod kind;
pub mod password;
pub mod rubric;

pub use error::FormsError;
pub use kind::FormKind;

/// REST record identifiers are 64-bit integers.
pub type RecordId = i64;
