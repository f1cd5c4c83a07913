//! `coursework-core`: the form-validation engine behind the coursework
//! editing screens.
//!
//! Pure in-memory logic with no I/O. Forms declare their fields with
//! [`form_fields!`], describe their rules as a [`Schema`], and edit through a
//! [`FormSession`].

pub mod coerce;
pub mod error;
pub mod field;
pub mod session;
pub mod types;
pub mod validation;

pub use coerce::InputKind;
pub use error::CoreError;
pub use field::FormField;
pub use session::{FormSession, FormSnapshot};
pub use types::{Errors, Touched, Values};
pub use validation::evaluator::{FieldViolation, ValidationResult};
pub use validation::schema::Schema;
