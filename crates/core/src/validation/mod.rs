//! Form validation engine.
//!
//! Rule descriptors, per-field schemas, and a whole-record evaluator. The
//! interactive, touch-tracked counterpart lives in [`crate::session`].

pub mod evaluator;
pub mod rules;
pub mod schema;
