/// Construction-time failures.
///
/// The engine itself never fails: validation outcomes are data (entries in
/// the errors map), not `Err` values. These variants cover building rules and
/// feeding external records into the engine.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
