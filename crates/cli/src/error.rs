use std::path::PathBuf;

use coursework_forms::FormsError;

/// Failures of the validation CLI. Invalid records are not errors; they are
/// reported and reflected in the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Usage: coursework-validate <form> <records.json>")]
    Usage,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is {size} bytes, over the limit of {max} (MAX_FILE_BYTES)")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{path} must contain a JSON object or an array of objects")]
    UnexpectedShape { path: PathBuf },

    #[error("{count} records exceed the limit of {max} (MAX_RECORDS)")]
    TooManyRecords { count: usize, max: usize },

    #[error("{var} has an invalid value '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Forms(#[from] FormsError),

    #[error("Failed to render report: {0}")]
    Render(#[source] serde_json::Error),
}
