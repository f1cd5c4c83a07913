//! `coursework-cli` library crate.
//!
//! Dry-run validation of JSON records against one of the application's
//! forms. The binary entrypoint lives in `main.rs`; everything it does is
//! exposed here for integration testing.

pub mod config;
pub mod error;
pub mod report;

use std::path::{Path, PathBuf};

use coursework_forms::FormKind;
use serde_json::Value;

use crate::error::CliError;
use crate::report::Report;

/// Parse `<form> <records.json>` from the arguments following the program
/// name.
pub fn parse_args(
    args: impl IntoIterator<Item = String>,
) -> Result<(FormKind, PathBuf), CliError> {
    let mut args = args.into_iter();
    let (Some(form), Some(path), None) = (args.next(), args.next(), args.next()) else {
        return Err(CliError::Usage);
    };
    Ok((form.parse()?, PathBuf::from(path)))
}

/// Read the input file. A single object is treated as a one-record batch.
/// Files larger than `max_bytes` are rejected before they are read.
pub fn load_records(path: &Path, max_bytes: u64) -> Result<Vec<Value>, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if size > max_bytes {
        return Err(CliError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_bytes,
        });
    }

    let text = std::fs::read_to_string(path).map_err(io_error)?;
    let document: Value = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match document {
        Value::Array(records) => Ok(records),
        record @ Value::Object(_) => Ok(vec![record]),
        _ => Err(CliError::UnexpectedShape {
            path: path.to_path_buf(),
        }),
    }
}

/// Evaluate every record against `form`. Stops before evaluating anything
/// when the batch exceeds `max_records`.
pub fn validate_records(
    form: FormKind,
    records: &[Value],
    max_records: usize,
) -> Result<Report, CliError> {
    if records.len() > max_records {
        return Err(CliError::TooManyRecords {
            count: records.len(),
            max: max_records,
        });
    }

    let mut report = Report::new(form);
    for (index, record) in records.iter().enumerate() {
        let result = form.evaluate_json(record)?;
        if !result.is_valid {
            tracing::debug!(
                record_index = index,
                error_count = result.errors.len(),
                "Record failed validation",
            );
        }
        report.push(result);
    }

    tracing::info!(
        form = %form,
        total = report.total_records,
        invalid = report.invalid_records,
        "Validation complete",
    );
    Ok(report)
}
