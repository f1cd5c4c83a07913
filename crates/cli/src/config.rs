use std::str::FromStr;

use validator::Validate;

use crate::error::CliError;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown report format '{0}'. Valid formats: json, text")]
pub struct ParseReportFormatError(String);

impl FromStr for ReportFormat {
    type Err = ParseReportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(ParseReportFormatError(s.to_string())),
        }
    }
}

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, Validate)]
pub struct CliConfig {
    /// Output format of the report (default: `json`).
    pub report_format: ReportFormat,
    /// Upper bound on records per input file (default: `1000`).
    #[validate(range(min = 1, max = 100000))]
    pub max_records: usize,
    /// Upper bound on the input file size in bytes (default: 10 MiB).
    #[validate(range(min = 1))]
    pub max_file_bytes: u64,
}

pub const DEFAULT_MAX_RECORDS: usize = 1000;
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            report_format: ReportFormat::default(),
            max_records: DEFAULT_MAX_RECORDS,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var          | Default    |
    /// |------------------|------------|
    /// | `REPORT_FORMAT`  | `json`     |
    /// | `MAX_RECORDS`    | `1000`     |
    /// | `MAX_FILE_BYTES` | `10485760` |
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let report_format = match lookup("REPORT_FORMAT") {
            Some(value) => value.parse().map_err(|_| CliError::InvalidEnv {
                var: "REPORT_FORMAT",
                value,
            })?,
            None => ReportFormat::default(),
        };

        let max_records = match lookup("MAX_RECORDS") {
            Some(value) => value.trim().parse().map_err(|_| CliError::InvalidEnv {
                var: "MAX_RECORDS",
                value,
            })?,
            None => DEFAULT_MAX_RECORDS,
        };

        let max_file_bytes = match lookup("MAX_FILE_BYTES") {
            Some(value) => value.trim().parse().map_err(|_| CliError::InvalidEnv {
                var: "MAX_FILE_BYTES",
                value,
            })?,
            None => DEFAULT_MAX_FILE_BYTES,
        };

        let config = Self {
            report_format,
            max_records,
            max_file_bytes,
        };
        config.validate()?;
        Ok(config)
    }
}
