//! `coursework-validate` -- dry-run validation of course, group, rubric and
//! password records.
//!
//! ```text
//! coursework-validate <form> <records.json>
//! ```
//!
//! `<form>` is one of `course`, `group`, `rubric_criterion`,
//! `password_change`. The file holds one JSON object or an array of them.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default | Description                      |
//! |-----------------|----------|---------|----------------------------------|
//! | `REPORT_FORMAT` | no       | `json`  | `json` or `text`                 |
//! | `MAX_RECORDS`   | no       | `1000`  | Records accepted per input file  |
//! | `RUST_LOG`      | no       | `coursework_cli=info` | Log filter (stderr) |
//!
//! Exit status: `0` all records valid, `1` some record invalid, `2` usage,
//! configuration or input errors.

use std::process::ExitCode;

use anyhow::Context;
use coursework_cli::config::CliConfig;
use coursework_cli::{load_records, parse_args, validate_records};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursework_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Validation run failed");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let config = CliConfig::from_env().context("Failed to load configuration")?;
    let (form, path) = parse_args(std::env::args().skip(1))?;

    tracing::info!(
        form = %form,
        path = %path.display(),
        max_records = config.max_records,
        max_file_bytes = config.max_file_bytes,
        "Validating records",
    );

    let records = load_records(&path, config.max_file_bytes)?;
    let report = validate_records(form, &records, config.max_records)?;
    println!("{}", report.render(config.report_format)?);
    Ok(report.all_valid())
}
