//! Dry-run report over a batch of records.

use std::fmt::Write as _;

use coursework_core::ValidationResult;
use coursework_forms::FormKind;
use serde::Serialize;

use crate::config::ReportFormat;
use crate::error::CliError;

/// Validation outcome for one record of the input file.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub record_index: usize,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Aggregated outcome for a whole input file.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub form: FormKind,
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub records: Vec<RecordReport>,
}

impl Report {
    pub fn new(form: FormKind) -> Self {
        Self {
            form,
            total_records: 0,
            valid_records: 0,
            invalid_records: 0,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ValidationResult) {
        if result.is_valid {
            self.valid_records += 1;
        } else {
            self.invalid_records += 1;
        }
        self.records.push(RecordReport {
            record_index: self.total_records,
            result,
        });
        self.total_records += 1;
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_records == 0
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, CliError> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self).map_err(CliError::Render),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} records, {} valid, {} invalid",
            self.form, self.total_records, self.valid_records, self.invalid_records
        );
        for record in &self.records {
            for violation in &record.result.errors {
                let _ = writeln!(
                    out,
                    "  record {}: {}: {} ({})",
                    record.record_index, violation.field, violation.message, violation.rule_type
                );
            }
            if !record.result.unknown_fields.is_empty() {
                let _ = writeln!(
                    out,
                    "  record {}: ignored fields: {}",
                    record.record_index,
                    record.result.unknown_fields.join(", ")
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursework_core::FieldViolation;

    fn invalid() -> ValidationResult {
        ValidationResult {
            is_valid: false,
            errors: vec![FieldViolation {
                field: "title".into(),
                rule_type: "required".into(),
                message: "This field is required".into(),
                value: None,
            }],
            unknown_fields: vec!["id".into()],
        }
    }

    fn valid() -> ValidationResult {
        ValidationResult {
            is_valid: true,
            errors: Vec::new(),
            unknown_fields: Vec::new(),
        }
    }

    #[test]
    fn push_counts_and_indexes() {
        let mut report = Report::new(FormKind::Course);
        report.push(valid());
        report.push(invalid());
        assert_eq!(report.total_records, 2);
        assert_eq!(report.valid_records, 1);
        assert_eq!(report.invalid_records, 1);
        assert_eq!(report.records[1].record_index, 1);
        assert!(!report.all_valid());
    }

    #[test]
    fn empty_report_is_all_valid() {
        assert!(Report::new(FormKind::Group).all_valid());
    }

    #[test]
    fn json_flattens_record_results() {
        let mut report = Report::new(FormKind::Course);
        report.push(invalid());
        let body: serde_json::Value =
            serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();
        assert_eq!(body["form"], "course");
        assert_eq!(body["records"][0]["record_index"], 0);
        assert_eq!(body["records"][0]["is_valid"], false);
        assert_eq!(body["records"][0]["errors"][0]["field"], "title");
    }

    #[test]
    fn text_lists_violations() {
        let mut report = Report::new(FormKind::Course);
        report.push(invalid());
        let text = report.render(ReportFormat::Text).unwrap();
        assert!(text.starts_with("course: 1 records, 0 valid, 1 invalid"));
        assert!(text.contains("record 0: title: This field is required (required)"));
        assert!(text.contains("ignored fields: id"));
    }
}
