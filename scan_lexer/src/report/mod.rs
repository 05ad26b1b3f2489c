//! Token report rendering
//!
//! The table format is the fixed-width scanner listing: one line per token
//! with the category label padded to column 32, then a trailer line saying how
//! the scan ended. The JSON format carries the same data plus positions.

use crate::config::runtime::{ReportFormat, ReportPreferences};
use crate::lexical::{LexerError, ScanReport, Termination};
use crate::logging::codes;
use crate::tokens::SpannedToken;
use crate::{log_error, log_success};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const TABLE_HEADER: &str = "Token Name\t\t\t|Token Value \n";
pub const SUCCESS_TRAILER: &str = "\nSuccessfully finish scan.\n";
pub const ILLEGAL_CHARACTER_TRAILER: &str =
    "\nError: Non-recognizable character in the input file.\n";

const RULE_WIDTH: usize = 44;
const TAB_WIDTH: usize = 8;
const VALUE_COLUMN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ReportError::Write(_) => codes::report::REPORT_WRITE_FAILURE,
            ReportError::Serialization(_) => codes::report::REPORT_SERIALIZATION_FAILURE,
        }
    }
}

/// One table line, without the newline
pub fn format_token_line(token: &SpannedToken) -> String {
    let label = token.value.category.report_name();
    // Labels are shorter than the value column
    let tabs = (VALUE_COLUMN - label.len()).div_ceil(TAB_WIDTH);
    let mut line = String::with_capacity(VALUE_COLUMN + 2);
    line.push_str(label);
    line.extend(std::iter::repeat('\t').take(tabs));
    line.push('|');

    if let Some(text) = &token.value.text {
        line.push(' ');
        line.push_str(text);
    }
    line
}

/// Trailer printed after the token lines
pub fn termination_message(termination: &Termination) -> String {
    match termination {
        Termination::EndOfInput => SUCCESS_TRAILER.to_string(),
        Termination::Failed(LexerError::IllegalCharacter { .. }) => {
            ILLEGAL_CHARACTER_TRAILER.to_string()
        }
        Termination::Failed(error) => format!("\nError: {}.\n", error),
    }
}

pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::from(TABLE_HEADER);
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for token in &report.tokens {
        out.push_str(&format_token_line(token));
        out.push('\n');
    }

    out.push_str(&termination_message(&report.termination));
    out
}

#[derive(Debug, Serialize)]
struct JsonToken<'a> {
    category: &'static str,
    text: Option<&'a str>,
    line: u32,
    column: u32,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    file: String,
    scanned_at: DateTime<Utc>,
    tokens: Vec<JsonToken<'a>>,
    status: &'static str,
    error: Option<String>,
}

pub fn render_json(report: &ScanReport, file: &Path) -> Result<String, ReportError> {
    let json = JsonReport {
        file: file.display().to_string(),
        scanned_at: Utc::now(),
        tokens: report
            .tokens
            .tokens()
            .iter()
            .map(|t| JsonToken {
                category: t.value.category.report_name(),
                text: t.value.text.as_deref(),
                line: t.span.start.line,
                column: t.span.start.column,
            })
            .collect(),
        status: if report.is_success() { "success" } else { "error" },
        error: report.error().map(|e| e.to_string()),
    };

    Ok(serde_json::to_string_pretty(&json)?)
}

/// Render the report in `format` and write it to `out`
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ScanReport,
    file: &Path,
    format: ReportFormat,
) -> Result<(), ReportError> {
    let rendered = match format {
        ReportFormat::Table => render_table(report),
        ReportFormat::Json => render_json(report, file).map_err(|e| {
            log_error!(e.error_code(), "Could not serialize token report",
                "file" => file.display());
            e
        })? + "\n",
    };

    out.write_all(rendered.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| {
            let error = ReportError::from(e);
            log_error!(error.error_code(), "Could not write token report",
                "file" => file.display(),
                "io_error" => &error);
            error
        })?;

    log_success!(codes::success::REPORT_WRITTEN, "Token report written",
        "file" => file.display(),
        "tokens" => report.tokens.len(),
        "bytes" => rendered.len());

    Ok(())
}

/// Write using the format selected by the environment
pub fn write_report_with_preferences<W: Write>(
    out: &mut W,
    report: &ScanReport,
    file: &Path,
    preferences: &ReportPreferences,
) -> Result<(), ReportError> {
    write_report(out, report, file, preferences.format)
}
