//! Per-file event collection with cargo-style error output

use super::events::LogEvent;
use crate::config::compile_time::logging::{MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The file whose events are being logged on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub failed_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Errors and warnings keyed by file, in path order
#[derive(Default)]
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn events(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<LogEvent>>> {
        self.file_events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Past the per-file limit one overflow warning is kept and the rest dropped
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.events();
        let kept = events.entry(file_path.to_path_buf()).or_default();

        match kept.len() {
            n if n < MAX_LOG_EVENTS_PER_FILE => kept.push(event),
            n if n == MAX_LOG_EVENTS_PER_FILE => kept.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            ))),
            _ => {}
        }
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.events().clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        self.events()
            .values()
            .fold(ProcessingSummary::default(), |mut summary, events| {
                let errors = events.iter().filter(|e| e.is_error()).count();
                summary.total_files += 1;
                summary.failed_files += usize::from(errors > 0);
                summary.total_errors += errors;
                summary.total_warnings += events.iter().filter(|e| e.is_warning()).count();
                summary
            })
    }
}

fn write_event(out: &mut String, kind: &str, file_path: &Path, event: &LogEvent) {
    let _ = write!(out, "{}: {}", kind, event.message);
    if let Some(span) = &event.span {
        let start = span.start();
        let _ = write!(out, "\n  --> {}:{}:{}", file_path.display(), start.line, start.column);
    }
    out.push('\n');

    let mut keys: Vec<_> = event.context.keys().filter(|k| *k != "file").collect();
    keys.sort();
    for key in keys {
        let _ = writeln!(out, "  = {}: {}", key, event.context[key]);
    }
}

/// Errors (at most `MAX_ERROR_COLLECTION` per file) then warnings, grouped by file
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut out = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let errors = events.iter().filter(|e| e.is_error()).take(MAX_ERROR_COLLECTION);
        let warnings = events.iter().filter(|e| e.is_warning());
        let before = out.len();

        for event in errors {
            write_event(&mut out, &format!("error[{}]", event.code), file_path, event);
            let action = event.recommended_action();
            if action != "No specific action available" {
                let _ = writeln!(out, "  = help: {}", action);
            }
        }
        for event in warnings {
            write_event(&mut out, "warning", file_path, event);
        }

        if out.len() > before {
            out.push('\n');
        }
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        let _ = writeln!(
            out,
            "error: could not scan {} file(s) due to {} previous error(s)",
            summary.failed_files, summary.total_errors
        );
    }

    out
}
