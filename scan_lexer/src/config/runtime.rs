// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Drop the final byte read (inputs terminated by a marker byte)
    pub strip_trailing_byte: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            strip_trailing_byte: env_flag(env_vars::STRIP_TRAILING_BYTE, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to keep a per-category token histogram
    pub track_category_histogram: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            track_category_histogram: env_flag(env_vars::LEXICAL_TRACK_HISTOGRAM, false),
            include_position_in_errors: env_flag(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPreferences {
    /// Output format for the token report
    pub format: ReportFormat,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            format: env::var(env_vars::REPORT_FORMAT)
                .ok()
                .and_then(|v| parse_report_format(&v))
                .unwrap_or(ReportFormat::Table),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output (stderr)
    pub enable_console_logging: bool,

    /// Minimum level to emit
    pub min_log_level: LogLevel,

    /// Whether to print the cargo-style error summary after a failed scan
    pub enable_cargo_style_output: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Level as understood by the logging service
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

fn parse_report_format(format: &str) -> Option<ReportFormat> {
    match format.to_lowercase().as_str() {
        "table" | "text" => Some(ReportFormat::Table),
        "json" => Some(ReportFormat::Json),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub report: ReportPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const STRIP_TRAILING_BYTE: &str = "SCAN_STRIP_TRAILING_BYTE";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "SCAN_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_TRACK_HISTOGRAM: &str = "SCAN_LEXICAL_TRACK_HISTOGRAM";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "SCAN_LEXICAL_INCLUDE_POSITIONS";

    // Report
    pub const REPORT_FORMAT: &str = "SCAN_REPORT_FORMAT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCAN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCAN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCAN_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "SCAN_LOGGING_CARGO_STYLE";
}
