//! Logging limits and preferences
//!
//! Buffer limits are fixed by the build profile. Preferences come from the
//! `SCAN_LOGGING_*` environment variables and are read on first use.

use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE,
};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

fn preferences() -> &'static LoggingPreferences {
    PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn use_cargo_style_output() -> bool {
    preferences().enable_cargo_style_output
}

/// Reject build profiles whose limits cannot work together
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("Log buffer size must be positive".to_string());
    }
    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err(format!(
            "Per-file event limit {} exceeds the log buffer size {}",
            MAX_LOG_EVENTS_PER_FILE, LOG_BUFFER_SIZE
        ));
    }
    if MAX_ERROR_COLLECTION == 0 {
        return Err("Error collection limit must be positive".to_string());
    }
    Ok(())
}
