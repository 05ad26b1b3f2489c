//! Sinks for log events
//!
//! Every sink writes to stderr; stdout is reserved for the token report.

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Drops events above `min_level` before they reach the sink
pub struct LoggingService {
    sink: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(sink: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Sinks and level taken from the `SCAN_LOGGING_*` preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        Self::new(Arc::new(create_configured_multi_logger(min_level)), min_level)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.sink.log(&event);
        }
    }
}

pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            eprintln!("{}", event.format());
        }
    }
}

/// One JSON object per line
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }
        let line = event.format_json().unwrap_or_else(|_| event.format());
        eprintln!("{}", line);
    }
}

pub struct MultiLogger {
    sinks: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl MultiLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            sinks: Vec::new(),
            min_level,
        }
    }

    pub fn add_logger(&mut self, sink: Arc<dyn Logger>) {
        self.sinks.push(sink);
    }

    pub fn with_console(mut self, level: LogLevel) -> Self {
        self.add_logger(Arc::new(ConsoleLogger::new(level)));
        self
    }

    pub fn with_structured_console(mut self, level: LogLevel) -> Self {
        self.add_logger(Arc::new(StructuredLogger::new(level)));
        self
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }
        self.sinks.iter().for_each(|sink| sink.log(event));
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Without `SCAN_LOGGING_ENABLE_CONSOLE` the result has no sinks at all
pub fn create_configured_multi_logger(min_level: LogLevel) -> MultiLogger {
    let multi = MultiLogger::new(min_level);
    match (config::use_console_logging(), config::use_structured_logging()) {
        (false, _) => multi,
        (true, true) => multi.with_structured_console(min_level),
        (true, false) => multi.with_console(min_level),
    }
}
