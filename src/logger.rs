//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log
//! entries into a bounded buffer for display in the log panel.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of log lines kept for the log panel.
///
pub const LOG_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Ring buffer of formatted log lines. The oldest line is dropped once the
/// buffer is full.
///
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        LogBuffer {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Returns a copy of the buffered lines, oldest first.
    ///
    pub fn entries(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        LogBuffer::new(LOG_CAPACITY)
    }
}

/// Custom logger that captures logs to the log buffer
///
pub struct CustomLogger {
    buffer: Arc<LogBuffer>,
    level: LevelFilter,
}

impl CustomLogger {
    pub fn new(buffer: Arc<LogBuffer>, level: LevelFilter) -> Self {
        CustomLogger { buffer, level }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

/// Install the custom logger as the global logger.
///
pub fn init(buffer: Arc<LogBuffer>, level: LevelFilter) -> Result<(), AppError> {
    log::set_boxed_logger(Box::new(CustomLogger::new(buffer, level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
