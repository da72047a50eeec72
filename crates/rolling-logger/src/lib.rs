//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a circular buffer
//! and forwards every record to the platform sink: the browser console on
//! wasm32, stderr everywhere else.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept in the ring
pub const DEFAULT_CAPACITY: usize = 256;

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogLine {
    /// Single-line rendering used for the console and for diagnostics dumps
    pub fn format(&self) -> String {
        format!(
            "{} {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Logger with a bounded history
pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    lines: Mutex<VecDeque<LogLine>>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            level,
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append a line, evicting the oldest one when the ring is full
    pub fn push(&self, line: LogLine) {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn recent(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        sink::write(&line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use super::LogLine;
    use log::Level;
    use wasm_bindgen::JsValue;

    pub fn write(line: &LogLine) {
        let text = JsValue::from_str(&line.format());
        match line.level {
            Level::Error => web_sys::console::error_1(&text),
            Level::Warn => web_sys::console::warn_1(&text),
            Level::Info => web_sys::console::info_1(&text),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&text),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod sink {
    use super::LogLine;

    pub fn write(line: &LogLine) {
        eprintln!("{}", line.format());
    }
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global logger. Calling it twice returns the `log` crate's error.
pub fn init(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Lines captured by the global logger (empty before `init`)
pub fn recent() -> Vec<LogLine> {
    LOGGER.get().map(RollingLogger::recent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(message: &str) -> LogLine {
        LogLine {
            timestamp: Utc::now(),
            level: Level::Info,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let logger = RollingLogger::new(LevelFilter::Debug, 3);
        for i in 0..5 {
            logger.push(line(&format!("msg {}", i)));
        }

        let lines = logger.recent();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].message, "msg 2");
        assert_eq!(lines[2].message, "msg 4");
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new(LevelFilter::Warn, 8);

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("board")
                .args(format_args!("dropped"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("auth")
                .args(format_args!("refresh failed"))
                .build(),
        );

        let lines = logger.recent();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].target, "auth");
        assert_eq!(lines[0].message, "refresh failed");
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let logger = RollingLogger::new(LevelFilter::Info, 0);
        logger.push(line("a"));
        logger.push(line("b"));
        assert_eq!(logger.recent().len(), 1);
        assert_eq!(logger.recent()[0].message, "b");
    }

    #[test]
    fn test_format_contains_parts() {
        let formatted = line("hello").format();
        assert!(formatted.contains("INFO"));
        assert!(formatted.contains("test: hello"));
    }
}
