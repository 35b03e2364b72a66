//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a fixed-size ring
//! buffer and mirrors every record to the browser console (stderr when not
//! running in a browser). The buffer can be dumped for bug reports.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use thiserror::Error;

/// Records kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a logger is already installed: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// One captured log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogRecord {
    pub fn format(&self, app_name: &str) -> String {
        format!(
            "[{}] {:<5} {} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            app_name,
            self.target,
            self.message
        )
    }
}

// ========================
// Ring Buffer
// ========================

/// Bounded FIFO; pushing into a full buffer evicts the oldest entry
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// ========================
// Logger
// ========================

pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer<LogRecord>>,
}

impl RollingLogger {
    pub fn new(app_name: impl Into<String>, capacity: usize, level: LevelFilter) -> Self {
        Self {
            app_name: app_name.into(),
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    pub fn recent(&self) -> Vec<LogRecord> {
        self.buffer
            .lock()
            .map(|b| b.snapshot())
            .unwrap_or_default()
    }

    /// Buffered records formatted one per line, oldest first
    pub fn dump(&self) -> String {
        self.recent()
            .iter()
            .map(|r| r.format(&self.app_name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&self) {
        if let Ok(mut b) = self.buffer.lock() {
            b.clear();
        }
    }

    fn emit(&self, record: &LogRecord) {
        let line = record.format(&self.app_name);

        #[cfg(target_arch = "wasm32")]
        {
            let line = line.as_str().into();
            match record.level {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
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
        let entry = LogRecord {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.emit(&entry);
        if let Ok(mut b) = self.buffer.lock() {
            b.push(entry);
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global logger. Call once at startup.
pub fn init_logger(app_name: &str, capacity: usize, level: LevelFilter) -> Result<(), LoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, capacity, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Buffered records as formatted text, one per line. Empty before
/// [`init_logger`].
pub fn dump() -> String {
    LOGGER.get().map(RollingLogger::dump).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(logger: &RollingLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut buffer = RingBuffer::new(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_logger_respects_level() {
        let logger = RollingLogger::new("VenueHub", 10, LevelFilter::Info);
        record(&logger, Level::Debug, "hidden");
        record(&logger, Level::Warn, "shown");
        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].message, "shown");
        assert_eq!(recent[0].target, "test");
    }

    #[test]
    fn test_logger_is_bounded() {
        let logger = RollingLogger::new("VenueHub", 2, LevelFilter::Trace);
        for msg in ["one", "two", "three"] {
            record(&logger, Level::Info, msg);
        }
        let messages: Vec<String> = logger.recent().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["two", "three"]);

        logger.clear();
        assert!(logger.recent().is_empty());
    }

    #[test]
    fn test_format_contains_level_and_app() {
        let logger = RollingLogger::new("VenueHub", 2, LevelFilter::Trace);
        record(&logger, Level::Error, "boom");
        let line = logger.recent()[0].format("VenueHub");
        assert!(line.contains("ERROR"));
        assert!(line.contains("VenueHub test: boom"));
    }

    #[test]
    fn test_dump_is_one_line_per_record() {
        let logger = RollingLogger::new("VenueHub", DEFAULT_CAPACITY, LevelFilter::Info);
        assert_eq!(logger.dump(), "");
        record(&logger, Level::Info, "first");
        record(&logger, Level::Warn, "second");
        let dump = logger.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("test: first"));
        assert!(lines[1].ends_with("test: second"));
    }
}
