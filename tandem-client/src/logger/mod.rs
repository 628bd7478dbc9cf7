use chrono::{DateTime, Local};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Append-only, human-readable history of one call. Every entry is mirrored
/// to `tracing` at the matching level.
#[derive(Debug, Clone, Default)]
pub struct ConnectionLog {
    entries: Vec<LogEntry>,
}

impl ConnectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        let message = msg.into();
        info!("{}", message);
        self.push(message);
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        let message = msg.into();
        warn!("{}", message);
        self.push(message);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        let message = msg.into();
        error!("{}", message);
        self.push(message);
    }

    fn push(&mut self, message: String) {
        self.entries.push(LogEntry {
            at: Local::now(),
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
