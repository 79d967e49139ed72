// In-memory log capture for the TUI
//
// Logs cannot go to stdout while the alternate screen is active, so a
// tracing layer copies every event into a bounded in-memory buffer that
// the status bar reads from. File logging (when enabled) is a separate
// tracing-appender layer wired up in main.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Entries kept before the oldest is dropped
const BUFFER_CAPACITY: usize = 1000;

/// One captured log event
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Module path of the event - kept for a future log-filter view
    #[allow(dead_code)]
    pub target: String,
    pub message: String,
}

/// Bounded ring of recent log entries, shared between the tracing layer
/// and the TUI. Clones share the same underlying buffer.
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest when full
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.inner.lock().unwrap();
        if entries.len() == BUFFER_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest entry, if any - what the status bar shows
    pub fn latest(&self) -> Option<LogEntry> {
        self.inner.lock().unwrap().back().cloned()
    }

    /// Copy of the whole buffer, oldest first
    #[allow(dead_code)]
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.inner.lock().unwrap().iter().cloned().collect()
    }
}

/// tracing layer that mirrors events into a `LogBuffer`
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.push(LogEntry {
            timestamp: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message,
        });
    }
}

/// Pulls the `message` field out of an event, ignoring the rest
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{:?}", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn buffer_evicts_oldest_at_capacity() {
        let buffer = LogBuffer::new();
        for i in 0..BUFFER_CAPACITY + 10 {
            buffer.push(entry(&format!("msg {}", i)));
        }
        let all = buffer.snapshot();
        assert_eq!(all.len(), BUFFER_CAPACITY);
        assert_eq!(all[0].message, "msg 10");
        assert_eq!(
            buffer.latest().unwrap().message,
            format!("msg {}", BUFFER_CAPACITY + 9)
        );
    }

    #[test]
    fn latest_on_empty_buffer() {
        assert!(LogBuffer::new().latest().is_none());
    }

    #[test]
    fn clones_share_the_buffer() {
        let a = LogBuffer::new();
        let b = a.clone();
        a.push(entry("shared"));
        assert_eq!(b.latest().unwrap().message, "shared");
    }
}
