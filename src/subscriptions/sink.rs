//! Synchronous event sinks.

use super::types::CalcEvent;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Receives session events after each successful change.
///
/// Notification is best-effort: a sink cannot fail or veto the change that
/// produced the event.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: &CalcEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn notify(&self, event: &CalcEvent) {
        (**self).notify(event)
    }
}

/// Keeps a `"<name>: <payload>"` line for every event it sees.
#[derive(Debug, Default)]
pub struct EventLog {
    lines: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn notify(&self, event: &CalcEvent) {
        let payload = serde_json::Value::Object(event.payload());
        let line = format!("{}: {}", event.name(), payload);
        debug!(event = event.name(), %payload, "session event");
        self.lines.lock().push(line);
    }
}
