//! Event and subscription types.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of change reported to sinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CalculationAdded,
    HistoryCleared,
    HistoryLoaded,
    Undo,
    Redo,
    HistorySaved,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::CalculationAdded => "calculation_added",
            EventKind::HistoryCleared => "history_cleared",
            EventKind::HistoryLoaded => "history_loaded",
            EventKind::Undo => "undo",
            EventKind::Redo => "redo",
            EventKind::HistorySaved => "history_saved",
        }
    }

    /// Whether this kind follows a change to the in-memory history.
    pub fn mutates_history(self) -> bool {
        !matches!(self, EventKind::HistorySaved)
    }
}

/// A change made to a calculator session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalcEvent {
    /// A calculation was computed and appended.
    CalculationAdded {
        operation: String,
        a: f64,
        b: f64,
        result: f64,
    },

    /// History was emptied.
    HistoryCleared,

    /// History was replaced from a file.
    HistoryLoaded { path: String, rows: usize },

    /// An edit was undone; `rows` is the resulting history length.
    Undo { rows: usize },

    /// An edit was redone; `rows` is the resulting history length.
    Redo { rows: usize },

    /// History was written to a file.
    HistorySaved { path: String, rows: usize },
}

impl CalcEvent {
    pub fn loaded(path: &Path, rows: usize) -> Self {
        CalcEvent::HistoryLoaded {
            path: path.display().to_string(),
            rows,
        }
    }

    pub fn saved(path: &Path, rows: usize) -> Self {
        CalcEvent::HistorySaved {
            path: path.display().to_string(),
            rows,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            CalcEvent::CalculationAdded { .. } => EventKind::CalculationAdded,
            CalcEvent::HistoryCleared => EventKind::HistoryCleared,
            CalcEvent::HistoryLoaded { .. } => EventKind::HistoryLoaded,
            CalcEvent::Undo { .. } => EventKind::Undo,
            CalcEvent::Redo { .. } => EventKind::Redo,
            CalcEvent::HistorySaved { .. } => EventKind::HistorySaved,
        }
    }

    /// Event name, e.g. `calculation_added`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Event fields as a JSON object (without the `type` tag).
    pub fn payload(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        map.remove("type");
        map
    }
}

/// Message delivered to a subscriber.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubscriptionMessage {
    Event { event: CalcEvent },
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered messages before the subscriber is dropped.
    /// Default: 256
    pub buffer_size: usize,

    /// Event kinds to deliver (None = all).
    pub kinds: Option<Vec<EventKind>>,
}

impl SubscriptionConfig {
    /// Subscribe to specific event kinds only.
    pub fn kinds(kinds: Vec<EventKind>) -> Self {
        Self {
            kinds: Some(kinds),
            ..Default::default()
        }
    }

    pub(crate) fn accepts(&self, kind: EventKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            kinds: None,
        }
    }
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<SubscriptionMessage>,
}

impl SubscriptionHandle {
    /// Receive the next message (blocking).
    pub fn recv(&self) -> Result<SubscriptionMessage, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message (non-blocking).
    pub fn try_recv(&self) -> Result<SubscriptionMessage, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<SubscriptionMessage, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every pending event, skipping lifecycle messages.
    pub fn drain_events(&self) -> Vec<CalcEvent> {
        self.receiver
            .try_iter()
            .filter_map(|message| match message {
                SubscriptionMessage::Event { event } => Some(event),
                SubscriptionMessage::Dropped { .. } => None,
            })
            .collect()
    }
}
