//! Channel-based fan-out of session events.

use super::sink::EventSink;
use super::types::{
    CalcEvent, DropReason, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
    SubscriptionMessage,
};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<SubscriptionMessage>,
}

impl Subscription {
    /// Try to send a message. Returns false if the subscriber should be dropped.
    fn try_send(&self, message: SubscriptionMessage) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Delivers session events to any number of channel subscribers.
///
/// Each subscriber gets a bounded buffer. A subscriber whose buffer is full
/// or whose receiver was dropped is removed; the session is never blocked.
pub struct SubscriptionManager {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    next_id: AtomicU64,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size.max(1));

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(sub) = self.subscriptions.write().remove(&id) {
            let _ = sub.sender.try_send(SubscriptionMessage::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Send `event` to every matching subscriber.
    pub fn broadcast(&self, event: &CalcEvent) {
        let kind = event.kind();
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if !sub.config.accepts(kind) {
                    continue;
                }
                let message = SubscriptionMessage::Event {
                    event: event.clone(),
                };
                if !sub.try_send(message) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    debug!(subscription = id.0, "dropping slow subscriber");
                    let _ = sub.sender.try_send(SubscriptionMessage::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SubscriptionManager {
    fn notify(&self, event: &CalcEvent) {
        self.broadcast(event);
    }
}
