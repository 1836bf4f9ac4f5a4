use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// A published ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Publication order, starting at 1 for each ledger instance.
    pub seq: u64,
    /// Event channel name.
    pub name: String,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

impl LedgerEvent {
    /// The payload as (lossy) UTF-8 text.
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// A broadcast channel receiver for ledger events.
pub type EventStream = broadcast::Receiver<LedgerEvent>;

/// Fan-out delivery of ledger events to subscribers.
///
/// Delivery is at-most-once. Publishing with no subscribers succeeds and the
/// event is dropped; slow subscribers lose the oldest events once the
/// channel capacity is exceeded.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<LedgerEvent>,
    published: AtomicU64,
}

impl EventBus {
    /// Create a bus whose subscribers buffer up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// Publish an event and return it as delivered.
    pub fn publish(&self, name: String, payload: Vec<u8>) -> LedgerEvent {
        let seq = self.published.fetch_add(1, Ordering::SeqCst) + 1;
        let event = LedgerEvent { seq, name, payload };
        // A send error only means there are no receivers right now.
        let receivers = self.sender.send(event.clone()).unwrap_or(0);
        debug!(seq, name = %event.name, receivers, "event published");
        event
    }

    /// Subscribe to all events published from now on.
    pub fn subscribe(&self) -> EventStream {
        self.sender.subscribe()
    }

    /// Total events published so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_succeeds() {
        let bus = EventBus::new(8);
        let event = bus.publish("myEvent".into(), b"hello".to_vec());
        assert_eq!(event.seq, 1);
        assert_eq!(bus.published(), 1);
    }

    #[test]
    fn subscriber_receives_in_order() {
        let bus = EventBus::new(8);
        let mut stream = bus.subscribe();
        bus.publish("myEvent".into(), b"one".to_vec());
        bus.publish("myEvent".into(), b"two".to_vec());

        let first = stream.try_recv().unwrap();
        let second = stream.try_recv().unwrap();
        assert_eq!(first.payload_text(), "one");
        assert_eq!(second.payload_text(), "two");
        assert!(first.seq < second.seq);
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let mut stream = bus.subscribe();
        bus.publish("myEvent".into(), Vec::new());
        assert!(stream.try_recv().is_ok());
    }

    #[test]
    fn subscriber_count_tracks_receivers() {
        let bus = EventBus::new(8);
        assert_eq!(bus.subscriber_count(), 0);
        let stream = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(stream);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
