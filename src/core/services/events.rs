//! Event channels for feedback and rep completion
//!
//! Each channel is a bounded broadcast ring. Publishing never waits: a
//! subscriber that falls behind loses its oldest items and sees
//! `RecvError::Lagged` / `TryRecvError::Lagged` on its next receive.

use log::trace;
use tokio::sync::broadcast;

/// A publish-only handle to one broadcast channel
#[derive(Debug, Clone)]
pub struct EventChannel<T> {
    sender: broadcast::Sender<T>,
}

impl<T: Clone> EventChannel<T> {
    /// Create a channel buffering up to `capacity` items per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Add a subscriber; it only sees events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publish without blocking; having no subscribers is fine
    pub fn publish(&self, event: T) {
        if self.sender.send(event).is_err() {
            trace!("event dropped: no subscribers");
        }
    }
}
