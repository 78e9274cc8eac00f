//! Page-wide message bus shared by every controller on a page
//!
//! Raw cross-document messages are published as untyped strings. Each
//! controller subscribes with its own decoder and only ever sees the messages
//! that decoder accepts. Dropping a [`Subscription`] removes it from the bus.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const DEFAULT_BUS_CAPACITY: usize = 64;

/// Broadcast channel carrying raw message text.
#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: broadcast::Sender<String>,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    /// Creates a bus that buffers up to `capacity` undelivered messages per
    /// subscriber before the oldest are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a raw message to every current subscriber.
    ///
    /// Returns how many subscribers received it. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, raw: impl Into<String>) -> usize {
        self.sender.send(raw.into()).unwrap_or(0)
    }

    /// Subscribes with a decoder. Messages the decoder maps to `None` are
    /// skipped silently.
    pub fn subscribe<T, F>(&self, decode: F) -> Subscription<T>
    where
        F: Fn(&str) -> Option<T> + Send + 'static,
    {
        Subscription {
            receiver: self.sender.subscribe(),
            decode: Box::new(decode),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Filtered view of a [`MessageBus`].
pub struct Subscription<T> {
    receiver: broadcast::Receiver<String>,
    decode: Box<dyn Fn(&str) -> Option<T> + Send>,
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl<T> Subscription<T> {
    /// Waits for the next message the decoder accepts.
    ///
    /// Returns `None` once every bus handle has been dropped.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.recv().await {
                Ok(raw) => {
                    if let Some(decoded) = (self.decode)(&raw) {
                        return Some(decoded);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Message bus subscriber lagged, {skipped} messages dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_pending, assert_ready_eq, task};

    use super::*;

    fn numbers(raw: &str) -> Option<u32> {
        raw.parse().ok()
    }

    #[tokio::test]
    async fn test_subscription_skips_undecodable_messages() {
        let bus = MessageBus::new();
        let mut subscription = bus.subscribe(numbers);

        bus.publish("hello");
        bus.publish("{}");
        bus.publish("7");

        assert_eq!(subscription.recv().await, Some(7));
    }

    #[test]
    fn test_recv_pending_until_accepted_message() {
        let bus = MessageBus::new();
        let mut subscription = bus.subscribe(numbers);
        let mut recv = task::spawn(subscription.recv());

        assert_pending!(recv.poll());
        bus.publish("noise");
        assert_pending!(recv.poll());
        bus.publish("3");
        assert!(recv.is_woken());
        assert_ready_eq!(recv.poll(), Some(3));
    }

    #[test]
    fn test_drop_deregisters_subscription() {
        let bus = MessageBus::new();
        let first = bus.subscribe(numbers);
        let second = bus.subscribe(|raw: &str| Some(raw.len()));
        assert_eq!(bus.subscriber_count(), 2);

        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.publish("1"), 1);

        drop(second);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish("1"), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_every_message() {
        let bus = MessageBus::new();
        let mut a = bus.subscribe(numbers);
        let mut b = bus.subscribe(numbers);

        bus.publish("5");

        assert_eq!(a.recv().await, Some(5));
        assert_eq!(b.recv().await, Some(5));
    }

    #[tokio::test]
    async fn test_closed_bus_ends_subscription() {
        let bus = MessageBus::new();
        let mut subscription = bus.subscribe(numbers);
        drop(bus);

        assert_eq!(subscription.recv().await, None);
    }
}
