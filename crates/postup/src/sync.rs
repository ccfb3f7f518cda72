//! Transport stub for future real-time sync
//!
//! No real network I/O happens here. The channel queues outbound
//! events while disconnected and keeps bounded reconnect accounting so
//! a real transport can slot in later without changing callers.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use postup_feed::Post;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Feed mutation carried over the sync channel.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(Uuid),
}

/// Placeholder sync channel.
#[derive(Debug, Default)]
pub struct SyncChannel {
    connected: bool,
    queue: VecDeque<SyncEvent>,
    reconnect_attempts: u32,
}

impl SyncChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// "Connect" the channel. Always succeeds in the stub and resets
    /// the reconnect counter.
    pub fn connect(&mut self) {
        debug!("sync connection simulated");
        self.connected = true;
        self.reconnect_attempts = 0;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Queue an event for transmission. With no real transport behind
    /// the stub, events stay queued until drained.
    pub fn send(&mut self, event: SyncEvent) {
        if !self.connected {
            debug!("sync channel not connected, queueing event");
        }
        self.queue.push_back(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<SyncEvent> {
        self.queue.drain(..).collect()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Record a connection failure. Returns the backoff to wait before
    /// the next attempt, or `None` once the attempt budget is spent.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.reconnect_attempts >= MAX_RECONNECT_ATTEMPTS {
            return None;
        }
        self.reconnect_attempts += 1;
        Some(RECONNECT_BASE_DELAY * self.reconnect_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postup_core::ContentNode;
    use postup_feed::Author;

    fn event() -> SyncEvent {
        SyncEvent::PostCreated(Post::new(
            "hello",
            "<p>hello</p>",
            ContentNode::root(vec![]),
            Author::new("Ada", "a.png"),
        ))
    }

    #[test]
    fn test_events_queue_until_drained() {
        let mut channel = SyncChannel::new();
        channel.send(event());
        channel.send(event());
        assert_eq!(channel.queued(), 2);

        let drained = channel.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(channel.queued(), 0);
    }

    #[test]
    fn test_backoff_grows_then_gives_up() {
        let mut channel = SyncChannel::new();
        assert_eq!(channel.next_backoff(), Some(Duration::from_secs(2)));
        assert_eq!(channel.next_backoff(), Some(Duration::from_secs(4)));
        for _ in 0..3 {
            assert!(channel.next_backoff().is_some());
        }
        assert_eq!(channel.next_backoff(), None);
    }

    #[test]
    fn test_connect_resets_reconnect_budget() {
        let mut channel = SyncChannel::new();
        while channel.next_backoff().is_some() {}
        channel.connect();
        assert!(channel.is_connected());
        assert!(channel.next_backoff().is_some());
    }
}
