//! Fetch Queue: thread-safe FIFO between the poll and merge loops.

use super::message::FeedMessage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared FIFO of accepted feed messages.
///
/// Cloning shares the queue. The lock wraps only the deque itself; no
/// caller holds it across a search call or an animation tick, so a push
/// and a pop contend for at most a few pointer moves.
#[derive(Debug, Clone, Default)]
pub struct FetchQueue {
    inner: Arc<Mutex<VecDeque<FeedMessage>>>,
}

impl FetchQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `messages` in order to the back of the queue.
    pub fn extend(&self, messages: Vec<FeedMessage>) {
        let mut queue = self.inner.lock().expect("fetch queue lock poisoned");
        queue.extend(messages);
    }

    /// Pop the oldest message, if any.
    pub fn pop(&self) -> Option<FeedMessage> {
        let mut queue = self.inner.lock().expect("fetch queue lock poisoned");
        queue.pop_front()
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("fetch queue lock poisoned").len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
