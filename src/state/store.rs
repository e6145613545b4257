//! Capacity-bounded message store, newest first.

use crate::model::Message;
use std::collections::VecDeque;

/// Ordered, bounded sequence of received messages.
///
/// Index 0 is the newest message. Inserting into a full store evicts the
/// oldest message first, so the length never exceeds the capacity. Both
/// ends are O(1).
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl MessageStore {
    /// Create an empty store. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Insert `message` as the newest entry.
    ///
    /// Returns the evicted oldest message when the store was full.
    pub fn push(&mut self, message: Message) -> Option<Message> {
        let evicted = if self.messages.len() >= self.capacity {
            self.messages.pop_back()
        } else {
            None
        };
        self.messages.push_front(message);
        evicted
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of messages retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages from newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator {
        self.messages.iter()
    }

    /// The most recently inserted message.
    pub fn newest(&self) -> Option<&Message> {
        self.messages.front()
    }

    /// The oldest retained message.
    pub fn oldest(&self) -> Option<&Message> {
        self.messages.back()
    }
}
