//! Bounded message queue between the serial reader and the event loop.
//!
//! One producer, one consumer, FIFO. A full queue blocks the reader rather
//! than dropping device output.

use crate::model::Message;
use crossbeam_channel::{bounded, Receiver, SendError, Sender};

/// Producer half, owned by the reader thread.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: Sender<Message>,
}

/// Consumer half, owned by the event loop.
#[derive(Debug, Clone)]
pub struct MessageReceiver {
    rx: Receiver<Message>,
}

/// Create a queue holding at most `capacity` undelivered messages.
///
/// A capacity of zero would turn the queue into a rendezvous channel; it is
/// raised to one.
pub fn message_queue(capacity: usize) -> (MessageSender, MessageReceiver) {
    let (tx, rx) = bounded(capacity.max(1));
    (MessageSender { tx }, MessageReceiver { rx })
}

impl MessageSender {
    /// Enqueue a message, blocking while the queue is full.
    ///
    /// # Errors
    ///
    /// Fails only when the consumer is gone; the message is handed back.
    pub fn send(&self, message: Message) -> Result<(), SendError<Message>> {
        self.tx.send(message)
    }
}

impl MessageReceiver {
    /// Take every message currently queued, oldest first, without blocking.
    pub fn drain(&self) -> Vec<Message> {
        self.rx.try_iter().collect()
    }

    /// Number of messages waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// The underlying channel, for use in `select!`.
    pub fn channel(&self) -> &Receiver<Message> {
        &self.rx
    }
}
