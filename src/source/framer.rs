//! Byte stream to line framing.
//!
//! The device stream carries no framing of its own. Bytes are accumulated
//! in an assembly buffer and a line is only split off when a read comes back
//! empty, i.e. the device went quiet for one read timeout. At most one line
//! is emitted per quiet read; anything after the first newline stays
//! buffered for the next one. A partial line is never emitted.

use crate::model::Message;

/// Reassembles newline-terminated lines from raw read chunks.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    /// Create a framer with an empty assembly buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a non-empty read chunk to the assembly buffer.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Handle a read that returned no bytes.
    ///
    /// Splits the buffer at the first newline and returns the line up to and
    /// including it, stamped with the current time. Returns `None` when the
    /// buffer is empty or holds no complete line.
    pub fn on_idle(&mut self) -> Option<Message> {
        let end = self.buffer.iter().position(|&b| b == b'\n')? + 1;
        let line: Vec<u8> = self.buffer.drain(..end).collect();
        Some(Message::text_now(String::from_utf8_lossy(&line)))
    }

    /// Feed the result of one driver read.
    ///
    /// Non-empty chunks are buffered; an empty chunk triggers [`on_idle`].
    ///
    /// [`on_idle`]: LineFramer::on_idle
    pub fn feed(&mut self, chunk: &[u8]) -> Option<Message> {
        if chunk.is_empty() {
            self.on_idle()
        } else {
            self.push_chunk(chunk);
            None
        }
    }

    /// Bytes received but not yet emitted as part of a line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}
