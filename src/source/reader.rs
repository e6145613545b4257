//! Serial reader thread: driver reads → line framer → message queue.

use crate::source::framer::LineFramer;
use crate::source::port::{PortControl, ReadOutcome};
use crate::source::queue::MessageSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Pause after a failed read so a broken device cannot spin the thread.
const ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Handle to the background reader thread.
#[derive(Debug)]
pub struct SerialReader {
    handle: JoinHandle<()>,
}

impl SerialReader {
    /// Start reading from whatever port `control` holds.
    ///
    /// The thread owns the framer and its assembly buffer, so partial lines
    /// survive pause/resume. It exits when `control` is shut down or the
    /// consumer side of the queue is dropped.
    pub fn spawn(
        control: Arc<PortControl>,
        queue: MessageSender,
        chunk_size: usize,
    ) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name("serial-reader".to_string())
            .spawn(move || read_loop(&control, &queue, chunk_size))?;
        Ok(Self { handle })
    }

    /// Whether the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread to exit.
    ///
    /// Call [`PortControl::shutdown`] first and drop the queue receiver,
    /// otherwise a reader blocked on a full queue never returns.
    pub fn join(self) {
        if self.handle.join().is_err() {
            warn!("Serial reader thread panicked");
        }
    }
}

fn read_loop(control: &PortControl, queue: &MessageSender, chunk_size: usize) {
    let mut framer = LineFramer::new();
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        match control.read(&mut buf) {
            ReadOutcome::Shutdown => break,
            ReadOutcome::Data(0) => {
                if let Some(message) = framer.on_idle() {
                    if queue.send(message).is_err() {
                        debug!("Message queue closed");
                        break;
                    }
                }
            }
            ReadOutcome::Data(n) => {
                control.record_read(n);
                framer.push_chunk(&buf[..n]);
            }
            ReadOutcome::Failed(e) => {
                warn!(error = %e, "Serial read failed");
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }

    debug!(pending = framer.pending().len(), "Serial reader stopped");
}
