//! Shared port slot between the event loop and the serial reader.
//!
//! The event loop is the only party that installs or removes the port. The
//! reader borrows it for one bounded read at a time and sleeps on a condition
//! variable whenever the port is absent or reading is suspended, so a paused
//! session costs no CPU.

use crate::source::serial::SerialConnection;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct Slot {
    port: Option<Box<dyn SerialConnection>>,
    suspended: bool,
    shutdown: bool,
}

/// Result of one reader attempt.
#[derive(Debug)]
pub enum ReadOutcome {
    /// `n` bytes were copied into the buffer (`0` = read timeout elapsed).
    Data(usize),
    /// The driver reported an error for this read.
    Failed(io::Error),
    /// The session is over; the reader must exit.
    Shutdown,
}

/// Port handle shared by the event loop and the reader thread.
pub struct PortControl {
    slot: Mutex<Slot>,
    changed: Condvar,
    bytes_read: AtomicU64,
}

impl std::fmt::Debug for PortControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.lock();
        f.debug_struct("PortControl")
            .field("open", &slot.port.is_some())
            .field("suspended", &slot.suspended)
            .field("shutdown", &slot.shutdown)
            .field("bytes_read", &self.bytes_read())
            .finish()
    }
}

impl Default for PortControl {
    fn default() -> Self {
        Self::new()
    }
}

impl PortControl {
    /// Create an empty slot (no port, not suspended).
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                port: None,
                suspended: false,
                shutdown: false,
            }),
            changed: Condvar::new(),
            bytes_read: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put an open port into the slot and wake the reader.
    ///
    /// Returns the previously installed port, if any.
    pub fn install(&self, port: Box<dyn SerialConnection>) -> Option<Box<dyn SerialConnection>> {
        let previous = self.lock().port.replace(port);
        self.changed.notify_all();
        previous
    }

    /// Remove the port from the slot.
    ///
    /// Waits for an in-flight read to finish, so the caller may close the
    /// returned handle without racing the reader.
    pub fn take(&self) -> Option<Box<dyn SerialConnection>> {
        let port = self.lock().port.take();
        self.changed.notify_all();
        port
    }

    /// Whether a port is currently installed.
    pub fn is_open(&self) -> bool {
        self.lock().port.is_some()
    }

    /// Stop or resume reader access without touching the port itself.
    pub fn set_suspended(&self, suspended: bool) {
        self.lock().suspended = suspended;
        self.changed.notify_all();
        debug!(suspended, "Reader suspension changed");
    }

    /// Whether reader access is suspended.
    pub fn is_suspended(&self) -> bool {
        self.lock().suspended
    }

    /// Tell the reader to exit and wake it.
    pub fn shutdown(&self) {
        self.lock().shutdown = true;
        self.changed.notify_all();
    }

    /// Run `f` against the installed port.
    ///
    /// Returns `None` when no port is open.
    pub fn with_port<R>(&self, f: impl FnOnce(&mut dyn SerialConnection) -> R) -> Option<R> {
        let mut slot = self.lock();
        slot.port.as_mut().map(|port| f(port.as_mut()))
    }

    /// Reader side: wait until a port is readable, then perform one read.
    ///
    /// Blocks (without spinning) while the port is closed or suspended.
    pub fn read(&self, buf: &mut [u8]) -> ReadOutcome {
        let mut slot = self.lock();
        loop {
            if slot.shutdown {
                return ReadOutcome::Shutdown;
            }
            if !slot.suspended && slot.port.is_some() {
                break;
            }
            slot = self
                .changed
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }

        match slot.port.as_mut().map(|port| port.read(buf)) {
            Some(Ok(n)) => ReadOutcome::Data(n),
            Some(Err(e)) => ReadOutcome::Failed(e),
            None => ReadOutcome::Data(0),
        }
    }

    /// Add to the running "bytes read" counter.
    pub fn record_read(&self, n: usize) {
        self.bytes_read.fetch_add(n as u64, Ordering::Relaxed);
    }

    /// Total bytes read from the device this session.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }
}
