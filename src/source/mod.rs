//! Serial input pipeline.
//!
//! - [`serial`]: driver boundary and the `serialport`-backed implementation
//! - [`port`]: the port slot shared by the event loop and the reader
//! - [`framer`]: byte chunks to newline-terminated lines
//! - [`queue`]: bounded reader → event loop channel
//! - [`reader`]: the background thread tying the three together
//! - [`picker`]: startup port selection

pub mod framer;
pub mod picker;
pub mod port;
pub mod queue;
pub mod reader;
pub mod serial;

pub use framer::LineFramer;
pub use picker::choose_port;
pub use port::{PortControl, ReadOutcome};
pub use queue::{message_queue, MessageReceiver, MessageSender};
pub use reader::SerialReader;
pub use serial::{
    close_drained, open_clean, PortSettings, SerialConnection, SerialDriver, SystemSerial,
};
