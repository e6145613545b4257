//! Serial Monitor
//!
//! Terminal UI for watching a serial port: received lines as a scrollable
//! log or numeric samples as a live plot, with a prompt for writing back to
//! the device.
//!
//! The crate follows a Pure Core / Impure Shell split. `model`,
//! `view_state` and most of `state` are pure; `source` owns the serial
//! driver and the reader thread, `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
