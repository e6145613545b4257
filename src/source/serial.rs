//! Serial driver boundary.
//!
//! The rest of the crate talks to the device through [`SerialDriver`] and
//! [`SerialConnection`]; [`SystemSerial`] implements both on top of the
//! `serialport` crate. Tests substitute scripted fakes.

use crate::model::SerialError;
use serialport::{ClearBuffer, SerialPort};
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::info;

/// Settings used every time the port is (re)opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSettings {
    /// Baud rate.
    pub baud: u32,
    /// How long a read waits for data before reporting "nothing available".
    pub read_timeout: Duration,
}

/// An open serial port.
///
/// `read` returning `Ok(0)` means no data arrived within the read timeout,
/// never end-of-file.
pub trait SerialConnection: Send {
    /// Read up to `buf.len()` bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write the whole buffer.
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Block until all written bytes have been transmitted.
    fn drain(&mut self) -> io::Result<()>;

    /// Discard anything pending in the driver's input and output buffers.
    fn reset_buffers(&mut self) -> Result<(), SerialError>;
}

/// Port enumeration and opening.
pub trait SerialDriver: Send {
    /// Names of the ports currently present, in driver order.
    fn list_ports(&self) -> Result<Vec<String>, SerialError>;

    /// Open `name` with the given settings.
    fn open(
        &self,
        name: &str,
        settings: PortSettings,
    ) -> Result<Box<dyn SerialConnection>, SerialError>;
}

/// Open a port and bring it to a clean state: drain, then reset both buffers.
///
/// # Errors
///
/// Any failure along the way is returned; the port is dropped (closed).
pub fn open_clean(
    driver: &dyn SerialDriver,
    name: &str,
    settings: PortSettings,
) -> Result<Box<dyn SerialConnection>, SerialError> {
    let mut port = driver.open(name, settings)?;
    port.drain().map_err(SerialError::Drain)?;
    port.reset_buffers()?;
    info!(port = name, baud = settings.baud, "Serial port opened");
    Ok(port)
}

/// Drain and close a port.
///
/// # Errors
///
/// Returns `SerialError::Drain` if pending output could not be flushed; the
/// port is closed either way.
pub fn close_drained(mut port: Box<dyn SerialConnection>) -> Result<(), SerialError> {
    let drained = port.drain().map_err(SerialError::Drain);
    drop(port);
    info!("Serial port closed");
    drained
}

/// Serial driver backed by the operating system via `serialport`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSerial;

impl SerialDriver for SystemSerial {
    fn list_ports(&self) -> Result<Vec<String>, SerialError> {
        let ports = serialport::available_ports()
            .map_err(|e| SerialError::Enumerate(e.to_string()))?;
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }

    fn open(
        &self,
        name: &str,
        settings: PortSettings,
    ) -> Result<Box<dyn SerialConnection>, SerialError> {
        let port = serialport::new(name, settings.baud)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| SerialError::Open {
                port: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(SystemConnection { port }))
    }
}

struct SystemConnection {
    port: Box<dyn SerialPort>,
}

impl SerialConnection for SystemConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.port, data)
    }

    fn drain(&mut self) -> io::Result<()> {
        self.port.flush()
    }

    fn reset_buffers(&mut self) -> Result<(), SerialError> {
        self.port
            .clear(ClearBuffer::Input)
            .and_then(|()| self.port.clear(ClearBuffer::Output))
            .map_err(|e| SerialError::Reset(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{FakeDriver, FakePort};

    fn settings() -> PortSettings {
        PortSettings {
            baud: 9600,
            read_timeout: Duration::from_millis(10),
        }
    }

    #[test]
    fn open_clean_drains_and_resets() {
        let port = FakePort::new();
        let probe = port.probe();
        let driver = FakeDriver::with_port("/dev/ttyACM0", port);

        let _conn = open_clean(&driver, "/dev/ttyACM0", settings()).unwrap();

        assert_eq!(probe.drain_count(), 1);
        assert_eq!(probe.reset_count(), 1);
        assert_eq!(driver.opened(), vec![("/dev/ttyACM0".to_string(), settings())]);
    }

    #[test]
    fn open_clean_propagates_open_failure() {
        let driver = FakeDriver::empty();
        let result = open_clean(&driver, "/dev/missing", settings());
        assert!(matches!(result, Err(SerialError::Open { .. })));
    }

    #[test]
    fn close_drained_flushes_before_closing() {
        let port = FakePort::new();
        let probe = port.probe();

        close_drained(Box::new(port)).unwrap();

        assert_eq!(probe.drain_count(), 1);
        assert!(probe.is_closed());
    }
}
