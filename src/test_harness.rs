//! Test doubles for the serial driver and an acceptance harness around
//! `TuiApp<TestBackend>`.

#![allow(dead_code)]

use crate::config::KeyBindings;
use crate::model::{DisplayMode, Message, SerialError};
use crate::source::{message_queue, MessageSender, PortSettings, SerialConnection, SerialDriver};
use crate::state::{Session, SessionConfig};
use crate::view::{TuiApp, TuiError};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

// ============================================================================
// Fake serial port
// ============================================================================

enum ReadStep {
    Data(Vec<u8>),
    Error,
}

#[derive(Default)]
struct PortLog {
    reads: VecDeque<ReadStep>,
    read_calls: usize,
    written: Vec<u8>,
    fail_writes: bool,
    drains: usize,
    resets: usize,
    closed: bool,
}

fn lock(log: &Mutex<PortLog>) -> MutexGuard<'_, PortLog> {
    log.lock().unwrap_or_else(|e| e.into_inner())
}

/// Scripted serial connection.
///
/// Reads return the scripted chunks in order, then behave like a read
/// timeout (`Ok(0)` after a short sleep). Everything the port sees is
/// recorded and can be inspected through a [`PortProbe`] after the port has
/// been handed to the code under test.
pub struct FakePort {
    log: Arc<Mutex<PortLog>>,
}

/// Inspection handle for a [`FakePort`].
#[derive(Clone)]
pub struct PortProbe {
    log: Arc<Mutex<PortLog>>,
}

impl FakePort {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(PortLog::default())),
        }
    }

    pub fn probe(&self) -> PortProbe {
        PortProbe {
            log: Arc::clone(&self.log),
        }
    }
}

impl Drop for FakePort {
    fn drop(&mut self) {
        lock(&self.log).closed = true;
    }
}

impl SerialConnection for FakePort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut log = lock(&self.log);
        log.read_calls += 1;
        match log.reads.pop_front() {
            Some(ReadStep::Data(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    log.reads.push_front(ReadStep::Data(bytes[n..].to_vec()));
                }
                Ok(n)
            }
            Some(ReadStep::Error) => Err(io::Error::other("scripted read failure")),
            None => {
                drop(log);
                thread::sleep(Duration::from_millis(1));
                Ok(0)
            }
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let mut log = lock(&self.log);
        if log.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        log.written.extend_from_slice(data);
        Ok(())
    }

    fn drain(&mut self) -> io::Result<()> {
        lock(&self.log).drains += 1;
        Ok(())
    }

    fn reset_buffers(&mut self) -> Result<(), SerialError> {
        lock(&self.log).resets += 1;
        Ok(())
    }
}

impl PortProbe {
    /// Queue bytes for a future read.
    pub fn push_read(&self, bytes: &[u8]) {
        lock(&self.log).reads.push_back(ReadStep::Data(bytes.to_vec()));
    }

    /// Queue a failing read.
    pub fn push_read_error(&self) {
        lock(&self.log).reads.push_back(ReadStep::Error);
    }

    /// Make every following write fail.
    pub fn fail_writes(&self) {
        lock(&self.log).fail_writes = true;
    }

    pub fn written(&self) -> Vec<u8> {
        lock(&self.log).written.clone()
    }

    pub fn read_count(&self) -> usize {
        lock(&self.log).read_calls
    }

    pub fn drain_count(&self) -> usize {
        lock(&self.log).drains
    }

    pub fn reset_count(&self) -> usize {
        lock(&self.log).resets
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.log).closed
    }
}

// ============================================================================
// Fake driver
// ============================================================================

#[derive(Default)]
struct DriverState {
    names: Vec<String>,
    ports: HashMap<String, VecDeque<FakePort>>,
    opened: Vec<(String, PortSettings)>,
}

/// Serial driver handing out pre-built [`FakePort`]s.
///
/// Each successful `open` of a name consumes the next port queued for it;
/// opening a name with nothing queued fails with `SerialError::Open`.
/// Clones share state, so a test can keep one to inspect after giving the
/// other away.
#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<DriverState>>,
}

impl FakeDriver {
    /// Driver listing no ports.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Driver with one port that can be opened once.
    pub fn with_port(name: &str, port: FakePort) -> Self {
        Self::with_ports(name, vec![port])
    }

    /// Driver with one port name that can be opened once per given port.
    pub fn with_ports(name: &str, ports: Vec<FakePort>) -> Self {
        let driver = Self::default();
        {
            let mut state = driver.lock();
            state.names.push(name.to_string());
            state.ports.insert(name.to_string(), ports.into());
        }
        driver
    }

    /// Add a listed name without any openable port behind it.
    pub fn list_also(&self, name: &str) {
        self.lock().names.push(name.to_string());
    }

    /// Successful opens so far.
    pub fn opened(&self) -> Vec<(String, PortSettings)> {
        self.lock().opened.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SerialDriver for FakeDriver {
    fn list_ports(&self) -> Result<Vec<String>, SerialError> {
        Ok(self.lock().names.clone())
    }

    fn open(
        &self,
        name: &str,
        settings: PortSettings,
    ) -> Result<Box<dyn SerialConnection>, SerialError> {
        let mut state = self.lock();
        let port = state
            .ports
            .get_mut(name)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| SerialError::Open {
                port: name.to_string(),
                reason: "No such file or directory".to_string(),
            })?;
        state.opened.push((name.to_string(), settings));
        Ok(Box::new(port))
    }
}

// ============================================================================
// Session fixtures
// ============================================================================

pub const FAKE_PORT_NAME: &str = "/dev/ttyFAKE0";

pub fn test_settings() -> PortSettings {
    PortSettings {
        baud: 115_200,
        read_timeout: Duration::from_millis(10),
    }
}

pub fn test_config(mode: DisplayMode) -> SessionConfig {
    SessionConfig {
        port_name: FAKE_PORT_NAME.to_string(),
        settings: test_settings(),
        display_mode: mode,
        logs_enabled: false,
        message_capacity: 100,
        plot_points: 200,
    }
}

/// A session on a fake port, plus handles to inspect the fakes.
///
/// `ports` probes are in open order: index 0 is the port opened at start,
/// index 1 the one opened on the first resume, and so on.
pub struct SessionFixture {
    pub session: Session,
    pub driver: FakeDriver,
    pub ports: Vec<PortProbe>,
}

pub fn session_fixture(mode: DisplayMode) -> SessionFixture {
    session_fixture_with(test_config(mode))
}

pub fn session_fixture_with(config: SessionConfig) -> SessionFixture {
    let ports: Vec<FakePort> = (0..4).map(|_| FakePort::new()).collect();
    let probes = ports.iter().map(FakePort::probe).collect();
    let driver = FakeDriver::with_ports(&config.port_name, ports);
    let session = Session::start(Box::new(driver.clone()), config, KeyBindings::default())
        .expect("fake port should open");
    SessionFixture {
        session,
        driver,
        ports: probes,
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn lines(lines: &[&str]) -> Vec<Message> {
    lines.iter().map(|l| Message::text_now(*l)).collect()
}

// ============================================================================
// Acceptance harness
// ============================================================================

/// Convert a ratatui buffer to a string, one terminal row per line.
///
/// Trailing whitespace and empty rows are dropped.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Drives a `TuiApp<TestBackend>` on a fake port.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    queue: MessageSender,
    driver: FakeDriver,
    ports: Vec<PortProbe>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// 100x40 terminal, the given display mode.
    pub fn new(mode: DisplayMode) -> Self {
        Self::with_size(mode, 100, 40)
    }

    pub fn with_size(mode: DisplayMode, width: u16, height: u16) -> Self {
        let fixture = session_fixture(mode);
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        let (queue, messages) = message_queue(64);
        Self {
            app: TuiApp::new(terminal, fixture.session, messages),
            queue,
            driver: fixture.driver,
            ports: fixture.ports,
            running: true,
        }
    }

    /// Send one key press. Returns `Ok(true)` once the app has quit.
    pub fn send_key(&mut self, code: KeyCode) -> Result<bool, TuiError> {
        self.send_key_with_mods(code, KeyModifiers::NONE)
    }

    pub fn send_key_with_mods(
        &mut self,
        code: KeyCode,
        mods: KeyModifiers,
    ) -> Result<bool, TuiError> {
        if !self.running {
            return Ok(true);
        }
        let quit = self.app.handle_event(Event::Key(KeyEvent::new(code, mods)))?;
        if quit {
            self.running = false;
        }
        Ok(quit)
    }

    /// Type characters one key at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch)).expect("typing should not fail");
        }
    }

    /// Push framed lines through the queue and let the app consume them.
    pub fn receive_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.queue
                .send(Message::text_now(*line))
                .expect("queue receiver is owned by the app");
        }
        self.app.pump_messages();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.resize_for_test(width, height);
    }

    pub fn render_to_string(&mut self) -> String {
        self.app.draw().expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    pub fn session(&self) -> &Session {
        self.app.session()
    }

    pub fn port(&self, index: usize) -> &PortProbe {
        &self.ports[index]
    }

    pub fn driver(&self) -> &FakeDriver {
        &self.driver
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
