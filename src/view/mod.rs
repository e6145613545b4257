//! Terminal shell (impure).
//!
//! Owns the terminal and runs the event loop. The loop waits on two
//! channels at once, framed messages from the serial reader and terminal
//! events from the keyboard thread, so the loop thread is the only one that
//! ever mutates the session or draws.

pub mod constants;
pub mod layout;
pub mod status;

use crate::config::{KeyBindings, READ_CHUNK_SIZE};
use crate::model::{AppError, SerialError};
use crate::source::{message_queue, MessageReceiver, SerialDriver, SerialReader};
use crate::state::{KeyOutcome, Session, SessionConfig};
use crossbeam_channel::{bounded, never, select, Receiver};
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::thread;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Capacity of the keyboard event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Errors that can occur while the TUI is running.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Serial port failure (fatal to the session)
    #[error("{0}")]
    Serial(#[from] SerialError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
            TuiError::Serial(e) => AppError::Serial(e),
        }
    }
}

/// Main TUI application.
///
/// Generic over backend to support testing with `TestBackend`.
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: Session,
    messages: MessageReceiver,
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap a terminal, a started session and the consumer end of the
    /// message queue.
    pub fn new(terminal: Terminal<B>, session: Session, messages: MessageReceiver) -> Self {
        Self {
            terminal,
            session,
            messages,
        }
    }

    /// Run the event loop until the user quits or a fatal error occurs.
    ///
    /// Every wake-up handles all messages queued at that moment as one
    /// batch, followed by a single redraw.
    pub fn run(&mut self, events: Receiver<Event>) -> Result<(), TuiError> {
        self.draw()?;

        let mut incoming = self.messages.channel().clone();

        loop {
            select! {
                recv(incoming) -> message => match message {
                    Ok(first) => {
                        let mut batch = vec![first];
                        batch.extend(self.messages.drain());
                        debug!(count = batch.len(), "Ingesting messages");
                        self.session.ingest(batch);
                    }
                    Err(_) => {
                        warn!("Serial reader stopped");
                        incoming = never();
                    }
                },
                recv(events) -> event => match event {
                    Ok(event) => {
                        if self.handle_event(event)? {
                            return Ok(());
                        }
                    }
                    Err(_) => {
                        warn!("Keyboard event channel closed");
                        return Ok(());
                    }
                },
            }

            self.draw()?;
        }
    }

    /// Apply one terminal event. Returns `true` when the app should quit.
    pub(crate) fn handle_event(&mut self, event: Event) -> Result<bool, TuiError> {
        match event {
            Event::Key(key) => Ok(self.session.handle_key(key)? == KeyOutcome::Quit),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Ingest whatever is queued right now without waiting.
    pub(crate) fn pump_messages(&mut self) {
        let batch = self.messages.drain();
        self.session.ingest(batch);
    }

    /// Render the current frame.
    pub(crate) fn draw(&mut self) -> Result<(), TuiError> {
        if self.session.take_clear_request() {
            self.terminal.clear()?;
            self.session.finish_rebuild();
        }

        let size = self.terminal.size()?;
        let areas = layout::compute_areas(
            Rect::new(0, 0, size.width, size.height),
            self.session.view_state(),
        );
        self.session.set_list_height(areas.list_rows());

        let session = &self.session;
        self.terminal.draw(|frame| layout::render(frame, session))?;
        Ok(())
    }

    /// The session being displayed.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Close the port, stop the reader and release the queue.
    pub fn shutdown(self) -> Result<(), SerialError> {
        let Self {
            mut session,
            messages,
            ..
        } = self;
        let closed = session.shutdown();
        drop(messages);
        closed
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl TuiApp<ratatui::backend::TestBackend> {
    pub(crate) fn terminal(&self) -> &Terminal<ratatui::backend::TestBackend> {
        &self.terminal
    }

    pub(crate) fn resize_for_test(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        let _ = self.handle_event(Event::Resize(width, height));
    }
}

/// Forward terminal events from a background thread.
///
/// The thread exits when the receiver is dropped (on the next event) or
/// when reading events fails.
fn spawn_event_thread() -> io::Result<Receiver<Event>> {
    let (tx, rx) = bounded(EVENT_CHANNEL_CAPACITY);
    thread::Builder::new()
        .name("terminal-events".to_string())
        .spawn(move || loop {
            match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(error = %e, "Reading terminal events failed");
                    break;
                }
            }
        })?;
    Ok(rx)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Open the port, start the reader and run the TUI until the user quits.
///
/// The port is opened before the terminal is touched, so an open failure
/// leaves the console untouched. On every exit path the terminal is
/// restored and the port is drained and closed.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_session(
    driver: Box<dyn SerialDriver>,
    config: SessionConfig,
    queue_capacity: usize,
) -> Result<(), TuiError> {
    let mut session = Session::start(driver, config, KeyBindings::default())?;

    let (queue, messages) = message_queue(queue_capacity);
    let reader = match SerialReader::spawn(session.port_control(), queue, READ_CHUNK_SIZE) {
        Ok(reader) => reader,
        Err(e) => {
            let _ = session.shutdown();
            return Err(e.into());
        }
    };

    let terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal();
            let _ = session.shutdown();
            drop(messages);
            reader.join();
            return Err(e.into());
        }
    };

    let mut app = TuiApp::new(terminal, session, messages);
    let result = spawn_event_thread()
        .map_err(TuiError::from)
        .and_then(|events| app.run(events));

    let restored = restore_terminal();
    let closed = app.shutdown();
    reader.join();
    info!("Serial monitor stopped");

    result?;
    restored?;
    closed?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayMode;
    use crate::test_harness::{lines, session_fixture};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn app(mode: DisplayMode) -> (TuiApp<TestBackend>, crate::source::MessageSender) {
        let fx = session_fixture(mode);
        let terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let (tx, rx) = message_queue(16);
        (TuiApp::new(terminal, fx.session, rx), tx)
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn run_returns_when_escape_arrives() {
        let (mut app, _tx) = app(DisplayMode::Text);
        let (events_tx, events_rx) = bounded(4);
        events_tx.send(key_event(KeyCode::Esc)).unwrap();

        app.run(events_rx).unwrap();
    }

    #[test]
    fn run_ingests_queued_messages_before_next_key() {
        let (mut app, tx) = app(DisplayMode::Text);
        for msg in lines(&["one\n", "two\n"]) {
            tx.send(msg).unwrap();
        }
        let (events_tx, events_rx) = bounded(4);

        let feeder = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(50));
            events_tx.send(key_event(KeyCode::Esc)).unwrap();
        });
        app.run(events_rx).unwrap();
        feeder.join().unwrap();

        assert_eq!(app.session().rows(), ["[1]: two", "[2]: one"]);
    }

    #[test]
    fn run_survives_reader_disconnect() {
        let (mut app, tx) = app(DisplayMode::Text);
        drop(tx);
        let (events_tx, events_rx) = bounded(4);
        events_tx.send(key_event(KeyCode::Char('h'))).unwrap();
        events_tx.send(key_event(KeyCode::Esc)).unwrap();

        app.run(events_rx).unwrap();

        assert!(app.session().view_state().hex);
    }

    #[test]
    fn run_stops_when_keyboard_channel_closes() {
        let (mut app, _tx) = app(DisplayMode::Plot);
        let (events_tx, events_rx) = bounded::<Event>(1);
        drop(events_tx);

        app.run(events_rx).unwrap();
    }

    #[test]
    fn serial_failure_ends_the_run() {
        let fx = session_fixture(DisplayMode::Text);
        fx.ports[0].fail_writes();
        let terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let (_tx, rx) = message_queue(4);
        let mut app = TuiApp::new(terminal, fx.session, rx);

        let (events_tx, events_rx) = bounded(8);
        for code in [KeyCode::Char('i'), KeyCode::Char('x'), KeyCode::Enter] {
            events_tx.send(key_event(code)).unwrap();
        }

        let result = app.run(events_rx);

        assert!(matches!(result, Err(TuiError::Serial(SerialError::Write(_)))));
    }

    #[test]
    fn shutdown_closes_port() {
        let fx = session_fixture(DisplayMode::Text);
        let probe = fx.ports[0].clone();
        let terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let (_tx, rx) = message_queue(4);
        let app = TuiApp::new(terminal, fx.session, rx);

        app.shutdown().unwrap();

        assert!(probe.is_closed());
    }
}
