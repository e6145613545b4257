//! Session controller.
//!
//! [`Session`] is the single owner of every piece of mutable session state:
//! the message store, the view flags, the input buffer, the port lifecycle
//! and the derived screen contents. The event loop feeds it key events and
//! framed messages; the view only reads from it.

use crate::config::KeyBindings;
use crate::model::{DisplayMode, KeyAction, Message, SerialError};
use crate::source::{close_drained, open_clean, PortControl, PortSettings, SerialDriver};
use crate::state::scroll::InboxScroll;
use crate::state::store::MessageStore;
use crate::state::view_state::{InputMode, ViewState};
use crate::view_state::{plot_points, text_rows};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tracing::{debug, info};

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Port chosen at startup.
    pub port_name: String,
    /// Baud rate and read timeout used on every (re)open.
    pub settings: PortSettings,
    /// Display mode at startup.
    pub display_mode: DisplayMode,
    /// Shown in the status column.
    pub logs_enabled: bool,
    /// Message store capacity.
    pub message_capacity: usize,
    /// Plot series length.
    pub plot_points: usize,
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Render-ready data derived from the store. Replaced on rebuild.
#[derive(Debug, Default)]
struct Screen {
    rows: Vec<String>,
    series: Vec<f64>,
    scroll: InboxScroll,
}

/// Session state machine.
pub struct Session {
    config: SessionConfig,
    driver: Box<dyn SerialDriver>,
    control: Arc<PortControl>,
    bindings: KeyBindings,
    store: MessageStore,
    view: ViewState,
    input: String,
    written_bytes: u64,
    screen: Screen,
    clear_requested: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("control", &self.control)
            .field("stored", &self.store.len())
            .field("view", &self.view)
            .field("written_bytes", &self.written_bytes)
            .finish()
    }
}

impl Session {
    /// Open the configured port and build a session around it.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the port cannot be opened and cleaned.
    pub fn start(
        driver: Box<dyn SerialDriver>,
        config: SessionConfig,
        bindings: KeyBindings,
    ) -> Result<Self, SerialError> {
        let port = open_clean(driver.as_ref(), &config.port_name, config.settings)?;
        let control = Arc::new(PortControl::new());
        control.install(port);

        let mut session = Self {
            store: MessageStore::new(config.message_capacity),
            view: ViewState::new(config.display_mode),
            config,
            driver,
            control,
            bindings,
            input: String::new(),
            written_bytes: 0,
            screen: Screen::default(),
            clear_requested: false,
        };
        session.refresh_view();
        info!(
            port = %session.config.port_name,
            mode = %session.view.display_mode,
            "Session started"
        );
        Ok(session)
    }

    /// Port slot shared with the reader thread.
    pub fn port_control(&self) -> Arc<PortControl> {
        Arc::clone(&self.control)
    }

    // ===== Event handling =====

    /// Apply one key event.
    ///
    /// # Errors
    ///
    /// Port failures while pausing, resuming or writing are returned as-is;
    /// the caller treats them as fatal.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<KeyOutcome, SerialError> {
        if key.kind == KeyEventKind::Release {
            return Ok(KeyOutcome::Continue);
        }
        if KeyBindings::is_force_quit(key) {
            info!("Exiting program");
            return Ok(KeyOutcome::Quit);
        }

        match self.view.input_mode {
            InputMode::Entry => {
                self.handle_input_key(key)?;
                Ok(KeyOutcome::Continue)
            }
            InputMode::Normal => match self.bindings.get(key) {
                Some(action) => self.handle_action(action),
                None => Ok(KeyOutcome::Continue),
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Result<(), SerialError> {
        match key.code {
            KeyCode::Esc => {
                self.view.input_mode = InputMode::Normal;
                info!("Exiting input mode");
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_input()?,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c)
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_input(&mut self) -> Result<(), SerialError> {
        let bytes = self.input.as_bytes();
        match self.control.with_port(|port| port.write_all(bytes)) {
            None => {
                debug!("Input not sent, port is closed");
                Ok(())
            }
            Some(Err(e)) => Err(SerialError::Write(e)),
            Some(Ok(())) => {
                self.written_bytes += bytes.len() as u64;
                debug!(bytes = bytes.len(), "Input written");
                self.input.clear();
                Ok(())
            }
        }
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<KeyOutcome, SerialError> {
        if action.is_text_only() && !self.view.is_text() {
            return Ok(KeyOutcome::Continue);
        }

        match action {
            KeyAction::Quit => {
                info!("Exiting program");
                return Ok(KeyOutcome::Quit);
            }
            KeyAction::EnterInput => self.enter_input(),
            KeyAction::TogglePause => self.toggle_pause()?,
            KeyAction::SwitchMode => {
                self.view.display_mode = self.view.display_mode.toggled();
                self.rebuild();
            }
            KeyAction::ToggleFullScreen => {
                self.view.full_screen = !self.view.full_screen;
                self.rebuild();
            }
            KeyAction::ClearMessages => self.clear_messages(),
            KeyAction::ToggleFollow => self.view.follow = !self.view.follow,
            KeyAction::ToggleTimestamps => {
                self.view.print_timestamps = !self.view.print_timestamps;
                self.refresh_view();
            }
            KeyAction::ToggleHex => {
                self.view.hex = !self.view.hex;
                self.refresh_view();
            }
            KeyAction::HalfPageDown => self.screen.scroll.half_page_down(),
            KeyAction::HalfPageUp => self.screen.scroll.half_page_up(),
            KeyAction::ScrollToBottom => self.screen.scroll.to_bottom(),
            KeyAction::ScrollToTop => self.screen.scroll.to_top(),
        }
        Ok(KeyOutcome::Continue)
    }

    fn enter_input(&mut self) {
        if self.view.paused {
            return;
        }
        self.view.input_mode = InputMode::Entry;
        if self.view.is_text() && self.view.follow && !self.store.is_empty() {
            self.screen.scroll.to_top();
        }
        info!("Entering input mode");
    }

    fn toggle_pause(&mut self) -> Result<(), SerialError> {
        if self.view.paused {
            info!("Unpausing");
            if !self.control.is_open() {
                let port = open_clean(
                    self.driver.as_ref(),
                    &self.config.port_name,
                    self.config.settings,
                )?;
                self.control.install(port);
                self.view.paused = false;
            }
        } else {
            info!("Pausing");
            if let Some(port) = self.control.take() {
                self.view.paused = true;
                close_drained(port)?;
            }
        }
        Ok(())
    }

    fn clear_messages(&mut self) {
        if self.view.is_text() && !self.store.is_empty() {
            self.screen.scroll.to_top();
        }
        self.store = MessageStore::new(self.config.message_capacity);
        self.refresh_view();
        info!("Messages cleared");
    }

    /// Tear down and rebuild the screen for the current mode and layout.
    ///
    /// The reader stays suspended until [`finish_rebuild`] runs after the
    /// terminal has been cleared; queued messages wait in the queue meanwhile.
    /// The pause state is left as it was.
    ///
    /// [`finish_rebuild`]: Session::finish_rebuild
    fn rebuild(&mut self) {
        self.control.set_suspended(true);

        self.screen = Screen::default();
        self.clear_requested = true;
        self.refresh_view();

        info!(
            mode = %self.view.display_mode,
            full_screen = self.view.full_screen,
            "Display rebuilt"
        );
    }

    /// Let the reader back onto the port once the rebuilt screen is up.
    pub fn finish_rebuild(&mut self) {
        self.control.set_suspended(false);
    }

    // ===== Message flow =====

    /// Insert framed messages, oldest first, then refresh the screen once.
    pub fn ingest(&mut self, messages: impl IntoIterator<Item = Message>) {
        let mut inserted = 0usize;
        for message in messages {
            self.store.push(message);
            inserted += 1;
        }
        if inserted > 0 {
            self.refresh_view();
        }
    }

    /// Recompute rows or points from the store for the current mode.
    pub fn refresh_view(&mut self) {
        match self.view.display_mode {
            DisplayMode::Text => {
                self.screen.rows = text_rows(
                    &self.store,
                    self.store.len(),
                    self.view.print_timestamps,
                    self.view.hex,
                );
                self.screen.scroll.set_rows(self.screen.rows.len());
                if self.view.follow && !self.store.is_empty() {
                    self.screen.scroll.to_top();
                }
            }
            DisplayMode::Plot => {
                self.screen.series = plot_points(&self.store, self.config.plot_points);
            }
        }
    }

    /// Tell the scroll logic how many list rows are visible.
    pub fn set_list_height(&mut self, rows: usize) {
        self.screen.scroll.set_page_height(rows);
    }

    /// Whether the terminal should be cleared before the next draw.
    ///
    /// Resets the request.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }

    /// Close the port and stop the reader.
    ///
    /// # Errors
    ///
    /// Returns `SerialError::Drain` if pending output could not be flushed.
    pub fn shutdown(&mut self) -> Result<(), SerialError> {
        self.control.shutdown();
        match self.control.take() {
            Some(port) => close_drained(port),
            None => {
                debug!("Serial port already closed");
                Ok(())
            }
        }
    }

    // ===== Read access for the view =====

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current display flags.
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// The message store.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Text log rows, newest first.
    pub fn rows(&self) -> &[String] {
        &self.screen.rows
    }

    /// Plot series, oldest first.
    pub fn series(&self) -> &[f64] {
        &self.screen.series
    }

    /// Selected text log row.
    pub fn selected_row(&self) -> usize {
        self.screen.scroll.selected()
    }

    /// Bytes typed but not yet sent.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Bytes written to the device this session.
    pub fn written_bytes(&self) -> u64 {
        self.written_bytes
    }

    /// Bytes read from the device this session.
    pub fn read_bytes(&self) -> u64 {
        self.control.bytes_read()
    }

    /// Whether the port is currently open.
    pub fn is_port_open(&self) -> bool {
        self.control.is_open()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
