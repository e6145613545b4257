//! User-toggleable display flags.

use crate::model::DisplayMode;

/// Whether keystrokes are commands or bytes for the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys are collected into the input buffer.
    Entry,
}

/// Display flags owned by the session controller.
///
/// Written only on the event loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Keep the newest message in view.
    pub follow: bool,
    /// Prefix rows with the arrival time instead of the row number.
    pub print_timestamps: bool,
    /// Append a hex dump below each text row.
    pub hex: bool,
    /// Reading is stopped and the port is closed.
    pub paused: bool,
    /// Hide the status column.
    pub full_screen: bool,
    /// Text log or plot.
    pub display_mode: DisplayMode,
    /// Command or input entry.
    pub input_mode: InputMode,
}

impl ViewState {
    /// Initial flags for a session starting in `display_mode`.
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            follow: true,
            print_timestamps: false,
            hex: false,
            paused: false,
            full_screen: false,
            display_mode,
            input_mode: InputMode::Normal,
        }
    }

    /// Whether the text log is displayed.
    pub fn is_text(&self) -> bool {
        self.display_mode == DisplayMode::Text
    }

    /// Whether keys are going into the input buffer.
    pub fn is_entering_input(&self) -> bool {
        self.input_mode == InputMode::Entry
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DisplayMode::default())
    }
}
