//! Domain-level keyboard actions independent of key bindings.

/// Commands available in Normal (non-input) mode.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Start typing bytes for the device. Default: i
    EnterInput,
    /// Pause or resume reading; closes or reopens the port. Default: p
    TogglePause,
    /// Switch between text and plot display. Default: m
    SwitchMode,
    /// Hide or show the status column. Default: z
    ToggleFullScreen,
    /// Drop every stored message. Default: c
    ClearMessages,
    /// Keep the newest message in view (text mode). Default: f
    ToggleFollow,
    /// Prefix rows with arrival time instead of index (text mode). Default: s
    ToggleTimestamps,
    /// Append a hex dump after each row (text mode). Default: h
    ToggleHex,
    /// Scroll down by half a page (text mode). Default: j
    HalfPageDown,
    /// Scroll up by half a page (text mode). Default: k
    HalfPageUp,
    /// Jump to the last row (text mode). Default: b
    ScrollToBottom,
    /// Jump to the first row (text mode). Default: t
    ScrollToTop,
    /// Exit the program. Default: Esc
    Quit,
}

impl KeyAction {
    /// Whether the action only applies while the text log is displayed.
    pub fn is_text_only(self) -> bool {
        matches!(
            self,
            KeyAction::ToggleFollow
                | KeyAction::ToggleTimestamps
                | KeyAction::ToggleHex
                | KeyAction::HalfPageDown
                | KeyAction::HalfPageUp
                | KeyAction::ScrollToBottom
                | KeyAction::ScrollToTop
        )
    }
}
