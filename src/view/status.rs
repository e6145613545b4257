//! Status column and input line texts.

use crate::state::Session;
use crate::view::constants::{INPUT_PREFIX, PLOT_INSTRUCTIONS, TEXT_INSTRUCTIONS};

/// One entry per status paragraph, top to bottom.
///
/// Text mode adds the hex, timestamp and follow flags.
pub fn status_lines(session: &Session) -> Vec<String> {
    let config = session.config();
    let view = session.view_state();

    let mut lines = vec![
        format!("Baud: {}", config.settings.baud),
        format!("Device: {}", config.port_name),
        format!("Read timeout [ms]: {}", config.settings.read_timeout.as_millis()),
        format!("Logs enabled: {}", config.logs_enabled),
        format!("Written [B]: {}", session.written_bytes()),
        format!("Read [B]: {}", session.read_bytes()),
        format!("Pause: {}", view.paused),
    ];

    if view.is_text() {
        lines.push(format!("Hexmode: {}", view.hex));
        lines.push(format!("Timestamps: {}", view.print_timestamps));
        lines.push(format!("Follow: {}", view.follow));
    }

    lines
}

/// Text of the paragraph below the message area.
///
/// Key help in normal mode, the prompt and typed text in input mode.
pub fn input_line(session: &Session) -> String {
    let view = session.view_state();
    if view.is_entering_input() {
        format!("{}{}", INPUT_PREFIX, session.input())
    } else if view.is_text() {
        TEXT_INSTRUCTIONS.to_string()
    } else {
        PLOT_INSTRUCTIONS.to_string()
    }
}
