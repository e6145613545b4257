//! Messages received from the serial device.
//!
//! A [`Message`] is created once (by the line framer) and never mutated
//! afterwards. Content is a closed sum type: the text/number distinction is
//! matched exhaustively everywhere it is consumed.

use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Payload carried by a [`Message`].
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// A framed text line, including its terminating newline.
    Text(String),
    /// A numeric sample.
    Number(f64),
}

/// A single message received from the device, stamped on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    timestamp: DateTime<Local>,
    content: MessageContent,
}

impl Message {
    /// Create a message with an explicit timestamp.
    pub fn new(timestamp: DateTime<Local>, content: MessageContent) -> Self {
        Self { timestamp, content }
    }

    /// Create a text message stamped with the current local time.
    pub fn text_now(line: impl Into<String>) -> Self {
        Self::new(Local::now(), MessageContent::Text(line.into()))
    }

    /// Create a numeric message stamped with the current local time.
    pub fn number_now(value: f64) -> Self {
        Self::new(Local::now(), MessageContent::Number(value))
    }

    /// When the message was framed.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The message payload.
    pub fn content(&self) -> &MessageContent {
        &self.content
    }
}

/// Mutually exclusive rendering modes for the message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    /// Scrolling text log.
    #[default]
    Text,
    /// Numeric line plot.
    Plot,
}

impl DisplayMode {
    /// The other display mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Text => DisplayMode::Plot,
            DisplayMode::Plot => DisplayMode::Text,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Text => f.write_str("TEXT"),
            DisplayMode::Plot => f.write_str("PLOT"),
        }
    }
}

/// Error returned when a display mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mode {0:?} (expected TEXT or PLOT)")]
pub struct InvalidDisplayMode(pub String);

impl FromStr for DisplayMode {
    type Err = InvalidDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(DisplayMode::Text)
        } else if s.eq_ignore_ascii_case("plot") {
            Ok(DisplayMode::Plot)
        } else {
            Err(InvalidDisplayMode(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_now_keeps_line_verbatim() {
        let msg = Message::text_now("hello\r\n");
        assert_eq!(msg.content(), &MessageContent::Text("hello\r\n".to_string()));
    }

    #[test]
    fn display_mode_parses_case_insensitively() {
        assert_eq!("TEXT".parse::<DisplayMode>(), Ok(DisplayMode::Text));
        assert_eq!("plot".parse::<DisplayMode>(), Ok(DisplayMode::Plot));
        assert_eq!("PlOt".parse::<DisplayMode>(), Ok(DisplayMode::Plot));
    }

    #[test]
    fn display_mode_rejects_unknown_names() {
        let err = "graph".parse::<DisplayMode>().unwrap_err();
        assert!(err.to_string().contains("graph"));
    }

    #[test]
    fn display_mode_toggles_between_both_variants() {
        assert_eq!(DisplayMode::Text.toggled(), DisplayMode::Plot);
        assert_eq!(DisplayMode::Plot.toggled(), DisplayMode::Text);
    }

    #[test]
    fn display_mode_prints_uppercase() {
        assert_eq!(DisplayMode::Text.to_string(), "TEXT");
        assert_eq!(DisplayMode::Plot.to_string(), "PLOT");
    }
}
