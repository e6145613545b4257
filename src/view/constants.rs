//! Layout dimensions and fixed texts for the terminal UI.

/// Message rows the text log is sized for.
pub const LIST_VISIBLE_ROWS: u16 = 30;

/// Height of one bordered single-line paragraph.
pub const PARAGRAPH_HEIGHT: u16 = 3;

/// Height of the input / instructions paragraph.
pub const INPUT_HEIGHT: u16 = 2 * PARAGRAPH_HEIGHT;

/// Width share of the message area when the status column is shown.
pub const MAIN_WIDTH_PERCENT: u16 = 75;

/// Prefix shown before the input buffer.
pub const INPUT_PREFIX: &str = ">> ";

/// Key help shown under the text log.
pub const TEXT_INSTRUCTIONS: &str = "i - enter input mode; h - hex mode; c - clear messages; \
s - print timestamps; j - scroll down; k - scroll up; t - scroll to top; b - scroll to bottom; \
f - enter/exit follow mode, p - pause/unpause; m - change mode; z - zoom in/out; ESC - exit";

/// Key help shown under the plot.
pub const PLOT_INSTRUCTIONS: &str = "i - enter input mode; c - clear messages; p - pause/unpause; \
m - change mode; z - zoom in/out; ESC - exit";

/// Title of the plot block.
pub const PLOT_TITLE: &str = "IN";
