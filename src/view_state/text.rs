//! Text log rows.

use crate::model::{Message, MessageContent};
use crate::state::MessageStore;
use crate::view_state::hex::hex_lines;

/// Arrival time format used when timestamps are shown.
pub const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Build the rows of the text log.
///
/// Rows are newest first, at most `max_rows` messages. Each message becomes
/// one row `"<prefix> <content>"`, where the prefix is `[n]:` (1-based, per
/// message) or `[HH:MM:SS.ffffff]:` and text content has trailing `\r`/`\n`
/// removed. With `hex` set, the hex dump of the trimmed text follows its
/// row. Numbers render with six decimals and never get a hex dump.
pub fn text_rows(
    store: &MessageStore,
    max_rows: usize,
    print_timestamps: bool,
    hex: bool,
) -> Vec<String> {
    let mut rows = Vec::with_capacity(store.len().min(max_rows));

    for (i, message) in store.iter().take(max_rows).enumerate() {
        let prefix = row_prefix(message, i + 1, print_timestamps);
        match message.content() {
            MessageContent::Text(line) => {
                let trimmed = trim_line_ending(line);
                rows.push(format!("{} {}", prefix, trimmed));
                if hex {
                    rows.extend(hex_lines(trimmed.as_bytes()));
                }
            }
            MessageContent::Number(value) => {
                rows.push(format!("{} {:.6}", prefix, value));
            }
        }
    }

    rows
}

fn row_prefix(message: &Message, index: usize, print_timestamps: bool) -> String {
    if print_timestamps {
        format!("[{}]:", message.timestamp().format(TIME_FORMAT))
    } else {
        format!("[{}]:", index)
    }
}

/// Strip any trailing `\r` and `\n` characters.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
