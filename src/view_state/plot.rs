//! Numeric series for the plot.

use crate::model::MessageContent;
use crate::state::MessageStore;
use crate::view_state::text::trim_line_ending;

/// Numeric value of one message, if it has one.
///
/// Text is parsed after trimming its line ending. Unparsable and
/// non-finite values yield `None`.
pub fn point_value(content: &MessageContent) -> Option<f64> {
    let value = match content {
        MessageContent::Number(value) => *value,
        MessageContent::Text(line) => trim_line_ending(line).parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Build the plot series, oldest first.
///
/// Looks at the newest `max_points` messages only. Messages in that window
/// without a numeric value are skipped, so the series may be shorter than
/// requested but never contains filler values or older messages.
pub fn plot_points(store: &MessageStore, max_points: usize) -> Vec<f64> {
    let mut points: Vec<f64> = store
        .iter()
        .take(max_points)
        .filter_map(|message| point_value(message.content()))
        .collect();
    points.reverse();
    points
}
