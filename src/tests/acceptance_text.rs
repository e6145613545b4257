//! Acceptance tests for the text log view.
//!
//! Test scenarios:
//! 1. Received lines show up newest first under the log title
//! 2. Hex mode adds dump lines below each message
//! 3. Timestamps replace the row numbers
//! 4. Full screen hides the status column
//! 5. Clearing empties the log

use crate::model::DisplayMode;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

// ===== Initial Screen =====

#[test]
fn empty_log_shows_title_instructions_and_status() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);

    let output = harness.render_to_string();

    assert!(output.contains("IN messages(30)"), "got:\n{output}");
    assert!(output.contains("i - enter input mode"));
    assert!(output.contains("Baud: 115200"));
    assert!(output.contains("Device: /dev/ttyFAKE0"));
    assert!(output.contains("Follow: true"));
}

// ===== Receiving =====

#[test]
fn received_lines_render_newest_first() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);

    harness.receive_lines(&["first\r\n", "second\r\n", "third\n"]);
    let output = harness.render_to_string();

    let third = output.find("[1]: third").expect("newest row");
    let second = output.find("[2]: second").expect("middle row");
    let first = output.find("[3]: first").expect("oldest row");
    assert!(third < second && second < first);
}

#[test]
fn paused_session_still_renders_already_received_lines() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    harness.receive_lines(&["kept\n"]);

    harness.send_key(KeyCode::Char('p')).unwrap();
    let output = harness.render_to_string();

    assert!(output.contains("[1]: kept"));
    assert!(output.contains("Pause: true"));
    assert!(harness.port(0).is_closed());
}

// ===== Display Toggles =====

#[test]
fn hex_mode_adds_dump_lines() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    harness.receive_lines(&["AB\n"]);

    harness.send_key(KeyCode::Char('h')).unwrap();
    let output = harness.render_to_string();

    assert!(output.contains("[1]: AB"));
    assert!(output.contains("0000-0007  41 42"), "got:\n{output}");
    assert!(output.contains("Hexmode: true"));
}

#[test]
fn timestamps_replace_row_numbers() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    harness.receive_lines(&["tick\n"]);

    harness.send_key(KeyCode::Char('s')).unwrap();
    let output = harness.render_to_string();

    assert!(!output.contains("[1]: tick"));
    assert!(output.contains("]: tick"));
    assert!(output.contains("Timestamps: true"));
}

#[test]
fn full_screen_hides_status_column() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    assert!(harness.render_to_string().contains("Baud: 115200"));

    harness.send_key(KeyCode::Char('z')).unwrap();
    let output = harness.render_to_string();

    assert!(!output.contains("Baud:"));
    assert!(output.contains("IN messages(30)"));

    harness.send_key(KeyCode::Char('z')).unwrap();
    assert!(harness.render_to_string().contains("Baud: 115200"));
}

#[test]
fn clear_empties_the_log() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    harness.receive_lines(&["one\n", "two\n"]);
    assert!(harness.render_to_string().contains("[1]: two"));

    harness.send_key(KeyCode::Char('c')).unwrap();
    let output = harness.render_to_string();

    assert!(!output.contains("two"));
    assert!(harness.session().store().is_empty());
}

// ===== Resize =====

#[test]
fn short_terminal_still_shows_newest_line() {
    let mut harness = AcceptanceTestHarness::with_size(DisplayMode::Text, 80, 14);
    let received: Vec<String> = (0..20).map(|i| format!("line {i}\n")).collect();
    let refs: Vec<&str> = received.iter().map(String::as_str).collect();
    harness.receive_lines(&refs);

    let output = harness.render_to_string();

    assert!(output.contains("[1]: line 19"));
    assert!(!output.contains("line 0\n"));
}

#[test]
fn resize_redraws_with_new_dimensions() {
    let mut harness = AcceptanceTestHarness::new(DisplayMode::Text);
    harness.receive_lines(&["hello\n"]);
    harness.render_to_string();

    harness.resize(60, 20);
    let output = harness.render_to_string();

    assert!(output.contains("[1]: hello"));
    assert!(output.lines().all(|line| line.chars().count() <= 60));
}
