//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive a `TuiApp<TestBackend>` over fake
//! serial ports and check what the user would see on screen.

mod acceptance_text;
