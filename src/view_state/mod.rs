//! Render transforms.
//!
//! Pure functions from a message store snapshot and view flags to the rows
//! and points the renderer draws. No terminal access and no hidden state.
//!
//! - `text`: text log rows (`[n]:` or timestamp prefix)
//! - `hex`: hex dump lines appended below text rows
//! - `plot`: numeric series, oldest first

pub mod hex;
pub mod plot;
pub mod text;

pub use hex::hex_lines;
pub use plot::{plot_points, point_value};
pub use text::{text_rows, trim_line_ending};
