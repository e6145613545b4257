//! Domain model types (pure).

pub mod error;
pub mod key_action;
pub mod message;

// Re-export for convenience
pub use error::{AppError, SerialError, StartupError};
pub use key_action::KeyAction;
pub use message::{DisplayMode, InvalidDisplayMode, Message, MessageContent};
