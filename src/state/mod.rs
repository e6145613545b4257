//! Session state.
//!
//! The message store, view flags and the session controller that mutates
//! them. Nothing here touches the terminal.

pub mod scroll;
pub mod session;
pub mod store;
pub mod view_state;

pub use scroll::InboxScroll;
pub use session::{KeyOutcome, Session, SessionConfig};
pub use store::MessageStore;
pub use view_state::{InputMode, ViewState};
