//! Configuration module.
//!
//! Resolution order: defaults → config file → environment → CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, load_config_file,
    load_config_with_precedence, merge_config, validate, CliOverrides, ConfigError, ConfigFile,
    RejectedOverride, ResolvedConfig,
};

/// Maximum number of messages kept in the message store.
pub const MAX_MSG_CAPACITY: usize = 10_000;

/// Maximum number of points handed to the plot.
pub const MAX_POINT_CAPACITY: usize = 200;

/// Capacity of the queue between the serial reader and the event loop.
pub const MSG_BUFF_SIZE: usize = 1_000;

/// Largest chunk requested from the driver in one read.
pub const READ_CHUNK_SIZE: usize = 512;

/// Default baud rate.
pub const DEFAULT_BAUD: u32 = 9600;

/// Default driver read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10;

/// Log file written when logging is enabled.
pub const DEFAULT_LOG_FILE: &str = "serial_monitor_logs.log";
