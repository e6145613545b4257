//! Serial Monitor - Entry Point

use clap::Parser;
use serial_monitor::config::{self, CliOverrides, ResolvedConfig};
use serial_monitor::model::{AppError, DisplayMode, SerialError};
use serial_monitor::source::{choose_port, PortSettings, SerialDriver, SystemSerial};
use serial_monitor::state::SessionConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Serial Monitor - watch a serial port as a text log or a live plot
#[derive(Parser, Debug)]
#[command(name = "serial-monitor")]
#[command(version)]
#[command(about = "TUI for reading from and writing to a serial port")]
pub struct Args {
    /// Baud rate
    #[arg(long)]
    pub baud: Option<u32>,

    /// Read timeout in milliseconds
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Display mode at startup
    #[arg(long, value_enum, ignore_case = true)]
    pub mode: Option<DisplayMode>,

    /// Write diagnostics to the log file
    #[arg(long)]
    pub logs: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags the user actually gave, in override form.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            baud: self.baud,
            read_timeout_ms: self.read_timeout_ms,
            mode: self.mode,
            logs: self.logs.then_some(true),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("serial-monitor: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let (config, rejected) = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let (with_env, rejected) = config::apply_env_overrides(merged);
        (config::apply_cli_overrides(with_env, args.overrides()), rejected)
    };
    config::validate(&config)?;

    if config.logs_enabled {
        serial_monitor::logging::init(&config.log_file_path)?;
        println!("Logs will be written to {}", config.log_file_path.display());
    }

    // Only now is there a subscriber to receive these.
    for ignored in &rejected {
        ignored.log();
    }

    info!(config = ?config, "Configuration loaded and resolved");

    let driver = SystemSerial;
    let ports = driver.list_ports()?;
    if ports.is_empty() {
        return Err(SerialError::NoPorts.into());
    }

    let port_name = {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        choose_port(&ports, stdin.lock(), stdout.lock())?
    };

    let queue_capacity = config.queue_capacity;
    serial_monitor::view::run_with_session(
        Box::new(driver),
        session_config(port_name, &config),
        queue_capacity,
    )?;

    Ok(())
}

fn session_config(port_name: String, config: &ResolvedConfig) -> SessionConfig {
    SessionConfig {
        port_name,
        settings: PortSettings {
            baud: config.baud,
            read_timeout: config.read_timeout(),
        },
        display_mode: config.mode,
        logs_enabled: config.logs_enabled,
        message_capacity: config.message_capacity,
        plot_points: config.plot_points,
    }
}
