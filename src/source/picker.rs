//! Interactive port selection at startup.

use crate::model::StartupError;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Print the available ports and read a 1-based choice.
///
/// Ports are listed sorted by name. Generic over the input and output
/// streams so the prompt can be driven from tests.
///
/// # Errors
///
/// - `StartupError::ReadSelection` if the input cannot be read or is closed
/// - `StartupError::NotANumber` if the answer is not an integer
/// - `StartupError::OutOfRange` if the answer is not in `1..=ports.len()`
pub fn choose_port<R: BufRead, W: Write>(
    ports: &[String],
    mut input: R,
    mut output: W,
) -> Result<String, StartupError> {
    let mut sorted = ports.to_vec();
    sorted.sort();

    writeln!(
        output,
        "Choose one of given ports (type in number 1-{}):",
        sorted.len()
    )?;
    for (i, port) in sorted.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, port)?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    let answer = line.trim();
    let choice: i64 = answer
        .parse()
        .map_err(|_| StartupError::NotANumber(answer.to_string()))?;

    let index = usize::try_from(choice)
        .ok()
        .and_then(|c| c.checked_sub(1))
        .filter(|&i| i < sorted.len())
        .ok_or(StartupError::OutOfRange {
            choice,
            max: sorted.len(),
        })?;

    let chosen = sorted.swap_remove(index);
    info!(port = %chosen, "Chosen port");
    Ok(chosen)
}
