//! Command execution for shell-backed stores.

use crate::{CredfetchError, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Executes a command and returns stdout as a string.
///
/// # Arguments
///
/// - `program`: Command to execute (e.g., "powershell.exe", "pwsh")
/// - `args`: Command arguments
///
/// # Errors
///
/// - [`CredfetchError::DependencyMissing`] if the program cannot be found
/// - [`CredfetchError::CommandFailed`] if the exit code is non-zero, carrying
///   the program's stderr
/// - [`CredfetchError::Other`] if stdout is not valid UTF-8
pub async fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CredfetchError::DependencyMissing(format!("{} command not found", program))
            } else {
                CredfetchError::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CredfetchError::CommandFailed(format!(
            "{} failed with exit code {}: {}",
            program,
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| {
        CredfetchError::Other(anyhow::anyhow!("Invalid UTF-8 in command output: {}", e))
    })
}

/// Runs a PowerShell script without loading the user profile.
pub async fn run_powershell(program: &str, script: &str) -> Result<String> {
    run_command(
        program,
        &["-NoProfile", "-NonInteractive", "-Command", script],
    )
    .await
    .map(|out| out.trim().to_string())
}
