// SPDX-License-Identifier: MIT
//! Shell command execution with an explicit error policy.
//!
//! Callers choose what a non-zero exit code means: [`OnError::Fatal`]
//! converts it into an error the caller propagates with `?` (nothing below
//! the entry point recovers it), [`OnError::Ignore`] hands the exit code
//! back for the caller to interpret.

use anyhow::{bail, Context, Result};
use std::process::Command;

/// Policy for a non-zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Treat a non-zero exit as an error; propagation terminates the run.
    Fatal,
    /// Return the non-zero exit in [`CmdOutput`] for the caller to interpret.
    Ignore,
}

/// Outcome of a single command invocation.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub exit_code: i32,
    /// Captured stdout, empty when capture is off.
    pub stdout: String,
    /// Captured stderr, empty when capture is off.
    pub stderr: String,
}

/// Run `command` through `sh -c`.
///
/// Failing to spawn the shell at all is an error under both policies.
/// A process killed by a signal reports exit code -1.
pub fn run(command: &str, capture: bool, on_error: OnError) -> Result<CmdOutput> {
    let mut sh = Command::new("sh");
    sh.arg("-c").arg(command);

    let output = if capture {
        let out = sh
            .output()
            .with_context(|| format!("failed to run command: {command}"))?;
        CmdOutput {
            exit_code: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    } else {
        let status = sh
            .status()
            .with_context(|| format!("failed to run command: {command}"))?;
        CmdOutput {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::new(),
            stderr: String::new(),
        }
    };

    if on_error == OnError::Fatal && output.exit_code != 0 {
        bail!(
            "command failed with exit code {}: {command}",
            output.exit_code
        );
    }

    Ok(output)
}
