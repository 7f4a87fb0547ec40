// SPDX-License-Identifier: MIT
//! Error reporter — the terminal sink for all check failures.
//!
//! Failures accumulate in order; the entry point reads the final count to
//! pick the exit code. On the first failure of a run the reporter resolves
//! the host name and writes a banner to stderr, before the failure body.

use crate::probe::SystemProbe;
use anyhow::{Context, Result};

/// Accumulates failure messages and writes them to stderr.
pub struct ErrorReporter<'a> {
    probe: &'a dyn SystemProbe,
    failures: Vec<String>,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(probe: &'a dyn SystemProbe) -> Self {
        Self {
            probe,
            failures: Vec::new(),
        }
    }

    /// Record a failed check.
    ///
    /// Emits the host banner exactly once per run, when the failure count
    /// transitions 0 → 1. Hostname resolution uses the fatal command
    /// policy: if even that fails, the error propagates and ends the run.
    pub fn report(&mut self, msg: impl Into<String>) -> Result<()> {
        let msg = msg.into();
        if self.failures.is_empty() {
            let host = self
                .probe
                .hostname()
                .context("could not resolve hostname for the failure banner")?;
            eprintln!("==> syscheck on {host} failed! <==\n");
        }
        eprintln!("{msg}\n");
        self.failures.push(msg);
        Ok(())
    }

    /// Number of failures recorded so far. Monotonically increasing.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Recorded failure messages, in report order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
