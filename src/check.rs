// SPDX-License-Identifier: MIT
//! Threshold evaluation and check orchestration.
//!
//! [`run_checks`] runs the fixed sequence memory → disk space → inodes →
//! URLs, each exactly once, with no early exit. Collector failures are
//! reported and replaced by a sentinel measurement of 0 so the threshold
//! check still fires downstream.

use crate::config::CheckConfig;
use crate::probe::{DiskStats, ProbeError, SystemProbe};
use crate::report::ErrorReporter;
use anyhow::Result;
use tracing::info;

/// Compare a measurement against its configured minimum.
///
/// Equal-to-minimum counts as sufficient. A pass logs at info level; a
/// shortfall goes through the reporter.
pub fn check_enough(
    reporter: &mut ErrorReporter<'_>,
    measured: f64,
    minimum: u64,
    what: &str,
) -> Result<()> {
    if measured < minimum as f64 {
        reporter.report(format!(
            "Only {} {what} available, required at least {minimum}",
            format_amount(measured)
        ))?;
    } else {
        info!("{} {what} available, that is enough", format_amount(measured));
    }
    Ok(())
}

/// Render a measurement: integral values without decimals, fractional ones
/// with two (150000 KiB of memory reads as "146.48" MB, not "146.484375").
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Report a collector failure and its diagnostic detail, then fall back to
/// the sentinel so evaluation continues.
fn report_collector_failure(
    reporter: &mut ErrorReporter<'_>,
    msg: &str,
    err: &ProbeError,
) -> Result<()> {
    reporter.report(msg)?;
    eprintln!("{err:#}\n");
    Ok(())
}

/// Run every check once, in fixed order.
pub async fn run_checks(
    config: &CheckConfig,
    probe: &dyn SystemProbe,
    reporter: &mut ErrorReporter<'_>,
) -> Result<()> {
    let memory_mb = match probe.memory_stats() {
        Ok(stats) => stats.available_mb(),
        Err(e) => {
            report_collector_failure(
                reporter,
                "Could not get amount of free memory available",
                &e,
            )?;
            0.0
        }
    };
    check_enough(reporter, memory_mb, config.min_memory_mb, "MB of free memory")?;

    let disk = match probe.disk_stats(&config.disk_path) {
        Ok(stats) => stats,
        Err(e) => {
            report_collector_failure(
                reporter,
                "Could not get amount of free diskspace available",
                &e,
            )?;
            DiskStats {
                free_mb: 0,
                free_inodes: 0,
            }
        }
    };
    check_enough(reporter, disk.free_mb as f64, config.min_disk_mb, "MB of diskspace")?;
    check_enough(
        reporter,
        disk.free_inodes as f64,
        config.min_inodes,
        "number of inodes",
    )?;

    for url in &config.urls {
        if probe.url_reachable(url).await {
            info!("URL {url} is accessible");
        } else {
            reporter.report(format!("URL {url} is not accessible"))?;
        }
    }

    Ok(())
}
