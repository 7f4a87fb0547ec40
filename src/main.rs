// SPDX-License-Identifier: MIT
//! syscheck binary — parse flags, run the checks, set the exit code.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use syscheck::{config, run_checks, CheckConfig, ErrorReporter, OsProbe};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "syscheck",
    about = "Host health check — memory, disk space, inodes, and URL reachability",
    version
)]
struct Args {
    /// Check that URL is accessible. May be given multiple times.
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Minimal RAM required, in MB.
    #[arg(long = "minRAM", value_name = "N", default_value_t = config::DEFAULT_MIN_RAM_MB)]
    min_ram: u64,

    /// Minimal disk capacity required, in MB.
    #[arg(long = "minDisk", value_name = "N", default_value_t = config::DEFAULT_MIN_DISK_MB)]
    min_disk: u64,

    /// Minimal number of free inodes required.
    #[arg(long = "minInodes", value_name = "N", default_value_t = config::DEFAULT_MIN_INODES)]
    min_inodes: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Init once — must happen before any tracing calls.
    setup_logging(&args.log);

    info!("New syscheck run ...");

    let config = CheckConfig {
        min_memory_mb: args.min_ram,
        disk_path: PathBuf::from("/"),
        min_disk_mb: args.min_disk,
        min_inodes: args.min_inodes,
        urls: args.urls,
    };

    let probe = OsProbe::new()?;
    let mut reporter = ErrorReporter::new(&probe);
    run_checks(&config, &probe, &mut reporter).await?;

    let failed = reporter.failure_count();
    if failed > 0 {
        eprintln!("ERROR: {failed} check(s) FAILED!");
        info!(failed, "syscheck run finished with errors");
        std::process::exit(1);
    }

    info!("syscheck run finished without errors");
    Ok(())
}

/// Initialize the tracing subscriber. Pass messages go to stdout; failure
/// reporting writes to stderr directly.
fn setup_logging(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .compact()
        .init();
}
