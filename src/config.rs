// SPDX-License-Identifier: MIT
//! Check configuration — built once from CLI arguments, read-only after.

use std::path::PathBuf;

pub const DEFAULT_MIN_RAM_MB: u64 = 1000;
pub const DEFAULT_MIN_DISK_MB: u64 = 5000;
pub const DEFAULT_MIN_INODES: u64 = 20000;

/// Thresholds and targets for a single run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Minimum available memory in megabytes.
    pub min_memory_mb: u64,
    /// Filesystem path whose disk space and inodes are checked.
    pub disk_path: PathBuf,
    /// Minimum free disk space in megabytes (1-MiB units).
    pub min_disk_mb: u64,
    /// Minimum free inode count.
    pub min_inodes: u64,
    /// URLs to probe for reachability, in order.
    pub urls: Vec<String>,
}
