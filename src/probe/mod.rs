// SPDX-License-Identifier: MIT
//! System probes — the seam between check logic and the OS.
//!
//! Everything the checks need from the environment sits behind the
//! [`SystemProbe`] trait: hostname resolution, kernel memory statistics,
//! filesystem capacity, and URL reachability. The production
//! implementation is [`OsProbe`]; tests supply a fake.

pub mod os;

pub use os::OsProbe;

use async_trait::async_trait;
use std::path::Path;

/// Kernel memory statistics, in kibibytes as reported by `/proc/meminfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    /// The kernel's own availability estimate. Absent on kernels older
    /// than 3.14.
    pub mem_available_kib: Option<u64>,
    pub mem_free_kib: u64,
    pub cached_kib: u64,
}

impl MemoryStats {
    /// Available memory in KiB: `MemAvailable` when the kernel reports it,
    /// `MemFree + Cached` otherwise.
    pub fn available_kib(&self) -> u64 {
        self.mem_available_kib
            .unwrap_or(self.mem_free_kib + self.cached_kib)
    }

    /// Available memory in megabytes.
    pub fn available_mb(&self) -> f64 {
        self.available_kib() as f64 / 1024.0
    }
}

/// Filesystem capacity available to an unprivileged user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    /// Free space in 1-MiB units.
    pub free_mb: u64,
    /// Free inode count.
    pub free_inodes: u64,
}

/// A collector-local failure.
///
/// The orchestrator inspects these, reports a generic failure, and keeps
/// going with a sentinel measurement of 0 — a broken collector must read
/// as an insufficient resource, never as a crash.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("field {0} missing from memory statistics")]
    MissingField(&'static str),
    #[error("unparsable value for {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
    #[error("platform does not support this probe")]
    Unsupported,
}

/// OS access used by the checks.
#[async_trait]
pub trait SystemProbe: Send + Sync {
    /// Fully-qualified host name, used for the failure banner.
    ///
    /// The one probe with no tolerated failure mode: an error propagates
    /// and terminates the run.
    fn hostname(&self) -> anyhow::Result<String>;

    /// Current kernel memory statistics.
    fn memory_stats(&self) -> Result<MemoryStats, ProbeError>;

    /// Capacity of the filesystem containing `path`.
    fn disk_stats(&self, path: &Path) -> Result<DiskStats, ProbeError>;

    /// Whether `url` answers with a success status.
    async fn url_reachable(&self, url: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_prefers_mem_available() {
        let stats = MemoryStats {
            mem_available_kib: Some(2048),
            mem_free_kib: 100,
            cached_kib: 100,
        };
        assert_eq!(stats.available_kib(), 2048);
        assert_eq!(stats.available_mb(), 2.0);
    }

    #[test]
    fn test_available_falls_back_to_free_plus_cached() {
        let stats = MemoryStats {
            mem_available_kib: None,
            mem_free_kib: 100_000,
            cached_kib: 50_000,
        };
        assert_eq!(stats.available_kib(), 150_000);
        assert!((stats.available_mb() - 146.484_375).abs() < 1e-9);
    }
}
