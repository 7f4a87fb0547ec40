// SPDX-License-Identifier: MIT
//! Production [`SystemProbe`] backed by the real operating system.

use crate::cmd::{self, OnError};
use crate::probe::{DiskStats, MemoryStats, ProbeError, SystemProbe};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Probes the local machine: `/proc/meminfo`, `statvfs(3)`, `hostname -f`,
/// and HTTP GETs for reachability.
pub struct OsProbe {
    client: reqwest::Client,
}

impl OsProbe {
    /// Build the probe and its HTTP client.
    ///
    /// Certificate validation is disabled so a URL behind a self-signed or
    /// expired certificate still counts as reachable. No request timeout is
    /// configured; a hung server hangs the run.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SystemProbe for OsProbe {
    fn hostname(&self) -> Result<String> {
        let out = cmd::run("hostname -f", true, OnError::Fatal)?;
        Ok(out.stdout.trim().to_string())
    }

    fn memory_stats(&self) -> Result<MemoryStats, ProbeError> {
        let raw = std::fs::read_to_string(MEMINFO_PATH)?;
        parse_meminfo(&raw)
    }

    fn disk_stats(&self, path: &Path) -> Result<DiskStats, ProbeError> {
        statvfs_stats(path)
    }

    async fn url_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Parse the `MemAvailable`, `MemFree`, and `Cached` fields out of
/// `/proc/meminfo` content.
///
/// `MemAvailable` is optional; the other two are required so the fallback
/// sum is always computable. Values are in kibibytes (the `kB` suffix is
/// ignored). `Cached` matches only the exact field, not `SwapCached`.
pub fn parse_meminfo(raw: &str) -> Result<MemoryStats, ProbeError> {
    let mut mem_available = None;
    let mut mem_free = None;
    let mut cached = None;

    for line in raw.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let (field, slot) = match name.trim() {
            "MemAvailable" => ("MemAvailable", &mut mem_available),
            "MemFree" => ("MemFree", &mut mem_free),
            "Cached" => ("Cached", &mut cached),
            _ => continue,
        };
        let value = rest.trim().split_whitespace().next().unwrap_or("");
        let kib = value.parse::<u64>().map_err(|_| ProbeError::Malformed {
            field,
            value: value.to_string(),
        })?;
        *slot = Some(kib);
    }

    Ok(MemoryStats {
        mem_available_kib: mem_available,
        mem_free_kib: mem_free.ok_or(ProbeError::MissingField("MemFree"))?,
        cached_kib: cached.ok_or(ProbeError::MissingField("Cached"))?,
    })
}

/// Free space and inodes on the filesystem containing `path`, as available
/// to an unprivileged user (`f_bavail` / `f_favail` — the same numbers the
/// `df -P` "Available" columns show).
#[cfg(unix)]
fn statvfs_stats(path: &Path) -> Result<DiskStats, ProbeError> {
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|_| ProbeError::Io(std::io::Error::from(std::io::ErrorKind::InvalidInput)))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::statvfs(path_cstr.as_ptr(), &mut stat) };
    if ret != 0 {
        return Err(ProbeError::Io(std::io::Error::last_os_error()));
    }

    let free_bytes = stat.f_bavail as u64 * stat.f_frsize as u64;
    Ok(DiskStats {
        free_mb: free_bytes / (1024 * 1024),
        free_inodes: stat.f_favail as u64,
    })
}

#[cfg(not(unix))]
fn statvfs_stats(_path: &Path) -> Result<DiskStats, ProbeError> {
    Err(ProbeError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO_MODERN: &str = "\
MemTotal:        16262240 kB
MemFree:          8132120 kB
MemAvailable:    12582912 kB
Buffers:           204800 kB
Cached:           3145728 kB
SwapCached:             0 kB
";

    const MEMINFO_PRE_3_14: &str = "\
MemTotal:        16262240 kB
MemFree:           100000 kB
Buffers:           204800 kB
Cached:             50000 kB
SwapCached:         12345 kB
";

    #[test]
    fn test_parse_modern_meminfo() {
        let stats = parse_meminfo(MEMINFO_MODERN).unwrap();
        assert_eq!(stats.mem_available_kib, Some(12_582_912));
        assert_eq!(stats.available_mb(), 12288.0);
    }

    #[test]
    fn test_parse_without_mem_available_sums_free_and_cached() {
        let stats = parse_meminfo(MEMINFO_PRE_3_14).unwrap();
        assert_eq!(stats.mem_available_kib, None);
        assert_eq!(stats.available_kib(), 150_000);
        // SwapCached must not be mistaken for Cached.
        assert_eq!(stats.cached_kib, 50_000);
    }

    #[test]
    fn test_parse_missing_required_field() {
        let err = parse_meminfo("MemFree: 100 kB\n").unwrap_err();
        assert!(matches!(err, ProbeError::MissingField("Cached")));
    }

    #[test]
    fn test_parse_malformed_value() {
        let err = parse_meminfo("MemFree: lots kB\nCached: 1 kB\n").unwrap_err();
        assert!(matches!(
            err,
            ProbeError::Malformed { field: "MemFree", .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_on_root() {
        let stats = statvfs_stats(Path::new("/")).unwrap();
        // Any live filesystem has some inodes; free space may be 0 on a
        // full disk, so only sanity-check the inode count arithmetic.
        assert!(stats.free_inodes < u64::MAX);
    }
}
