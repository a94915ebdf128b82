//! Resource guard: free-space pre-flight and buffer release.
//!
//! The orchestrator calls [`check_disk_space`] before triggering a capture.
//! A failure to *query* free space never blocks a capture: the guard answers
//! "enough space" and logs the problem.

use std::path::{Path, PathBuf};
use sysinfo::Disks;
use thiserror::Error;

/// Default free-space floor, in MiB.
pub const DEFAULT_MIN_FREE_MB: u64 = 50;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Error, Debug)]
pub enum DiskQueryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No mounted filesystem contains {0}")]
    NoFilesystem(PathBuf),
}

/// Source of free-space figures.
pub trait SpaceProbe {
    /// Bytes available to unprivileged writers on the filesystem holding `path`.
    fn available_bytes(&self, path: &Path) -> Result<u64, DiskQueryError>;
}

/// Reads mounted filesystems through `sysinfo`.
///
/// The filesystem holding a path is the mount point that is its longest prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SpaceProbe for SystemProbe {
    fn available_bytes(&self, path: &Path) -> Result<u64, DiskQueryError> {
        let path = path.canonicalize()?;
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .map(|disk| disk.available_space())
            .ok_or(DiskQueryError::NoFilesystem(path))
    }
}

/// Whether strictly more than `min_free_mb` MiB are free where `path` lives.
///
/// Returns `true` when the probe fails.
pub fn has_sufficient_space(probe: &impl SpaceProbe, path: &Path, min_free_mb: u64) -> bool {
    match probe.available_bytes(path) {
        Ok(bytes) => {
            let free_mb = bytes as f64 / BYTES_PER_MB;
            let ok = free_mb > min_free_mb as f64;
            if ok {
                tracing::debug!(path = %path.display(), free_mb, min_free_mb, "disk space ok");
            } else {
                tracing::warn!(path = %path.display(), free_mb, min_free_mb, "disk space low");
            }
            ok
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "disk query failed, assuming space");
            true
        }
    }
}

/// [`has_sufficient_space`] against the real mounted filesystems.
pub fn check_disk_space(path: &Path, min_free_mb: u64) -> bool {
    has_sufficient_space(&SystemProbe, path, min_free_mb)
}

/// Marks the end of one filter call's buffer lifetime.
///
/// Every buffer is owned by the stage that made it and is freed when that
/// stage returns, so there is nothing to reclaim here. Kept as the explicit
/// post-transform hook the orchestrator and the pipeline call.
pub fn release_hint() {
    tracing::trace!("filter buffers released");
}
