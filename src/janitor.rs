//! Best-effort cleanup of cached artifacts and scratch files.
//!
//! The janitor bounds disk use by clearing the scratch directory and stale
//! cache entries before and after model load and after each summarize
//! request. Every failure is logged and swallowed: a sweep must succeed as
//! a no-op when directories are absent, unreadable, or unwritable, and it
//! must be safe to run repeatedly and concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// What one sweep reclaimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub entries_removed: usize,
    pub bytes_reclaimed: u64,
}

#[derive(Debug, Clone)]
pub struct Janitor {
    cache_dir: PathBuf,
    temp_dir: PathBuf,
}

impl Janitor {
    #[must_use]
    pub fn new(cache_dir: &Path, temp_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            temp_dir: temp_dir.to_path_buf(),
        }
    }

    /// Remove the contents of the cache and scratch directories.
    ///
    /// Never errors and never panics; problems are logged at `warn` and the
    /// sweep moves on to the next entry.
    pub fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();
        clear_dir(&self.cache_dir, &mut report);
        clear_dir(&self.temp_dir, &mut report);

        debug!(
            entries_removed = report.entries_removed,
            bytes_reclaimed = report.bytes_reclaimed,
            "Workspace sweep finished"
        );
        report
    }
}

fn clear_dir(dir: &Path, report: &mut SweepReport) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to read directory entry");
                continue;
            }
        };

        let path = entry.path();
        let size = entry_size(&path);
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match removed {
            Ok(()) => {
                report.entries_removed += 1;
                report.bytes_reclaimed += size;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove entry");
            }
        }
    }
}

fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        fs::read_dir(path)
            .map(|entries| {
                entries
                    .flatten()
                    .map(|entry| entry_size(&entry.path()))
                    .sum()
            })
            .unwrap_or(0)
    } else {
        fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }
}
