//! Advisory file lock for the persisted artifact.
//!
//! A writer creates `index.lock` beside the artifact with `create_new`,
//! retrying with exponential backoff while another writer holds it. A lock
//! file older than the staleness window is assumed to belong to a dead
//! process and is taken over. The guard removes the lock file on drop.

use std::path::{Path, PathBuf};
use std::time::Duration;
use symdex_core::SymdexError;

const LOCK_FILE: &str = "index.lock";
const MAX_ATTEMPTS: u32 = 6;
const BASE_DELAY_MS: u64 = 25;
const STALE_AFTER: Duration = Duration::from_secs(30);

/// Held for the duration of a write to the artifact directory.
pub struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    /// Acquire the lock in `dir`, creating the directory if needed.
    pub fn acquire(dir: &Path) -> Result<Self, SymdexError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(LOCK_FILE);

        for attempt in 0..MAX_ATTEMPTS {
            match std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(_) => {
                    tracing::debug!("Acquired lock {}", path.display());
                    return Ok(Self { path });
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                    if lock_is_stale(&path) {
                        tracing::warn!("Taking over stale lock {}", path.display());
                        let _ = std::fs::remove_file(&path);
                        continue;
                    }
                    let delay = Duration::from_millis(BASE_DELAY_MS << attempt);
                    std::thread::sleep(delay);
                }
                Err(err) => return Err(SymdexError::Lock(err.to_string())),
            }
        }

        Err(SymdexError::Lock(format!(
            "Could not acquire {} after {} attempts",
            path.display(),
            MAX_ATTEMPTS
        )))
    }
}

fn lock_is_stale(path: &Path) -> bool {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|mtime| mtime.elapsed().ok())
        .is_some_and(|age| age > STALE_AFTER)
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
