//! Binary persistence for the index.
//!
//! One bincode blob under `<root>/.symdex/index.bin`. Embeddings
//! round-trip as fixed-width f32 arrays, bit-exact. `load` never errors:
//! a missing, unreadable, corrupt, or version-mismatched artifact yields
//! `None` and the caller rebuilds from source.

use std::path::{Path, PathBuf};
use symdex_core::{SymdexError, FORMAT_VERSION};

use crate::index::CodeIndex;
use crate::lock::LockGuard;

/// Directory under the project root holding the artifact and its lock.
pub const INDEX_DIR: &str = ".symdex";

/// Artifact file name.
pub const INDEX_FILE: &str = "index.bin";

/// Where the artifact for a project root lives.
pub fn artifact_path(root: &Path) -> PathBuf {
    root.join(INDEX_DIR).join(INDEX_FILE)
}

/// Persist the index for `root`, holding the advisory lock for the write.
///
/// Writes to a scratch file and renames it over the artifact, so a reader
/// never observes a half-written blob.
pub fn save(index: &CodeIndex, root: &Path) -> Result<(), SymdexError> {
    let dir = root.join(INDEX_DIR);
    let _guard = LockGuard::acquire(&dir)?;

    let bytes = bincode::serialize(index).map_err(|e| SymdexError::Persist(e.to_string()))?;

    let artifact = dir.join(INDEX_FILE);
    let scratch = dir.join(format!("{INDEX_FILE}.tmp"));
    std::fs::write(&scratch, &bytes)?;
    std::fs::rename(&scratch, &artifact)?;

    tracing::debug!("Saved index ({} bytes) to {}", bytes.len(), artifact.display());
    Ok(())
}

/// Load the persisted index for `root`, or `None` if there is nothing
/// usable on disk. Reads lock-free.
pub fn load(root: &Path) -> Option<CodeIndex> {
    let artifact = artifact_path(root);
    let bytes = match std::fs::read(&artifact) {
        Ok(b) => b,
        Err(err) => {
            tracing::debug!("No index at {}: {}", artifact.display(), err);
            return None;
        }
    };

    let index: CodeIndex = match bincode::deserialize(&bytes) {
        Ok(i) => i,
        Err(err) => {
            tracing::warn!("Discarding corrupt index at {}: {}", artifact.display(), err);
            return None;
        }
    };

    if index.metadata.format_version != FORMAT_VERSION {
        tracing::warn!(
            "Discarding index with format version {} (expected {})",
            index.metadata.format_version,
            FORMAT_VERSION,
        );
        return None;
    }

    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_missing_artifact_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path()).is_none());
    }

    #[test]
    fn load_corrupt_artifact_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_path(dir.path());
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, b"not a bincode blob").unwrap();
        assert!(load(dir.path()).is_none());
    }

    #[test]
    fn load_rejects_other_format_versions() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = CodeIndex::new();
        index.metadata.format_version = FORMAT_VERSION + 1;
        save(&index, dir.path()).unwrap();
        assert!(load(dir.path()).is_none());
    }

    #[test]
    fn save_releases_lock() {
        let dir = tempfile::tempdir().unwrap();
        let index = CodeIndex::new();
        save(&index, dir.path()).unwrap();
        save(&index, dir.path()).unwrap();
        assert!(!dir.path().join(INDEX_DIR).join("index.lock").exists());
    }
}
