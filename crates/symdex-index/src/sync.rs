//! Incremental reconciliation of an index against the tree it was built
//! from.
//!
//! Change detection is three-way: files the index knows that are gone from
//! disk, scanned files the index has never seen, and known files whose
//! mtime is newer than the last index timestamp. An mtime bump alone does
//! not force a re-parse; the stored content hash is compared first so a
//! `touch` without an edit is a no-op.
//!
//! Apply order per changed file is purge first, then re-parse. A re-parse
//! that fails leaves the file with zero entries until the next successful
//! pass; the index never keeps stale symbols for a file known to have
//! changed.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use symdex_core::{EmbeddingProvider, SymdexError};
use symdex_parsers::ParserRegistry;

use crate::builder::{content_hash, index_file};
use crate::index::CodeIndex;
use crate::scanner;

/// Summary of one sync pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// New files indexed.
    pub added: usize,
    /// Previously indexed files re-parsed after a content change.
    pub modified: usize,
    /// Files removed from the index because they left the disk.
    pub deleted: usize,
    /// Changed files whose re-parse failed; they remain purged.
    pub failed: usize,
}

impl SyncReport {
    /// Whether the pass changed the index at all.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.modified == 0 && self.deleted == 0 && self.failed == 0
    }
}

/// Reconcile `index` with the current state of `root`.
///
/// Files are processed sequentially in scan order; each file's update is
/// self-contained, so an interrupted pass leaves a consistent index.
pub fn sync(
    index: &mut CodeIndex,
    root: &Path,
    provider: &dyn EmbeddingProvider,
) -> Result<SyncReport, SymdexError> {
    let registry = ParserRegistry::new();
    let mut report = SyncReport::default();

    // Step 1: tracked files that no longer exist on disk.
    let mut deletions: BTreeSet<String> = BTreeSet::new();
    for file in index.tracked_files() {
        if !Path::new(file).exists() {
            deletions.insert(file.to_string());
        }
    }

    // Steps 2 and 3: re-scan for additions, stat known files for changes.
    let scanned = scanner::scan(root)?;
    let mut additions: Vec<PathBuf> = Vec::new();
    let mut modifications: Vec<PathBuf> = Vec::new();
    for path in scanned {
        let path_str = path.to_string_lossy().to_string();
        if !index.contains_file(&path_str) {
            additions.push(path);
            continue;
        }
        match modified_since(&path, index.metadata.indexed_at) {
            Ok(true) => {
                // Confirm the content actually changed before purging.
                match std::fs::read_to_string(&path) {
                    Ok(text) => {
                        if index.file_hashes.get(&path_str) != Some(&content_hash(&text)) {
                            modifications.push(path);
                        }
                    }
                    Err(_) => modifications.push(path),
                }
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!("Failed to stat {}: {}", path.display(), err);
                report.failed += 1;
            }
        }
    }

    // Step 4: apply. Purge precedes re-parse in every case.
    for file in &deletions {
        index.remove_file(file);
        report.deleted += 1;
    }
    for path in additions {
        match index_file(index, &registry, provider, &path) {
            Ok(_) => report.added += 1,
            Err(err) => {
                tracing::warn!("Failed to index new file {}: {}", path.display(), err);
                report.failed += 1;
            }
        }
    }
    for path in modifications {
        let path_str = path.to_string_lossy().to_string();
        index.remove_file(&path_str);
        match index_file(index, &registry, provider, &path) {
            Ok(_) => report.modified += 1,
            Err(err) => {
                tracing::warn!("Failed to re-index {}: {}", path.display(), err);
                report.failed += 1;
            }
        }
    }

    index.recompute_metadata();

    if report.is_noop() {
        tracing::debug!("Sync of {}: no changes", root.display());
    } else {
        tracing::info!(
            "Synced {}: {} added, {} modified, {} deleted, {} failed",
            root.display(),
            report.added,
            report.modified,
            report.deleted,
            report.failed,
        );
    }

    Ok(report)
}

fn modified_since(path: &Path, since: DateTime<Utc>) -> std::io::Result<bool> {
    let mtime = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(mtime) > since)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use std::fs;
    use symdex_core::EmbeddingProvider;

    struct NoProvider;

    impl EmbeddingProvider for NoProvider {
        fn dimensions(&self) -> usize {
            0
        }
        fn embed(&self, _text: &str) -> Option<Vec<f32>> {
            None
        }
        fn name(&self) -> &str {
            "no"
        }
    }

    #[test]
    fn sync_on_unchanged_tree_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn a() {}\n").unwrap();

        let (mut index, _) = build(dir.path(), &NoProvider).unwrap();
        let report = sync(&mut index, dir.path(), &NoProvider).unwrap();
        assert!(report.is_noop());
        assert_eq!(index.metadata.file_count, 1);
    }

    #[test]
    fn sync_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "pub fn a() {}\n").unwrap();

        let (mut index, _) = build(dir.path(), &NoProvider).unwrap();
        fs::write(dir.path().join("b.rs"), "pub fn b() {}\n").unwrap();

        let report = sync(&mut index, dir.path(), &NoProvider).unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(index.metadata.file_count, 2);
    }

    #[test]
    fn touch_without_edit_does_not_reparse() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        fs::write(&file, "pub fn a() {}\n").unwrap();

        let (mut index, _) = build(dir.path(), &NoProvider).unwrap();
        // Same content, fresh mtime; rewind indexed_at so the stat check fires.
        fs::write(&file, "pub fn a() {}\n").unwrap();
        index.metadata.indexed_at -= chrono::Duration::hours(1);

        let report = sync(&mut index, dir.path(), &NoProvider).unwrap();
        assert_eq!(report.modified, 0);
    }
}
