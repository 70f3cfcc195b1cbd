//! The in-memory index aggregate.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use symdex_core::{Import, IndexMetadata, ParsedFile, Symbol};

/// Queryable catalogue of symbols, imports, and symbol embeddings, keyed by
/// absolute file path.
///
/// Mutation is always whole-file: a file's entries are purged and
/// repopulated together, never patched entry by entry. Counts in `metadata`
/// are recomputed from the live maps after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeIndex {
    /// file path -> symbols declared in that file (present only if >= 1).
    pub symbols: HashMap<String, Vec<Symbol>>,
    /// file path -> imports recorded for that file (present only if >= 1).
    pub imports: HashMap<String, Vec<Import>>,
    /// "file:name:start_line" -> embedding vector.
    pub embeddings: HashMap<String, Vec<f32>>,
    /// file path -> SHA-256 content hash from the last successful parse.
    /// Lets sync skip files whose mtime moved but whose content did not.
    #[serde(default)]
    pub file_hashes: HashMap<String, String>,
    pub metadata: IndexMetadata,
}

impl CodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the index tracks any file at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.imports.is_empty()
    }

    /// Every file path the index knows about, from either map.
    pub fn tracked_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .symbols
            .keys()
            .chain(self.imports.keys())
            .chain(self.file_hashes.keys())
            .map(|s| s.as_str())
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Whether a file is already represented in the index.
    pub fn contains_file(&self, path: &str) -> bool {
        self.symbols.contains_key(path)
            || self.imports.contains_key(path)
            || self.file_hashes.contains_key(path)
    }

    /// Store one file's parse output. Empty symbol or import lists do not
    /// create map entries.
    pub fn insert_file(&mut self, path: &str, parsed: ParsedFile, content_hash: String) {
        if !parsed.symbols.is_empty() {
            self.symbols.insert(path.to_string(), parsed.symbols);
        }
        if !parsed.imports.is_empty() {
            self.imports.insert(path.to_string(), parsed.imports);
        }
        self.file_hashes.insert(path.to_string(), content_hash);
    }

    /// Purge every trace of a file: its symbols, its imports, its content
    /// hash, and every embedding whose key carries the file as prefix.
    pub fn remove_file(&mut self, path: &str) {
        self.symbols.remove(path);
        self.imports.remove(path);
        self.file_hashes.remove(path);
        let prefix = format!("{path}:");
        self.embeddings.retain(|key, _| !key.starts_with(&prefix));
    }

    /// Iterate all symbols across all files.
    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values().flatten()
    }

    /// Recompute `file_count` and `symbol_count` from the live maps and
    /// advance `indexed_at`. The timestamp only moves forward.
    pub fn recompute_metadata(&mut self) {
        self.metadata.file_count = self.symbols.len();
        self.metadata.symbol_count = self.all_symbols().count();
        let now = Utc::now();
        if now > self.metadata.indexed_at {
            self.metadata.indexed_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdex_core::SymbolKind;

    fn symbol(file: &str, name: &str, line: usize) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Function,
            start_line: line,
            end_line: line + 2,
            is_exported: true,
            signature: None,
            file: file.to_string(),
        }
    }

    #[test]
    fn insert_skips_empty_lists() {
        let mut index = CodeIndex::new();
        index.insert_file("/p/a.rs", ParsedFile::default(), "h".into());
        assert!(index.symbols.is_empty());
        assert!(index.imports.is_empty());
        assert!(index.contains_file("/p/a.rs"));
    }

    #[test]
    fn remove_file_purges_embeddings_by_prefix() {
        let mut index = CodeIndex::new();
        let parsed = ParsedFile {
            symbols: vec![symbol("/p/a.rs", "run", 1)],
            imports: vec![],
        };
        index.insert_file("/p/a.rs", parsed, "h".into());
        index.embeddings.insert("/p/a.rs:run:1".into(), vec![1.0]);
        index.embeddings.insert("/p/b.rs:other:3".into(), vec![2.0]);

        index.remove_file("/p/a.rs");

        assert!(!index.contains_file("/p/a.rs"));
        assert!(!index.embeddings.contains_key("/p/a.rs:run:1"));
        assert!(index.embeddings.contains_key("/p/b.rs:other:3"));
    }

    #[test]
    fn metadata_counts_recomputed_not_incremented() {
        let mut index = CodeIndex::new();
        let parsed = ParsedFile {
            symbols: vec![symbol("/p/a.rs", "run", 1), symbol("/p/a.rs", "stop", 5)],
            imports: vec![],
        };
        index.insert_file("/p/a.rs", parsed, "h".into());
        index.recompute_metadata();
        assert_eq!(index.metadata.file_count, 1);
        assert_eq!(index.metadata.symbol_count, 2);

        index.remove_file("/p/a.rs");
        index.recompute_metadata();
        assert_eq!(index.metadata.file_count, 0);
        assert_eq!(index.metadata.symbol_count, 0);
    }

    #[test]
    fn indexed_at_only_moves_forward() {
        let mut index = CodeIndex::new();
        index.recompute_metadata();
        let first = index.metadata.indexed_at;
        index.metadata.indexed_at = chrono::Utc::now() + chrono::Duration::hours(1);
        let future = index.metadata.indexed_at;
        index.recompute_metadata();
        assert!(index.metadata.indexed_at >= first);
        assert_eq!(index.metadata.indexed_at, future);
    }
}
