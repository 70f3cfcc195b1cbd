//! Full index build pipeline.
//!
//! Walks the tree, parses every candidate file, and populates a fresh
//! [`CodeIndex`]. Per-file failures are logged and counted, never fatal.
//! Embedding generation is best effort: a provider returning `None`
//! leaves the symbol keyword-searchable only.

use sha2::{Digest, Sha256};
use std::path::Path;
use symdex_core::{EmbeddingProvider, SymdexError};
use symdex_parsers::ParserRegistry;

use crate::index::CodeIndex;
use crate::scanner;

/// Summary of one full build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Files returned by the scanner.
    pub files_scanned: usize,
    /// Files read and parsed successfully.
    pub files_indexed: usize,
    /// Files skipped because reading them failed.
    pub files_failed: usize,
    /// Symbols extracted across all files.
    pub symbols: usize,
    /// Import statements extracted across all files.
    pub imports: usize,
    /// Embeddings actually generated (<= symbols when the provider degrades).
    pub embeddings: usize,
}

/// SHA-256 hex digest of file content, kept for change detection in sync.
pub(crate) fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Parse one file and fold its output into the index.
///
/// Returns (symbols, imports, embeddings) counts. Each file is embedded to
/// completion before the caller moves to the next one.
pub(crate) fn index_file(
    index: &mut CodeIndex,
    registry: &ParserRegistry,
    provider: &dyn EmbeddingProvider,
    path: &Path,
) -> Result<(usize, usize, usize), SymdexError> {
    let text = std::fs::read_to_string(path)?;
    let path_str = path.to_string_lossy().to_string();

    let parsed = registry.parse_file(&path_str, &text);
    let symbol_count = parsed.symbols.len();
    let import_count = parsed.imports.len();

    let mut embedded = 0usize;
    for symbol in &parsed.symbols {
        if let Some(embedding) = provider.embed(&symbol.embedding_text()) {
            index.embeddings.insert(symbol.embedding_key(), embedding);
            embedded += 1;
        }
    }

    index.insert_file(&path_str, parsed, content_hash(&text));
    Ok((symbol_count, import_count, embedded))
}

/// Build a fresh index of the tree rooted at `root`.
pub fn build(
    root: &Path,
    provider: &dyn EmbeddingProvider,
) -> Result<(CodeIndex, IndexReport), SymdexError> {
    let registry = ParserRegistry::new();
    let files = scanner::scan(root)?;

    let mut index = CodeIndex::new();
    let mut report = IndexReport {
        files_scanned: files.len(),
        ..Default::default()
    };

    for path in &files {
        match index_file(&mut index, &registry, provider, path) {
            Ok((symbols, imports, embeddings)) => {
                report.files_indexed += 1;
                report.symbols += symbols;
                report.imports += imports;
                report.embeddings += embeddings;
            }
            Err(err) => {
                tracing::warn!("Failed to index {}: {}", path.display(), err);
                report.files_failed += 1;
            }
        }
    }

    index.recompute_metadata();

    tracing::info!(
        "Built index of {}: {} scanned, {} indexed, {} failed, {} symbols, {} imports, {} embeddings",
        root.display(),
        report.files_scanned,
        report.files_indexed,
        report.files_failed,
        report.symbols,
        report.imports,
        report.embeddings,
    );

    Ok((index, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use symdex_core::EmbeddingProvider;

    struct ConstantProvider;

    impl EmbeddingProvider for ConstantProvider {
        fn dimensions(&self) -> usize {
            3
        }
        fn embed(&self, _text: &str) -> Option<Vec<f32>> {
            Some(vec![0.1, 0.2, 0.3])
        }
        fn name(&self) -> &str {
            "constant"
        }
    }

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
    fn build_populates_symbols_imports_and_embeddings() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("app.py"),
            "import os\n\ndef handle(req):\n    pass\n",
        )
        .unwrap();

        let (index, report) = build(dir.path(), &ConstantProvider).unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.symbols, 1);
        assert_eq!(report.imports, 1);
        assert_eq!(report.embeddings, 1);
        assert_eq!(index.metadata.file_count, 1);
        assert_eq!(index.metadata.symbol_count, 1);
        assert_eq!(index.embeddings.len(), 1);
    }

    #[test]
    fn degraded_provider_skips_embeddings_silently() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "pub fn go() {}\n").unwrap();

        let (index, report) = build(dir.path(), &NoProvider).unwrap();

        assert_eq!(report.symbols, 1);
        assert_eq!(report.embeddings, 0);
        assert!(index.embeddings.is_empty());
        assert_eq!(index.metadata.symbol_count, 1);
    }

    #[test]
    fn unreadable_file_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.rs"), "pub fn fine() {}\n").unwrap();
        // Invalid UTF-8 makes read_to_string fail.
        fs::write(dir.path().join("bad.rs"), [0xFFu8, 0xFE, 0xFD]).unwrap();

        let (index, report) = build(dir.path(), &NoProvider).unwrap();

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.files_failed, 1);
        assert_eq!(index.metadata.file_count, 1);
    }
}
