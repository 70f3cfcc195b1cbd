//! End-to-end tests of the build / sync / persist / query pipeline over
//! real temp directories.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use symdex_core::EmbeddingProvider;
use symdex_embeddings::NullProvider;
use symdex_index::{
    build, file_imports, find_importers, load, save, search_symbols, semantic_search, sync,
    CodeIndex,
};
use symdex_search::DEFAULT_SIMILARITY_THRESHOLD;

/// Deterministic provider mapping known texts to fixed vectors.
struct TableProvider {
    table: HashMap<String, Vec<f32>>,
}

impl TableProvider {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }
}

impl EmbeddingProvider for TableProvider {
    fn dimensions(&self) -> usize {
        3
    }

    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        self.table.get(text).cloned()
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Provider returning the same vector for every text.
struct ConstantProvider(Vec<f32>);

impl EmbeddingProvider for ConstantProvider {
    fn dimensions(&self) -> usize {
        self.0.len()
    }

    fn embed(&self, _text: &str) -> Option<Vec<f32>> {
        Some(self.0.clone())
    }

    fn name(&self) -> &str {
        "constant"
    }
}

fn write_two_function_files(root: &Path) {
    fs::write(root.join("public_api.go"), "func Render(w io.Writer) {\n}\n").unwrap();
    fs::write(root.join("internal.go"), "func layout(w io.Writer) {\n}\n").unwrap();
}

/// Rewind the index timestamp so subsequent file writes register as
/// modifications without sleeping for mtime granularity.
fn rewind_indexed_at(index: &mut CodeIndex) {
    index.metadata.indexed_at -= chrono::Duration::hours(1);
}

#[test]
fn scenario_exported_and_private_functions() {
    let dir = tempfile::tempdir().unwrap();
    write_two_function_files(dir.path());

    let (index, report) = build(dir.path(), &NullProvider).unwrap();

    assert_eq!(report.files_indexed, 2);
    assert_eq!(index.metadata.file_count, 2);
    assert_eq!(index.metadata.symbol_count, 2);

    let all: Vec<_> = index.all_symbols().collect();
    let render = all.iter().find(|s| s.name == "Render").unwrap();
    let layout = all.iter().find(|s| s.name == "layout").unwrap();
    assert!(render.is_exported);
    assert!(!layout.is_exported);
    assert!(index.imports.is_empty());
}

#[test]
fn scenario_deletion_sync_shrinks_index() {
    let dir = tempfile::tempdir().unwrap();
    write_two_function_files(dir.path());

    let provider = ConstantProvider(vec![0.5, 0.5, 0.5]);
    let (mut index, _) = build(dir.path(), &provider).unwrap();
    assert_eq!(index.metadata.file_count, 2);
    assert_eq!(index.embeddings.len(), 2);

    let removed = dir.path().join("internal.go");
    fs::remove_file(&removed).unwrap();

    let report = sync(&mut index, dir.path(), &provider).unwrap();

    assert_eq!(report.deleted, 1);
    assert_eq!(index.metadata.file_count, 1);
    assert_eq!(index.metadata.symbol_count, 1);
    let removed_str = removed.to_string_lossy();
    assert!(
        !index
            .embeddings
            .keys()
            .any(|k| k.starts_with(removed_str.as_ref())),
        "no orphaned embedding keys for the deleted file"
    );
    assert_eq!(index.embeddings.len(), 1);
}

#[test]
fn persistence_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("svc.py"),
        "from os import path\n\ndef serve(port):\n    pass\n",
    )
    .unwrap();

    let provider = ConstantProvider(vec![0.25, -1.5, 3.0e-7]);
    let (index, _) = build(dir.path(), &provider).unwrap();

    save(&index, dir.path()).unwrap();
    let loaded = load(dir.path()).expect("artifact should load");

    assert_eq!(loaded.symbols, index.symbols);
    assert_eq!(loaded.imports, index.imports);
    assert_eq!(loaded.metadata, index.metadata);
    // Exact float equality, fixed-width f32 all the way through.
    assert_eq!(loaded.embeddings, index.embeddings);
}

#[test]
fn sync_is_idempotent_on_unchanged_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_two_function_files(dir.path());

    let (mut index, _) = build(dir.path(), &NullProvider).unwrap();
    let symbols_before = index.symbols.clone();
    let imports_before = index.imports.clone();

    let first = sync(&mut index, dir.path(), &NullProvider).unwrap();
    let second = sync(&mut index, dir.path(), &NullProvider).unwrap();

    assert!(first.is_noop());
    assert!(second.is_noop());
    assert_eq!(index.symbols, symbols_before);
    assert_eq!(index.imports, imports_before);
    assert_eq!(index.metadata.file_count, 2);
    assert_eq!(index.metadata.symbol_count, 2);
}

#[test]
fn sync_modification_replaces_symbol_set() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("m.rs");
    fs::write(&file, "pub fn one() {}\n\npub fn two() {}\n").unwrap();

    let (mut index, _) = build(dir.path(), &NullProvider).unwrap();
    assert_eq!(index.metadata.symbol_count, 2);

    // Fewer symbols after the edit; the old set must not linger.
    fs::write(&file, "pub fn only() {}\n").unwrap();
    rewind_indexed_at(&mut index);

    let report = sync(&mut index, dir.path(), &NullProvider).unwrap();

    assert_eq!(report.modified, 1);
    assert_eq!(index.metadata.symbol_count, 1);
    let names: Vec<_> = index.all_symbols().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["only"]);
}

#[test]
fn sync_failed_reparse_leaves_file_purged() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("m.rs");
    fs::write(&file, "pub fn alive() {}\n").unwrap();

    let (mut index, _) = build(dir.path(), &NullProvider).unwrap();
    assert_eq!(index.metadata.symbol_count, 1);

    // Invalid UTF-8 makes the re-read fail after the purge.
    fs::write(&file, [0xFFu8, 0xFE, 0x00, 0x01]).unwrap();
    rewind_indexed_at(&mut index);

    let report = sync(&mut index, dir.path(), &NullProvider).unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(index.metadata.symbol_count, 0);
    let file_str = file.to_string_lossy();
    assert!(!index.symbols.contains_key(file_str.as_ref()));

    // Next pass with readable content recovers the file.
    fs::write(&file, "pub fn alive() {}\n").unwrap();
    rewind_indexed_at(&mut index);
    let recovery = sync(&mut index, dir.path(), &NullProvider).unwrap();
    assert_eq!(recovery.added + recovery.modified, 1);
    assert_eq!(index.metadata.symbol_count, 1);
}

#[test]
fn import_queries_over_built_index() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("app.ts"),
        "import { helper } from './lib/helpers';\n\nexport function main() {\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("other.ts"), "export function other() {\n}\n").unwrap();

    let (index, _) = build(dir.path(), &NullProvider).unwrap();

    let app = dir.path().join("app.ts");
    let app_str = app.to_string_lossy();
    let imports = file_imports(&index, &app_str).expect("app.ts has imports");
    assert_eq!(imports[0].source, "./lib/helpers");
    assert_eq!(imports[0].imported, vec!["helper".to_string()]);

    let importers = find_importers(&index, "helpers");
    assert_eq!(importers, vec![app_str.as_ref()]);

    let other = dir.path().join("other.ts");
    assert!(file_imports(&index, &other.to_string_lossy()).is_none());
}

#[test]
fn exact_search_ranks_full_match_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.py"),
        "def parse(data):\n    pass\n\ndef parse_config(path):\n    pass\n",
    )
    .unwrap();

    let (index, _) = build(dir.path(), &NullProvider).unwrap();

    let hits = search_symbols(&index, "parse", None);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "parse");
    assert_eq!(hits[1].name, "parse_config");
}

#[test]
fn semantic_search_respects_threshold_and_merges() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("net.py"),
        "def open_socket(host):\n    pass\n\ndef close_window(id):\n    pass\n",
    )
    .unwrap();

    // Query aligns with open_socket, is orthogonal to close_window, and
    // "socket" also keyword-matches open_socket.
    let provider = TableProvider::new(&[
        ("socket", vec![1.0, 0.0, 0.0]),
        ("open_socket (host)", vec![1.0, 0.0, 0.0]),
        ("close_window (id)", vec![0.0, 1.0, 0.0]),
    ]);

    let (mut index, report) = build(dir.path(), &provider).unwrap();
    assert_eq!(report.embeddings, 2);

    let hits = semantic_search(&mut index, "socket", &provider, DEFAULT_SIMILARITY_THRESHOLD);

    assert_eq!(hits.len(), 1, "orthogonal symbol stays out");
    assert!(hits[0].id.contains(":open_socket:"));
    // Keyword 1.0 (substring) + semantic 1.0.
    assert!((hits[0].score - 2.0).abs() < 1e-5);
    assert_eq!(hits[0].reasons.len(), 2);
}

#[test]
fn semantic_search_lazy_fills_missing_embeddings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "def alpha():\n    pass\n").unwrap();

    // Build with a degraded provider: no embeddings stored.
    let (mut index, _) = build(dir.path(), &NullProvider).unwrap();
    assert!(index.embeddings.is_empty());

    // Query with a live provider; the fill runs before the semantic pass.
    let provider = ConstantProvider(vec![1.0, 0.0, 0.0]);
    let hits = semantic_search(&mut index, "alpha", &provider, DEFAULT_SIMILARITY_THRESHOLD);

    assert_eq!(index.embeddings.len(), 1);
    assert_eq!(hits.len(), 1);
}

#[test]
fn load_missing_artifact_signals_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load(dir.path()).is_none());

    write_two_function_files(dir.path());
    let (index, _) = build(dir.path(), &NullProvider).unwrap();
    save(&index, dir.path()).unwrap();
    assert!(load(dir.path()).is_some());
}
