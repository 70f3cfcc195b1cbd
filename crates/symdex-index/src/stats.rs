//! Derived read-only views over an index, for reporting surfaces.

use std::collections::HashMap;
use symdex_core::SymbolKind;

use crate::index::CodeIndex;

/// How many symbols of each kind the index holds.
pub fn kind_counts(index: &CodeIndex) -> HashMap<SymbolKind, usize> {
    let mut counts = HashMap::new();
    for symbol in index.all_symbols() {
        *counts.entry(symbol.kind).or_insert(0) += 1;
    }
    counts
}

/// Files ranked by symbol count, largest first. Ties break by path so the
/// ordering is stable across runs.
pub fn files_by_symbol_count(index: &CodeIndex) -> Vec<(String, usize)> {
    let mut files: Vec<(String, usize)> = index
        .symbols
        .iter()
        .map(|(file, symbols)| (file.clone(), symbols.len()))
        .collect();
    files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    files
}
