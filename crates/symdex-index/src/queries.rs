//! Read-side query services over a loaded index.

use std::collections::HashMap;
use symdex_core::{EmbeddingProvider, Import, Symbol};
use symdex_search::{hybrid_search, KeywordScore, SearchHit};

use crate::index::CodeIndex;

/// Score a symbol name against a query.
///
/// A full-name match always outranks a substring match; comparison is
/// case-insensitive.
pub fn keyword_score(name: &str, query: &str) -> KeywordScore {
    if query.is_empty() {
        return KeywordScore::none();
    }
    let name_lc = name.to_lowercase();
    let query_lc = query.to_lowercase();
    if name_lc == query_lc {
        KeywordScore::new(2.0, format!("exact name match '{name}'"))
    } else if name_lc.contains(&query_lc) {
        KeywordScore::new(1.0, format!("name '{name}' contains '{query}'"))
    } else {
        KeywordScore::none()
    }
}

/// Imports recorded for one file, if any.
pub fn file_imports<'a>(index: &'a CodeIndex, path: &str) -> Option<&'a [Import]> {
    index.imports.get(path).map(|v| v.as_slice())
}

/// Files that import `specifier`.
///
/// Matches by exact specifier equality or a path-suffix heuristic: a
/// source of `.../x` or `.../x.ext` counts as importing module `x`. This
/// approximates relative-import resolution, it is not a module resolver.
pub fn find_importers<'a>(index: &'a CodeIndex, specifier: &str) -> Vec<&'a str> {
    let mut files: Vec<&str> = index
        .imports
        .iter()
        .filter(|(_, imports)| {
            imports
                .iter()
                .any(|import| matches_specifier(&import.source, specifier))
        })
        .map(|(file, _)| file.as_str())
        .collect();
    files.sort_unstable();
    files
}

fn matches_specifier(source: &str, specifier: &str) -> bool {
    if source == specifier {
        return true;
    }
    let tail = source.rsplit('/').next().unwrap_or(source);
    if tail == specifier {
        return true;
    }
    match tail.rsplit_once('.') {
        Some((stem, _ext)) => stem == specifier,
        None => false,
    }
}

/// Exact symbol search by name equality or substring, optionally scoped to
/// one file. Results are sorted by keyword score, exact matches first.
pub fn search_symbols<'a>(
    index: &'a CodeIndex,
    query: &str,
    file: Option<&str>,
) -> Vec<&'a Symbol> {
    let mut scored: Vec<(&Symbol, f32)> = index
        .all_symbols()
        .filter(|symbol| file.map_or(true, |f| symbol.file == f))
        .filter_map(|symbol| {
            let kw = keyword_score(&symbol.name, query);
            (kw.score > 0.0).then_some((symbol, kw.score))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(symbol, _)| symbol).collect()
}

/// Hybrid keyword + semantic search over every indexed symbol.
///
/// Hit ids are embedding keys (`file:name:start_line`). Symbols without a
/// stored embedding are embedded and persisted into the index first, so
/// the pass after a mutation pays the fill cost once. A degraded provider
/// reduces this to keyword-only ranking.
pub fn semantic_search(
    index: &mut CodeIndex,
    query: &str,
    provider: &dyn EmbeddingProvider,
    threshold: f32,
) -> Vec<SearchHit> {
    let items: Vec<(String, String)> = index
        .all_symbols()
        .map(|symbol| (symbol.embedding_key(), symbol.embedding_text()))
        .collect();
    let names: HashMap<String, String> = index
        .all_symbols()
        .map(|symbol| (symbol.embedding_key(), symbol.name.clone()))
        .collect();

    hybrid_search(
        &items,
        query,
        |id| match names.get(id) {
            Some(name) => keyword_score(name, query),
            None => KeywordScore::none(),
        },
        &mut index.embeddings,
        provider,
        threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdex_core::{ParsedFile, SymbolKind};

    fn symbol(file: &str, name: &str, line: usize) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Function,
            start_line: line,
            end_line: line + 1,
            is_exported: true,
            signature: None,
            file: file.to_string(),
        }
    }

    fn index_with(files: &[(&str, Vec<Symbol>, Vec<Import>)]) -> CodeIndex {
        let mut index = CodeIndex::new();
        for (path, symbols, imports) in files {
            index.insert_file(
                path,
                ParsedFile {
                    symbols: symbols.clone(),
                    imports: imports.clone(),
                },
                "h".into(),
            );
        }
        index.recompute_metadata();
        index
    }

    #[test]
    fn exact_match_outranks_substring() {
        let exact = keyword_score("parse", "parse");
        let sub = keyword_score("parse_config", "parse");
        assert!(exact.score > sub.score);
        assert!(sub.score > 0.0);
    }

    #[test]
    fn find_importers_path_suffix_heuristic() {
        let index = index_with(&[
            (
                "/p/a.ts",
                vec![],
                vec![Import::new("./utils/helpers", vec!["fmt".into()])],
            ),
            (
                "/p/b.ts",
                vec![],
                vec![Import::new("../helpers.ts", vec!["fmt".into()])],
            ),
            ("/p/c.ts", vec![], vec![Import::new("react", vec![])]),
        ]);

        let importers = find_importers(&index, "helpers");
        assert_eq!(importers, vec!["/p/a.ts", "/p/b.ts"]);
        assert_eq!(find_importers(&index, "react"), vec!["/p/c.ts"]);
        assert!(find_importers(&index, "lodash").is_empty());
    }

    #[test]
    fn search_scoped_to_file() {
        let index = index_with(&[
            ("/p/a.rs", vec![symbol("/p/a.rs", "run", 1)], vec![]),
            ("/p/b.rs", vec![symbol("/p/b.rs", "run_all", 1)], vec![]),
        ]);

        let hits = search_symbols(&index, "run", Some("/p/a.rs"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file, "/p/a.rs");

        let all = search_symbols(&index, "run", None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "run");
    }

    #[test]
    fn file_imports_absent_is_none() {
        let index = index_with(&[]);
        assert!(file_imports(&index, "/p/missing.rs").is_none());
    }
}
