//! Rust extractor.
//!
//! Visibility is the `pub` keyword (any form, including `pub(crate)`).
//! Structs map to the class kind, traits to interface.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture, split_name_list};
use crate::LanguageParser;

static USE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+((?:\w+::)*\w+)(?:::\{([^}]*)\}|::(\*))?")
        .unwrap()
});
static FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+(\w+)\s*(?:<[^>]*>)?\s*(\([^)]*\))?"#)
        .unwrap()
});
static STRUCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(pub(?:\([^)]*\))?\s+)?struct\s+(\w+)").unwrap());
static ENUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(pub(?:\([^)]*\))?\s+)?enum\s+(\w+)").unwrap());
static TRAIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?trait\s+(\w+)").unwrap()
});
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(pub(?:\([^)]*\))?\s+)?type\s+(\w+)[^=\n]*=").unwrap());
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(pub(?:\([^)]*\))?\s+)?(?:const|static)\s+(\w+)\s*:").unwrap()
});

pub struct RustParser;

impl RustParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for RustParser {
    fn language_name(&self) -> &str {
        "rust"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&USE_RE, text) {
            let source = capture(&caps, 1).to_string();
            let glob = caps.get(3).is_some();
            let names = match opt_capture(&caps, 2) {
                Some(list) => split_name_list(&list),
                None if glob => Vec::new(),
                None => source
                    .rsplit("::")
                    .next()
                    .map(|tail| vec![tail.to_string()])
                    .unwrap_or_default(),
            };
            out.imports.push(Import::new(source, names));
        }

        for (offset, caps) in each_match(&FN_RE, text) {
            out.symbols.push(braced(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Function,
                !capture(&caps, 1).is_empty(),
                opt_capture(&caps, 3),
            ));
        }
        for (offset, caps) in each_match(&STRUCT_RE, text) {
            out.symbols.push(braced(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Class,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&ENUM_RE, text) {
            out.symbols.push(braced(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Enum,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&TRAIT_RE, text) {
            out.symbols.push(braced(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Interface,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&TYPE_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Type,
                start_line: line,
                end_line: line,
                is_exported: !capture(&caps, 1).is_empty(),
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&CONST_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Const,
                start_line: line,
                end_line: line,
                is_exported: !capture(&caps, 1).is_empty(),
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}

fn braced(
    path: &str,
    text: &str,
    offset: usize,
    name: &str,
    kind: SymbolKind,
    is_exported: bool,
    signature: Option<String>,
) -> Symbol {
    Symbol {
        name: name.to_string(),
        kind,
        start_line: line_of(text, offset),
        end_line: brace_block_end(text, offset),
        is_exported,
        signature,
        file: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedFile {
        RustParser::new().parse("/proj/src/lib.rs", text)
    }

    #[test]
    fn pub_and_private_fn() {
        let src = "pub fn open(path: &str) -> Io {\n    todo!()\n}\n\nfn close() {\n}\n";
        let parsed = parse(src);
        assert_eq!(parsed.symbols.len(), 2);
        assert!(parsed.symbols[0].is_exported);
        assert_eq!(parsed.symbols[0].signature.as_deref(), Some("(path: &str)"));
        assert!(!parsed.symbols[1].is_exported);
        assert_eq!(parsed.symbols[0].end_line, 3);
    }

    #[test]
    fn pub_crate_counts_as_exported() {
        let parsed = parse("pub(crate) fn internal() {}\n");
        assert!(parsed.symbols[0].is_exported);
    }

    #[test]
    fn item_kinds() {
        let src = "pub struct Conn;\npub enum State { On, Off }\npub trait Store {}\npub type Result2 = Result<(), ()>;\npub const MAX: usize = 8;\n";
        let parsed = parse(src);
        let kinds: Vec<SymbolKind> = parsed.symbols.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SymbolKind::Class,
                SymbolKind::Enum,
                SymbolKind::Interface,
                SymbolKind::Type,
                SymbolKind::Const
            ]
        );
    }

    #[test]
    fn use_statements() {
        let src = "use std::collections::{HashMap, HashSet};\npub use crate::scanner::Scanner;\nuse serde::*;\n";
        let parsed = parse(src);
        assert_eq!(parsed.imports.len(), 3);
        assert_eq!(parsed.imports[0].source, "std::collections");
        assert_eq!(parsed.imports[0].imported, vec!["HashMap", "HashSet"]);
        assert_eq!(parsed.imports[1].imported, vec!["Scanner"]);
        assert!(parsed.imports[2].imported.is_empty());
    }
}
