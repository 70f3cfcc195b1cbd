//! Swift extractor.
//!
//! Only `public` and `open` read as exported; the implicit `internal`
//! default stays private to the module. Protocols map to interfaces,
//! structs to classes, typealiases to types.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*import\s+(\w+)").unwrap());
static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|open|internal|fileprivate|private)\s+)?(?:(?:static|class|final|override|mutating)\s+)*func\s+(\w+)\s*(?:<[^>]*>)?\s*(\([^)]*\))")
        .unwrap()
});
static TYPE_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|open|internal|fileprivate|private)\s+)?(?:final\s+)?(class|struct|protocol|enum)\s+(\w+)")
        .unwrap()
});
static TYPEALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|open|internal|fileprivate|private)\s+)?typealias\s+(\w+)\s*=")
        .unwrap()
});

pub struct SwiftParser;

impl SwiftParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}

fn exported(modifier: &str) -> bool {
    modifier == "public" || modifier == "open"
}

impl LanguageParser for SwiftParser {
    fn language_name(&self) -> &str {
        "swift"
    }

    fn file_extensions(&self) -> &[&str] {
        &["swift"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&IMPORT_RE, text) {
            out.imports.push(Import::new(capture(&caps, 1), Vec::new()));
        }

        for (offset, caps) in each_match(&FUNC_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: exported(capture(&caps, 1)),
                signature: opt_capture(&caps, 3),
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&TYPE_DECL_RE, text) {
            let kind = match capture(&caps, 2) {
                "protocol" => SymbolKind::Interface,
                "enum" => SymbolKind::Enum,
                _ => SymbolKind::Class,
            };
            out.symbols.push(Symbol {
                name: capture(&caps, 3).to_string(),
                kind,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: exported(capture(&caps, 1)),
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&TYPEALIAS_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Type,
                start_line: line,
                end_line: line,
                is_exported: exported(capture(&caps, 1)),
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
