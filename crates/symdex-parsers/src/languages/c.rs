//! C extractor.
//!
//! File-scope `static` means private; everything else has external linkage
//! and reads as exported. `#define` object-like macros in SCREAMING_CASE are
//! recorded as constants, `#include` targets as imports.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*#\s*include\s+[<"]([^>"]+)[>"]"#).unwrap());
static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(static\s+)?(?:inline\s+)?(?:unsigned\s+|signed\s+|const\s+|struct\s+)?[\w]+\s*\**\s+\**(\w+)\s*(\([^)]*\))\s*\{")
        .unwrap()
});
static TYPEDEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*typedef\s+[^;\n]*?(\w+)\s*;").unwrap()
});
static TYPEDEF_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^\s*typedef\s+(?:struct|enum|union)[^{]*\{.*?\}\s*(\w+)\s*;").unwrap()
});
static DEFINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*#\s*define\s+([A-Z_][A-Z0-9_]*)(?:\s|$)").unwrap()
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "return", "sizeof", "else"];

pub struct CParser;

impl CParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for CParser {
    fn language_name(&self) -> &str {
        "c"
    }

    fn file_extensions(&self) -> &[&str] {
        &["c", "h"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&INCLUDE_RE, text) {
            out.imports.push(Import::new(capture(&caps, 1), Vec::new()));
        }

        for (offset, caps) in each_match(&FUNC_RE, text) {
            let name = capture(&caps, 2);
            if CONTROL_KEYWORDS.contains(&name) {
                continue;
            }
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: capture(&caps, 1).is_empty(),
                signature: opt_capture(&caps, 3),
                file: path.to_string(),
            });
        }

        for (offset, caps) in each_match(&TYPEDEF_BLOCK_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 1).to_string(),
                kind: SymbolKind::Type,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: true,
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&TYPEDEF_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 1).to_string(),
                kind: SymbolKind::Type,
                start_line: line,
                end_line: line,
                is_exported: true,
                signature: None,
                file: path.to_string(),
            });
        }

        for (offset, caps) in each_match(&DEFINE_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 1).to_string(),
                kind: SymbolKind::Const,
                start_line: line,
                end_line: line,
                is_exported: true,
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
