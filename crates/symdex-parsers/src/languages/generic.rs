//! Fallback extractor for files with no language-specific parser.
//!
//! Any identifier followed by an argument list and an opening brace is
//! treated as a function, minus control-flow keywords. Good enough for
//! most brace-delimited languages the registry has never heard of.
//! Never reports imports, and everything it finds counts as exported.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

// The tail admits tokens between the argument list and the brace (Zig or
// Odin style return types) but stops at `;`, `(`, or `)` so a call
// statement cannot splice onto a later block.
static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+)\s*(\(([^)]*)\))[^{;()]*\{").unwrap());

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "match", "catch", "return", "defer", "unless",
];

pub struct GenericParser;

impl GenericParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for GenericParser {
    fn language_name(&self) -> &str {
        "generic"
    }

    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();
        for (offset, caps) in each_match(&FUNCTION_RE, text) {
            let name = capture(&caps, 1);
            if CONTROL_KEYWORDS.contains(&name) {
                continue;
            }
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: true,
                signature: opt_capture(&caps, 2),
                file: path.to_string(),
            });
        }
        out
    }
}
