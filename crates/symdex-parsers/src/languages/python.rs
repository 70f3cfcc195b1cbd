//! Python extractor.
//!
//! Visibility follows the leading-underscore convention: `_name` is private,
//! anything else is considered part of the module's surface. Body end lines
//! come from the indentation helper.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{capture, each_match, indent_block_end, line_of, opt_capture, split_name_list};
use crate::LanguageParser;

static FROM_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import\s+([^\n(]+|\([^)]*\))").unwrap());
static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*import\s+([\w.]+(?:\s*,\s*[\w.]+)*)").unwrap());
static DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:async\s+)?def\s+(\w+)\s*(\([^)]*\))").unwrap());
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*class\s+(\w+)\s*(\([^)]*\))?\s*:").unwrap());
static CONST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([A-Z_][A-Z0-9_]*)\s*(?::[^=\n]+)?=").unwrap());

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for PythonParser {
    fn language_name(&self) -> &str {
        "python"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&FROM_IMPORT_RE, text) {
            let list = capture(&caps, 2).trim_matches(|c| c == '(' || c == ')');
            out.imports
                .push(Import::new(capture(&caps, 1), split_name_list(list)));
        }
        for (_, caps) in each_match(&IMPORT_RE, text) {
            for module in split_name_list(capture(&caps, 1)) {
                out.imports.push(Import::new(module, Vec::new()));
            }
        }

        for (offset, caps) in each_match(&DEF_RE, text) {
            let name = capture(&caps, 1);
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: indent_block_end(text, offset),
                is_exported: !name.starts_with('_'),
                signature: opt_capture(&caps, 2),
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&CLASS_RE, text) {
            let name = capture(&caps, 1);
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Class,
                start_line: line_of(text, offset),
                end_line: indent_block_end(text, offset),
                is_exported: !name.starts_with('_'),
                signature: opt_capture(&caps, 2),
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&CONST_RE, text) {
            let name = capture(&caps, 1);
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Const,
                start_line: line,
                end_line: line,
                is_exported: !name.starts_with('_'),
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
