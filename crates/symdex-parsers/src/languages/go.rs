//! Go extractor.
//!
//! Visibility is capitalization: an identifier starting with an uppercase
//! letter is exported. Methods (receiver functions) are recorded as plain
//! functions; the receiver stays out of the name.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static IMPORT_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^import\s+(?:(\w+)\s+)?"([^"]+)""#).unwrap());
static IMPORT_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^import\s*\(\s*(.*?)\s*\)").unwrap());
static IMPORT_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:(\w+|\.)\s+)?"([^"]+)""#).unwrap());
static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^func\s+(?:\([^)]*\)\s+)?(\w+)\s*(\([^)]*\))").unwrap()
});
static STRUCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^type\s+(\w+)\s+struct\b").unwrap());
static INTERFACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^type\s+(\w+)\s+interface\b").unwrap());
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^type\s+(\w+)\s+(\S+)").unwrap());
static CONST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^const\s+(\w+)").unwrap());

pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

impl LanguageParser for GoParser {
    fn language_name(&self) -> &str {
        "go"
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&IMPORT_SINGLE_RE, text) {
            let alias = opt_capture(&caps, 1);
            out.imports.push(Import::new(
                capture(&caps, 2),
                alias.map(|a| vec![a]).unwrap_or_default(),
            ));
        }
        for (_, caps) in each_match(&IMPORT_BLOCK_RE, text) {
            for (_, line_caps) in each_match(&IMPORT_LINE_RE, capture(&caps, 1)) {
                let alias = opt_capture(&line_caps, 1).filter(|a| a != ".");
                out.imports.push(Import::new(
                    capture(&line_caps, 2),
                    alias.map(|a| vec![a]).unwrap_or_default(),
                ));
            }
        }

        for (offset, caps) in each_match(&FUNC_RE, text) {
            let name = capture(&caps, 1);
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: is_exported(name),
                signature: opt_capture(&caps, 2),
                file: path.to_string(),
            });
        }
        for (re, kind) in [
            (&STRUCT_RE, SymbolKind::Class),
            (&INTERFACE_RE, SymbolKind::Interface),
        ] {
            for (offset, caps) in each_match(re, text) {
                let name = capture(&caps, 1);
                out.symbols.push(Symbol {
                    name: name.to_string(),
                    kind,
                    start_line: line_of(text, offset),
                    end_line: brace_block_end(text, offset),
                    is_exported: is_exported(name),
                    signature: None,
                    file: path.to_string(),
                });
            }
        }
        for (offset, caps) in each_match(&TYPE_RE, text) {
            let name = capture(&caps, 1);
            // Struct and interface declarations are handled above.
            let underlying = capture(&caps, 2);
            if underlying.starts_with("struct") || underlying.starts_with("interface") {
                continue;
            }
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Type,
                start_line: line,
                end_line: line,
                is_exported: is_exported(name),
                signature: None,
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
                is_exported: is_exported(name),
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
