//! PHP extractor.
//!
//! Visibility defaults to public unless an explicit `private` or `protected`
//! modifier appears. Traits are recorded as interfaces.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static USE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*use\s+([\w\\]+)(?:\s+as\s+(\w+))?\s*;").unwrap());
static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(?:require|include)(?:_once)?\s*\(?\s*['"]([^'"]+)['"]"#).unwrap()
});
static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected)\s+)?(?:static\s+)?function\s+(\w+)\s*(\([^)]*\))")
        .unwrap()
});
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(?:abstract|final)\s+)*class\s+(\w+)").unwrap()
});
static INTERFACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:interface|trait)\s+(\w+)").unwrap());
static ENUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*enum\s+(\w+)").unwrap());
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected)\s+)?const\s+(\w+)\s*=").unwrap()
});

pub struct PhpParser;

impl PhpParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhpParser {
    fn default() -> Self {
        Self::new()
    }
}

fn visible(modifier: &str) -> bool {
    modifier != "private" && modifier != "protected"
}

impl LanguageParser for PhpParser {
    fn language_name(&self) -> &str {
        "php"
    }

    fn file_extensions(&self) -> &[&str] {
        &["php"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&USE_RE, text) {
            let source = capture(&caps, 1);
            let bound = opt_capture(&caps, 2).unwrap_or_else(|| {
                source.rsplit('\\').next().unwrap_or(source).to_string()
            });
            out.imports.push(Import::new(source, vec![bound]));
        }
        for (_, caps) in each_match(&REQUIRE_RE, text) {
            out.imports.push(Import::new(capture(&caps, 1), Vec::new()));
        }

        for (offset, caps) in each_match(&FUNCTION_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: visible(capture(&caps, 1)),
                signature: opt_capture(&caps, 3),
                file: path.to_string(),
            });
        }
        for (re, kind) in [
            (&CLASS_RE, SymbolKind::Class),
            (&INTERFACE_RE, SymbolKind::Interface),
            (&ENUM_RE, SymbolKind::Enum),
        ] {
            for (offset, caps) in each_match(re, text) {
                out.symbols.push(Symbol {
                    name: capture(&caps, 1).to_string(),
                    kind,
                    start_line: line_of(text, offset),
                    end_line: brace_block_end(text, offset),
                    is_exported: true,
                    signature: None,
                    file: path.to_string(),
                });
            }
        }
        for (offset, caps) in each_match(&CONST_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Const,
                start_line: line,
                end_line: line,
                is_exported: visible(capture(&caps, 1)),
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
