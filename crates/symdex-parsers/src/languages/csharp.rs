//! C# extractor.
//!
//! Visibility is the explicit `public` modifier; `internal`, `protected`,
//! `private`, and the implicit default all read as not exported.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static USING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*using\s+(?:static\s+)?([\w.]+)\s*;").unwrap());
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|internal|protected|private)\s+)?(?:(?:abstract|sealed|static|partial)\s+)*(?:class|record|struct)\s+(\w+)")
        .unwrap()
});
static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|internal|protected|private)\s+)?(?:partial\s+)?interface\s+(\w+)")
        .unwrap()
});
static ENUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|internal|protected|private)\s+)?enum\s+(\w+)").unwrap()
});
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|internal|protected|private)\s+)(?:(?:static|async|virtual|override|sealed|abstract|partial)\s+)*[\w<>\[\],.?\s]*?\b(\w+)\s*(\([^)]*\))\s*\{")
        .unwrap()
});
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|internal|protected|private)\s+)?const\s+[\w<>\[\]?]+\s+(\w+)\s*=")
        .unwrap()
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "foreach", "while", "switch", "catch", "using", "lock"];

pub struct CSharpParser;

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for CSharpParser {
    fn language_name(&self) -> &str {
        "csharp"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cs"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&USING_RE, text) {
            let source = capture(&caps, 1);
            let names = source
                .rsplit('.')
                .next()
                .map(|tail| vec![tail.to_string()])
                .unwrap_or_default();
            out.imports.push(Import::new(source, names));
        }

        for (re, kind) in [
            (&CLASS_RE, SymbolKind::Class),
            (&INTERFACE_RE, SymbolKind::Interface),
            (&ENUM_RE, SymbolKind::Enum),
        ] {
            for (offset, caps) in each_match(re, text) {
                out.symbols.push(Symbol {
                    name: capture(&caps, 2).to_string(),
                    kind,
                    start_line: line_of(text, offset),
                    end_line: brace_block_end(text, offset),
                    is_exported: capture(&caps, 1) == "public",
                    signature: None,
                    file: path.to_string(),
                });
            }
        }

        for (offset, caps) in each_match(&METHOD_RE, text) {
            let name = capture(&caps, 2);
            if CONTROL_KEYWORDS.contains(&name) {
                continue;
            }
            out.symbols.push(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Function,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: capture(&caps, 1) == "public",
                signature: opt_capture(&caps, 3),
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
                is_exported: capture(&caps, 1) == "public",
                signature: None,
                file: path.to_string(),
            });
        }

        out
    }
}
