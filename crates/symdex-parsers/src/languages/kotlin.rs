//! Kotlin extractor.
//!
//! Kotlin declarations are public by default, so anything without an
//! explicit `private`, `protected`, or `internal` modifier reads as
//! exported. `object` declarations count as classes.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*import\s+([\w.]+)(?:\.\*)?").unwrap());
static FUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?(?:(?:suspend|inline|open|override|operator|infix|tailrec)\s+)*fun\s+(?:<[^>]*>\s+)?(?:[\w.]+\.)?(\w+)\s*(\([^)]*\))")
        .unwrap()
});
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?(?:(?:abstract|open|final|sealed|data|inner)\s+)*(?:class|object)\s+(\w+)")
        .unwrap()
});
static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?(?:fun\s+)?interface\s+(\w+)")
        .unwrap()
});
static ENUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?enum\s+class\s+(\w+)").unwrap()
});
static TYPEALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?typealias\s+(\w+)\s*=").unwrap()
});
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|private|protected|internal)\s+)?const\s+val\s+(\w+)").unwrap()
});

pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinParser {
    fn default() -> Self {
        Self::new()
    }
}

fn exported(modifier: &str) -> bool {
    !matches!(modifier, "private" | "protected" | "internal")
}

impl LanguageParser for KotlinParser {
    fn language_name(&self) -> &str {
        "kotlin"
    }

    fn file_extensions(&self) -> &[&str] {
        &["kt", "kts"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&IMPORT_RE, text) {
            let source = capture(&caps, 1);
            let names = source
                .rsplit('.')
                .next()
                .map(|tail| vec![tail.to_string()])
                .unwrap_or_default();
            out.imports.push(Import::new(source, names));
        }

        for (offset, caps) in each_match(&FUN_RE, text) {
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
        // CLASS_RE cannot reach `enum class` lines, `enum` is not in its
        // modifier set, so the two passes never overlap.
        for (offset, caps) in each_match(&ENUM_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Enum,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: exported(capture(&caps, 1)),
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&CLASS_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Class,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: exported(capture(&caps, 1)),
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&INTERFACE_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Interface,
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
        for (offset, caps) in each_match(&CONST_RE, text) {
            let line = line_of(text, offset);
            out.symbols.push(Symbol {
                name: capture(&caps, 2).to_string(),
                kind: SymbolKind::Const,
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
