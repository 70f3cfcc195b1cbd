//! Ruby extractor.
//!
//! Ruby has no visibility keyword at the declaration site that patterns can
//! rely on, so the leading-underscore convention decides `is_exported`.
//! `module` declarations are recorded as types, `class` as classes.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{capture, each_match, indent_block_end, line_of, opt_capture};
use crate::LanguageParser;

static REQUIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*require(?:_relative)?\s+['"]([^'"]+)['"]"#).unwrap());
static DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*def\s+(?:self\.)?(\w+[?!]?)\s*(\([^)]*\))?").unwrap());
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*class\s+([A-Z]\w*)").unwrap());
static MODULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*module\s+([A-Z]\w*)").unwrap());
static CONST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([A-Z][A-Z0-9_]*)\s*=[^=]").unwrap());

pub struct RubyParser;

impl RubyParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for RubyParser {
    fn language_name(&self) -> &str {
        "ruby"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rb", "rake"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&REQUIRE_RE, text) {
            out.imports.push(Import::new(capture(&caps, 1), Vec::new()));
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
        for (re, kind) in [
            (&CLASS_RE, SymbolKind::Class),
            (&MODULE_RE, SymbolKind::Type),
        ] {
            for (offset, caps) in each_match(re, text) {
                out.symbols.push(Symbol {
                    name: capture(&caps, 1).to_string(),
                    kind,
                    start_line: line_of(text, offset),
                    end_line: indent_block_end(text, offset),
                    is_exported: true,
                    signature: None,
                    file: path.to_string(),
                });
            }
        }
        for (offset, caps) in each_match(&CONST_RE, text) {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedFile {
        RubyParser::new().parse("/proj/app.rb", text)
    }

    #[test]
    fn defs_including_predicate_names() {
        let src = "def process(items)\n  items.map\nend\n\ndef valid?\n  true\nend\n\ndef _internal\nend\n";
        let parsed = parse(src);
        let names: Vec<&str> = parsed.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["process", "valid?", "_internal"]);
        assert!(!parsed.symbols[2].is_exported);
    }

    #[test]
    fn class_and_module() {
        let src = "module Billing\n  class Invoice\n    def total\n    end\n  end\nend\n";
        let parsed = parse(src);
        assert!(parsed.symbols.iter().any(|s| s.name == "Billing" && s.kind == SymbolKind::Type));
        assert!(parsed.symbols.iter().any(|s| s.name == "Invoice" && s.kind == SymbolKind::Class));
    }

    #[test]
    fn requires() {
        let parsed = parse("require 'json'\nrequire_relative './lib/util'\n");
        let sources: Vec<&str> = parsed.imports.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, vec!["json", "./lib/util"]);
    }
}
