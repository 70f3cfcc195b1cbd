//! Java extractor.
//!
//! Visibility is the explicit `public` modifier; package-private and
//! narrower all read as not exported. Method matching requires a body brace
//! so interface method declarations without bodies are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;").unwrap());
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|protected|private)\s+)?(?:(?:abstract|final|static|sealed)\s+)*class\s+(\w+)")
        .unwrap()
});
static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|protected|private)\s+)?(?:(?:abstract|sealed)\s+)*interface\s+(\w+)")
        .unwrap()
});
static ENUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|protected|private)\s+)?enum\s+(\w+)").unwrap()
});
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|protected|private)\s+)(?:(?:static|final|abstract|synchronized|native)\s+)*[\w<>\[\],.\s]*?\b(\w+)\s*(\([^)]*\))\s*(?:throws\s+[\w.,\s]+)?\{")
        .unwrap()
});
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(public|protected|private)\s+)?static\s+final\s+[\w<>\[\]]+\s+([A-Z_][A-Z0-9_]*)\s*=")
        .unwrap()
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "return", "new"];

pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for JavaParser {
    fn language_name(&self) -> &str {
        "java"
    }

    fn file_extensions(&self) -> &[&str] {
        &["java"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&IMPORT_RE, text) {
            let source = capture(&caps, 1);
            let names = source
                .rsplit('.')
                .next()
                .filter(|tail| *tail != "*")
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedFile {
        JavaParser::new().parse("/proj/App.java", text)
    }

    #[test]
    fn public_class_and_method() {
        let src = "public class App {\n    public static void main(String[] args) {\n    }\n\n    private int count() {\n        return 0;\n    }\n}\n";
        let parsed = parse(src);
        let class = parsed.symbols.iter().find(|s| s.kind == SymbolKind::Class).unwrap();
        assert!(class.is_exported);
        let methods: Vec<&Symbol> = parsed
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Function)
            .collect();
        assert_eq!(methods.len(), 2);
        assert!(methods[0].is_exported);
        assert!(!methods[1].is_exported);
    }

    #[test]
    fn package_private_class_not_exported() {
        let parsed = parse("class Worker {\n}\n");
        assert!(!parsed.symbols[0].is_exported);
    }

    #[test]
    fn static_final_constant() {
        let parsed = parse("public class C {\n    public static final int MAX_SIZE = 64;\n}\n");
        let constant = parsed.symbols.iter().find(|s| s.kind == SymbolKind::Const).unwrap();
        assert_eq!(constant.name, "MAX_SIZE");
        assert!(constant.is_exported);
    }

    #[test]
    fn imports_keep_last_segment() {
        let parsed = parse("import java.util.List;\nimport java.util.*;\n");
        assert_eq!(parsed.imports[0].imported, vec!["List"]);
        assert!(parsed.imports[1].imported.is_empty());
    }
}
