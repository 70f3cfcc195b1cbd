//! C++ extractor.
//!
//! Shares the C family's linkage rule (`static` at file scope is private)
//! and adds classes, scoped enums, and `using` aliases. Out-of-line method
//! definitions keep their qualified `Type::method` spelling as the name.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture};
use crate::LanguageParser;

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*#\s*include\s+[<"]([^>"]+)[>"]"#).unwrap());
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:template\s*<[^>]*>\s*)?(?:class|struct)\s+(\w+)\s*(?::[^{\n]*)?\{").unwrap()
});
static ENUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*enum\s+(?:class\s+|struct\s+)?(\w+)").unwrap());
static USING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*using\s+(\w+)\s*=").unwrap());
static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(static\s+)?(?:(?:inline|virtual|constexpr|explicit)\s+)*[\w:<>,&*~\s]+?\b([\w~]+(?:::[\w~]+)*)\s*(\([^)]*\))\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?\{")
        .unwrap()
});
static DEFINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*#\s*define\s+([A-Z_][A-Z0-9_]*)(?:\s|$)").unwrap()
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "return", "else"];

pub struct CppParser;

impl CppParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for CppParser {
    fn language_name(&self) -> &str {
        "cpp"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cpp", "cc", "cxx", "hpp", "hh", "hxx"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();

        for (_, caps) in each_match(&INCLUDE_RE, text) {
            out.imports.push(Import::new(capture(&caps, 1), Vec::new()));
        }

        for (offset, caps) in each_match(&FUNC_RE, text) {
            let name = capture(&caps, 2);
            let simple = name.rsplit("::").next().unwrap_or(name);
            if CONTROL_KEYWORDS.contains(&simple) {
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

        for (offset, caps) in each_match(&CLASS_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 1).to_string(),
                kind: SymbolKind::Class,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: true,
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&ENUM_RE, text) {
            out.symbols.push(Symbol {
                name: capture(&caps, 1).to_string(),
                kind: SymbolKind::Enum,
                start_line: line_of(text, offset),
                end_line: brace_block_end(text, offset),
                is_exported: true,
                signature: None,
                file: path.to_string(),
            });
        }
        for (offset, caps) in each_match(&USING_RE, text) {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedFile {
        CppParser::new().parse("/proj/widget.cpp", text)
    }

    #[test]
    fn qualified_method_name_kept() {
        let src = "void Widget::draw(Canvas& c) {\n    c.fill();\n}\n";
        let parsed = parse(src);
        assert_eq!(parsed.symbols[0].name, "Widget::draw");
        assert_eq!(parsed.symbols[0].kind, SymbolKind::Function);
        assert!(parsed.symbols[0].is_exported);
    }

    #[test]
    fn static_free_function_private() {
        let parsed = parse("static int helper(int v) {\n    return v;\n}\n");
        assert!(!parsed.symbols[0].is_exported);
    }

    #[test]
    fn class_enum_alias() {
        let src = "class Widget {\npublic:\n    int id;\n};\n\nenum class Color { Red };\n\nusing Id = uint64_t;\n";
        let parsed = parse(src);
        let kinds: Vec<SymbolKind> = parsed.symbols.iter().map(|s| s.kind).collect();
        assert!(kinds.contains(&SymbolKind::Class));
        assert!(kinds.contains(&SymbolKind::Enum));
        assert!(kinds.contains(&SymbolKind::Type));
    }
}
