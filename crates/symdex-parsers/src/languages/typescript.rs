//! TypeScript/JavaScript extractor.
//!
//! One parser covers the whole ECMAScript family; the TypeScript-only
//! patterns (interface, type alias, enum) simply never match in plain JS.
//! Visibility follows the `export` keyword.

use once_cell::sync::Lazy;
use regex::Regex;
use symdex_core::{Import, ParsedFile, Symbol, SymbolKind};

use crate::primitives::{brace_block_end, capture, each_match, line_of, opt_capture, split_name_list};
use crate::LanguageParser;

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?(.+?)\s+from\s+['"]([^'"]+)['"]"#).unwrap()
});
static BARE_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*import\s+['"]([^'"]+)['"]"#).unwrap());
static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(?:const|let|var)\s+(\{[^}]*\}|\w+)\s*=\s*require\(\s*['"]([^'"]+)['"]\s*\)"#)
        .unwrap()
});

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*(\([^)]*\))?")
        .unwrap()
});
static ARROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(export\s+)?(?:const|let)\s+([A-Za-z_$][\w$]*)\s*(?::[^=\n]+)?=\s*(?:async\s+)?(\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>")
        .unwrap()
});
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});
static INTERFACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(export\s+)?interface\s+([A-Za-z_$][\w$]*)").unwrap());
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(export\s+)?type\s+([A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*=").unwrap());
static ENUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(export\s+)?(?:const\s+)?enum\s+([A-Za-z_$][\w$]*)").unwrap()
});
static CONST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(export\s+)?const\s+([A-Z_][A-Z0-9_]*)\s*(?::[^=\n]+)?=\s*([^\n]*)").unwrap()
});

pub struct TypeScriptParser;

impl TypeScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for TypeScriptParser {
    fn language_name(&self) -> &str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ts", "tsx", "js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, path: &str, text: &str) -> ParsedFile {
        let mut out = ParsedFile::default();
        extract_imports(text, &mut out.imports);

        for (offset, caps) in each_match(&FUNCTION_RE, text) {
            out.symbols.push(symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Function,
                !capture(&caps, 1).is_empty(),
                opt_capture(&caps, 3),
            ));
        }
        for (offset, caps) in each_match(&ARROW_RE, text) {
            let params = capture(&caps, 3);
            out.symbols.push(symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Function,
                !capture(&caps, 1).is_empty(),
                if params.starts_with('(') {
                    Some(params.to_string())
                } else {
                    Some(format!("({params})"))
                },
            ));
        }
        for (offset, caps) in each_match(&CLASS_RE, text) {
            out.symbols.push(symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Class,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&INTERFACE_RE, text) {
            out.symbols.push(symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Interface,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&TYPE_RE, text) {
            let mut sym = symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Type,
                !capture(&caps, 1).is_empty(),
                None,
            );
            sym.end_line = sym.start_line;
            out.symbols.push(sym);
        }
        for (offset, caps) in each_match(&ENUM_RE, text) {
            out.symbols.push(symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Enum,
                !capture(&caps, 1).is_empty(),
                None,
            ));
        }
        for (offset, caps) in each_match(&CONST_RE, text) {
            // SCREAMING_CASE arrow functions are already recorded as functions.
            let value = capture(&caps, 3);
            if value.contains("=>") {
                continue;
            }
            let mut sym = symbol(
                path,
                text,
                offset,
                capture(&caps, 2),
                SymbolKind::Const,
                !capture(&caps, 1).is_empty(),
                None,
            );
            sym.end_line = sym.start_line;
            out.symbols.push(sym);
        }

        out
    }
}

fn extract_imports(text: &str, imports: &mut Vec<Import>) {
    for (_, caps) in each_match(&IMPORT_RE, text) {
        let clause = capture(&caps, 1);
        imports.push(Import::new(capture(&caps, 2), import_names(clause)));
    }
    for (_, caps) in each_match(&BARE_IMPORT_RE, text) {
        imports.push(Import::new(capture(&caps, 1), Vec::new()));
    }
    for (_, caps) in each_match(&REQUIRE_RE, text) {
        imports.push(Import::new(capture(&caps, 2), import_names(capture(&caps, 1))));
    }
}

/// Names bound by an import clause: default binding, `* as ns`, and the
/// members of a `{ ... }` list (aliases keep the written name).
fn import_names(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let mut names = Vec::new();

    if let Some(open) = clause.find('{') {
        let head = clause[..open].trim().trim_end_matches(',').trim();
        if !head.is_empty() && head != "*" {
            names.push(head.to_string());
        }
        if let Some(close) = clause.rfind('}') {
            names.extend(split_name_list(&clause[open + 1..close]));
        }
    } else if let Some(rest) = clause.strip_prefix("* as ") {
        names.push(rest.trim().to_string());
    } else if !clause.is_empty() {
        names.push(clause.trim_end_matches(',').to_string());
    }

    names
}

fn symbol(
    path: &str,
    text: &str,
    offset: usize,
    name: &str,
    kind: SymbolKind,
    is_exported: bool,
    signature: Option<String>,
) -> Symbol {
    let start_line = line_of(text, offset);
    Symbol {
        name: name.to_string(),
        kind,
        start_line,
        end_line: brace_block_end(text, offset),
        is_exported,
        signature,
        file: path.to_string(),
    }
}
