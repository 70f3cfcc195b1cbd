//! symdex-parsers: Pattern-based symbol and import extraction.
//!
//! Each supported language implements the [`LanguageParser`] trait with a
//! handful of regexes over the raw file text. Extraction is deliberately
//! approximate: the goal is a useful symbol catalogue over arbitrary input
//! in many languages, not AST-grade fidelity. Files whose extension matches
//! no registered language go through a generic brace-pattern fallback, so
//! parsing never fails outright.

pub mod languages;
pub mod primitives;

use std::path::Path;
use symdex_core::ParsedFile;

/// Trait for per-language extraction of symbols and imports from raw text.
pub trait LanguageParser: Send + Sync {
    /// Human-readable language name (e.g., "python").
    fn language_name(&self) -> &str;

    /// File extensions this parser handles (e.g., &["py"]).
    fn file_extensions(&self) -> &[&str];

    /// Extract symbols and imports from one file's text.
    ///
    /// Output order is observable: imports come first, then each symbol kind
    /// in the order its pattern is applied, not re-sorted by line number.
    fn parse(&self, path: &str, text: &str) -> ParsedFile;
}

/// Registry dispatching files to language parsers by extension.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn LanguageParser>>,
    fallback: languages::generic::GenericParser,
}

impl ParserRegistry {
    /// Create a registry with all built-in language parsers.
    pub fn new() -> Self {
        Self {
            parsers: languages::all_parsers(),
            fallback: languages::generic::GenericParser::new(),
        }
    }

    /// Parse a file, selecting the parser by extension and falling back to
    /// the generic brace matcher for unknown extensions.
    pub fn parse_file(&self, path: &str, text: &str) -> ParsedFile {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        match self.parser_for_extension(ext) {
            Some(parser) => parser.parse(path, text),
            None => self.fallback.parse(path, text),
        }
    }

    /// Find the registered parser for an extension, if any.
    pub fn parser_for_extension(&self, ext: &str) -> Option<&dyn LanguageParser> {
        self.parsers
            .iter()
            .find(|p| p.file_extensions().contains(&ext))
            .map(|p| p.as_ref())
    }

    /// Whether a dedicated (non-fallback) parser exists for this extension.
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.parsers
            .iter()
            .any(|p| p.file_extensions().contains(&ext))
    }

    /// All extensions with a dedicated parser.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|p| p.file_extensions().iter().copied())
            .collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_parser_per_extension() {
        let registry = ParserRegistry::new();
        for ext in [
            "ts", "tsx", "js", "py", "rs", "go", "java", "c", "cpp", "cs", "rb", "php", "swift",
            "kt",
        ] {
            assert!(registry.supports_extension(ext), "missing parser for {ext}");
        }
        assert!(!registry.supports_extension("xyz"));
    }

    #[test]
    fn unknown_extension_uses_fallback() {
        let registry = ParserRegistry::new();
        let parsed = registry.parse_file("script.zig", "fn add(a, b) {\n    return a + b;\n}\n");
        assert_eq!(parsed.symbols.len(), 1);
        assert_eq!(parsed.symbols[0].name, "add");
    }

    #[test]
    fn imports_precede_symbols() {
        let registry = ParserRegistry::new();
        let parsed = registry.parse_file(
            "mod.py",
            "import os\n\ndef run():\n    pass\n",
        );
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.symbols.len(), 1);
    }
}
