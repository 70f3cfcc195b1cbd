use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SymdexError;

/// Version tag written into every persisted index artifact.
///
/// Bumped whenever the serialized shape of [`Symbol`], [`Import`], or the
/// index maps changes incompatibly; loaders treat a mismatch as "no index".
pub const FORMAT_VERSION: u32 = 2;

// ── Symbols ─────────────────────────────────────────────────────────────────

/// A declared entity extracted from a source file.
///
/// Identity is the composite (file, name, start_line); symbols carry no
/// global id. A file's symbols are replaced wholesale on re-parse, never
/// diffed entry by entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declared name (e.g., "parseConfig").
    pub name: String,
    /// What kind of declaration this is.
    pub kind: SymbolKind,
    /// 1-based line of the declaration.
    pub start_line: usize,
    /// 1-based line of the end of the declaration body (best effort).
    pub end_line: usize,
    /// Whether the symbol is visible outside its file/module, derived from
    /// per-language convention (capitalization, `pub`, `export`, ...).
    pub is_exported: bool,
    /// Free-text parameter/generic description, when the pattern captured one.
    pub signature: Option<String>,
    /// Absolute path of the declaring file.
    pub file: String,
}

impl Symbol {
    /// Composite key under which this symbol's embedding is stored.
    pub fn embedding_key(&self) -> String {
        embedding_key(&self.file, &self.name, self.start_line)
    }

    /// Text handed to the embedding generator for this symbol.
    pub fn embedding_text(&self) -> String {
        match &self.signature {
            Some(sig) => format!("{} {}", self.name, sig),
            None => self.name.clone(),
        }
    }
}

/// Build the composite embedding key `file:name:start_line`.
pub fn embedding_key(file: &str, name: &str, start_line: usize) -> String {
    format!("{file}:{name}:{start_line}")
}

/// The closed set of symbol kinds symdex recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Type,
    Interface,
    Enum,
    Const,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Type => write!(f, "type"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::Const => write!(f, "const"),
        }
    }
}

impl std::str::FromStr for SymbolKind {
    type Err = SymdexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function" => Ok(Self::Function),
            "class" => Ok(Self::Class),
            "type" => Ok(Self::Type),
            "interface" => Ok(Self::Interface),
            "enum" => Ok(Self::Enum),
            "const" => Ok(Self::Const),
            _ => Err(SymdexError::InvalidSymbolKind(s.to_string())),
        }
    }
}

// ── Imports ─────────────────────────────────────────────────────────────────

/// One import/use statement recorded for a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    /// Module specifier exactly as written in the source.
    pub source: String,
    /// Names pulled in by this statement, in declaration order.
    pub imported: Vec<String>,
    /// Symbols that reference this import. Reserved: no extractor populates
    /// it today, but the field stays in the artifact for compatibility.
    #[serde(default)]
    pub used_by: Vec<String>,
}

impl Import {
    pub fn new(source: impl Into<String>, imported: Vec<String>) -> Self {
        Self {
            source: source.into(),
            imported,
            used_by: Vec::new(),
        }
    }
}

// ── Parse output ────────────────────────────────────────────────────────────

/// What a language parser extracts from one file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub symbols: Vec<Symbol>,
    pub imports: Vec<Import>,
}

// ── Index metadata ──────────────────────────────────────────────────────────

/// Aggregate metadata carried by the index.
///
/// `file_count` and `symbol_count` are recomputed from the live maps after
/// every mutation rather than tracked incrementally, so they cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub format_version: u32,
    /// Timestamp of the last successful build or sync. Only moves forward.
    pub indexed_at: DateTime<Utc>,
    /// Number of files with at least one symbol.
    pub file_count: usize,
    /// Total symbols across all files.
    pub symbol_count: usize,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            indexed_at: DateTime::<Utc>::UNIX_EPOCH,
            file_count: 0,
            symbol_count: 0,
        }
    }
}
