/// Unified error type for symdex.
#[derive(Debug, thiserror::Error)]
pub enum SymdexError {
    #[error("Scan error: {0}")]
    Scan(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Persistence error: {0}")]
    Persist(String),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid symbol kind: {0}")]
    InvalidSymbolKind(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
