//! symdex-index: the indexing engine.
//!
//! Scans a source tree, extracts symbols and imports through the parser
//! registry, maintains the in-memory [`CodeIndex`], reconciles it
//! incrementally against the tree, persists it as a single binary
//! artifact, and serves exact, import-graph, and hybrid semantic queries
//! over it.

pub mod builder;
pub mod index;
pub mod lock;
pub mod persist;
pub mod queries;
pub mod scanner;
pub mod stats;
pub mod sync;

pub use builder::{build, IndexReport};
pub use index::CodeIndex;
pub use lock::LockGuard;
pub use persist::{artifact_path, load, save};
pub use queries::{file_imports, find_importers, search_symbols, semantic_search};
pub use scanner::scan;
pub use stats::{files_by_symbol_count, kind_counts};
pub use sync::{sync, SyncReport};
