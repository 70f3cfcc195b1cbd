//! symdex-core: Shared types, traits, and errors for the symdex indexing engine.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
