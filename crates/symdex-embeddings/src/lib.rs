//! symdex-embeddings: Pluggable embedding providers for Symdex.
//!
//! Supported backends:
//! - **Ollama**: local Ollama server with any embedding model
//! - **OpenAI**: OpenAI API or any compatible endpoint (Together, Azure, etc.)
//! - **None**: a null provider that disables semantic scoring entirely
//!
//! Providers never surface transport errors to callers. A failed embed
//! returns `None` and the index simply degrades to keyword-only search.

pub mod ollama;
pub mod openai;

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use symdex_core::{EmbeddingProvider, SymdexError};

/// Default LRU cache capacity.
pub const CACHE_CAPACITY: usize = 10_000;

// ── Null Provider ─────────────────────────────────────────────────────────

/// Provider that embeds nothing. Used when semantic search is disabled.
pub struct NullProvider;

impl EmbeddingProvider for NullProvider {
    fn dimensions(&self) -> usize {
        0
    }

    fn embed(&self, _text: &str) -> Option<Vec<f32>> {
        None
    }

    fn name(&self) -> &str {
        "none"
    }
}

// ── Cached Provider Wrapper ───────────────────────────────────────────────

/// Wraps any `EmbeddingProvider` with an LRU cache.
///
/// Only successful embeds are cached. A `None` result is not remembered,
/// so a provider that recovers (e.g. Ollama comes back up) starts serving
/// vectors again without a restart.
pub struct CachedProvider {
    inner: Box<dyn EmbeddingProvider>,
    cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl CachedProvider {
    pub fn new(inner: Box<dyn EmbeddingProvider>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
        }
    }

    /// Cache statistics: (current_size, capacity).
    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.lock().unwrap();
        (cache.len(), cache.cap().into())
    }
}

impl EmbeddingProvider for CachedProvider {
    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(text) {
                return Some(cached.clone());
            }
        }
        let embedding = self.inner.embed(text)?;
        {
            let mut cache = self.cache.lock().unwrap();
            cache.put(text.to_string(), embedding.clone());
        }
        Some(embedding)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ── Factory ───────────────────────────────────────────────────────────────

/// Create an embedding provider from environment variables.
///
/// | Variable | Values | Default |
/// |----------|--------|---------|
/// | `SYMDEX_EMBED_PROVIDER` | `ollama`, `openai`, `none` | `none` |
/// | `SYMDEX_EMBED_MODEL` | model name | provider default |
/// | `SYMDEX_EMBED_URL` | base URL | provider default |
/// | `SYMDEX_EMBED_API_KEY` | API key | also reads `OPENAI_API_KEY` |
/// | `SYMDEX_EMBED_DIMENSIONS` | integer | `768` |
pub fn from_env() -> Result<Box<dyn EmbeddingProvider>, SymdexError> {
    let provider = std::env::var("SYMDEX_EMBED_PROVIDER")
        .unwrap_or_else(|_| "none".to_string())
        .to_lowercase();
    let dimensions: usize = std::env::var("SYMDEX_EMBED_DIMENSIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(768);

    match provider.as_str() {
        "ollama" => {
            let base_url = std::env::var("SYMDEX_EMBED_URL")
                .unwrap_or_else(|_| ollama::DEFAULT_BASE_URL.to_string());
            let model = std::env::var("SYMDEX_EMBED_MODEL")
                .unwrap_or_else(|_| ollama::DEFAULT_MODEL.to_string());
            let inner = Box::new(ollama::OllamaProvider::new(&base_url, &model, dimensions));
            Ok(Box::new(CachedProvider::new(inner, CACHE_CAPACITY)))
        }
        "openai" => {
            let api_key = std::env::var("SYMDEX_EMBED_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .map_err(|_| {
                    SymdexError::Embedding(
                        "SYMDEX_EMBED_API_KEY or OPENAI_API_KEY required for OpenAI embeddings"
                            .into(),
                    )
                })?;
            let model = std::env::var("SYMDEX_EMBED_MODEL")
                .unwrap_or_else(|_| openai::DEFAULT_MODEL.to_string());
            let base_url = std::env::var("SYMDEX_EMBED_URL").ok();
            let inner = Box::new(openai::OpenAIProvider::new(
                &api_key,
                &model,
                dimensions,
                base_url.as_deref(),
            ));
            Ok(Box::new(CachedProvider::new(inner, CACHE_CAPACITY)))
        }
        "none" | "" => Ok(Box::new(NullProvider)),
        other => Err(SymdexError::Embedding(format!(
            "Unknown embedding provider: '{}'. Use 'ollama', 'openai', or 'none'.",
            other
        ))),
    }
}
