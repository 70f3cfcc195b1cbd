// ── Traits ──────────────────────────────────────────────────────────────────

/// Embedding generator collaborator.
///
/// Implementations must never panic or surface transport errors to callers:
/// `None` is the degraded-mode result and simply excludes an item from
/// semantic search (it stays keyword-searchable).
pub trait EmbeddingProvider: Send + Sync {
    /// Embedding vector width. Every `Some` result has exactly this length.
    fn dimensions(&self) -> usize;

    /// Embed a single text. `None` means generation failed or is disabled.
    fn embed(&self, text: &str) -> Option<Vec<f32>>;

    /// Provider name for display/logging.
    fn name(&self) -> &str;
}
