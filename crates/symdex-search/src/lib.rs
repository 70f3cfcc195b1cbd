//! symdex-search: cosine similarity and the hybrid search primitive.
//!
//! The hybrid algorithm is generic over any collection of items with a
//! stable string id. Callers supply a keyword-scoring closure and an
//! embedding cache; the algorithm runs a keyword pass, lazily fills
//! missing embeddings, runs a semantic pass against the query vector,
//! and merges both passes into one ranked list.

use std::collections::HashMap;
use symdex_core::EmbeddingProvider;

/// Minimum cosine similarity for a semantic match. Items at or below
/// this value are excluded from the semantic pass.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Cosine similarity of two vectors.
///
/// Returns exactly 0.0 (never NaN) when the vectors differ in length or
/// either has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Outcome of a keyword-scoring function for one item.
#[derive(Debug, Clone, Default)]
pub struct KeywordScore {
    pub score: f32,
    pub reasons: Vec<String>,
}

impl KeywordScore {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(score: f32, reason: impl Into<String>) -> Self {
        Self {
            score,
            reasons: vec![reason.into()],
        }
    }
}

/// One ranked result from a hybrid search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub reasons: Vec<String>,
}

/// Read-through store for per-item embeddings.
///
/// `get` returns the cached vector if present. `put` persists a vector
/// computed during the lazy fill so later queries skip the provider.
pub trait EmbeddingCache {
    fn get(&self, id: &str) -> Option<Vec<f32>>;
    fn put(&mut self, id: &str, embedding: Vec<f32>);
}

/// Trivial map-backed [`EmbeddingCache`].
impl EmbeddingCache for HashMap<String, Vec<f32>> {
    fn get(&self, id: &str) -> Option<Vec<f32>> {
        HashMap::get(self, id).cloned()
    }

    fn put(&mut self, id: &str, embedding: Vec<f32>) {
        self.insert(id.to_string(), embedding);
    }
}

/// Hybrid keyword + semantic search over `items`.
///
/// Each item is `(id, embeddable_text)`. The keyword pass keeps items
/// whose `keyword_score` is positive. Items missing a cached embedding
/// are embedded and persisted before the semantic pass, so the first
/// query after a mutation pays the fill cost and later queries do not.
/// The semantic pass keeps items strictly above `threshold`. An id hit
/// by both passes has its scores summed and reason lists concatenated;
/// the result is sorted by descending score.
///
/// A provider returning `None` for the query (or any item) degrades the
/// search to keyword-only for the affected ids. That is expected, not
/// an error.
pub fn hybrid_search<F>(
    items: &[(String, String)],
    query: &str,
    keyword_score: F,
    cache: &mut dyn EmbeddingCache,
    provider: &dyn EmbeddingProvider,
    threshold: f32,
) -> Vec<SearchHit>
where
    F: Fn(&str) -> KeywordScore,
{
    let mut merged: HashMap<String, SearchHit> = HashMap::new();

    for (id, _) in items {
        let kw = keyword_score(id);
        if kw.score > 0.0 {
            merged.insert(
                id.clone(),
                SearchHit {
                    id: id.clone(),
                    score: kw.score,
                    reasons: kw.reasons,
                },
            );
        }
    }

    // Lazy fill before embedding the query, so a degraded provider
    // costs one extra call at most per missing item.
    for (id, text) in items {
        if cache.get(id).is_none() {
            if let Some(embedding) = provider.embed(text) {
                cache.put(id, embedding);
            }
        }
    }

    if let Some(query_embedding) = provider.embed(query) {
        for (id, _) in items {
            let Some(item_embedding) = cache.get(id) else {
                continue;
            };
            let similarity = cosine_similarity(&query_embedding, &item_embedding);
            if similarity <= threshold {
                continue;
            }
            let reason = format!("semantic similarity {similarity:.2}");
            merged
                .entry(id.clone())
                .and_modify(|hit| {
                    hit.score += similarity;
                    hit.reasons.push(reason.clone());
                })
                .or_insert_with(|| SearchHit {
                    id: id.clone(),
                    score: similarity,
                    reasons: vec![reason],
                });
        }
    } else {
        tracing::debug!("query embedding unavailable, keyword-only results");
    }

    let mut hits: Vec<SearchHit> = merged.into_values().collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits
}
