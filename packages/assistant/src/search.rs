use serde::Serialize;

use crate::client::Embedder;
use crate::error::{AssistantError, Result};

/// A clause with its similarity to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredClause {
    pub clause: String,
    pub score: f32,
}

/// In-memory nearest-neighbour search over clause embeddings.
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    clauses: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl SemanticIndex {
    /// Create an index from clauses and their precomputed embeddings.
    pub fn new(clauses: Vec<String>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if clauses.len() != embeddings.len() {
            return Err(AssistantError::EmbeddingCount {
                expected: clauses.len(),
                actual: embeddings.len(),
            });
        }
        Ok(Self { clauses, embeddings })
    }

    /// Embed `clauses` with `embedder` and index them.
    pub async fn build(clauses: Vec<String>, embedder: &dyn Embedder) -> Result<Self> {
        let embeddings = embedder.embed(&clauses).await?;
        Self::new(clauses, embeddings)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The `top_k` clauses most similar to `embedding`, best first.
    ///
    /// Equal scores keep index order.
    pub fn query(&self, embedding: &[f32], top_k: usize) -> Vec<ScoredClause> {
        let mut scored: Vec<ScoredClause> = self
            .clauses
            .iter()
            .zip(&self.embeddings)
            .map(|(clause, candidate)| ScoredClause {
                clause: clause.clone(),
                score: cosine_similarity(embedding, candidate),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

/// Cosine similarity of two vectors; zero when either has no length.
///
/// Vectors of different dimension are compared over their common prefix.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f32, 0.0_f32, 0.0_f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockEmbedder;
    use pretty_assertions::assert_eq;

    fn clauses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_query_orders_by_similarity() {
        let index = SemanticIndex::new(
            clauses(&["a", "b", "c"]),
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
        )
        .unwrap();
        let hits: Vec<String> = index.query(&[1.0, 0.0], 2).into_iter().map(|h| h.clause).collect();
        assert_eq!(hits, vec!["b", "c"]);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let index = SemanticIndex::new(clauses(&["first", "second"]), vec![vec![1.0], vec![2.0]]).unwrap();
        let hits: Vec<String> = index.query(&[3.0], 5).into_iter().map(|h| h.clause).collect();
        assert_eq!(hits, vec!["first", "second"]);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(matches!(
            SemanticIndex::new(clauses(&["a"]), Vec::new()),
            Err(AssistantError::EmbeddingCount { expected: 1, actual: 0 })
        ));
    }

    #[tokio::test]
    async fn test_build_with_embedder() {
        let embedder = MockEmbedder::new(&["fee", "terminate"]);
        let index = SemanticIndex::build(
            clauses(&["Fees are due monthly.", "Either party may terminate."]),
            &embedder,
        )
        .await
        .unwrap();
        assert_eq!(index.len(), 2);
        let best = &index.query(&[0.0, 1.0], 1)[0];
        assert_eq!(best.clause, "Either party may terminate.");
    }
}
