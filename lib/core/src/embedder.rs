//! Text embedding
//!
//! The catalogue index never computes embeddings itself. It calls an injected
//! [`TextEmbedder`] once per catalogue entry at load time and once per query.
//! Implementations must be deterministic and return vectors of one fixed
//! dimension, otherwise the index cannot guarantee stable rankings.
//!
//! [`HashingEmbedder`] is a model-free default: character trigrams and whole
//! words are hashed into a fixed number of buckets and the result is
//! L2-normalized.

use crate::error::EmbeddingError;
use crate::vector::Vector;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Default dimension for hashed text embeddings
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Converts text into a fixed-dimension vector.
pub trait TextEmbedder: Send + Sync {
    /// Dimension of every vector returned by [`embed`](TextEmbedder::embed).
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Vector, EmbeddingError>;
}

/// Deterministic feature-hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing `dim`-dimensional vectors.
    ///
    /// A zero dimension is bumped to one.
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl TextEmbedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vector, EmbeddingError> {
        let mut buckets = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            buckets[bucket_of(&trigram, self.dim)] += 1.0;
        }

        // Words contribute more than trigrams
        for word in normalized.split_whitespace() {
            buckets[bucket_of(word, self.dim)] += 2.0;
        }

        Ok(Vector::new(buckets).normalized())
    }
}

fn bucket_of(token: &str, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    (hasher.finish() % dim as u64) as usize
}

fn trigrams(s: &str) -> BTreeSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    chars.windows(3).map(|w| w.iter().collect::<String>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_dimension() {
        let embedder = HashingEmbedder::new(64);
        assert_eq!(embedder.dimension(), 64);
        assert_eq!(embedder.embed("confidential information").unwrap().dim(), 64);
        assert_eq!(embedder.embed("").unwrap().dim(), 64);
    }

    #[test]
    fn test_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("The Receiving Party shall not disclose").unwrap();
        let b = embedder.embed("The Receiving Party shall not disclose").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_length() {
        let embedder = HashingEmbedder::default();
        let v = embedder.embed("governing law of the state of delaware").unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_similar_text_is_closer() {
        let embedder = HashingEmbedder::default();
        let anchor = embedder.embed("confidential information disclosure").unwrap();
        let near = embedder.embed("disclosure of confidential information").unwrap();
        let far = embedder.embed("payment terms net thirty days").unwrap();
        assert!(anchor.squared_l2_distance(&near) < anchor.squared_l2_distance(&far));
    }

    #[test]
    fn test_zero_dimension_bumped() {
        assert_eq!(HashingEmbedder::new(0).dimension(), 1);
    }
}
