//! Deterministic embedders for fixtures and precomputed vectors.
//!
//! Real embeddings come from a sentence-transformer (see `SbertEmbedder`
//! behind the `sbert` feature). For tests, benchmarks, and pipelines that
//! already hold vectors on disk, a lookup table does the same job without
//! loading a model.

use std::collections::HashMap;

use crate::{Embedder, Error, Result};

/// Embedder that maps known strings to fixed vectors.
///
/// Unknown strings are an error rather than a silent zero vector: a missing
/// entry almost always means the table and the dataset drifted apart.
///
/// ```rust
/// use fewshot::{Embedder, LookupEmbedder};
///
/// let embedder = LookupEmbedder::new([("sports", vec![1.0, 0.0]), ("politics", vec![0.0, 1.0])]).unwrap();
/// let vectors = embedder.embed(&["politics", "sports"]).unwrap();
/// assert_eq!(vectors, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookupEmbedder {
    table: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl LookupEmbedder {
    /// Build a lookup embedder, checking every vector has the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Embedding`] if two entries disagree on dimension.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut table = HashMap::new();
        let mut dim = None;

        for (key, vector) in entries {
            let key = key.into();
            match dim {
                None => dim = Some(vector.len()),
                Some(d) if d != vector.len() => {
                    return Err(Error::Embedding(format!(
                        "dimension mismatch for {key:?}: expected {d}, got {}",
                        vector.len()
                    )));
                }
                Some(_) => {}
            }
            table.insert(key, vector);
        }

        Ok(Self {
            table,
            dim: dim.unwrap_or(0),
        })
    }

    /// Dimension shared by every stored vector (0 when empty).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Embedder for LookupEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| {
                self.table
                    .get(*text)
                    .cloned()
                    .ok_or_else(|| Error::Embedding(format!("no embedding for {text:?}")))
            })
            .collect()
    }
}
