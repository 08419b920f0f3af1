//! Sentence-transformer embeddings via fastembed.
//!
//! ## Model and Tokenizer
//!
//! A sentence-transformer needs two pieces: the network weights and the
//! tokenizer that turns text into its input ids. fastembed downloads and
//! caches both on first use, so "load the model and tokenizer" collapses to
//! constructing a [`SbertEmbedder`]. After that, [`Embedder::embed`] runs
//! inference on any batch of strings.
//!
//! ```text
//! SbertEmbedder::new()          -> fetch weights + tokenizer (once)
//! embedder.embed(&[texts...])   -> [[f32; 384], ...]
//! ```
//!
//! ## Cost
//!
//! Construction is the expensive step (download, ONNX session setup).
//! Build one embedder and reuse it across datasets.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::debug;

use crate::{Embedder, Error, Result};

/// Embedder backed by a fastembed sentence-transformer.
///
/// ## Example
///
/// ```rust,ignore
/// use fewshot::{Dataset, SbertEmbedder};
///
/// // all-MiniLM-L6-v2, 384 dimensions
/// let embedder = SbertEmbedder::new()?;
///
/// let mut dataset = Dataset::new(examples, labels, categories)?;
/// dataset.calc_sbert_embeddings(&embedder)?;
/// ```
pub struct SbertEmbedder {
    model: TextEmbedding,
    model_name: EmbeddingModel,
    batch_size: Option<usize>,
}

impl SbertEmbedder {
    /// Load the default sentence-transformer (all-MiniLM-L6-v2).
    ///
    /// # Errors
    ///
    /// Returns an error if the model or tokenizer fails to load.
    pub fn new() -> Result<Self> {
        Self::with_model(EmbeddingModel::AllMiniLML6V2)
    }

    /// Load a specific fastembed model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or tokenizer fails to load.
    pub fn with_model(model_name: EmbeddingModel) -> Result<Self> {
        debug!(model = ?model_name, "loading sentence-transformer");
        let model = TextEmbedding::try_new(InitOptions::new(model_name.clone()))
            .map_err(|e| Error::Embedding(e.to_string()))?;

        Ok(Self {
            model,
            model_name,
            batch_size: None,
        })
    }

    /// Set the inference batch size (fastembed's default when unset).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size.max(1));
        self
    }
}

impl Embedder for SbertEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        self.model
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

impl std::fmt::Debug for SbertEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SbertEmbedder")
            .field("model", &self.model_name)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
