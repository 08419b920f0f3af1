//! # fewshot
//!
//! Dataset plumbing for few-shot text classification.
//!
//! ## The Problem
//!
//! Few-shot classifiers compare an example's embedding against the embedding
//! of each category name. That needs three things kept in lockstep:
//!
//! - the raw examples and their integer labels
//! - the category names the labels index into
//! - one vector per example and one per category, from the same model
//!
//! Getting the bookkeeping wrong is silent: an off-by-one between the example
//! block and the category block yields plausible-looking but wrong vectors.
//!
//! ## Pipeline
//!
//! ```text
//! Table (text, category)
//!    | select_subsample        at most s rows per category, seeded
//!    v
//! Subsample -> Dataset         labels = sorted-category codes
//!    | calc_sbert_embeddings   embed(examples ++ categories)
//!    v
//! Dataset [E0..En-1, C0..Ck-1]
//!    | expand_labels           label_embeddings[i] = C[labels[i]]
//!    v
//! Dataset + label_embeddings
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fewshot::{expand_labels, Dataset, LookupEmbedder};
//!
//! let mut dataset = Dataset::new(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     vec![0, 1, 0],
//!     vec!["sports".into(), "politics".into()],
//! )?;
//!
//! let embedder = LookupEmbedder::new([
//!     ("a", vec![1.0, 0.0]),
//!     ("b", vec![2.0, 0.0]),
//!     ("c", vec![3.0, 0.0]),
//!     ("sports", vec![9.0, 9.0]),
//!     ("politics", vec![8.0, 8.0]),
//! ])?;
//! dataset.calc_sbert_embeddings(&embedder)?;
//!
//! let dataset = expand_labels(&mut dataset)?;
//! assert_eq!(dataset.label_embeddings().unwrap()[1], vec![8.0, 8.0]);
//! # Ok::<(), fewshot::Error>(())
//! ```
//!
//! ## Sentence-Transformer Embeddings (requires `sbert` feature)
//!
//! ```rust,ignore
//! use fewshot::SbertEmbedder;
//!
//! let embedder = SbertEmbedder::new()?; // all-MiniLM-L6-v2
//! dataset.calc_sbert_embeddings(&embedder)?;
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for computation, `warn` for the
//! compute-on-read fallback) and never installs a subscriber.

mod dataset;
mod embedder;
mod error;
mod expand;
mod sample;
mod table;

#[cfg(feature = "sbert")]
mod sbert;

pub use dataset::{Dataset, EmbeddingState};
pub use embedder::LookupEmbedder;
pub use error::{Error, Result};
pub use expand::expand_labels;
pub use sample::{select_subsample, StratifiedSampler, Subsample, DEFAULT_SEED};
pub use table::Table;

#[cfg(feature = "sbert")]
pub use sbert::SbertEmbedder;

/// A text embedding model.
///
/// Implementations map each input string to a fixed-size vector, returning
/// exactly one vector per input, in input order. Loading the model (and its
/// tokenizer) happens when the implementation is constructed.
///
/// ```rust
/// use fewshot::{Embedder, Result};
///
/// struct Length;
///
/// impl Embedder for Length {
///     fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
///         Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
///     }
/// }
///
/// let vectors = Length.embed(&["hi", "there"]).unwrap();
/// assert_eq!(vectors, vec![vec![2.0], vec![5.0]]);
/// ```
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Embedding`] on model failure.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed(texts)
    }
}
