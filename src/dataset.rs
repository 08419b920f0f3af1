//! The few-shot dataset container.
//!
//! ## Layout of the Embedding Cache
//!
//! Examples and category names are embedded in a single model call, with the
//! categories appended after every example:
//!
//! ```text
//! examples:   ["a", "b", "c"]          N = 3
//! categories: ["sports", "politics"]   K = 2
//!
//! embed(["a", "b", "c", "sports", "politics"])
//!        |-- examples --|-- categories --|
//! cache: [E0, E1, E2,    C0,   C1]         len = N + K
//! ```
//!
//! Category names are few (usually 4-10), so embedding them once alongside
//! the examples is far cheaper than embedding a label string per example.
//! [`expand_labels`](crate::expand_labels) later fans the `C` block out
//! into one label vector per example.
//!
//! ## States
//!
//! The cache is either [`EmbeddingState::Uninitialized`] or
//! [`EmbeddingState::Computed`]. Reading an uninitialized cache through
//! [`Dataset::embeddings`] is an error; [`Dataset::embeddings_or_compute`]
//! keeps the older compute-on-first-read behavior and logs a warning.

use tracing::{debug, warn};

use crate::{Embedder, Error, Result};

/// Whether a dataset's embeddings have been computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EmbeddingState {
    /// No embeddings yet.
    #[default]
    Uninitialized,
    /// Example embeddings followed by category embeddings (`N + K` vectors).
    Computed(Vec<Vec<f32>>),
}

impl EmbeddingState {
    /// The cached vectors, if computed.
    #[must_use]
    pub fn as_computed(&self) -> Option<&[Vec<f32>]> {
        match self {
            Self::Uninitialized => None,
            Self::Computed(embeddings) => Some(embeddings),
        }
    }
}

/// Labeled text examples with their category names and embeddings.
///
/// ## Example
///
/// ```rust
/// use fewshot::{Dataset, LookupEmbedder};
///
/// let mut dataset = Dataset::new(
///     vec!["goal!".into(), "vote".into()],
///     vec![0, 1],
///     vec!["sports".into(), "politics".into()],
/// )
/// .unwrap();
///
/// assert!(dataset.embeddings().is_err());
///
/// let embedder = LookupEmbedder::new([
///     ("goal!", vec![1.0, 0.0]),
///     ("vote", vec![0.0, 1.0]),
///     ("sports", vec![0.9, 0.1]),
///     ("politics", vec![0.1, 0.9]),
/// ])
/// .unwrap();
/// dataset.calc_sbert_embeddings(&embedder).unwrap();
///
/// assert_eq!(dataset.embeddings().unwrap().len(), 4);
/// assert_eq!(dataset.category_embeddings().unwrap()[1], vec![0.1, 0.9]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    examples: Vec<String>,
    labels: Vec<usize>,
    categories: Vec<String>,
    embeddings: EmbeddingState,
    pub(crate) label_embeddings: Option<Vec<Vec<f32>>>,
}

impl Dataset {
    /// Create a dataset with no embeddings.
    ///
    /// Labels are not range-checked here; [`expand_labels`](crate::expand_labels)
    /// reports the first label that does not index into `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `examples` and `labels` differ in length.
    pub fn new(examples: Vec<String>, labels: Vec<usize>, categories: Vec<String>) -> Result<Self> {
        if examples.len() != labels.len() {
            return Err(Error::LengthMismatch {
                examples: examples.len(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            examples,
            labels,
            categories,
            embeddings: EmbeddingState::Uninitialized,
            label_embeddings: None,
        })
    }

    /// Embed every example, then every category, in one model call and cache the result.
    ///
    /// Recomputes on every call. Any previously expanded label embeddings are
    /// dropped since they were derived from the old cache.
    ///
    /// # Errors
    ///
    /// Propagates the embedder's error, or returns
    /// [`Error::EmbeddingCountMismatch`] if it returns the wrong number of vectors
    /// and [`Error::RaggedEmbeddings`] if the vectors differ in dimension.
    pub fn calc_sbert_embeddings<E: Embedder + ?Sized>(&mut self, embedder: &E) -> Result<()> {
        let texts: Vec<&str> = self
            .examples
            .iter()
            .chain(self.categories.iter())
            .map(String::as_str)
            .collect();

        let embeddings = embedder.embed(&texts)?;
        if embeddings.len() != texts.len() {
            return Err(Error::EmbeddingCountMismatch {
                expected: texts.len(),
                actual: embeddings.len(),
            });
        }
        if let Some(first) = embeddings.first() {
            let expected = first.len();
            if let Some((index, ragged)) = embeddings
                .iter()
                .enumerate()
                .find(|(_, v)| v.len() != expected)
            {
                return Err(Error::RaggedEmbeddings {
                    index,
                    expected,
                    actual: ragged.len(),
                });
            }
        }

        debug!(
            texts = texts.len(),
            dim = embeddings.first().map_or(0, Vec::len),
            "computed dataset embeddings"
        );

        self.embeddings = EmbeddingState::Computed(embeddings);
        self.label_embeddings = None;
        Ok(())
    }

    /// The cached embeddings (`N` example vectors, then `K` category vectors).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmbeddingsNotComputed`] before [`calc_sbert_embeddings`](Self::calc_sbert_embeddings).
    pub fn embeddings(&self) -> Result<&[Vec<f32>]> {
        self.embeddings
            .as_computed()
            .ok_or(Error::EmbeddingsNotComputed)
    }

    /// The cached embeddings, computing them first if needed.
    ///
    /// Computing here is a fallback: it logs a warning so callers move to an
    /// explicit [`calc_sbert_embeddings`](Self::calc_sbert_embeddings).
    ///
    /// # Errors
    ///
    /// Propagates any error from the implicit computation.
    pub fn embeddings_or_compute<E: Embedder + ?Sized>(
        &mut self,
        embedder: &E,
    ) -> Result<&[Vec<f32>]> {
        if !self.is_embedded() {
            warn!("embeddings read before calc_sbert_embeddings(); computing now, this will become an error");
            self.calc_sbert_embeddings(embedder)?;
        }
        self.embeddings()
    }

    /// Current state of the embedding cache.
    #[must_use]
    pub fn state(&self) -> &EmbeddingState {
        &self.embeddings
    }

    /// Whether embeddings have been computed.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self.embeddings, EmbeddingState::Computed(_))
    }

    /// The example embeddings only (first `N` cached vectors).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmbeddingsNotComputed`] before computation.
    pub fn example_embeddings(&self) -> Result<&[Vec<f32>]> {
        let embeddings = self.embeddings()?;
        embeddings
            .get(..self.examples.len())
            .ok_or(Error::NotEnoughEmbeddings {
                expected: self.examples.len(),
                actual: embeddings.len(),
            })
    }

    /// The category embeddings only (last `K` cached vectors), in category order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmbeddingsNotComputed`] before computation. The cache
    /// always holds `N + K` vectors once computed, so [`Error::NotEnoughEmbeddings`]
    /// is a guard only and is not produced through the public API.
    pub fn category_embeddings(&self) -> Result<&[Vec<f32>]> {
        let embeddings = self.embeddings()?;
        let k = self.categories.len();
        if embeddings.len() < k {
            return Err(Error::NotEnoughEmbeddings {
                expected: k,
                actual: embeddings.len(),
            });
        }
        Ok(&embeddings[embeddings.len() - k..])
    }

    /// One label vector per example, once [`expand_labels`](crate::expand_labels) has run.
    #[must_use]
    pub fn label_embeddings(&self) -> Option<&[Vec<f32>]> {
        self.label_embeddings.as_deref()
    }

    /// Dimension of the cached vectors, if computed and non-empty.
    #[must_use]
    pub fn embedding_dim(&self) -> Option<usize> {
        self.embeddings
            .as_computed()
            .and_then(|e| e.first())
            .map(Vec::len)
    }

    /// The example texts.
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// The label of each example (an index into [`categories`](Self::categories)).
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// The category names.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category name of example `i`, if both indices are in range.
    #[must_use]
    pub fn category_of(&self, i: usize) -> Option<&str> {
        self.labels
            .get(i)
            .and_then(|&label| self.categories.get(label))
            .map(String::as_str)
    }

    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the dataset has no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of categories.
    #[must_use]
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }
}
