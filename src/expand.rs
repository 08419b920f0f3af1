//! Label expansion: one label embedding per example.
//!
//! ## The Problem
//!
//! Supervised few-shot training pairs every example embedding with the
//! embedding of its label. Passing the label string through the model once
//! per example is slow and repetitive; most datasets have only a handful of
//! categories.
//!
//! ## The Remap
//!
//! The category vectors are already at the tail of the embedding cache, so
//! expansion is an index lookup:
//!
//! ```text
//! cache:      [E0, E1, E2, C0, C1]     N = 3, K = 2
//! categories: tail K -> [C0, C1]
//! labels:     [0, 1, 0]
//!
//! label_embeddings = [C0, C1, C0]
//! ```
//!
//! The cache itself is left intact (still `N + K` vectors). Use
//! [`Dataset::example_embeddings`] for the example-only view.

use tracing::debug;

use crate::{Dataset, Error, Result};

/// Build `label_embeddings[i] = category_embeddings[labels[i]]` for every example.
///
/// Writes the result into the dataset and returns it for chaining. Every label
/// is checked before anything is written, so a failed call leaves the dataset
/// unchanged.
///
/// # Errors
///
/// - [`Error::EmbeddingsNotComputed`] if the dataset has no embeddings.
/// - [`Error::LabelOutOfRange`] for the first label `>= K`.
///
/// A computed cache always holds `N + K` vectors, so the category block is
/// always present here.
///
/// # Example
///
/// ```rust
/// use fewshot::{expand_labels, Dataset, LookupEmbedder};
///
/// let mut dataset = Dataset::new(
///     vec!["a".into(), "b".into(), "c".into()],
///     vec![0, 1, 0],
///     vec!["sports".into(), "politics".into()],
/// )
/// .unwrap();
/// let embedder = LookupEmbedder::new([
///     ("a", vec![1.0, 0.0]),
///     ("b", vec![2.0, 0.0]),
///     ("c", vec![3.0, 0.0]),
///     ("sports", vec![9.0, 9.0]),
///     ("politics", vec![8.0, 8.0]),
/// ])
/// .unwrap();
/// dataset.calc_sbert_embeddings(&embedder).unwrap();
///
/// let dataset = expand_labels(&mut dataset).unwrap();
/// assert_eq!(
///     dataset.label_embeddings().unwrap(),
///     &[vec![9.0, 9.0], vec![8.0, 8.0], vec![9.0, 9.0]]
/// );
/// ```
pub fn expand_labels(dataset: &mut Dataset) -> Result<&mut Dataset> {
    let category_embeddings = dataset.category_embeddings()?;
    let num_categories = category_embeddings.len();

    let label_embeddings = dataset
        .labels()
        .iter()
        .enumerate()
        .map(|(example, &label)| {
            category_embeddings
                .get(label)
                .cloned()
                .ok_or(Error::LabelOutOfRange {
                    example,
                    label,
                    num_categories,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        examples = label_embeddings.len(),
        categories = num_categories,
        "expanded label embeddings"
    );

    dataset.label_embeddings = Some(label_embeddings);
    Ok(dataset)
}
