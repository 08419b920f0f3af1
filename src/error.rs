//! Error types for fewshot.

/// Errors that can occur while building, embedding, expanding, or sampling
/// a dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Embeddings were read before `calc_sbert_embeddings` ran.
    #[error("embeddings not computed: run Dataset::calc_sbert_embeddings() first")]
    EmbeddingsNotComputed,

    /// An example's label does not index into the category list.
    #[error("label {label} of example {example} is out of range for {num_categories} categories")]
    LabelOutOfRange {
        /// Position of the offending example.
        example: usize,
        /// The label it carries.
        label: usize,
        /// Number of categories in the dataset.
        num_categories: usize,
    },

    /// The cached embeddings are too short to hold the category block.
    #[error("expected at least {expected} embeddings, found {actual}")]
    NotEnoughEmbeddings {
        /// Minimum number of vectors required.
        expected: usize,
        /// Number of vectors present.
        actual: usize,
    },

    /// The embedding model returned a different number of vectors than texts submitted.
    #[error("embedding model returned {actual} vectors for {expected} texts")]
    EmbeddingCountMismatch {
        /// Number of texts submitted.
        expected: usize,
        /// Number of vectors returned.
        actual: usize,
    },

    /// The embedding model returned vectors of differing dimension.
    #[error("embedding {index} has dimension {actual}, expected {expected}")]
    RaggedEmbeddings {
        /// Position of the first offending vector.
        index: usize,
        /// Dimension of the first vector.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// Examples and labels differ in length.
    #[error("{examples} examples but {labels} labels")]
    LengthMismatch {
        /// Number of examples.
        examples: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Embedding model error (load or inference).
    #[error("embedding error: {0}")]
    Embedding(String),

    /// A table is missing a required column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// The sampler's label column would overwrite its category column.
    #[error("label column {0:?} is also the category column")]
    ColumnConflict(String),

    /// A table row does not match the column count.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        /// Position of the row.
        row: usize,
        /// Number of columns in the table.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },
}

/// Result type for fewshot operations.
pub type Result<T> = std::result::Result<T, Error>;
