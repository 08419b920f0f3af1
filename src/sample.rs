//! Stratified subsampling of a labeled table.
//!
//! ## How It Works
//!
//! ```text
//! sample_size = 3
//!
//! category "a": 5 rows -> draw 3 (without replacement)
//! category "b": 2 rows -> draw 2 (group smaller than sample_size)
//!
//! output: 5 rows, categories ["a", "b"], labels a -> 0, b -> 1
//! ```
//!
//! ## Determinism
//!
//! - Groups are visited in lexicographic category order.
//! - Each group's draw uses a fresh RNG seeded with the same seed, so the
//!   draw for one category does not depend on which other categories exist.
//! - Label codes are assigned by sorting the observed categories
//!   lexicographically (byte order) and numbering them `0..k`.
//!
//! Same table, same size, same seed: same output, row for row.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::index, SeedableRng};
use tracing::debug;

use crate::{Dataset, Error, Result, Table};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Stratified sampler: at most `sample_size` rows per category.
///
/// ## Example
///
/// ```rust
/// use fewshot::{StratifiedSampler, Table};
///
/// let mut table = Table::new(["text", "category"]);
/// for i in 0..5 {
///     table.push_row([format!("a{i}"), "a".to_string()]).unwrap();
/// }
/// for i in 0..2 {
///     table.push_row([format!("b{i}"), "b".to_string()]).unwrap();
/// }
///
/// let sample = StratifiedSampler::new(3).sample(&table).unwrap();
/// assert_eq!(sample.len(), 5);
/// assert_eq!(sample.categories(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedSampler {
    sample_size: usize,
    seed: u64,
    category_column: String,
    label_column: String,
}

impl StratifiedSampler {
    /// Sample at most `sample_size` rows per category, seeded with [`DEFAULT_SEED`].
    #[must_use]
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size,
            seed: DEFAULT_SEED,
            category_column: "category".to_string(),
            label_column: "label".to_string(),
        }
    }

    /// Set the seed used for every group's draw.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Group by this column instead of `category`.
    #[must_use]
    pub fn with_category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = column.into();
        self
    }

    /// Write codes to this column instead of `label`.
    ///
    /// Must differ from the category column; [`sample`](Self::sample) rejects
    /// a sampler whose two columns coincide.
    #[must_use]
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    /// Rows drawn per category, at most.
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// The seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the subsample. The input table is not modified.
    ///
    /// # Errors
    ///
    /// - [`Error::ColumnConflict`] if the label and category columns share a name.
    /// - [`Error::MissingColumn`] if the category column is absent.
    pub fn sample(&self, table: &Table) -> Result<Subsample> {
        if self.label_column == self.category_column {
            return Err(Error::ColumnConflict(self.label_column.clone()));
        }
        let categories = table.column(&self.category_column)?;

        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (row, &category) in categories.iter().enumerate() {
            groups.entry(category).or_default().push(row);
        }

        let mut out = Table::new(table.columns().iter().cloned());
        let mut observed = Vec::with_capacity(groups.len());
        let mut labels = Vec::new();

        for (category, rows) in &groups {
            let amount = rows.len().min(self.sample_size);
            debug!(category = *category, group = rows.len(), drawn = amount, "sampling group");
            if amount == 0 {
                continue;
            }

            let code = observed.len();
            observed.push((*category).to_string());

            let mut rng = StdRng::seed_from_u64(self.seed);
            for i in index::sample(&mut rng, rows.len(), amount) {
                out.push_row(table.rows()[rows[i]].iter().cloned())?;
                labels.push(code);
            }
        }

        out.set_column(&self.label_column, labels.iter().map(ToString::to_string));

        Ok(Subsample {
            table: out,
            categories: observed,
            labels,
            category_column: self.category_column.clone(),
        })
    }
}

/// Stratified subsample of `table` with up to `sample_size` rows per category.
///
/// Negative sizes are clamped to zero, which yields an empty sample. Pass
/// [`DEFAULT_SEED`] for the default draw; `StratifiedSampler::new(n).sample(table)`
/// is the same call with the seed left at its default.
///
/// # Errors
///
/// Returns [`Error::MissingColumn`] if `table` has no `category` column.
pub fn select_subsample(table: &Table, sample_size: i64, seed: u64) -> Result<Subsample> {
    let sample_size = usize::try_from(sample_size.max(0)).unwrap_or(usize::MAX);
    StratifiedSampler::new(sample_size).with_seed(seed).sample(table)
}

/// Result of a stratified draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsample {
    table: Table,
    categories: Vec<String>,
    labels: Vec<usize>,
    category_column: String,
}

impl Subsample {
    /// Sampled rows with the label column set.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Observed categories, sorted; position is the label code.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Label code of each row in [`table`](Self::table).
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Give up the sampled rows.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Number of sampled rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing was sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Category name of row `i`.
    #[must_use]
    pub fn category_of(&self, i: usize) -> Option<&str> {
        self.table.get(i, &self.category_column)
    }

    /// Build a [`Dataset`] using `text_column` as the examples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if `text_column` is absent.
    pub fn into_dataset(self, text_column: &str) -> Result<Dataset> {
        let examples = self
            .table
            .column(text_column)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Dataset::new(examples, self.labels, self.categories)
    }
}
