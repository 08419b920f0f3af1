//! Property-based tests for datasets and sampling.
//!
//! These tests verify key invariants:
//! - Expansion: one label vector per example, equal to its category's vector
//! - Sampling size: sum over groups of min(group, s)
//! - Sampling labels: codes and categories agree row by row
//! - Determinism: same seed, same rows

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use fewshot::{expand_labels, select_subsample, Dataset, Embedder, Result, Table};

// =============================================================================
// Test Generators
// =============================================================================

/// Returns a precomputed cache regardless of input.
struct Precomputed(Vec<Vec<f32>>);

impl Embedder for Precomputed {
    fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(self.0.clone())
    }
}

/// A dataset with valid labels and a distinct vector per text.
fn embedded_dataset() -> impl Strategy<Value = (Dataset, Vec<Vec<f32>>)> {
    (1usize..8, 0usize..40, 1usize..6)
        .prop_flat_map(|(k, n, dim)| {
            (
                prop::collection::vec(0..k, n),
                prop::collection::vec(prop::collection::vec(-10.0f32..10.0, dim), n + k),
                Just(k),
            )
        })
        .prop_map(|(labels, vectors, k)| {
            let examples = (0..labels.len()).map(|i| format!("ex{i}")).collect();
            let categories = (0..k).map(|c| format!("cat{c}")).collect();
            let mut dataset = Dataset::new(examples, labels, categories).unwrap();
            dataset
                .calc_sbert_embeddings(&Precomputed(vectors.clone()))
                .unwrap();
            (dataset, vectors)
        })
}

/// A table from a list of category names (one row each).
fn category_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e"]), 0..80).prop_map(
        |categories| {
            let mut table = Table::new(["text", "category"]);
            for (i, category) in categories.into_iter().enumerate() {
                table.push_row([format!("row{i}"), category.to_string()]).unwrap();
            }
            table
        },
    )
}

fn group_sizes(table: &Table) -> BTreeMap<String, usize> {
    let mut sizes = BTreeMap::new();
    for category in table.column("category").unwrap() {
        *sizes.entry(category.to_string()).or_default() += 1;
    }
    sizes
}

// =============================================================================
// Label Expansion
// =============================================================================

proptest! {
    #[test]
    fn expansion_matches_category_block((mut dataset, vectors) in embedded_dataset()) {
        let n = dataset.len();
        let labels = dataset.labels().to_vec();

        let expanded = expand_labels(&mut dataset).unwrap();
        let label_embeddings = expanded.label_embeddings().unwrap();

        prop_assert_eq!(label_embeddings.len(), n);
        for (i, &label) in labels.iter().enumerate() {
            prop_assert_eq!(&label_embeddings[i], &vectors[n + label]);
        }
    }

    #[test]
    fn expansion_keeps_cache((mut dataset, vectors) in embedded_dataset()) {
        expand_labels(&mut dataset).unwrap();
        prop_assert_eq!(dataset.embeddings().unwrap(), vectors.as_slice());
    }
}

// =============================================================================
// Stratified Sampling
// =============================================================================

proptest! {
    #[test]
    fn sample_size_is_sum_of_capped_groups(table in category_table(), s in 0i64..10) {
        let sample = select_subsample(&table, s, 42).unwrap();
        let expected: usize = group_sizes(&table)
            .values()
            .map(|&g| g.min(s as usize))
            .sum();
        prop_assert_eq!(sample.len(), expected);
    }

    #[test]
    fn sample_rows_come_from_input(table in category_table(), s in 1i64..10) {
        let sample = select_subsample(&table, s, 42).unwrap();
        let input: HashSet<&str> = table.column("text").unwrap().into_iter().collect();
        let output = sample.table().column("text").unwrap();
        let unique: HashSet<&str> = output.iter().copied().collect();

        prop_assert_eq!(unique.len(), output.len());
        prop_assert!(output.iter().all(|t| input.contains(t)));
    }

    #[test]
    fn sample_labels_biject_categories(table in category_table(), s in 1i64..10) {
        let sample = select_subsample(&table, s, 42).unwrap();
        let mut code_of: BTreeMap<&str, usize> = BTreeMap::new();

        for i in 0..sample.len() {
            let category = sample.category_of(i).unwrap();
            let code = *code_of.entry(category).or_insert(sample.labels()[i]);
            prop_assert_eq!(code, sample.labels()[i]);
            prop_assert_eq!(sample.categories()[code].as_str(), category);
        }

        let codes: HashSet<usize> = code_of.values().copied().collect();
        prop_assert_eq!(codes.len(), code_of.len());

        let mut sorted = sample.categories().to_vec();
        sorted.sort();
        prop_assert_eq!(sorted, sample.categories().to_vec());
    }

    #[test]
    fn sample_is_deterministic(table in category_table(), s in 0i64..10, seed in any::<u64>()) {
        let first = select_subsample(&table, s, seed).unwrap();
        let second = select_subsample(&table, s, seed).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn negative_size_is_empty(table in category_table(), s in -100i64..=0) {
        prop_assert!(select_subsample(&table, s, 1).unwrap().is_empty());
    }
}
