//! End-to-end scenarios: sample a table, build a dataset, embed, expand.

use std::sync::Arc;

use fewshot::{
    expand_labels, select_subsample, Dataset, Embedder, EmbeddingState, Error, LookupEmbedder,
    StratifiedSampler, Table, DEFAULT_SEED,
};

// =============================================================================
// Fixtures
// =============================================================================

/// Embeds each text as a bag of its first bytes, so output depends only on input.
struct ByteEmbedder;

impl Embedder for ByteEmbedder {
    fn embed(&self, texts: &[&str]) -> fewshot::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 4];
                for (i, b) in t.bytes().take(4).enumerate() {
                    v[i] = f32::from(b);
                }
                v
            })
            .collect())
    }
}

fn news_table() -> Table {
    let rows = [
        ("The striker scored twice", "sports"),
        ("Parliament passed the budget", "politics"),
        ("A late goal sealed the cup", "sports"),
        ("Polls open at dawn", "politics"),
        ("Record crowd at the derby", "sports"),
        ("Markets rally on earnings", "business"),
        ("Coach signs a new contract", "sports"),
        ("Senate debates the bill", "politics"),
    ];
    let mut table = Table::new(["text", "category"]);
    for (text, category) in rows {
        table.push_row([text, category]).unwrap();
    }
    table
}

// =============================================================================
// Label Expansion
// =============================================================================

#[test]
fn two_category_expansion() {
    let mut dataset = Dataset::new(
        vec!["a".into(), "b".into(), "c".into()],
        vec![0, 1, 0],
        vec!["sports".into(), "politics".into()],
    )
    .unwrap();

    let embedder = LookupEmbedder::new([
        ("a", vec![1.0, 0.0]),
        ("b", vec![2.0, 0.0]),
        ("c", vec![3.0, 0.0]),
        ("sports", vec![9.0, 9.0]),
        ("politics", vec![8.0, 8.0]),
    ])
    .unwrap();
    dataset.calc_sbert_embeddings(&embedder).unwrap();

    assert_eq!(
        dataset.category_embeddings().unwrap(),
        &[vec![9.0, 9.0], vec![8.0, 8.0]]
    );

    let expanded = expand_labels(&mut dataset).unwrap();
    assert_eq!(
        expanded.label_embeddings().unwrap(),
        &[vec![9.0, 9.0], vec![8.0, 8.0], vec![9.0, 9.0]]
    );
}

#[test]
fn expansion_before_embedding_fails() {
    let mut dataset = Dataset::new(vec!["x".into()], vec![0], vec!["c".into()]).unwrap();
    assert!(matches!(
        expand_labels(&mut dataset),
        Err(Error::EmbeddingsNotComputed)
    ));
}

#[test]
fn shared_embedder_handles() {
    let embedder: Arc<dyn Embedder> = Arc::new(ByteEmbedder);
    let boxed: Box<dyn Embedder> = Box::new(ByteEmbedder);

    let mut a = Dataset::new(vec!["hello".into()], vec![0], vec!["greeting".into()]).unwrap();
    let mut b = a.clone();

    a.calc_sbert_embeddings(&embedder).unwrap();
    b.calc_sbert_embeddings(&boxed).unwrap();
    assert_eq!(a.embeddings().unwrap(), b.embeddings().unwrap());
}

#[test]
fn compute_on_read_matches_explicit() {
    let mut explicit = Dataset::new(vec!["q".into()], vec![0], vec!["c".into()]).unwrap();
    let mut lazy = explicit.clone();

    explicit.calc_sbert_embeddings(&ByteEmbedder).unwrap();
    let lazy_vectors = lazy.embeddings_or_compute(&ByteEmbedder).unwrap().to_vec();

    assert_eq!(lazy_vectors.as_slice(), explicit.embeddings().unwrap());
    assert!(matches!(lazy.state(), EmbeddingState::Computed(v) if v.len() == 2));
}

// =============================================================================
// Stratified Sampling
// =============================================================================

#[test]
fn group_capped_at_own_size() {
    let mut table = Table::new(["text", "category"]);
    for i in 0..5 {
        table.push_row([format!("a{i}"), "a".to_string()]).unwrap();
    }
    for i in 0..2 {
        table.push_row([format!("b{i}"), "b".to_string()]).unwrap();
    }

    let sample = select_subsample(&table, 3, DEFAULT_SEED).unwrap();
    assert_eq!(sample.len(), 3 + 2);
    assert_eq!(sample.categories(), vec!["a", "b"]);
}

#[test]
fn seed_changes_draw() {
    let mut table = Table::new(["text", "category"]);
    for i in 0..200 {
        table.push_row([format!("row{i}"), "only".to_string()]).unwrap();
    }

    let draws: Vec<Vec<String>> = (0..5)
        .map(|seed| {
            StratifiedSampler::new(10)
                .with_seed(seed)
                .sample(&table)
                .unwrap()
                .table()
                .column("text")
                .unwrap()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect();

    // Five seeds drawing 10 of 200 rows will not all coincide.
    assert!(draws.windows(2).any(|w| w[0] != w[1]));
}

// =============================================================================
// Full Pipeline
// =============================================================================

#[test]
fn sample_embed_expand() {
    let sample = select_subsample(&news_table(), 2, DEFAULT_SEED).unwrap();
    assert_eq!(sample.len(), 1 + 2 + 2);
    assert_eq!(sample.categories(), vec!["business", "politics", "sports"]);

    let mut dataset = sample.into_dataset("text").unwrap();
    assert_eq!(dataset.num_categories(), 3);

    dataset.calc_sbert_embeddings(&ByteEmbedder).unwrap();
    assert_eq!(dataset.embeddings().unwrap().len(), 5 + 3);

    let dataset = expand_labels(&mut dataset).unwrap();
    let label_embeddings = dataset.label_embeddings().unwrap().to_vec();
    let category_embeddings = dataset.category_embeddings().unwrap();

    for (i, &label) in dataset.labels().iter().enumerate() {
        assert_eq!(label_embeddings[i], category_embeddings[label]);
        let expected = ByteEmbedder
            .embed(&[dataset.category_of(i).unwrap()])
            .unwrap();
        assert_eq!(label_embeddings[i], expected[0]);
    }
}
