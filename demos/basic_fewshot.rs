//! Basic Few-Shot Dataset
//!
//! Sample a labeled table, embed it, and expand label embeddings.
//!
//! ```bash
//! cargo run --example basic_fewshot
//! ```

use fewshot::{expand_labels, select_subsample, Embedder, Table, DEFAULT_SEED};

/// Toy embedder: vowel and consonant counts. Swap in `SbertEmbedder` for real vectors.
struct Counts;

impl Embedder for Counts {
    fn embed(&self, texts: &[&str]) -> fewshot::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let vowels = t.chars().filter(|c| "aeiou".contains(*c)).count();
                let letters = t.chars().filter(char::is_ascii_alphabetic).count();
                vec![vowels as f32, (letters - vowels) as f32]
            })
            .collect())
    }
}

fn main() -> fewshot::Result<()> {
    let mut table = Table::new(["text", "category"]);
    for (text, category) in [
        ("The striker scored twice", "sports"),
        ("Parliament passed the budget", "politics"),
        ("A late goal sealed the cup", "sports"),
        ("Polls open at dawn", "politics"),
        ("Record crowd at the derby", "sports"),
        ("Senate debates the bill", "politics"),
    ] {
        table.push_row([text, category])?;
    }

    // Two examples per category
    let sample = select_subsample(&table, 2, DEFAULT_SEED)?;
    println!("Sampled {} of {} rows", sample.len(), table.len());

    let mut dataset = sample.into_dataset("text")?;
    dataset.calc_sbert_embeddings(&Counts)?;
    let dataset = expand_labels(&mut dataset)?;

    for (i, example) in dataset.examples().iter().enumerate() {
        let category = dataset.category_of(i).unwrap_or("?");
        let label = dataset
            .label_embeddings()
            .and_then(|l| l.get(i))
            .cloned()
            .unwrap_or_default();
        println!("[{category}] {example:?} -> label vector {label:?}");
    }

    Ok(())
}
