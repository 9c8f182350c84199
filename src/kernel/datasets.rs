//! Built-in two-dimensional word sets.
//!
//! Small hand-placed embeddings where the analogy directions are easy to
//! see on a plane: gender runs along x, royalty along the diagonal.

use crate::kernel::store::EmbeddingStore;

const ROYALTY: [(&str, [f64; 2]); 10] = [
    ("man", [1.0, 1.0]),
    ("woman", [-1.0, 1.0]),
    ("king", [2.0, 2.0]),
    ("queen", [0.0, 2.0]),
    ("boy", [0.5, 0.5]),
    ("girl", [-0.5, 0.5]),
    ("prince", [1.5, 1.5]),
    ("princess", [-0.5, 1.5]),
    ("father", [1.2, 0.8]),
    ("mother", [-1.2, 0.8]),
];

const SEMANTIC: [(&str, [f64; 2]); 11] = [
    ("man", [0.5, 1.0]),
    ("woman", [0.45, 0.95]),
    ("king", [1.2, 0.8]),
    ("queen", [1.15, 0.75]),
    ("bank", [0.3, 1.4]),
    ("princess", [1.05, 0.88]),
    ("loan", [1.2, 0.9]),
    ("person", [0.5, 1.05]),
    ("pride", [0.6, 1.1]),
    ("queenly", [1.1, 0.8]),
    ("heir", [1.0, 0.85]),
];

fn build(entries: &[(&str, [f64; 2])]) -> EmbeddingStore {
    // Constant tables: same dimension, unique keys.
    match EmbeddingStore::from_pairs(entries.iter().map(|&(w, v)| (w, v))) {
        Ok(store) => store,
        Err(e) => unreachable!("built-in dataset is invalid: {}", e),
    }
}

/// Royalty and family words on an integer-ish grid.
pub fn royalty() -> EmbeddingStore {
    build(&ROYALTY)
}

/// A denser cluster mixing royalty, people and an ambiguous "bank".
pub fn semantic() -> EmbeddingStore {
    build(&SEMANTIC)
}
