//! Embedding store: immutable word → vector mapping.
//!
//! The store is the only data source for evaluation and ranking. All
//! vectors share one dimensionality, fixed at construction. Iteration
//! follows insertion order, which is also the tie-break order for
//! neighbor ranking.

use crate::error::{Result, VectorscopeError};
use crate::kernel::vector::Vector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Immutable mapping from words to fixed-dimension vectors.
#[derive(Clone, Debug)]
pub struct EmbeddingStore {
    dimensions: usize,
    entries: Vec<(String, Vector)>,
    index: HashMap<String, usize>,
}

impl EmbeddingStore {
    /// Build a store from `(word, vector)` pairs.
    ///
    /// The first vector fixes the dimensionality. Fails on an empty
    /// vector, on a vector of a different length, on a non-finite
    /// component, or on a repeated word.
    pub fn from_pairs<I, W, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, V)>,
        W: Into<String>,
        V: Into<Vector>,
    {
        let mut dimensions = None;
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (word, vector) in pairs {
            let word = word.into();
            let vector = vector.into();

            let expected = *dimensions.get_or_insert(vector.dimensions());
            if expected == 0 {
                return Err(VectorscopeError::EmptyInput(format!(
                    "zero-length vector for '{}'",
                    word
                )));
            }
            if vector.dimensions() != expected {
                return Err(VectorscopeError::DimensionMismatch {
                    expected,
                    got: vector.dimensions(),
                });
            }
            if vector.data().iter().any(|x| !x.is_finite()) {
                return Err(VectorscopeError::InvalidVector(word));
            }
            if index.contains_key(&word) {
                return Err(VectorscopeError::DuplicateWord(word));
            }

            index.insert(word.clone(), entries.len());
            entries.push((word, vector));
        }

        Ok(Self {
            dimensions: dimensions.unwrap_or(0),
            entries,
            index,
        })
    }

    /// Parse a JSON object of the form `{"word": [x, y, ...], ...}`.
    ///
    /// Key order in the document becomes the store's iteration order.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let mut pairs = Vec::with_capacity(object.len());
        for (word, value) in object {
            let data: Vec<f64> = serde_json::from_value(value)?;
            pairs.push((word, Vector::from_data(data)));
        }
        Self::from_pairs(pairs)
    }

    /// Load a store from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            words = store.len(),
            dimensions = store.dimensions(),
            "loaded embedding store"
        );
        Ok(store)
    }

    /// Serialize the store back to a JSON object, preserving order.
    pub fn to_json(&self) -> Result<String> {
        let mut object = Map::with_capacity(self.entries.len());
        for (word, vector) in &self.entries {
            object.insert(word.clone(), serde_json::to_value(vector)?);
        }
        Ok(serde_json::to_string_pretty(&Value::Object(object))?)
    }

    /// Build a deterministic synthetic store.
    ///
    /// Each word's vector comes from a ChaCha8 RNG seeded with
    /// SHA-256(seed || word); components are uniform in [-1, 1).
    pub fn synthetic<W: AsRef<str>>(words: &[W], dimensions: usize, seed: u64) -> Result<Self> {
        if words.is_empty() {
            return Err(VectorscopeError::EmptyInput(
                "synthetic store needs at least one word".to_string(),
            ));
        }

        let pairs = words.iter().map(|word| {
            let word = word.as_ref();
            (word.to_string(), Self::seeded_vector(word, dimensions, seed))
        });
        Self::from_pairs(pairs)
    }

    fn seeded_vector(word: &str, dimensions: usize, seed: u64) -> Vector {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        hasher.update(word.as_bytes());
        let hash = hasher.finalize();

        let mut seed_bytes = [0u8; 8];
        seed_bytes.copy_from_slice(&hash[0..8]);
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed_bytes));

        Vector::from_data((0..dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect())
    }

    /// Get the dimensionality shared by every vector.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&Vector> {
        self.index.get(word).map(|&i| &self.entries[i].1)
    }

    /// Look up a word, failing with `UnknownWord` when absent.
    pub fn require(&self, word: &str) -> Result<&Vector> {
        self.get(word)
            .ok_or_else(|| VectorscopeError::UnknownWord(word.to_string()))
    }

    /// Words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// `(word, vector)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vector)> {
        self.entries.iter().map(|(w, v)| (w.as_str(), v))
    }
}
