//! Nearest-neighbor ranking over an [`EmbeddingStore`].
//!
//! Every stored vector is scored against the query and the list is sorted
//! ascending by distance. Stored vectors identical to the query (distance
//! exactly 0) are dropped, so a word never comes back as its own nearest
//! neighbor; this also drops a *different* word that happens to sit at the
//! same point. Ties keep store order.

use crate::error::{Result, VectorscopeError};
use crate::kernel::similarity::{Metric, Similarity};
use crate::kernel::store::EmbeddingStore;
use crate::kernel::vector::Vector;
use serde::{Deserialize, Serialize};

/// One ranked neighbor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub word: String,
    /// Distance to the query under the metric that produced the ranking.
    pub distance: f64,
    /// 1-based position in the sorted list.
    pub rank: usize,
}

/// Stateless k-nearest-neighbor ranking.
pub struct NeighborRanker;

impl NeighborRanker {
    /// The `k` words closest to `query` by Euclidean distance.
    ///
    /// Returns fewer than `k` entries when the store has fewer candidates.
    pub fn nearest(query: &Vector, store: &EmbeddingStore, k: usize) -> Result<Vec<NeighborEntry>> {
        Self::nearest_by(query, store, k, Metric::Euclidean)
    }

    /// Like [`nearest`](Self::nearest) but ranked by `metric`.
    ///
    /// For [`Metric::Cosine`] the reported distance is `1 - cosine`.
    /// Identity exclusion is always by exact Euclidean equality.
    pub fn nearest_by(
        query: &Vector,
        store: &EmbeddingStore,
        k: usize,
        metric: Metric,
    ) -> Result<Vec<NeighborEntry>> {
        if k == 0 {
            return Err(VectorscopeError::InvalidK(k));
        }

        let mut candidates: Vec<(&str, f64)> = Vec::with_capacity(store.len());
        for (word, vector) in store.iter() {
            let euclidean = Similarity::euclidean_distance(query, vector)?;
            if euclidean == 0.0 {
                continue;
            }
            let distance = match metric {
                Metric::Euclidean => euclidean,
                Metric::Cosine => 1.0 - Similarity::cosine(query, vector)?,
            };
            candidates.push((word, distance));
        }

        // sort_by is stable: equal distances stay in store order
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let ranked: Vec<NeighborEntry> = candidates
            .into_iter()
            .take(k)
            .enumerate()
            .map(|(i, (word, distance))| NeighborEntry {
                word: word.to_string(),
                distance,
                rank: i + 1,
            })
            .collect();

        tracing::debug!(k, returned = ranked.len(), ?metric, "ranked neighbors");
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::datasets;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn words(entries: &[NeighborEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_excludes_self_match() {
        let store = datasets::royalty();
        let king = store.get("king").unwrap().clone();

        let nearest = NeighborRanker::nearest(&king, &store, 3).unwrap();
        assert_eq!(nearest.len(), 3);
        assert!(nearest.iter().all(|e| e.word != "king" && e.distance > 0.0));
        assert_eq!(nearest[0].word, "prince");
    }

    #[test]
    fn test_excludes_other_word_at_same_point() {
        let store = EmbeddingStore::from_pairs([
            ("a", [0.0, 0.0]),
            ("twin", [1.0, 1.0]),
            ("b", [3.0, 3.0]),
        ])
        .unwrap();

        let nearest = NeighborRanker::nearest(&Vector::from([1.0, 1.0]), &store, 5).unwrap();
        assert_eq!(words(&nearest), vec!["a", "b"]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let store = EmbeddingStore::from_pairs([
            ("east", [1.0, 0.0]),
            ("north", [0.0, 1.0]),
            ("far", [5.0, 5.0]),
            ("west", [-1.0, 0.0]),
            ("south", [0.0, -1.0]),
        ])
        .unwrap();

        let nearest = NeighborRanker::nearest(&Vector::from([0.0, 0.0]), &store, 5).unwrap();
        assert_eq!(words(&nearest), vec!["east", "north", "west", "south", "far"]);
    }

    #[test]
    fn test_ranks_are_contiguous_and_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let names: Vec<String> = (0..40).map(|i| format!("w{}", i)).collect();
        let store = EmbeddingStore::synthetic(&names, 8, 5).unwrap();

        for k in [1, 5, 17, 40, 100] {
            let query = Vector::from_data((0..8).map(|_| rng.gen_range(-1.0..1.0)).collect());
            let nearest = NeighborRanker::nearest(&query, &store, k).unwrap();

            assert_eq!(nearest.len(), k.min(store.len()));
            for (i, entry) in nearest.iter().enumerate() {
                assert_eq!(entry.rank, i + 1);
            }
            assert!(nearest.windows(2).all(|w| w[0].distance <= w[1].distance));
        }
    }

    #[test]
    fn test_fewer_candidates_than_k() {
        let store = EmbeddingStore::from_pairs([("a", [0.0]), ("b", [1.0])]).unwrap();
        let nearest = NeighborRanker::nearest(&Vector::from([0.0]), &store, 10).unwrap();
        assert_eq!(words(&nearest), vec!["b"]);
    }

    #[test]
    fn test_invalid_k() {
        let store = datasets::royalty();
        let q = Vector::from([0.0, 0.0]);
        assert!(matches!(
            NeighborRanker::nearest(&q, &store, 0),
            Err(VectorscopeError::InvalidK(0))
        ));
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let store = datasets::royalty();
        let q = Vector::from([0.0, 0.0, 0.0]);
        assert!(matches!(
            NeighborRanker::nearest(&q, &store, 3),
            Err(VectorscopeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_cosine_ranking() {
        let store = EmbeddingStore::from_pairs([
            ("long_same_direction", [10.0, 0.1]),
            ("short_off_axis", [1.0, 1.0]),
            ("opposite", [-1.0, 0.0]),
        ])
        .unwrap();

        let q = Vector::from([1.0, 0.0]);
        let by_cosine = NeighborRanker::nearest_by(&q, &store, 3, Metric::Cosine).unwrap();
        assert_eq!(
            words(&by_cosine),
            vec!["long_same_direction", "short_off_axis", "opposite"]
        );
        assert!((by_cosine[2].distance - 2.0).abs() < 1e-10);

        let by_euclid = NeighborRanker::nearest(&q, &store, 1).unwrap();
        assert_eq!(by_euclid[0].word, "short_off_axis");
    }

    #[test]
    fn test_cosine_excludes_self_match() {
        let store = datasets::royalty();
        let queen = store.get("queen").unwrap().clone();

        let nearest = NeighborRanker::nearest_by(&queen, &store, 20, Metric::Cosine).unwrap();
        assert_eq!(nearest.len(), store.len() - 1);
        assert!(nearest.iter().all(|e| e.word != "queen"));
        assert!(nearest.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_non_finite_store_cannot_rank_itself_first() {
        let store = EmbeddingStore::from_pairs([
            ("inf", [f64::INFINITY, 0.0]),
            ("near", [1.0, 0.0]),
            ("far", [9.0, 0.0]),
        ]);
        assert!(matches!(store, Err(VectorscopeError::InvalidVector(w)) if w == "inf"));

        let store =
            EmbeddingStore::from_pairs([("near", [1.0, 0.0]), ("far", [9.0, 0.0])]).unwrap();
        let nearest = NeighborRanker::nearest(&Vector::from([1.0, 0.0]), &store, 3).unwrap();
        assert_eq!(words(&nearest), vec!["far"]);
        assert!(nearest.iter().all(|e| e.distance.is_finite()));
    }
}
