//! Distance and similarity metrics for embedding comparison.
//!
//! When compiled with the `simd` feature, the dot products behind cosine
//! similarity go through SIMD-accelerated kernels.

use crate::error::{Result, VectorscopeError};
use crate::kernel::vector::Vector;
use serde::{Deserialize, Serialize};

/// Ranking metric for neighbor queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Euclidean distance, lower is closer
    #[default]
    Euclidean,
    /// Cosine similarity, ranked as `1 - cosine` so lower is closer
    Cosine,
}

/// Distance and similarity computation for vectors.
pub struct Similarity;

impl Similarity {
    fn check_dimensions(a: &Vector, b: &Vector) -> Result<()> {
        if a.dimensions() != b.dimensions() {
            return Err(VectorscopeError::DimensionMismatch {
                expected: a.dimensions(),
                got: b.dimensions(),
            });
        }
        Ok(())
    }

    /// Score `b` against `a` with the given metric.
    pub fn compute(a: &Vector, b: &Vector, metric: Metric) -> Result<f64> {
        match metric {
            Metric::Euclidean => Self::euclidean_distance(a, b),
            Metric::Cosine => Self::cosine(a, b),
        }
    }

    /// Raw Euclidean distance: sqrt(Σ(aᵢ−bᵢ)²).
    ///
    /// Zero exactly when the vectors are identical.
    pub fn euclidean_distance(a: &Vector, b: &Vector) -> Result<f64> {
        Self::check_dimensions(a, b)?;

        let sum_sq: f64 = a
            .data()
            .iter()
            .zip(b.data().iter())
            .map(|(&x, &y)| {
                let diff = x - y;
                diff * diff
            })
            .sum();

        Ok(sum_sq.sqrt())
    }

    /// Cosine similarity: dot(a, b) / (||a|| * ||b||)
    ///
    /// Returns 0 when either magnitude is 0.
    pub fn cosine(a: &Vector, b: &Vector) -> Result<f64> {
        Self::check_dimensions(a, b)?;

        let dot_ab = Self::dot_raw(a.data(), b.data());
        let norm_a = Self::dot_raw(a.data(), a.data()).sqrt();
        let norm_b = Self::dot_raw(b.data(), b.data()).sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return Ok(0.0);
        }

        Ok(dot_ab / (norm_a * norm_b))
    }

    #[cfg(feature = "simd")]
    fn dot_raw(a: &[f64], b: &[f64]) -> f64 {
        use simsimd::SpatialSimilarity;
        f64::dot(a, b).unwrap_or(0.0)
    }

    #[cfg(not(feature = "simd"))]
    fn dot_raw(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_vector(rng: &mut ChaCha8Rng, dims: usize) -> Vector {
        Vector::from_data((0..dims).map(|_| rng.gen_range(-10.0..10.0)).collect())
    }

    #[test]
    fn test_euclidean_known_value() {
        let a = Vector::from([0.0, 0.0]);
        let b = Vector::from([3.0, 4.0]);
        let d = Similarity::euclidean_distance(&a, &b).unwrap();
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_symmetric_and_zero_on_self() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for dims in 1..16 {
            let a = random_vector(&mut rng, dims);
            let b = random_vector(&mut rng, dims);

            let ab = Similarity::euclidean_distance(&a, &b).unwrap();
            let ba = Similarity::euclidean_distance(&b, &a).unwrap();
            assert_eq!(ab, ba);
            assert_eq!(Similarity::euclidean_distance(&a, &a).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_euclidean_dimension_mismatch() {
        let a = Vector::from([1.0, 2.0]);
        let b = Vector::from([1.0]);
        assert!(matches!(
            Similarity::euclidean_distance(&a, &b),
            Err(VectorscopeError::DimensionMismatch { expected: 2, got: 1 })
        ));
        assert!(Similarity::cosine(&a, &b).is_err());
    }

    #[test]
    fn test_cosine_identical_and_opposite() {
        let a = Vector::from([1.0, -2.0, 3.0]);
        let b = Vector::from([-1.0, 2.0, -3.0]);
        assert!((Similarity::cosine(&a, &a).unwrap() - 1.0).abs() < 1e-10);
        assert!((Similarity::cosine(&a, &b).unwrap() + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_zero_magnitude_is_zero() {
        let zero = Vector::zeros(3);
        let a = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(Similarity::cosine(&zero, &a).unwrap(), 0.0);
        assert_eq!(Similarity::cosine(&a, &zero).unwrap(), 0.0);
        assert_eq!(Similarity::cosine(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_compute_dispatches() {
        let a = Vector::from([1.0, 0.0]);
        let b = Vector::from([0.0, 1.0]);
        assert_eq!(
            Similarity::compute(&a, &b, Metric::Euclidean).unwrap(),
            Similarity::euclidean_distance(&a, &b).unwrap()
        );
        assert_eq!(Similarity::compute(&a, &b, Metric::Cosine).unwrap(), 0.0);
    }
}
