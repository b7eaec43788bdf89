//! Cosine similarity between embedding vectors.

use ndarray::Array1;

/// Norms below this are treated as zero.
const ZERO_NORM: f32 = 1e-12;

/// Cosine similarity of `a` and `b`, in [-1, 1].
///
/// Returns 0.0 when either vector has zero norm, and when the lengths differ
/// (two vectors from different models are not comparable).
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a < ZERO_NORM || norm_b < ZERO_NORM {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_identical_vectors() {
        let v = array![0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        let c = array![-3.0, 0.0];
        assert!((cosine_similarity(&a, &c) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = array![0.0, 0.0, 0.0];
        let v = array![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_length_mismatch_scores_zero() {
        let a = array![1.0, 2.0];
        let b = array![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_scale_invariant() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![2.0, 4.0, 6.5];
        let c = array![20.0, 40.0, 65.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&a, &c)).abs() < 1e-6);
    }
}
