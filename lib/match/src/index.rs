//! Vector index
//!
//! [`BruteForceIndex`] is the exhaustive pairwise reference
//! implementation of the [`VectorIndex`] trait: every unordered pair is
//! scored with a dot product. An ANN-backed index can replace it behind
//! the same trait; that trades recall for speed and changes which
//! candidates are found, which is an accepted extension point.

use dedupe_core::{Error, MatchCandidate, Result, Vector, VectorIndex};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde_json::json;

#[derive(Debug, Default)]
struct IndexState {
    record_ids: Vec<String>,
    vectors: Vec<Vector>,
}

/// Exhaustive in-memory similarity index.
///
/// `build` is not additive: each call discards all prior state.
#[derive(Debug, Default)]
pub struct BruteForceIndex {
    state: RwLock<IndexState>,
}

impl BruteForceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed vectors
    pub fn len(&self) -> usize {
        self.state.read().record_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VectorIndex for BruteForceIndex {
    fn build(&self, record_ids: &[String], vectors: &[Vector]) -> Result<()> {
        if record_ids.len() != vectors.len() {
            return Err(Error::InputMismatch {
                expected: record_ids.len(),
                actual: vectors.len(),
            });
        }

        let mut state = self.state.write();
        state.record_ids = record_ids.to_vec();
        state.vectors = vectors.to_vec();
        Ok(())
    }

    fn query_similar_pairs(&self, min_similarity: f32) -> Vec<MatchCandidate> {
        let guard = self.state.read();
        let state = &*guard;

        (0..state.vectors.len())
            .into_par_iter()
            .flat_map_iter(move |i| {
                (i + 1..state.vectors.len()).filter_map(move |j| {
                    let score = state.vectors[i].dot(&state.vectors[j]);
                    if score < min_similarity {
                        return None;
                    }
                    Some(MatchCandidate::new(
                        state.record_ids[i].clone(),
                        state.record_ids[j].clone(),
                        score,
                        json!({"source": "embedding"}),
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn unit(components: Vec<f32>) -> Vector {
        Vector::new(components).normalized()
    }

    #[test]
    fn test_build_rejects_mismatched_lengths() {
        let index = BruteForceIndex::new();
        let result = index.build(&ids(&["a", "b"]), &[unit(vec![1.0, 0.0])]);
        assert!(matches!(
            result,
            Err(Error::InputMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_build_replaces_prior_state() {
        let index = BruteForceIndex::new();
        index
            .build(&ids(&["a", "b"]), &[unit(vec![1.0, 0.0]), unit(vec![1.0, 0.0])])
            .unwrap();
        assert_eq!(index.len(), 2);

        index.build(&ids(&["c"]), &[unit(vec![0.0, 1.0])]).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.query_similar_pairs(0.0).is_empty());
    }

    #[test]
    fn test_query_returns_pairs_above_threshold() {
        let index = BruteForceIndex::new();
        index
            .build(
                &ids(&["a", "b", "c"]),
                &[
                    unit(vec![1.0, 0.0]),
                    unit(vec![1.0, 0.1]),
                    unit(vec![0.0, 1.0]),
                ],
            )
            .unwrap();

        let pairs = index.query_similar_pairs(0.9);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left_id, "a");
        assert_eq!(pairs[0].right_id, "b");
        assert!(pairs[0].score >= 0.9);
        assert_eq!(pairs[0].metadata["source"], "embedding");
    }

    #[test]
    fn test_threshold_monotonicity() {
        let index = BruteForceIndex::new();
        index
            .build(
                &ids(&["a", "b", "c", "d"]),
                &[
                    unit(vec![1.0, 0.0, 0.0]),
                    unit(vec![0.9, 0.1, 0.0]),
                    unit(vec![0.5, 0.5, 0.0]),
                    unit(vec![0.0, 0.0, 1.0]),
                ],
            )
            .unwrap();

        let loose = index.query_similar_pairs(0.3);
        let strict = index.query_similar_pairs(0.8);

        let key = |c: &MatchCandidate| (c.left_id.clone(), c.right_id.clone());
        let loose_keys: Vec<_> = loose.iter().map(key).collect();
        for pair in strict.iter().map(key) {
            assert!(loose_keys.contains(&pair));
        }
        assert!(loose.len() >= strict.len());
    }

    #[test]
    fn test_pair_order_follows_build_order() {
        let index = BruteForceIndex::new();
        let same = unit(vec![1.0, 0.0]);
        index
            .build(&ids(&["z", "m", "a"]), &[same.clone(), same.clone(), same])
            .unwrap();

        let pairs = index.query_similar_pairs(0.5);
        let observed: Vec<(String, String)> = pairs
            .into_iter()
            .map(|c| (c.left_id, c.right_id))
            .collect();
        assert_eq!(
            observed,
            vec![
                ("z".to_string(), "m".to_string()),
                ("z".to_string(), "a".to_string()),
                ("m".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_index_query() {
        let index = BruteForceIndex::new();
        index.build(&[], &[]).unwrap();
        assert!(index.query_similar_pairs(0.5).is_empty());
    }
}
