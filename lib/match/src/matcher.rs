//! Embedding-based candidate generation and clustering
//!
//! [`EmbeddingMatcher`] composes an [`EmbeddingModel`] and a
//! [`VectorIndex`] into a matcher, and owns the union-find clustering
//! stage that folds a frozen candidate set into disjoint entity groups.

use ahash::AHashMap;
use dedupe_core::{
    Cluster, EmbeddingModel, Error, MatchCandidate, Matcher, Record, Result, UnionFind,
    VectorIndex,
};

/// Default similarity threshold for embedding candidates
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.95;

/// End-to-end embedding matcher: embed, index, query, cluster.
pub struct EmbeddingMatcher {
    model: Box<dyn EmbeddingModel>,
    index: Box<dyn VectorIndex>,
    similarity_threshold: f32,
}

impl EmbeddingMatcher {
    /// Build a matcher; the similarity threshold must be within (0, 1].
    pub fn new(
        model: Box<dyn EmbeddingModel>,
        index: Box<dyn VectorIndex>,
        similarity_threshold: f32,
    ) -> Result<Self> {
        if !(similarity_threshold > 0.0 && similarity_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "similarity threshold must be within (0, 1], got {similarity_threshold}"
            )));
        }
        Ok(Self {
            model,
            index,
            similarity_threshold,
        })
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Merge pairwise match evidence into disjoint clusters.
    ///
    /// Every candidate edge is unioned into a disjoint-set structure;
    /// root groups of size >= 2 become clusters. A cluster's confidence
    /// is the mean score of the candidates attributed to its root via
    /// each candidate's left endpoint; this accounting is part of the
    /// output contract and must not be changed to per-edge-incidence
    /// averaging. Cluster ids derive from the union-find root, so the
    /// same candidate sequence always yields the same ids.
    pub fn cluster(&self, candidates: &[MatchCandidate]) -> Vec<Cluster> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut uf = UnionFind::new();
        for candidate in candidates {
            uf.union(&candidate.left_id, &candidate.right_id);
        }

        let mut scores: AHashMap<String, Vec<f32>> = AHashMap::new();
        for candidate in candidates {
            let root = uf.find(&candidate.left_id);
            scores.entry(root).or_default().push(candidate.score);
        }

        let mut clusters = Vec::new();
        for (root, mut members) in uf.groups() {
            // Union-find only creates ids referenced by an edge, so a
            // singleton root group cannot occur; guard anyway.
            if members.len() < 2 {
                continue;
            }
            members.sort();

            let confidence = match scores.get(&root) {
                Some(group_scores) if !group_scores.is_empty() => {
                    group_scores.iter().sum::<f32>() / group_scores.len() as f32
                }
                _ => 0.0,
            };

            clusters.push(Cluster {
                cluster_id: format!("cluster_{root}"),
                record_ids: members,
                confidence,
            });
        }

        clusters.sort_by(|a, b| a.cluster_id.cmp(&b.cluster_id));
        clusters
    }
}

impl Matcher for EmbeddingMatcher {
    fn match_records(&self, records: &[Record]) -> Result<Vec<MatchCandidate>> {
        let vectors = self.model.embed(records)?;
        if vectors.len() != records.len() {
            return Err(Error::InputMismatch {
                expected: records.len(),
                actual: vectors.len(),
            });
        }

        let record_ids: Vec<String> = records
            .iter()
            .map(|record| record.record_id.clone())
            .collect();
        self.index.build(&record_ids, &vectors)?;

        Ok(self.index.query_similar_pairs(self.similarity_threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashingEmbedder;
    use crate::index::BruteForceIndex;
    use dedupe_core::Vector;
    use dedupe_schema::{FieldTag, RecordSchema};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn candidate(left: &str, right: &str, score: f32) -> MatchCandidate {
        MatchCandidate::new(left, right, score, Value::Null)
    }

    fn hashing_matcher(threshold: f32) -> EmbeddingMatcher {
        let schema =
            RecordSchema::from_mapping([(FieldTag::Name, vec!["FIRSTNAME", "LASTNAME"])]).unwrap();
        EmbeddingMatcher::new(
            Box::new(HashingEmbedder::new(schema, vec![FieldTag::Name])),
            Box::new(BruteForceIndex::new()),
            threshold,
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_validation() {
        let schema = RecordSchema::from_mapping([(FieldTag::Name, vec!["NAME"])]).unwrap();
        for bad in [0.0, -0.5, 1.5] {
            let result = EmbeddingMatcher::new(
                Box::new(HashingEmbedder::new(schema.clone(), vec![FieldTag::Name])),
                Box::new(BruteForceIndex::new()),
                bad,
            );
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_match_finds_similar_records() {
        let matcher = hashing_matcher(0.6);
        let records: Vec<Record> = [
            ("1", "Jane", "Smith"),
            ("2", "Jane", "Smith"),
            ("3", "Boris", "Karloff"),
        ]
        .iter()
        .map(|(id, first, last)| {
            let mut attributes: HashMap<String, Value> = HashMap::new();
            attributes.insert("FIRSTNAME".to_string(), json!(first));
            attributes.insert("LASTNAME".to_string(), json!(last));
            Record::new(*id, attributes)
        })
        .collect();

        let candidates = matcher.match_records(&records).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            (candidates[0].left_id.as_str(), candidates[0].right_id.as_str()),
            ("1", "2")
        );
    }

    #[test]
    fn test_count_mismatch_from_model_is_rejected() {
        struct ShortModel;
        impl EmbeddingModel for ShortModel {
            fn embed(&self, records: &[Record]) -> Result<Vec<Vector>> {
                Ok(vec![Vector::zeros(4); records.len().saturating_sub(1)])
            }
        }

        let matcher = EmbeddingMatcher::new(
            Box::new(ShortModel),
            Box::new(BruteForceIndex::new()),
            0.9,
        )
        .unwrap();

        let records = vec![
            Record::new("1", HashMap::new()),
            Record::new("2", HashMap::new()),
        ];
        assert!(matches!(
            matcher.match_records(&records),
            Err(Error::InputMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_cluster_groups_connected_components() {
        let matcher = hashing_matcher(0.9);
        let candidates = vec![
            candidate("a", "b", 0.8),
            candidate("b", "c", 0.6),
            candidate("x", "y", 1.0),
        ];

        let clusters = matcher.cluster(&candidates);
        assert_eq!(clusters.len(), 2);

        let abc = clusters.iter().find(|c| c.contains("a")).unwrap();
        assert_eq!(abc.record_ids, vec!["a", "b", "c"]);
        assert!((abc.confidence - 0.7).abs() < 1e-6);

        let xy = clusters.iter().find(|c| c.contains("x")).unwrap();
        assert_eq!(xy.record_ids, vec!["x", "y"]);
        assert!((xy.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clusters_sorted_and_members_sorted() {
        let matcher = hashing_matcher(0.9);
        let candidates = vec![candidate("z", "m", 0.5), candidate("b", "a", 0.5)];

        let clusters = matcher.cluster(&candidates);
        let ids: Vec<&str> = clusters.iter().map(|c| c.cluster_id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        for cluster in &clusters {
            let mut members = cluster.record_ids.clone();
            members.sort();
            assert_eq!(cluster.record_ids, members);
        }
    }

    #[test]
    fn test_cluster_membership_stable_under_permutation() {
        let matcher = hashing_matcher(0.9);
        let forward = vec![
            candidate("a", "b", 0.9),
            candidate("c", "d", 0.8),
            candidate("b", "c", 0.7),
            candidate("p", "q", 0.6),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let partition = |clusters: Vec<Cluster>| -> Vec<Vec<String>> {
            let mut groups: Vec<Vec<String>> =
                clusters.into_iter().map(|c| c.record_ids).collect();
            groups.sort();
            groups
        };

        assert_eq!(
            partition(matcher.cluster(&forward)),
            partition(matcher.cluster(&reversed))
        );
    }

    #[test]
    fn test_clusters_never_overlap() {
        let matcher = hashing_matcher(0.9);
        let candidates = vec![
            candidate("a", "b", 0.9),
            candidate("b", "c", 0.9),
            candidate("d", "e", 0.9),
            candidate("e", "a", 0.9),
            candidate("x", "y", 0.9),
        ];

        let clusters = matcher.cluster(&candidates);
        let mut seen = std::collections::HashSet::new();
        for cluster in &clusters {
            for id in &cluster.record_ids {
                assert!(seen.insert(id.clone()), "record {id} appears twice");
            }
        }
    }

    #[test]
    fn test_cluster_ids_deterministic_for_same_sequence() {
        let matcher = hashing_matcher(0.9);
        let candidates = vec![candidate("a", "b", 0.9), candidate("b", "c", 0.8)];

        let first = matcher.cluster(&candidates);
        let second = matcher.cluster(&candidates);
        assert_eq!(first, second);
        assert_eq!(first[0].cluster_id, "cluster_a");
    }

    #[test]
    fn test_cluster_empty_input() {
        let matcher = hashing_matcher(0.9);
        assert!(matcher.cluster(&[]).is_empty());
    }
}
