//! Data model for the resolution pipeline
//!
//! Records flow in, match candidates are produced pairwise, and clusters
//! come out. All three types are values: once created they are never
//! mutated, and every pipeline stage consumes a snapshot and produces a
//! new one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Canonical representation of a customer account record.
///
/// `record_id` is unique, stable and never reused. Cleaning produces a new
/// `Record` carrying the same id; records are never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub record_id: String,
    pub attributes: HashMap<String, Value>,
}

impl Record {
    pub fn new(record_id: impl Into<String>, attributes: HashMap<String, Value>) -> Self {
        Self {
            record_id: record_id.into(),
            attributes,
        }
    }

    /// Look up a raw attribute value by source column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.attributes.get(column)
    }
}

/// Potential duplicate pair with an attached confidence score.
///
/// The pair is unordered but stored left/right; a matcher must never emit
/// both (a, b) and (b, a) for the same pair. `metadata` is free-form
/// provenance naming the rule or model that produced the candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchCandidate {
    pub left_id: String,
    pub right_id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Value,
}

impl MatchCandidate {
    pub fn new(
        left_id: impl Into<String>,
        right_id: impl Into<String>,
        score: f32,
        metadata: Value,
    ) -> Self {
        Self {
            left_id: left_id.into(),
            right_id: right_id.into(),
            score,
            metadata,
        }
    }
}

/// A collection of record ids that likely refer to the same entity.
///
/// Clusters always have at least two members; member ids are sorted
/// ascending. Computed once per run from a frozen candidate set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cluster {
    pub cluster_id: String,
    pub record_ids: Vec<String>,
    pub confidence: f32,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.record_ids.len()
    }

    pub fn contains(&self, record_id: &str) -> bool {
        self.record_ids.iter().any(|id| id == record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_attribute_lookup() {
        let mut attrs = HashMap::new();
        attrs.insert("FIRSTNAME".to_string(), json!("Jane"));
        let record = Record::new("cust_001", attrs);

        assert_eq!(record.record_id, "cust_001");
        assert_eq!(record.get("FIRSTNAME"), Some(&json!("Jane")));
        assert_eq!(record.get("LASTNAME"), None);
    }

    #[test]
    fn test_candidate_serde_roundtrip() {
        let candidate = MatchCandidate::new(
            "a",
            "b",
            0.7,
            json!({"rule": "levenshtein", "tag": "NAME"}),
        );
        let encoded = serde_json::to_string(&candidate).unwrap();
        let decoded: MatchCandidate = serde_json::from_str(&encoded).unwrap();

        assert_eq!(candidate, decoded);
    }

    #[test]
    fn test_cluster_membership() {
        let cluster = Cluster {
            cluster_id: "cluster_a".to_string(),
            record_ids: vec!["a".to_string(), "b".to_string()],
            confidence: 0.8,
        };

        assert_eq!(cluster.size(), 2);
        assert!(cluster.contains("a"));
        assert!(!cluster.contains("c"));
    }
}
