//! Run summaries and cluster previews

use dedupe_core::{Cluster, Record};
use dedupe_pipeline::RunStats;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Columns excluded from cluster previews; identifiers and audit
/// timestamps differ on every row and drown out the interesting fields.
const NOISY_PREVIEW_COLUMNS: [&str; 10] = [
    "CUSTOMER_PK",
    "DIM_CUSTOMER_ID",
    "DIM_INDIVIDUAL_ID",
    "WEB_CUSTOMER_ID",
    "REGISTERED_DATE",
    "LAST_UPDATED",
    "GDPR_REGISTERED_DATE",
    "ANONYMISED",
    "GDPR_ANONYMISED",
    "SOURCE",
];

/// Aggregate figures for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub record_count: usize,
    pub deterministic_candidate_count: usize,
    pub embedding_candidate_count: usize,
    pub candidate_pair_count: usize,
    pub retained_candidate_count: usize,
    pub cluster_count: usize,
    pub clustered_record_count: usize,
    pub avg_cluster_size: f64,
    pub max_cluster_size: usize,
    pub min_cluster_size: usize,
}

/// Build a [`RunSummary`] from stage counts and the final clusters.
pub fn summarize(stats: &RunStats, clusters: &[Cluster]) -> RunSummary {
    let sizes: Vec<usize> = clusters.iter().map(Cluster::size).collect();
    let clustered: HashSet<&str> = clusters
        .iter()
        .flat_map(|cluster| cluster.record_ids.iter().map(String::as_str))
        .collect();

    let avg = if sizes.is_empty() {
        0.0
    } else {
        sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
    };

    RunSummary {
        record_count: stats.record_count,
        deterministic_candidate_count: stats.deterministic_candidates,
        embedding_candidate_count: stats.embedding_candidates,
        candidate_pair_count: stats.deterministic_candidates + stats.embedding_candidates,
        retained_candidate_count: stats.retained_candidates,
        cluster_count: clusters.len(),
        clustered_record_count: clustered.len(),
        avg_cluster_size: (avg * 1000.0).round() / 1000.0,
        max_cluster_size: sizes.iter().copied().max().unwrap_or(0),
        min_cluster_size: sizes.iter().copied().min().unwrap_or(0),
    }
}

/// Preview payload for the largest clusters, projected onto the
/// columns where member records actually disagree.
pub fn cluster_preview(clusters: &[Cluster], records: &[Record], limit: usize) -> Vec<Value> {
    let by_id: HashMap<&str, &Record> = records
        .iter()
        .map(|record| (record.record_id.as_str(), record))
        .collect();

    let mut ranked: Vec<&Cluster> = clusters.iter().collect();
    ranked.sort_by(|a, b| {
        b.size()
            .cmp(&a.size())
            .then_with(|| a.cluster_id.cmp(&b.cluster_id))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|cluster| {
            let members: Vec<&Record> = cluster
                .record_ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied())
                .collect();
            let columns = differing_columns(&members);

            let projected: Vec<Value> = members
                .iter()
                .map(|record| {
                    let values: Vec<String> = columns
                        .iter()
                        .map(|column| {
                            record
                                .get(column)
                                .map(value_display)
                                .unwrap_or_default()
                        })
                        .collect();
                    json!({
                        "record_id": record.record_id,
                        "projected_values": values,
                    })
                })
                .collect();

            json!({
                "cluster_id": cluster.cluster_id,
                "size": cluster.size(),
                "confidence": ((cluster.confidence as f64) * 10000.0).round() / 10000.0,
                "differing_columns": columns,
                "projected_records": projected,
            })
        })
        .collect()
}

fn differing_columns(records: &[&Record]) -> Vec<String> {
    if records.len() <= 1 {
        return Vec::new();
    }

    let mut columns: Vec<&String> = records
        .iter()
        .flat_map(|record| record.attributes.keys())
        .collect();
    columns.sort();
    columns.dedup();

    columns
        .into_iter()
        .filter(|column| !NOISY_PREVIEW_COLUMNS.contains(&column.as_str()))
        .filter(|column| {
            let values: HashSet<String> = records
                .iter()
                .map(|record| {
                    record
                        .get(column)
                        .map(value_display)
                        .unwrap_or_default()
                        .trim()
                        .to_string()
                })
                .collect();
            values.len() > 1
        })
        .map(|column| column.to_string())
        .collect()
}

fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn cluster(id: &str, members: &[&str], confidence: f32) -> Cluster {
        Cluster {
            cluster_id: id.to_string(),
            record_ids: members.iter().map(|m| m.to_string()).collect(),
            confidence,
        }
    }

    fn stats() -> RunStats {
        RunStats {
            record_count: 10,
            deterministic_candidates: 3,
            embedding_candidates: 2,
            retained_candidates: 4,
            cluster_count: 2,
        }
    }

    #[test]
    fn test_summarize_counts() {
        let clusters = vec![
            cluster("cluster_a", &["a", "b"], 0.9),
            cluster("cluster_c", &["c", "d", "e"], 0.8),
        ];

        let summary = summarize(&stats(), &clusters);
        assert_eq!(summary.candidate_pair_count, 5);
        assert_eq!(summary.retained_candidate_count, 4);
        assert_eq!(summary.cluster_count, 2);
        assert_eq!(summary.clustered_record_count, 5);
        assert_eq!(summary.avg_cluster_size, 2.5);
        assert_eq!(summary.max_cluster_size, 3);
        assert_eq!(summary.min_cluster_size, 2);
    }

    #[test]
    fn test_summarize_no_clusters() {
        let summary = summarize(&stats(), &[]);
        assert_eq!(summary.avg_cluster_size, 0.0);
        assert_eq!(summary.clustered_record_count, 0);
    }

    #[test]
    fn test_preview_projects_differing_columns() {
        let mut a = HashMap::new();
        a.insert("FIRSTNAME".to_string(), json!("Jane"));
        a.insert("LASTNAME".to_string(), json!("Smith"));
        let mut b = HashMap::new();
        b.insert("FIRSTNAME".to_string(), json!("Jan"));
        b.insert("LASTNAME".to_string(), json!("Smith"));

        let records = vec![Record::new("a", a), Record::new("b", b)];
        let clusters = vec![cluster("cluster_a", &["a", "b"], 0.7)];

        let preview = cluster_preview(&clusters, &records, 10);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0]["differing_columns"], json!(["FIRSTNAME"]));
        assert_eq!(
            preview[0]["projected_records"][0]["projected_values"],
            json!(["Jane"])
        );
    }

    #[test]
    fn test_preview_ranked_by_size_then_id() {
        let records: Vec<Record> = Vec::new();
        let clusters = vec![
            cluster("cluster_b", &["d", "e"], 0.5),
            cluster("cluster_a", &["a", "b", "c"], 0.5),
        ];

        let preview = cluster_preview(&clusters, &records, 1);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0]["cluster_id"], json!("cluster_a"));
    }
}
