//! Deterministic rule-based matching
//!
//! [`EditDistanceMatcher`] emits a candidate for every unordered record
//! pair whose joined field text (default: the NAME tag) differs by at
//! most `max_edits` Levenshtein edits. This is the naive quadratic
//! baseline; no blocking is applied.

use crate::distance::levenshtein;
use dedupe_core::{Error, MatchCandidate, Matcher, Record, Result};
use dedupe_schema::{FieldTag, RecordSchema};
use rayon::prelude::*;
use serde_json::json;

/// Default fixed score attached to rule-based candidates
pub const DEFAULT_MATCH_SCORE: f32 = 0.7;

/// Candidate generator: two records match when their chosen semantic
/// field differs by at most `max_edits` edits.
///
/// Records whose joined field value is empty on either side never match;
/// missing data must not be treated as identical data.
#[derive(Debug, Clone)]
pub struct EditDistanceMatcher {
    schema: RecordSchema,
    tag: FieldTag,
    max_edits: usize,
    score: f32,
}

impl EditDistanceMatcher {
    /// Matcher over the NAME tag with `max_edits = 1` and the default score.
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            tag: FieldTag::Name,
            max_edits: 1,
            score: DEFAULT_MATCH_SCORE,
        }
    }

    /// Compare a different semantic field
    pub fn with_tag(mut self, tag: FieldTag) -> Self {
        self.tag = tag;
        self
    }

    /// Change the edit budget
    pub fn with_max_edits(mut self, max_edits: usize) -> Self {
        self.max_edits = max_edits;
        self
    }

    /// Change the fixed candidate score; must be within [0, 1].
    pub fn with_score(mut self, score: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::InvalidConfig(format!(
                "match score must be within [0, 1], got {score}"
            )));
        }
        self.score = score;
        Ok(self)
    }

    fn comparison_key(&self, record: &Record) -> String {
        self.schema
            .joined_value(&record.attributes, self.tag)
            .to_lowercase()
    }
}

impl Matcher for EditDistanceMatcher {
    fn match_records(&self, records: &[Record]) -> Result<Vec<MatchCandidate>> {
        let keys: Vec<String> = records
            .iter()
            .map(|record| self.comparison_key(record))
            .collect();
        let keys = &keys;

        // Parallel over the outer index; rayon's ordered collect keeps the
        // output identical to sequential (i, j) enumeration.
        let candidates = (0..records.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                (i + 1..records.len()).filter_map(move |j| {
                    if keys[i].is_empty() || keys[j].is_empty() {
                        return None;
                    }
                    if levenshtein(&keys[i], &keys[j]) > self.max_edits {
                        return None;
                    }
                    Some(MatchCandidate::new(
                        records[i].record_id.clone(),
                        records[j].record_id.clone(),
                        self.score,
                        json!({"rule": "levenshtein", "tag": self.tag.as_str()}),
                    ))
                })
            })
            .collect();

        Ok(candidates)
    }
}
