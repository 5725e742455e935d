//! Post-candidate filters
//!
//! Filters run between candidate concatenation and clustering. They must
//! be order-preserving and side-effect-free.

use ahash::AHashMap;
use dedupe_core::{CandidateFilter, MatchCandidate, Record};
use dedupe_schema::{FieldTag, RecordSchema};

/// Drops candidates whose endpoints carry incompatible email addresses.
///
/// Emails are canonicalized first; two emails are compatible when their
/// canonical forms are equal or when either record has no email at all
/// (missing data is never grounds for rejection).
#[derive(Debug, Clone)]
pub struct EmailConstraintFilter {
    schema: RecordSchema,
}

impl EmailConstraintFilter {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }
}

impl CandidateFilter for EmailConstraintFilter {
    fn filter(
        &self,
        candidates: Vec<MatchCandidate>,
        records: &[Record],
    ) -> Vec<MatchCandidate> {
        let emails_by_id: AHashMap<&str, String> = records
            .iter()
            .map(|record| {
                let raw = self.schema.joined_value(&record.attributes, FieldTag::Email);
                (record.record_id.as_str(), canonical_email(&raw))
            })
            .collect();

        candidates
            .into_iter()
            .filter(|candidate| {
                let left = emails_by_id
                    .get(candidate.left_id.as_str())
                    .map(String::as_str)
                    .unwrap_or("");
                let right = emails_by_id
                    .get(candidate.right_id.as_str())
                    .map(String::as_str)
                    .unwrap_or("");
                emails_compatible(left, right)
            })
            .collect()
    }
}

/// Canonicalize an email address for identity comparison.
///
/// Lower-cases, strips any `+suffix` from the local part, and removes
/// dots from the local part for gmail.com/googlemail.com addresses.
pub fn canonical_email(email: &str) -> String {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return email;
    };

    let mut local = local.split('+').next().unwrap_or(local).to_string();
    if domain == "gmail.com" || domain == "googlemail.com" {
        local = local.replace('.', "");
    }

    format!("{local}@{domain}")
}

fn emails_compatible(left: &str, right: &str) -> bool {
    left.is_empty() || right.is_empty() || left == right
}
