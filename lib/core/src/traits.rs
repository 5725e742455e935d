//! Capability traits for the resolution pipeline
//!
//! Each pipeline stage is a swappable capability selected at
//! pipeline-construction time. Concrete variants (hashing baseline vs.
//! external embedding model, brute-force vs. approximate index, local vs.
//! distributed runner) all sit behind these traits.

use crate::{Cluster, MatchCandidate, Record, Result, Vector};

/// Step 1: normalize fields into a canonical representation.
///
/// `clean` returns a new batch with the same length, ordering and record
/// ids as the input; input records are never mutated.
pub trait Cleaner: Send + Sync {
    fn clean(&self, records: &[Record]) -> Vec<Record>;
}

/// Step 2: produce scored duplicate candidates from a record batch.
///
/// Implementations must emit each unordered pair at most once, in a
/// deterministic order fixed by (i, j) pair enumeration over the input.
pub trait Matcher: Send + Sync {
    fn match_records(&self, records: &[Record]) -> Result<Vec<MatchCandidate>>;
}

/// Step 3a: map records into embedding vectors.
///
/// Returns one fixed-length vector per record, in input order. Records
/// with no usable text still embed to a defined value.
pub trait EmbeddingModel: Send + Sync {
    fn embed(&self, records: &[Record]) -> Result<Vec<Vector>>;
}

/// Step 3b: similarity search over embedded records.
///
/// `build` replaces any prior index state; it fails when id and vector
/// counts differ. `query_similar_pairs` returns every unordered pair
/// (i < j in build order) whose dot product reaches the threshold.
/// Approximate (ANN) implementations are an acceptable extension point as
/// long as their recall trade-offs are documented.
pub trait VectorIndex: Send + Sync {
    fn build(&self, record_ids: &[String], vectors: &[Vector]) -> Result<()>;

    fn query_similar_pairs(&self, min_similarity: f32) -> Vec<MatchCandidate>;
}

/// Post-candidate filter interposed between candidate generation and
/// clustering. Must be order-preserving and side-effect-free.
pub trait CandidateFilter: Send + Sync {
    fn filter(&self, candidates: Vec<MatchCandidate>, records: &[Record]) -> Vec<MatchCandidate>;
}

/// Unified pipeline interface for local or distributed execution engines.
pub trait Pipeline: Send + Sync {
    fn run(&self, records: &[Record]) -> Result<Vec<Cluster>>;
}
