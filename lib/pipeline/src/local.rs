//! Local runner
//!
//! [`LocalPipeline`] executes the full resolution flow on a single
//! machine: clean, match with both generators, concatenate candidates
//! (deterministic first), apply the optional post-filter, cluster.

use dedupe_core::{
    CandidateFilter, Cleaner, Cluster, Matcher, Pipeline, Record, Result,
};
use dedupe_match::EmbeddingMatcher;
use tracing::{debug, info};

/// Per-stage counts from a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub record_count: usize,
    pub deterministic_candidates: usize,
    pub embedding_candidates: usize,
    pub retained_candidates: usize,
    pub cluster_count: usize,
}

/// Clusters plus the stage counts that produced them.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub clusters: Vec<Cluster>,
    pub stats: RunStats,
}

/// Single-machine pipeline runner suitable for development and batch
/// runs that fit in memory.
pub struct LocalPipeline {
    cleaner: Box<dyn Cleaner>,
    deterministic: Box<dyn Matcher>,
    embedding: EmbeddingMatcher,
    filter: Option<Box<dyn CandidateFilter>>,
}

impl LocalPipeline {
    pub fn new(
        cleaner: Box<dyn Cleaner>,
        deterministic: Box<dyn Matcher>,
        embedding: EmbeddingMatcher,
    ) -> Self {
        Self {
            cleaner,
            deterministic,
            embedding,
            filter: None,
        }
    }

    /// Interpose a post-candidate filter before clustering.
    pub fn with_filter(mut self, filter: Box<dyn CandidateFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Run the pipeline and report per-stage counts alongside clusters.
    pub fn run_with_stats(&self, records: &[Record]) -> Result<RunOutcome> {
        let cleaned = self.cleaner.clean(records);
        debug!(records = cleaned.len(), "cleaned record batch");

        // The two matchers are independent over the same immutable batch;
        // candidate concatenation order is fixed: deterministic first.
        let mut candidates = self.deterministic.match_records(&cleaned)?;
        let deterministic_candidates = candidates.len();

        let embedding_candidates = self.embedding.match_records(&cleaned)?;
        let embedding_count = embedding_candidates.len();
        candidates.extend(embedding_candidates);

        info!(
            deterministic = deterministic_candidates,
            embedding = embedding_count,
            "generated match candidates"
        );

        let candidates = match &self.filter {
            Some(filter) => filter.filter(candidates, &cleaned),
            None => candidates,
        };
        let retained_candidates = candidates.len();

        let clusters = self.embedding.cluster(&candidates);
        info!(clusters = clusters.len(), "clustered candidates");

        Ok(RunOutcome {
            stats: RunStats {
                record_count: records.len(),
                deterministic_candidates,
                embedding_candidates: embedding_count,
                retained_candidates,
                cluster_count: clusters.len(),
            },
            clusters,
        })
    }
}

impl Pipeline for LocalPipeline {
    fn run(&self, records: &[Record]) -> Result<Vec<Cluster>> {
        Ok(self.run_with_stats(records)?.clusters)
    }
}
