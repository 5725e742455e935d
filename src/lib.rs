//! # dedupe
//!
//! A customer entity-resolution engine: tag-driven schema mapping,
//! composable cleaning, deterministic and embedding-based matching,
//! and union-find clustering, assembled into a deterministic pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use dedupe::prelude::*;
//!
//! let schema = RecordSchema::from_mapping([
//!     (FieldTag::Name, vec!["FIRSTNAME", "LASTNAME"]),
//!     (FieldTag::Email, vec!["EMAIL"]),
//! ]).unwrap();
//!
//! let pipeline = build_local_pipeline(&PipelineConfig::default(), schema).unwrap();
//! let clusters = pipeline.run(&[]).unwrap();
//! assert!(clusters.is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! - `dedupe-core` - records, candidates, clusters, vectors, union-find
//! - `dedupe-schema` - field tags, schema mapping, cleaning
//! - `dedupe-match` - matchers, embedders, vector index, filters
//! - `dedupe-pipeline` - configuration and runners

pub mod dataset;
pub mod io;
pub mod report;

// Re-export core types
pub use dedupe_core::{
    CandidateFilter, Cleaner, Cluster, EmbeddingModel, Error, MatchCandidate, Matcher, Pipeline,
    Record, Result, UnionFind, Vector, VectorIndex,
};

// Re-export schema and matching
pub use dedupe_match::{
    canonical_email, levenshtein, BruteForceIndex, EditDistanceMatcher, EmailConstraintFilter,
    EmbeddingMatcher, HashingEmbedder, DEFAULT_DIMENSIONS, DEFAULT_MATCH_SCORE,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use dedupe_schema::{FieldTag, FunctionalCleaner, RecordSchema};

#[cfg(feature = "local-embeddings")]
pub use dedupe_match::LocalTextEmbedder;

// Re-export pipeline assembly
pub use dedupe_pipeline::{
    build_local_pipeline, default_cleaner, DistributedPipeline, EmbeddingBackend, LocalPipeline,
    PipelineConfig, RunOutcome, RunStats,
};

pub use dataset::{retail_schema, DatasetGenerator, RETAIL_COLUMNS};
pub use report::{cluster_preview, summarize, RunSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_local_pipeline, retail_schema, summarize, BruteForceIndex, Cluster, DatasetGenerator,
        EditDistanceMatcher, EmbeddingBackend, EmbeddingMatcher, Error, FieldTag,
        FunctionalCleaner, HashingEmbedder, LocalPipeline, MatchCandidate, Pipeline,
        PipelineConfig, Record, RecordSchema, Result, RunSummary, UnionFind, Vector,
    };
}
