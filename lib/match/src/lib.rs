//! # dedupe Match
//!
//! Matching engine for the dedupe entity-resolution pipeline.
//!
//! This crate provides both candidate generators and the clustering stage:
//!
//! - [`EditDistanceMatcher`] - rule-based matcher over a semantic field
//!   with a bounded Levenshtein edit budget
//! - [`HashingEmbedder`] - token-hashing bag-of-words embedding baseline
//! - [`BruteForceIndex`] - exhaustive pairwise similarity index
//! - [`EmbeddingMatcher`] - embed + index + query, plus union-find
//!   clustering with aggregated confidence
//! - [`EmailConstraintFilter`] - canonical-email post-candidate filter
//!
//! With the `local-embeddings` feature, [`LocalTextEmbedder`] adds a
//! fastembed-backed sentence-embedding model behind the same
//! [`EmbeddingModel`](dedupe_core::EmbeddingModel) trait.

pub mod deterministic;
pub mod distance;
pub mod embed;
pub mod filter;
pub mod index;
pub mod matcher;

pub use deterministic::{EditDistanceMatcher, DEFAULT_MATCH_SCORE};
pub use distance::levenshtein;
pub use embed::{HashingEmbedder, DEFAULT_DIMENSIONS};
pub use filter::{canonical_email, EmailConstraintFilter};
pub use index::BruteForceIndex;
pub use matcher::{EmbeddingMatcher, DEFAULT_SIMILARITY_THRESHOLD};

#[cfg(feature = "local-embeddings")]
pub use embed::LocalTextEmbedder;
