//! # dedupe Core
//!
//! Core library for the dedupe entity-resolution engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Record`] - A customer record: stable id plus attribute map
//! - [`MatchCandidate`] - A scored claim that two records may match
//! - [`Cluster`] - A group of records connected by match evidence
//! - [`Vector`] - Dense vector representation for embedded records
//! - [`UnionFind`] - Disjoint-set structure used by the clustering stage
//!
//! The capability traits in [`traits`] define the seams between pipeline
//! stages; the matching and pipeline crates provide the implementations.

pub mod error;
pub mod model;
pub mod traits;
pub mod unionfind;
pub mod vector;

pub use error::{Error, Result};
pub use model::{Cluster, MatchCandidate, Record};
pub use traits::{Cleaner, CandidateFilter, EmbeddingModel, Matcher, Pipeline, VectorIndex};
pub use unionfind::UnionFind;
pub use vector::Vector;
