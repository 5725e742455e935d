//! # dedupe Pipeline
//!
//! Pipeline assembly and runners for the dedupe entity-resolution engine.
//!
//! - [`PipelineConfig`] - validated configuration surface
//! - [`build_local_pipeline`] - wires cleaner, matchers, index and filter
//! - [`LocalPipeline`] - single-machine runner
//! - [`DistributedPipeline`] - stub interface for a future cluster runner

pub mod config;
pub mod distributed;
pub mod local;

pub use config::{build_local_pipeline, default_cleaner, EmbeddingBackend, PipelineConfig};
pub use distributed::DistributedPipeline;
pub use local::{LocalPipeline, RunOutcome, RunStats};
