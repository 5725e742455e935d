//! Distributed runner stub
//!
//! Interface placeholder for a future cluster-scale execution engine.
//! The shape is kept stable so callers can swap runners without code
//! changes once a real implementation lands.

use dedupe_core::{Cluster, Error, Pipeline, Record, Result};

/// Unimplemented distributed pipeline; `run` always fails fast.
#[derive(Debug, Clone)]
pub struct DistributedPipeline {
    job_name: String,
    staging_location: String,
}

impl DistributedPipeline {
    pub fn new(job_name: impl Into<String>, staging_location: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            staging_location: staging_location.into(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn staging_location(&self) -> &str {
        &self.staging_location
    }
}

impl Pipeline for DistributedPipeline {
    fn run(&self, _records: &[Record]) -> Result<Vec<Cluster>> {
        Err(Error::NotImplemented(format!(
            "distributed execution is not implemented; job '{}' was not started",
            self.job_name
        )))
    }
}
