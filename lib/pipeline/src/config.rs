//! Pipeline configuration and assembly
//!
//! [`PipelineConfig`] carries every knob the engine accepts; validation
//! happens up front so a corrupted configuration aborts assembly instead
//! of producing partial results. [`build_local_pipeline`] wires the
//! concrete capabilities together.

use crate::local::LocalPipeline;
use dedupe_core::{CandidateFilter, EmbeddingModel, Error, Result};
use dedupe_match::{
    BruteForceIndex, EditDistanceMatcher, EmailConstraintFilter, EmbeddingMatcher,
    HashingEmbedder, DEFAULT_DIMENSIONS, DEFAULT_MATCH_SCORE, DEFAULT_SIMILARITY_THRESHOLD,
};
use dedupe_schema::{FieldTag, FunctionalCleaner, RecordSchema};

/// Which embedding model feeds the vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// Token-hashing bag-of-words baseline, always available
    Hashing,
    /// fastembed sentence embeddings; requires the `local-embeddings` feature
    Local,
}

/// Engine configuration surface.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub embedding_backend: EmbeddingBackend,
    /// Model name for the local backend (ignored by the hashing backend)
    pub local_model: String,
    /// Minimum similarity for embedding candidates, within (0, 1]
    pub similarity_threshold: f32,
    /// Edit budget for the deterministic name rule
    pub max_edits: usize,
    /// Fixed score attached to deterministic candidates, within [0, 1]
    pub match_score: f32,
    /// Tags whose joined text feeds the embedding model
    pub embedding_tags: Vec<FieldTag>,
    /// Vector dimension for the hashing backend
    pub dimensions: usize,
    /// Interpose the canonical-email post-candidate filter
    pub email_constraint: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_backend: EmbeddingBackend::Hashing,
            local_model: "all-minilm-l6-v2".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_edits: 1,
            match_score: DEFAULT_MATCH_SCORE,
            embedding_tags: vec![FieldTag::Name, FieldTag::Address, FieldTag::Email],
            dimensions: DEFAULT_DIMENSIONS,
            email_constraint: true,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "similarity threshold must be within (0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.match_score) {
            return Err(Error::InvalidConfig(format!(
                "match score must be within [0, 1], got {}",
                self.match_score
            )));
        }
        if self.embedding_tags.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one embedding tag is required".to_string(),
            ));
        }
        if self.dimensions == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default cleaner: postcodes compacted and upper-cased, addresses
/// lower-cased with collapsed whitespace, emails trimmed and lower-cased.
pub fn default_cleaner(schema: RecordSchema) -> FunctionalCleaner {
    FunctionalCleaner::with_schema(schema)
        .tag_transform(FieldTag::Postcode, |value| {
            value.replace(' ', "").to_uppercase()
        })
        .tag_transform(FieldTag::Address, |value| {
            value.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .tag_transform(FieldTag::Email, |value| value.trim().to_lowercase())
}

/// Assemble a [`LocalPipeline`] from a validated configuration.
///
/// Fails fast: configuration errors and unavailable embedding backends
/// surface here, before any records are processed.
pub fn build_local_pipeline(config: &PipelineConfig, schema: RecordSchema) -> Result<LocalPipeline> {
    config.validate()?;

    let cleaner = default_cleaner(schema.clone());

    let deterministic = EditDistanceMatcher::new(schema.clone())
        .with_max_edits(config.max_edits)
        .with_score(config.match_score)?;

    let model: Box<dyn EmbeddingModel> = match config.embedding_backend {
        EmbeddingBackend::Hashing => Box::new(
            HashingEmbedder::new(schema.clone(), config.embedding_tags.clone())
                .with_dimensions(config.dimensions)?,
        ),
        EmbeddingBackend::Local => build_local_model(&schema, config)?,
    };

    let embedding = EmbeddingMatcher::new(
        model,
        Box::new(BruteForceIndex::new()),
        config.similarity_threshold,
    )?;

    let mut pipeline =
        LocalPipeline::new(Box::new(cleaner), Box::new(deterministic), embedding);
    if config.email_constraint {
        let filter: Box<dyn CandidateFilter> = Box::new(EmailConstraintFilter::new(schema));
        pipeline = pipeline.with_filter(filter);
    }
    Ok(pipeline)
}

#[cfg(feature = "local-embeddings")]
fn build_local_model(
    schema: &RecordSchema,
    config: &PipelineConfig,
) -> Result<Box<dyn EmbeddingModel>> {
    Ok(Box::new(dedupe_match::LocalTextEmbedder::new(
        schema.clone(),
        config.embedding_tags.clone(),
        &config.local_model,
    )?))
}

#[cfg(not(feature = "local-embeddings"))]
fn build_local_model(
    _schema: &RecordSchema,
    _config: &PipelineConfig,
) -> Result<Box<dyn EmbeddingModel>> {
    Err(Error::CapabilityUnavailable(
        "the local embedding backend requires building with the `local-embeddings` feature"
            .to_string(),
    ))
}
