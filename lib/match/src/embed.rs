//! Embedding models
//!
//! Converts tagged record text into fixed-length vectors. Two variants
//! sit behind the [`EmbeddingModel`] trait:
//!
//! - [`HashingEmbedder`] - token-hashing bag-of-words baseline, always
//!   available, suitable for local testing.
//! - [`LocalTextEmbedder`] - sentence embeddings via fastembed, compiled
//!   in with the `local-embeddings` feature.

use ahash::RandomState;
use dedupe_core::{EmbeddingModel, Error, Record, Result, Vector};
use dedupe_schema::{FieldTag, RecordSchema};
use rayon::prelude::*;
use std::hash::BuildHasher;

/// Default dimension for hashed text embeddings
pub const DEFAULT_DIMENSIONS: usize = 64;

// Fixed seeds: the token-to-dimension mapping must be stable within a
// run. Cross-run stability is not required but falls out for free.
const HASH_SEEDS: (u64, u64, u64, u64) = (
    0x9e37_79b9_7f4a_7c15,
    0xf39c_c060_5ced_c834,
    0x1082_276b_f3a2_7251,
    0x7109_870e_cba6_d97c,
);

/// Hashing-based baseline embedding model.
///
/// The configured tags' joined values are lower-cased and
/// whitespace-tokenized; each token is hashed into one of `dimensions`
/// buckets, incrementing that bucket by one per occurrence. The vector
/// is then L2-normalized. A record with no text in any configured tag
/// embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    schema: RecordSchema,
    tags: Vec<FieldTag>,
    dimensions: usize,
    hasher: RandomState,
}

impl HashingEmbedder {
    pub fn new(schema: RecordSchema, tags: Vec<FieldTag>) -> Self {
        let (k0, k1, k2, k3) = HASH_SEEDS;
        Self {
            schema,
            tags,
            dimensions: DEFAULT_DIMENSIONS,
            hasher: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }

    /// Change the vector dimension; must be non-zero.
    pub fn with_dimensions(mut self, dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimensions must be non-zero".to_string(),
            ));
        }
        self.dimensions = dimensions;
        Ok(self)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_one(&self, record: &Record) -> Vector {
        let text = record_text(&self.schema, &self.tags, record);
        let mut components = vec![0.0f32; self.dimensions];
        for token in text.split_whitespace() {
            let bucket = (self.hasher.hash_one(token) % self.dimensions as u64) as usize;
            components[bucket] += 1.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        vector
    }
}

impl EmbeddingModel for HashingEmbedder {
    fn embed(&self, records: &[Record]) -> Result<Vec<Vector>> {
        Ok(records
            .par_iter()
            .map(|record| self.embed_one(record))
            .collect())
    }
}

/// Lower-cased concatenation of the configured tags' joined values.
fn record_text(schema: &RecordSchema, tags: &[FieldTag], record: &Record) -> String {
    let parts: Vec<String> = tags
        .iter()
        .map(|tag| schema.joined_value(&record.attributes, *tag))
        .filter(|part| !part.is_empty())
        .collect();
    parts.join(" ").to_lowercase()
}

/// Sentence-embedding adapter backed by fastembed.
///
/// Model weights are downloaded on first use and cached; construction
/// fails fast with [`Error::CapabilityUnavailable`] when the model
/// cannot be initialized, so pipeline assembly errors surface before any
/// records are processed.
#[cfg(feature = "local-embeddings")]
pub struct LocalTextEmbedder {
    schema: RecordSchema,
    tags: Vec<FieldTag>,
    model_name: String,
    model: parking_lot::Mutex<fastembed::TextEmbedding>,
}

#[cfg(feature = "local-embeddings")]
impl LocalTextEmbedder {
    pub fn new(schema: RecordSchema, tags: Vec<FieldTag>, model_name: &str) -> Result<Self> {
        let model = fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(resolve_model(model_name)?)
                .with_show_download_progress(false),
        )
        .map_err(|e| {
            Error::CapabilityUnavailable(format!(
                "failed to initialize local embedding model '{model_name}': {e}"
            ))
        })?;

        Ok(Self {
            schema,
            tags,
            model_name: model_name.to_string(),
            model: parking_lot::Mutex::new(model),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(feature = "local-embeddings")]
impl EmbeddingModel for LocalTextEmbedder {
    fn embed(&self, records: &[Record]) -> Result<Vec<Vector>> {
        let texts: Vec<String> = records
            .iter()
            .map(|record| record_text(&self.schema, &self.tags, record))
            .collect();

        let embeddings = self
            .model
            .lock()
            .embed(texts, None)
            .map_err(|e| Error::CapabilityUnavailable(format!("local embedding failed: {e}")))?;

        Ok(embeddings.into_iter().map(Vector::new).collect())
    }
}

#[cfg(feature = "local-embeddings")]
fn resolve_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name {
        "all-minilm-l6-v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "bge-small-en-v1.5" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        other => Err(Error::CapabilityUnavailable(format!(
            "unknown local embedding model: '{other}'. Supported models: \
             all-minilm-l6-v2, bge-small-en-v1.5, bge-base-en-v1.5"
        ))),
    }
}
