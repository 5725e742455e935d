use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown field tag: {0}")]
    UnknownTag(String),

    #[error("Input length mismatch: expected {expected}, got {actual}")]
    InputMismatch { expected: usize, actual: usize },

    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
