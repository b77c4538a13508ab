//! Error types for easymath-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the record store
///
/// Only I/O and serialization failures escape a store call; rejected
/// mutations are reported through the operation's outcome instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset {path} is not a valid dataset document: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to write dataset {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid problem id {id:?} in topic {topic}")]
    InvalidId { topic: String, id: String },

    #[error("Problem id {id} is out of sequence for topic {topic}: expected {expected}")]
    OutOfSequence {
        topic: String,
        id: String,
        expected: u32,
    },
}

/// Errors from a generation collaborator
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Model error: {0}")]
    Model(#[from] easymath_models::Error),

    #[error("No response from {0}")]
    EmptyResponse(String),

    #[error("Generation failed: {0}")]
    Failed(String),
}
