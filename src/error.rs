//! Error types for the quiz generator

use crate::config::ConfigError;
use crate::generation::GenerationError;
use crate::wizard::UploadError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for quiz generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the quiz generator
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Quiz generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to write export {path}: {message}")]
    Export { path: PathBuf, message: String },

    #[error("Nothing to export: the quiz has no questions")]
    EmptyExport,

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid question spec '{spec}': {message}")]
    QuestionSpec { spec: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
