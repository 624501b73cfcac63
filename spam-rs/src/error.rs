use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No .txt files found in {}", .0.display())]
    NoMatchingFiles(PathBuf),

    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("Resource not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset is empty, refusing to fit")]
    EmptyDataset,

    #[error("Vectorizer error: {0}")]
    Vectorizer(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Failed to load model artifact {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("Failed to save model artifact {}: {reason}", path.display())]
    ArtifactSave { path: PathBuf, reason: String },

    #[error("Prediction error: {0}")]
    Prediction(String),
}

pub type Result<T> = std::result::Result<T, SpamError>;
