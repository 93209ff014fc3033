use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of a pipeline.
///
/// Row-level problems never show up here: rejected rows are dropped and
/// logged. Only conditions that prevent a run from completing are errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file does not exist.
    #[error("{} not found", .0.display())]
    MissingInput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document handed to the elevation enricher has an unexpected shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[cfg(feature = "net")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
