//! Error type shared by every pipeline stage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Server returned {code} for {url}")]
    Status { code: u16, url: String },

    #[error("No records match filter")]
    EmptyResult,
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;
