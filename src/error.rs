use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the raw document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// The document does not describe a category/leaf tree.
#[derive(Error, Debug)]
pub enum MalformedInputError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node under '{parent}' has no name")]
    MissingName { parent: String },

    #[error("leaf '{id}' has no value")]
    MissingValue { id: String },

    #[error("leaf '{id}' has a non-numeric value: {value}")]
    NonNumericValue { id: String, value: String },

    #[error("leaf '{id}' has an invalid value {value} (must be finite and non-negative)")]
    InvalidValue { id: String, value: f64 },

    #[error("leaf '{id}' has no category")]
    MissingCategory { id: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

pub type Result<T> = std::result::Result<T, Error>;
