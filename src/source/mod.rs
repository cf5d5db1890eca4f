pub mod types;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{FetchError, MalformedInputError, Result};
pub use types::{find_dataset, Dataset, RawNode, DATASETS, DEFAULT_DATASET};

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` strings are URLs, `file://` and everything else a local path.
    pub fn parse(input: &str) -> std::result::Result<Self, FetchError> {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Url::parse(trimmed)
                .map(DataSource::Remote)
                .map_err(|e| FetchError::InvalidUrl(format!("{trimmed}: {e}")))
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            Ok(DataSource::File(PathBuf::from(path)))
        } else if trimmed.is_empty() {
            Err(FetchError::InvalidUrl("empty source".to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Performs the single document fetch of a run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> std::result::Result<Self, FetchError> {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> std::result::Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("pledgemap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and decode the document. No retry: the first failure is final.
    pub async fn fetch(&self, source: &DataSource) -> Result<RawNode> {
        let bytes = self.fetch_bytes(source).await?;
        info!("Fetched {} bytes from {}", bytes.len(), source);
        Ok(parse_document(&bytes)?)
    }

    async fn fetch_bytes(&self, source: &DataSource) -> std::result::Result<Vec<u8>, FetchError> {
        match source {
            DataSource::Remote(url) => {
                debug!("GET {}", url);
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes().await?.to_vec())
            }
            DataSource::File(path) => {
                debug!("Reading {}", path.display());
                tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

pub fn parse_document(bytes: &[u8]) -> std::result::Result<RawNode, MalformedInputError> {
    Ok(serde_json::from_slice(bytes)?)
}
