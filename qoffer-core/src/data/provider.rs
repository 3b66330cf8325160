//! Salary provider trait and structured fetch errors.
//!
//! The SalaryProvider trait abstracts over where the HTML comes from (the live
//! feed or an in-memory snapshot) so the pipeline can be exercised without a
//! network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for fetching the feed.
///
/// Displayable as-is in the CLI.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Where the body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Http,
    Snapshot,
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
}

/// Trait for salary feed sources.
pub trait SalaryProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Retrieve the feed body. One attempt, no retries.
    fn fetch(&self) -> Result<FetchResult, FetchError>;
}

/// Reject bodies that carry no content.
pub(crate) fn ensure_body(url: &str, body: String) -> Result<String, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }
    Ok(body)
}

/// Serves a fixed HTML snapshot.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    url: String,
    body: String,
}

impl StaticProvider {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            url: "snapshot://salaries".to_string(),
            body: body.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl SalaryProvider for StaticProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn fetch(&self) -> Result<FetchResult, FetchError> {
        let body = ensure_body(&self.url, self.body.clone())?;
        Ok(FetchResult {
            url: self.url.clone(),
            body,
            fetched_at: Utc::now(),
            source: DataSource::Snapshot,
        })
    }
}
