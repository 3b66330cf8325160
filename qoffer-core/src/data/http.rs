//! HTTP salary provider.
//!
//! A single blocking GET against the configured endpoint. Any transport
//! failure, non-success status, or empty body aborts the run; there is no
//! retry or backoff.

use super::provider::{ensure_body, DataSource, FetchError, FetchResult, SalaryProvider};
use crate::config::OfferConfig;
use chrono::Utc;
use tracing::{debug, info};

pub struct HttpProvider {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpProvider {
    pub fn new(config: &OfferConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.endpoint.clone(),
        })
    }

    /// Use a pre-built client, e.g. one with custom proxy settings.
    pub fn with_client(client: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
            }
        } else {
            FetchError::NetworkUnreachable(e.to_string())
        }
    }
}

impl SalaryProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self) -> Result<FetchResult, FetchError> {
        info!(url = %self.url, "fetching salary feed");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = resp.text().map_err(|e| FetchError::Body {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        let body = ensure_body(&self.url, body)?;
        debug!(bytes = body.len(), %status, "received salary feed");

        Ok(FetchResult {
            url: self.url.clone(),
            body,
            fetched_at: Utc::now(),
            source: DataSource::Http,
        })
    }
}
