//! Run configuration.
//!
//! There is no config file: `OfferConfig::default()` is what the binary runs
//! with. Tests and benches override fields directly.

use crate::error::OfferError;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Public salary feed.
pub const SALARY_DATA_ENDPOINT: &str = "https://questionnaire-148920.appspot.com/swe/data.html";

/// Number of top salaries averaged into a qualifying offer.
pub const QUALIFYING_OFFER_THRESHOLD: usize = 125;

/// Rows shown in the top-earners preview.
pub const DEFAULT_PREVIEW: usize = 10;

/// Matches the reqwest blocking client default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferConfig {
    pub endpoint: String,
    pub threshold: usize,
    pub preview: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            endpoint: SALARY_DATA_ENDPOINT.to_string(),
            threshold: QUALIFYING_OFFER_THRESHOLD,
            preview: DEFAULT_PREVIEW,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("qoffer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl OfferConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the config and hand back the threshold in the form the
    /// aggregator takes.
    pub fn validate(&self) -> Result<NonZeroUsize, OfferError> {
        if self.endpoint.trim().is_empty() {
            return Err(OfferError::InvalidConfig("endpoint must not be empty".into()));
        }
        NonZeroUsize::new(self.threshold)
            .ok_or_else(|| OfferError::InvalidConfig("threshold must be at least 1".into()))
    }
}
