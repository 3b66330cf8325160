//! Top-level error type for a qualifying offer run.
//!
//! Every variant is fatal for the run. Malformed rows are not errors; the
//! cleaner drops and counts them.

use crate::data::provider::FetchError;
use crate::data::table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfferError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("no valid salary records after cleaning")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fingerprint dataset: {0}")]
    Fingerprint(#[from] serde_json::Error),
}
