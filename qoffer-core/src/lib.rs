//! qoffer core: salary feed ingestion, cleaning, and qualifying offer aggregation.
//!
//! This crate contains the whole computation behind the `qoffer` binary:
//! - Domain types (raw rows, salary records, seasons)
//! - Salary feed providers (HTTP and in-memory snapshot)
//! - HTML table extraction with header-based column discovery
//! - Row cleaning with per-issue drop counts
//! - Latest-season top-N aggregation
//! - Dataset fingerprinting for run-to-run comparison

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod pipeline;

pub use aggregate::{qualifying_offer, QualifyingOffer};
pub use clean::{clean, CleanReport, Cleaned};
pub use config::OfferConfig;
pub use domain::{Dataset, RawRow, SalaryRecord, Season};
pub use error::OfferError;
pub use fingerprint::DatasetFingerprint;
pub use pipeline::OfferReport;
