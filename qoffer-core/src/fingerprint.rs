//! Dataset fingerprinting.
//!
//! A run is identified by the records that survived cleaning: canonical JSON
//! of the record list, hashed with BLAKE3. Two runs over the same snapshot
//! print the same fingerprint, which makes "did the feed change?" a string
//! comparison.

use crate::domain::SalaryRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetFingerprint(pub String);

impl DatasetFingerprint {
    pub fn of(records: &[SalaryRecord]) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_vec(records)?;
        Ok(Self(blake3::hash(&canonical).to_hex().to_string()))
    }

    /// Leading 12 hex digits, enough to tell snapshots apart by eye.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for DatasetFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
