//! Qualifying offer aggregation.
//!
//! The offer is the arithmetic mean of the top `threshold` salaries in the
//! latest season present in the data. Older seasons never contribute. When
//! the latest season has fewer records than the threshold, all of them are
//! averaged.
//!
//! Ordering is salary descending with a stable sort over table order, so when
//! the last included salary ties with the first excluded one, the row that
//! appears earlier in the table is the one included.

use crate::domain::{SalaryRecord, Season};
use crate::error::OfferError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingOffer {
    pub season: Season,
    /// Mean of the considered salaries.
    pub value: f64,
    pub threshold: usize,
    /// Valid records in `season`, before the threshold cut.
    pub season_total: usize,
    /// Highest included salary.
    pub ceiling: f64,
    /// Lowest included salary.
    pub floor: f64,
    /// Records that entered the mean, salary descending.
    pub considered: Vec<SalaryRecord>,
}

impl QualifyingOffer {
    pub fn sample_size(&self) -> usize {
        self.considered.len()
    }

    /// First `n` considered records.
    pub fn preview(&self, n: usize) -> &[SalaryRecord] {
        &self.considered[..n.min(self.considered.len())]
    }

    /// Considered records not shown by `preview(n)`.
    pub fn remaining_after(&self, n: usize) -> usize {
        self.considered.len().saturating_sub(n)
    }
}

/// Latest season among the records.
pub fn latest_season(records: &[SalaryRecord]) -> Option<Season> {
    records.iter().map(|r| r.season).max()
}

/// Records for `season`, salary descending, ties in table order, cut to
/// `threshold`. Also returns how many records the season had in total.
pub fn top_salaries(
    records: &[SalaryRecord],
    season: Season,
    threshold: usize,
) -> (Vec<SalaryRecord>, usize) {
    let mut in_season: Vec<SalaryRecord> = records
        .iter()
        .filter(|r| r.season == season)
        .cloned()
        .collect();
    let total = in_season.len();

    in_season.sort_by(|a, b| b.salary.total_cmp(&a.salary));
    in_season.truncate(threshold);
    (in_season, total)
}

/// Arithmetic mean, summed in iteration order.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Compute the qualifying offer from cleaned records.
pub fn qualifying_offer(
    records: &[SalaryRecord],
    threshold: NonZeroUsize,
) -> Result<QualifyingOffer, OfferError> {
    let threshold = threshold.get();
    let season = latest_season(records).ok_or(OfferError::EmptyDataset)?;
    let (considered, season_total) = top_salaries(records, season, threshold);

    let value =
        mean(considered.iter().map(|r| r.salary)).ok_or(OfferError::EmptyDataset)?;
    let ceiling = considered.first().map_or(0.0, |r| r.salary);
    let floor = considered.last().map_or(0.0, |r| r.salary);

    debug!(
        season,
        season_total,
        used = considered.len(),
        value,
        "computed qualifying offer"
    );

    Ok(QualifyingOffer {
        season,
        value,
        threshold,
        season_total,
        ceiling,
        floor,
        considered,
    })
}
