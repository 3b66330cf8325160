//! End-to-end run: fetch → extract table → clean → fingerprint → aggregate.

use crate::aggregate::{qualifying_offer, QualifyingOffer};
use crate::clean::{clean, CleanReport, Cleaned};
use crate::config::OfferConfig;
use crate::domain::SalaryRecord;
use crate::data::provider::{DataSource, FetchResult, SalaryProvider};
use crate::data::table::extract_rows;
use crate::error::OfferError;
use crate::fingerprint::DatasetFingerprint;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Everything a single run produces.
#[derive(Debug, Clone, Serialize)]
pub struct OfferReport {
    pub source_url: String,
    pub source: DataSource,
    pub fetched_at: DateTime<Utc>,
    pub clean: CleanReport,
    pub fingerprint: DatasetFingerprint,
    pub offer: QualifyingOffer,
}

/// Fetch the feed through `provider` and compute the qualifying offer.
pub fn run<P: SalaryProvider>(provider: &P, config: &OfferConfig) -> Result<OfferReport, OfferError> {
    let threshold = config.validate()?;

    info!(provider = provider.name(), "retrieving salary data");
    let fetched = provider.fetch()?;

    evaluate(fetched, threshold)
}

/// Compute the qualifying offer from a body that has already been fetched.
pub fn compute(fetched: FetchResult, config: &OfferConfig) -> Result<OfferReport, OfferError> {
    let threshold = config.validate()?;
    evaluate(fetched, threshold)
}

/// True when rows carry levels but none of them is `MLB`, which usually
/// means the level column was misread or the feed changed vocabulary.
pub fn lacks_major_league(records: &[SalaryRecord]) -> bool {
    records.iter().any(|r| r.level.is_some()) && !records.iter().any(SalaryRecord::is_major_league)
}

fn evaluate(fetched: FetchResult, threshold: NonZeroUsize) -> Result<OfferReport, OfferError> {
    let rows = extract_rows(&fetched.body)?;
    info!(rows = rows.len(), "processing records");

    let Cleaned { records, report } = clean(&rows);
    if records.is_empty() {
        warn!(
            scanned = report.rows_total,
            dropped = report.rows_dropped,
            "no valid salary records"
        );
        return Err(OfferError::EmptyDataset);
    }
    if lacks_major_league(&records) {
        warn!(
            kept = report.rows_kept,
            "no record carries an MLB level; averaging all levels"
        );
    } else if report.non_major_league > 0 {
        debug!(
            count = report.non_major_league,
            "records tagged with a non-MLB level are included"
        );
    }

    let fingerprint = DatasetFingerprint::of(&records)?;
    let offer = qualifying_offer(&records, threshold)?;
    info!(
        season = offer.season,
        value = offer.value,
        fingerprint = fingerprint.short(),
        "qualifying offer ready"
    );

    Ok(OfferReport {
        source_url: fetched.url,
        source: fetched.source,
        fetched_at: fetched.fetched_at,
        clean: report,
        fingerprint,
        offer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{FetchError, SalaryProvider, StaticProvider};

    const TABLE: &str = r#"
        <table id="salaries-table">
          <thead><tr><th>Name</th><th>Salary</th><th>Year</th></tr></thead>
          <tbody>
            <tr><td>A</td><td>$1,000,000</td><td>2022</td></tr>
            <tr><td>B</td><td>$2,000,000</td><td>2022</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn test_run_reports_source_and_offer() {
        let provider = StaticProvider::new(TABLE).with_url("snapshot://test");
        let report = run(&provider, &OfferConfig::default()).unwrap();
        assert_eq!(report.source_url, "snapshot://test");
        assert_eq!(report.source, DataSource::Snapshot);
        assert_eq!(report.offer.season, 2022);
        assert_eq!(report.offer.value, 1_500_000.0);
        assert_eq!(report.clean.rows_kept, 2);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = run(&StaticProvider::new(TABLE), &OfferConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["offer"]["season"], 2022);
        assert_eq!(json["offer"]["value"], 1_500_000.0);
        assert_eq!(json["clean"]["rows_kept"], 2);
        assert_eq!(json["source"], "Snapshot");
        assert_eq!(json["fingerprint"], report.fingerprint.0.as_str());
    }

    fn rec(level: Option<&str>) -> SalaryRecord {
        SalaryRecord {
            season: 2016,
            player: "P".into(),
            salary: 1.0,
            level: level.map(str::to_string),
            row: 0,
        }
    }

    #[test]
    fn test_lacks_major_league_only_when_levels_present_without_mlb() {
        assert!(lacks_major_league(&[rec(Some("AAA")), rec(Some("AA"))]));
        assert!(lacks_major_league(&[rec(Some("AAA")), rec(None)]));
        assert!(!lacks_major_league(&[rec(Some("AAA")), rec(Some("MLB"))]));
        assert!(!lacks_major_league(&[rec(None), rec(None)]));
        assert!(!lacks_major_league(&[]));
    }

    #[test]
    fn test_compute_validates_config() {
        let fetched = StaticProvider::new(TABLE).fetch().unwrap();
        let config = OfferConfig {
            endpoint: String::new(),
            ..OfferConfig::default()
        };
        assert!(matches!(
            compute(fetched, &config),
            Err(OfferError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_propagates_fetch_error() {
        let provider = StaticProvider::new("");
        let err = run(&provider, &OfferConfig::default()).unwrap_err();
        assert!(matches!(err, OfferError::Fetch(FetchError::EmptyBody { .. })));
    }

    #[test]
    fn test_run_rejects_invalid_config_before_fetch() {
        let provider = StaticProvider::new(TABLE);
        let config = OfferConfig {
            threshold: 0,
            ..OfferConfig::default()
        };
        assert!(matches!(
            run(&provider, &config),
            Err(OfferError::InvalidConfig(_))
        ));
    }
}
