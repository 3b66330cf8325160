//! Row cleaning: turn raw table rows into validated salary records.
//!
//! The feed is known to carry malformed entries. A row is kept only when its
//! season parses as an integer and its salary as a finite, non-negative
//! number. Everything else is dropped and counted; cleaning never fails.

use crate::domain::{RawRow, SalaryRecord, Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Why a salary cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryIssue {
    Missing,
    Malformed,
    Negative,
}

/// Tally of what cleaning kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub rows_total: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub bad_salaries: usize,
    pub bad_seasons: usize,
    /// Kept rows with no level cell.
    pub missing_level: usize,
    /// Kept rows whose level is something other than `MLB`.
    pub non_major_league: usize,
    /// Every season that parsed, including on dropped rows.
    pub seasons: BTreeSet<Season>,
}

/// Output of [`clean`].
#[derive(Debug, Clone, Default)]
pub struct Cleaned {
    /// Valid records in table order.
    pub records: Vec<SalaryRecord>,
    pub report: CleanReport,
}

/// Parse a salary cell such as `$32,000,000`, `1500000.50` or `-$25,000`.
///
/// Currency symbols, thousands separators and spaces are ignored. A leading
/// minus or accounting parentheses mark the value negative.
pub fn parse_salary(raw: &str) -> Result<f64, SalaryIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SalaryIssue::Missing);
    }

    let (parenthesised, inner) = match trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let compact: String = inner
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    let (negative, digits) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.strip_prefix('+').unwrap_or(&compact)),
    };

    let well_formed = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return Err(SalaryIssue::Malformed);
    }

    let value: f64 = digits.parse().map_err(|_| SalaryIssue::Malformed)?;
    if !value.is_finite() {
        return Err(SalaryIssue::Malformed);
    }
    if (negative || parenthesised) && value > 0.0 {
        return Err(SalaryIssue::Negative);
    }
    Ok(value)
}

/// Parse a season cell. The trimmed text must be a base-10 integer.
pub fn parse_season(raw: &str) -> Option<Season> {
    raw.trim().parse().ok()
}

/// Validate every row, keeping table order.
pub fn clean(rows: &[RawRow]) -> Cleaned {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = CleanReport {
        rows_total: rows.len(),
        ..CleanReport::default()
    };

    for row in rows {
        let season = row.season.as_deref().and_then(parse_season);
        let salary = row
            .salary
            .as_deref()
            .map_or(Err(SalaryIssue::Missing), parse_salary);

        match season {
            Some(s) => {
                report.seasons.insert(s);
            }
            None => report.bad_seasons += 1,
        }
        if salary.is_err() {
            report.bad_salaries += 1;
        }

        let (Some(season), Ok(salary)) = (season, salary) else {
            trace!(row = row.row, season = ?row.season, salary = ?row.salary, "dropping malformed row");
            report.rows_dropped += 1;
            continue;
        };

        let level = row
            .level
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        let record = SalaryRecord {
            season,
            player: row.player.clone().unwrap_or_default(),
            salary,
            level,
            row: row.row,
        };
        if record.level.is_none() {
            report.missing_level += 1;
        } else if !record.is_major_league() {
            report.non_major_league += 1;
        }
        records.push(record);
    }

    report.rows_kept = records.len();
    debug!(
        total = report.rows_total,
        kept = report.rows_kept,
        dropped = report.rows_dropped,
        "cleaned salary rows"
    );

    Cleaned { records, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salary_plain_and_decorated() {
        assert_eq!(parse_salary("1000000"), Ok(1_000_000.0));
        assert_eq!(parse_salary("$32,000,000"), Ok(32_000_000.0));
        assert_eq!(parse_salary("  $ 1,500,000.50 "), Ok(1_500_000.5));
        assert_eq!(parse_salary("+250"), Ok(250.0));
        assert_eq!(parse_salary("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_salary_rejects_garbage() {
        assert_eq!(parse_salary(""), Err(SalaryIssue::Missing));
        assert_eq!(parse_salary("   "), Err(SalaryIssue::Missing));
        assert_eq!(parse_salary("not-a-number"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("no salary data"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("$"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("1.2.3"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("1e6"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("NaN"), Err(SalaryIssue::Malformed));
        assert_eq!(parse_salary("inf"), Err(SalaryIssue::Malformed));
    }

    #[test]
    fn test_parse_salary_flags_negatives() {
        assert_eq!(parse_salary("-5"), Err(SalaryIssue::Negative));
        assert_eq!(parse_salary("-$25,000,000"), Err(SalaryIssue::Negative));
        assert_eq!(parse_salary("$-25,000"), Err(SalaryIssue::Negative));
        assert_eq!(parse_salary("($1,000)"), Err(SalaryIssue::Negative));
        assert_eq!(parse_salary("-0"), Ok(0.0));
    }

    #[test]
    fn test_parse_season() {
        assert_eq!(parse_season("2016"), Some(2016));
        assert_eq!(parse_season(" 2022 "), Some(2022));
        assert_eq!(parse_season("20l6"), None);
        assert_eq!(parse_season("2016.5"), None);
        assert_eq!(parse_season(""), None);
    }

    #[test]
    fn test_clean_drops_malformed_rows() {
        let rows = vec![
            RawRow::new(0, "2022", "A", "1000000"),
            RawRow::new(1, "2022", "B", "2000000"),
            RawRow::new(2, "2021", "C", "5000000"),
            RawRow::new(3, "2022", "D", "not-a-number"),
        ];
        let Cleaned { records, report } = clean(&rows);

        let names: Vec<&str> = records.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.rows_total, 4);
        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.bad_salaries, 1);
        assert_eq!(report.bad_seasons, 0);
        assert_eq!(report.seasons.iter().copied().collect::<Vec<_>>(), vec![2021, 2022]);
    }

    #[test]
    fn test_clean_counts_each_issue() {
        let rows = vec![
            RawRow::new(0, "twenty", "A", "100"),
            RawRow::new(1, "2022", "B", "-100"),
            RawRow::default(),
            RawRow::new(3, "2022", "C", "100").with_level("AAA"),
            RawRow::new(4, "2022", "D", "100").with_level("MLB"),
            RawRow::new(5, "2022", "E", "100").with_level("  "),
        ];
        let report = clean(&rows).report;

        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.rows_dropped, 3);
        assert_eq!(report.bad_seasons, 2);
        assert_eq!(report.bad_salaries, 2);
        assert_eq!(report.non_major_league, 1);
        assert_eq!(report.missing_level, 1);
    }

    #[test]
    fn test_clean_keeps_row_positions_and_blank_names() {
        let mut row = RawRow::new(7, "2022", "", "1");
        row.player = None;
        let records = clean(&[row]).records;
        assert_eq!(records[0].row, 7);
        assert_eq!(records[0].player, "");
    }

    #[test]
    fn test_clean_empty_input() {
        let cleaned = clean(&[]);
        assert!(cleaned.records.is_empty());
        assert_eq!(cleaned.report, CleanReport::default());
    }
}
