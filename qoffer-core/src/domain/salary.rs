//! Raw table rows and validated salary records.

use serde::{Deserialize, Serialize};

/// Year identifying a salary period.
pub type Season = i32;

/// Rows in table order, as extracted from the feed.
pub type Dataset = Vec<RawRow>;

/// One table row before validation. Every cell is optional because the feed
/// is known to drop or mangle values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// 0-based position among the table's data rows.
    pub row: usize,
    pub season: Option<String>,
    pub player: Option<String>,
    pub salary: Option<String>,
    pub level: Option<String>,
}

impl RawRow {
    pub fn new(row: usize, season: &str, player: &str, salary: &str) -> Self {
        Self {
            row,
            season: Some(season.to_string()),
            player: Some(player.to_string()),
            salary: Some(salary.to_string()),
            level: None,
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }
}

/// A row that survived cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub season: Season,
    /// Display only; may be empty.
    pub player: String,
    /// Finite and non-negative.
    pub salary: f64,
    pub level: Option<String>,
    /// Position of the source row, used as the tie-break.
    pub row: usize,
}

impl SalaryRecord {
    /// True when the row is tagged as a major league contract.
    pub fn is_major_league(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case("MLB"))
    }
}
