//! HTML salary table extraction.
//!
//! Columns are discovered by name, never by position: header cells are matched
//! against keywords, and when the table has no usable header the cell classes
//! (`player-year`, `player-salary`, ...) are matched the same way. A feed that
//! reorders its columns therefore produces the same rows.

use crate::domain::{Dataset, RawRow};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Table id used by the public feed.
const PREFERRED_TABLE: &str = "table#salaries-table";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("no salary table found in document")]
    NoTable,

    #[error("salary table has no recognisable {0} column")]
    MissingColumn(Column),

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

/// Logical columns of the salary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Season,
    Player,
    Salary,
    Level,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Season => "season",
            Column::Player => "player",
            Column::Salary => "salary",
            Column::Level => "level",
        };
        write!(f, "{name}")
    }
}

impl Column {
    /// Match a header label or class name to a column.
    ///
    /// Labels are split into lowercase words on punctuation, spacing and
    /// camel-case boundaries, and only whole words count: `Year`, `player-year`
    /// and `Season (yr)` resolve to `Season`, while `Yearly Salary` resolves
    /// to `Salary`. When a label names several columns, salary wins, then
    /// season, level and player.
    pub fn classify(label: &str) -> Option<Column> {
        const KEYWORDS: [(Column, &[&str]); 4] = [
            (Column::Salary, &["salary", "salaries", "amount", "pay"]),
            (Column::Season, &["season", "year", "yr"]),
            (Column::Level, &["level", "league", "lvl"]),
            (Column::Player, &["player", "name"]),
        ];

        let words = label_words(label);
        KEYWORDS
            .iter()
            .find(|(_, keys)| words.iter().any(|w| keys.contains(&w.as_str())))
            .map(|(column, _)| *column)
    }
}

/// Lowercase words of a label. `PlayerName`, `player-name` and `Player Name`
/// all give `["player", "name"]`.
fn label_words(label: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in label.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Cell index of each logical column. First match wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub season: Option<usize>,
    pub player: Option<usize>,
    pub salary: Option<usize>,
    pub level: Option<usize>,
}

impl ColumnMap {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for (idx, label) in labels.into_iter().enumerate() {
            if let Some(column) = Column::classify(label.as_ref()) {
                let slot = map.slot(column);
                if slot.is_none() {
                    *slot = Some(idx);
                }
            }
        }
        map
    }

    pub fn get(&self, column: Column) -> Option<usize> {
        match column {
            Column::Season => self.season,
            Column::Player => self.player,
            Column::Salary => self.salary,
            Column::Level => self.level,
        }
    }

    /// First required column that could not be resolved.
    pub fn missing(&self) -> Option<Column> {
        if self.season.is_none() {
            Some(Column::Season)
        } else if self.salary.is_none() {
            Some(Column::Salary)
        } else {
            None
        }
    }

    fn slot(&mut self, column: Column) -> &mut Option<usize> {
        match column {
            Column::Season => &mut self.season,
            Column::Player => &mut self.player,
            Column::Salary => &mut self.salary,
            Column::Level => &mut self.level,
        }
    }

    fn read(&self, row: usize, cells: &[String]) -> RawRow {
        let cell = |column: Column| {
            self.get(column)
                .and_then(|idx| cells.get(idx))
                .filter(|text| !text.is_empty())
                .cloned()
        };
        RawRow {
            row,
            season: cell(Column::Season),
            player: cell(Column::Player),
            salary: cell(Column::Salary),
            level: cell(Column::Level),
        }
    }
}

enum Layout {
    Header(ColumnMap),
    Classes,
}

struct Selectors {
    preferred: Selector,
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl Selectors {
    fn new() -> Result<Self, TableError> {
        Ok(Self {
            preferred: parse_selector(PREFERRED_TABLE)?,
            table: parse_selector("table")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td, th")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, TableError> {
    Selector::parse(css).map_err(|e| TableError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Extract the salary rows from an HTML document.
///
/// Tries `table#salaries-table` first, then every other table in document
/// order, and returns the rows of the first one whose season and salary
/// columns resolve.
pub fn extract_rows(html: &str) -> Result<Dataset, TableError> {
    let document = Html::parse_document(html);
    let selectors = Selectors::new()?;

    let preferred = document.select(&selectors.preferred).next();
    let preferred_id = preferred.map(|t| t.id());
    let candidates = preferred.into_iter().chain(
        document
            .select(&selectors.table)
            .filter(|t| Some(t.id()) != preferred_id),
    );

    let mut last_err = None;
    for (idx, table) in candidates.enumerate() {
        match read_table(table, &selectors) {
            Ok(rows) => {
                debug!(table = idx, rows = rows.len(), "extracted salary table");
                return Ok(rows);
            }
            Err(e) => {
                debug!(table = idx, error = %e, "skipping table");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or(TableError::NoTable))
}

fn read_table(table: ElementRef<'_>, selectors: &Selectors) -> Result<Dataset, TableError> {
    let mut headers: Vec<Vec<String>> = Vec::new();
    let mut body: Vec<Vec<ElementRef<'_>>> = Vec::new();

    // Leading all-`th` rows are header candidates (titles, column labels);
    // everything after the first row with a `td` is body.
    for tr in table.select(&selectors.row) {
        let cells: Vec<ElementRef<'_>> = tr.select(&selectors.cell).collect();
        if cells.is_empty() {
            continue;
        }
        let all_th = cells.iter().all(|c| c.value().name() == "th");
        if all_th && body.is_empty() {
            headers.push(cells.iter().map(|c| cell_text(*c)).collect());
        } else {
            body.push(cells);
        }
    }

    let candidates: Vec<ColumnMap> = headers
        .iter()
        .map(|labels| ColumnMap::from_labels(labels))
        .collect();
    let resolved = candidates.iter().find(|map| map.missing().is_none());

    let layout = match resolved {
        Some(map) => Layout::Header(*map),
        None => {
            let classes_resolve = body
                .iter()
                .find(|cells| cells.iter().any(|c| c.value().name() == "td"))
                .is_some_and(|cells| class_map(cells).missing().is_none());
            if classes_resolve {
                Layout::Classes
            } else {
                let missing = candidates
                    .first()
                    .copied()
                    .unwrap_or_default()
                    .missing()
                    .unwrap_or(Column::Season);
                return Err(TableError::MissingColumn(missing));
            }
        }
    };

    let rows = body
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let texts: Vec<String> = cells.iter().map(|c| cell_text(*c)).collect();
            match &layout {
                Layout::Header(map) => map.read(row, &texts),
                Layout::Classes => class_map(cells).read(row, &texts),
            }
        })
        .collect();

    Ok(rows)
}

fn class_map(cells: &[ElementRef<'_>]) -> ColumnMap {
    ColumnMap::from_labels(cells.iter().map(|c| c.value().attr("class").unwrap_or("")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let raw: String = cell.text().collect();
    normalize_ws(&raw)
}

/// Collapse whitespace runs (including non-breaking spaces) and trim.
fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
