use csv::StringRecord;
use serde::Serialize;

use crate::error::{ParseError, Result};

/// Name of the constellation abbreviation column
pub const ABBREVIATION_COLUMN: &str = "abr";

/// Name of the declared star count column
pub const STAR_COUNT_COLUMN: &str = "nr";

/// Number of positional star columns (`s01`..`s31`)
pub const STAR_COLUMN_COUNT: usize = 31;

/// One stroke of a constellation stick figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstellationLine {
    pub constellation: String,
    /// 1-based position within the constellation
    pub line_number: u32,
    /// BSC numbers in drawing order
    pub star_ids: Vec<i64>,
}

/// Header name of the star column at 1-based `position`
pub fn star_column_name(position: usize) -> String {
    format!("s{:02}", position)
}

/// Positions of the columns we read, resolved once from the header row
#[derive(Debug, Clone)]
pub struct ColumnMap {
    abbreviation: usize,
    star_count: Option<usize>,
    stars: Vec<(String, Option<usize>)>,
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let abbreviation = position(ABBREVIATION_COLUMN).ok_or(ParseError::MissingColumn {
            column: ABBREVIATION_COLUMN,
        })?;

        let stars = (1..=STAR_COLUMN_COUNT)
            .map(|i| {
                let name = star_column_name(i);
                let idx = position(name.as_str());
                (name, idx)
            })
            .collect();

        Ok(Self {
            abbreviation,
            star_count: position(STAR_COUNT_COLUMN),
            stars,
        })
    }
}

/// The fields of a single CSV row relevant to line construction
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Non-blank abbreviation, if the row starts or repeats a constellation
    pub abbreviation: Option<String>,
    pub declared_count: Option<i64>,
    pub star_ids: Vec<i64>,
}

impl RawRow {
    /// Extract the row, reporting `line` in any error
    pub fn from_record(record: &StringRecord, columns: &ColumnMap, line: u64) -> Result<Self> {
        let abbreviation = cell(record, Some(columns.abbreviation)).map(str::to_string);

        let declared_count = parse_optional_int(
            cell(record, columns.star_count),
            STAR_COUNT_COLUMN,
            line,
        )?;

        let mut star_ids = Vec::with_capacity(STAR_COLUMN_COUNT);
        for (name, idx) in &columns.stars {
            if let Some(id) = parse_optional_int(cell(record, *idx), name, line)? {
                star_ids.push(id);
            }
        }

        Ok(Self {
            abbreviation,
            declared_count,
            star_ids,
        })
    }
}

/// Trimmed, non-blank cell content; missing columns and short rows read as blank
fn cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_optional_int(raw: Option<&str>, column: &str, line: u64) -> Result<Option<i64>> {
    raw.map(|value| {
        value.parse::<i64>().map_err(|_| ParseError::InvalidInteger {
            line,
            column: column.to_string(),
            value: value.to_string(),
        })
    })
    .transpose()
}
