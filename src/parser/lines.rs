use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::record::{ColumnMap, ConstellationLine, RawRow};
use crate::error::{ParseError, Result};

/// Sequential state carried across CSV rows
#[derive(Debug, Default)]
pub struct LineAssembler {
    current: Option<String>,
    counters: HashMap<String, u32>,
    pub skipped_leading: usize,
    pub skipped_empty: usize,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one row; returns the line it produces, if any
    pub fn push(&mut self, row: RawRow, line: u64) -> Result<Option<ConstellationLine>> {
        if let Some(abbr) = row.abbreviation {
            self.counters.entry(abbr.clone()).or_insert(0);
            self.current = Some(abbr);
        }

        let Some(constellation) = self.current.as_ref() else {
            debug!(line, "skipping row before first constellation");
            self.skipped_leading += 1;
            return Ok(None);
        };

        if let Some(expected) = row.declared_count {
            if expected != row.star_ids.len() as i64 {
                return Err(ParseError::CountMismatch {
                    line,
                    constellation: constellation.clone(),
                    expected,
                    parsed: row.star_ids.len(),
                });
            }
        }

        if row.star_ids.is_empty() {
            debug!(line, constellation = %constellation, "skipping row without stars");
            self.skipped_empty += 1;
            return Ok(None);
        }

        let counter = self.counters.entry(constellation.clone()).or_insert(0);
        *counter += 1;

        Ok(Some(ConstellationLine {
            constellation: constellation.clone(),
            line_number: *counter,
            star_ids: row.star_ids,
        }))
    }
}

/// Parse constellation lines from CSV data with a header row
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<ConstellationLine>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
    let mut assembler = LineAssembler::new();
    let mut lines = Vec::new();
    let mut rows = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows += 1;

        let row = RawRow::from_record(&record, &columns, line)?;
        if let Some(parsed) = assembler.push(row, line)? {
            lines.push(parsed);
        }
    }

    debug!(
        rows,
        skipped_leading = assembler.skipped_leading,
        skipped_empty = assembler.skipped_empty,
        "finished reading rows"
    );

    Ok(lines)
}

/// Load constellation lines from a CSV file
pub fn load_lines(path: &Path) -> Result<Vec<ConstellationLine>> {
    if !path.exists() {
        return Err(ParseError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "reading constellation lines");
    let file = File::open(path).map_err(|e| ParseError::Csv(e.into()))?;
    let lines = parse_reader(file)?;
    info!(count = lines.len(), "parsed constellation lines");

    Ok(lines)
}
