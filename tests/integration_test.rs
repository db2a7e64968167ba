//! End-to-end tests: CSV on disk -> parser -> SQLite file -> queries.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use constellation_lines_to_sqlite::parser::{load_lines, star_column_name, STAR_COLUMN_COUNT};
use constellation_lines_to_sqlite::{run_import, ImportConfig, ParseError};

// =============================================================================
// Fixtures
// =============================================================================

fn header() -> String {
    let stars: Vec<String> = (1..=STAR_COLUMN_COUNT).map(star_column_name).collect();
    format!("abr,nr,{}", stars.join(","))
}

/// One CSV row padded out to all 31 star columns
fn row(abbr: &str, nr: &str, stars: &[&str]) -> String {
    let mut cells: Vec<String> = stars.iter().map(|s| s.to_string()).collect();
    cells.resize(STAR_COLUMN_COUNT, String::new());
    format!("{},{},{}", abbr, nr, cells.join(","))
}

fn csv(rows: &[String]) -> String {
    let mut out = header();
    out.push('\n');
    for r in rows {
        out.push_str(r);
        out.push('\n');
    }
    out
}

fn sample_rows() -> Vec<String> {
    vec![
        row("AND", "4", &["15", "165", "337", "603"]),
        row("", "3", &["337", "269", "226"]),
        row("", "0", &[]),
        row("AND", "2", &["68", "165"]),
        row("ORI", "5", &["1948", "1903", "1852", "1790", "1713"]),
        row("", "2", &["2061", "1948"]),
        row("UMI", "", &["424", "6789", "6322"]),
    ]
}

struct Workspace {
    _dir: TempDir,
    config: ImportConfig,
}

impl Workspace {
    fn with_csv(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = ImportConfig::from_data_dir(&dir.path().join("data"));
        fs::create_dir_all(config.csv_path.parent().unwrap()).unwrap();
        fs::write(&config.csv_path, contents).unwrap();
        Self { _dir: dir, config }
    }

    fn db_path(&self) -> &Path {
        &self.config.db_path
    }

    fn connection(&self) -> Connection {
        Connection::open(self.db_path()).expect("Failed to open test database")
    }
}

// =============================================================================
// Query Utilities
// =============================================================================

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

type LineRow = (i64, String, i64, i64);
type StarRow = (i64, i64, i64);

fn dump(conn: &Connection) -> (Vec<LineRow>, Vec<StarRow>) {
    let lines = conn
        .prepare(
            "SELECT line_id, constellation, line_number, star_count
             FROM constellation_line ORDER BY line_id",
        )
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();

    let stars = conn
        .prepare(
            "SELECT line_id, sequence_index, bsc_number
             FROM constellation_line_star ORDER BY line_id, sequence_index",
        )
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();

    (lines, stars)
}

fn stars_of(conn: &Connection, constellation: &str, line_number: i64) -> Vec<i64> {
    conn.prepare(
        "SELECT s.bsc_number
         FROM constellation_line_star s
         JOIN constellation_line l ON l.line_id = s.line_id
         WHERE l.constellation = ?1 AND l.line_number = ?2
         ORDER BY s.sequence_index",
    )
    .unwrap()
    .query_map((constellation, line_number), |r| r.get(0))
    .unwrap()
    .collect::<rusqlite::Result<Vec<_>>>()
    .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_row_counts_match_parsed_lines() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    let parsed = load_lines(&ws.config.csv_path).unwrap();
    let summary = run_import(&ws.config).unwrap();

    let expected_stars: usize = parsed.iter().map(|l| l.star_ids.len()).sum();
    assert_eq!(summary.lines, parsed.len());
    assert_eq!(summary.stars, expected_stars);

    let conn = ws.connection();
    assert_eq!(count(&conn, "constellation_line"), parsed.len() as i64);
    assert_eq!(count(&conn, "constellation_line_star"), expected_stars as i64);
}

#[test]
fn test_import_is_idempotent() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));

    run_import(&ws.config).unwrap();
    let first = dump(&ws.connection());

    run_import(&ws.config).unwrap();
    let second = dump(&ws.connection());

    assert_eq!(first, second);
    assert_eq!(first.0.len(), 6);
}

#[test]
fn test_blank_abbreviation_carries_over() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    run_import(&ws.config).unwrap();
    let conn = ws.connection();

    assert_eq!(stars_of(&conn, "AND", 2), vec![337, 269, 226]);
    assert_eq!(stars_of(&conn, "ORI", 2), vec![2061, 1948]);
}

#[test]
fn test_empty_row_excluded_and_numbering_dense() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    run_import(&ws.config).unwrap();
    let conn = ws.connection();

    let numbers: Vec<i64> = conn
        .prepare(
            "SELECT line_number FROM constellation_line
             WHERE constellation = 'AND' ORDER BY line_id",
        )
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(stars_of(&conn, "AND", 3), vec![68, 165]);
}

#[test]
fn test_and_example_with_skipped_blank_row() {
    let ws = Workspace::with_csv(&csv(&[
        row("AND", "2", &["1", "2"]),
        row("", "0", &[]),
        row("AND", "2", &["3", "4"]),
    ]));
    run_import(&ws.config).unwrap();
    let conn = ws.connection();

    assert_eq!(count(&conn, "constellation_line"), 2);
    assert_eq!(stars_of(&conn, "AND", 1), vec![1, 2]);
    assert_eq!(stars_of(&conn, "AND", 2), vec![3, 4]);
}

#[test]
fn test_star_count_column_matches_stars() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    run_import(&ws.config).unwrap();
    let conn = ws.connection();

    let mismatched: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM constellation_line l
             WHERE l.star_count != (
                 SELECT COUNT(*) FROM constellation_line_star s WHERE s.line_id = l.line_id
             )",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(mismatched, 0);
}

#[test]
fn test_count_mismatch_writes_nothing() {
    let ws = Workspace::with_csv(&csv(&[
        row("AND", "2", &["1", "2"]),
        row("AND", "5", &["3", "4", "5"]),
    ]));

    let err = run_import(&ws.config).unwrap_err();
    match err.downcast_ref::<ParseError>() {
        Some(ParseError::CountMismatch {
            constellation,
            expected,
            parsed,
            ..
        }) => {
            assert_eq!(constellation, "AND");
            assert_eq!(*expected, 5);
            assert_eq!(*parsed, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!ws.db_path().exists());
}

#[test]
fn test_count_mismatch_keeps_previous_database() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    run_import(&ws.config).unwrap();
    let before = dump(&ws.connection());

    let mut rows = sample_rows();
    rows.push(row("CYG", "4", &["7924", "7796"]));
    fs::write(&ws.config.csv_path, csv(&rows)).unwrap();

    assert!(run_import(&ws.config).is_err());
    assert_eq!(dump(&ws.connection()), before);
}

#[test]
fn test_failed_rebuild_rolls_back() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    run_import(&ws.config).unwrap();
    let before = dump(&ws.connection());

    // Steal an index name so schema creation fails mid-transaction
    {
        let conn = ws.connection();
        conn.execute_batch(
            "DROP INDEX idx_constellation_line_constellation;
             CREATE TABLE squatter (x INTEGER);
             CREATE INDEX idx_constellation_line_constellation ON squatter (x);",
        )
        .unwrap();
    }

    assert!(run_import(&ws.config).is_err());
    assert_eq!(dump(&ws.connection()), before);
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = ImportConfig::from_data_dir(dir.path());

    let err = run_import(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::MissingInput { path }) if path == &config.csv_path
    ));
    assert!(!config.db_path.exists());
}

#[test]
fn test_invalid_integer_reports_line() {
    let ws = Workspace::with_csv(&csv(&[
        row("AND", "2", &["1", "2"]),
        row("AND", "2", &["3", "four"]),
    ]));

    let err = run_import(&ws.config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::InvalidInteger { line: 3, column, value }) if column == "s02" && value == "four"
    ));
}

#[test]
fn test_leading_rows_without_constellation_skipped() {
    let ws = Workspace::with_csv(&csv(&[
        row("", "2", &["9", "9"]),
        row("PEG", "2", &["8781", "8775"]),
    ]));
    let summary = run_import(&ws.config).unwrap();

    assert_eq!(summary.lines, 1);
    assert_eq!(stars_of(&ws.connection(), "PEG", 1), vec![8781, 8775]);
}

#[test]
fn test_explicit_paths_outside_data_dir() {
    let ws = Workspace::with_csv(&csv(&sample_rows()));
    let out: PathBuf = ws.config.db_path.with_file_name("other").join("lines.sqlite");
    let config = ws.config.clone().with_db_path(&out);

    run_import(&config).unwrap();
    assert!(out.exists());
    assert!(!ws.db_path().exists());
}
