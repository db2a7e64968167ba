use anyhow::{Context, Result};
use rusqlite::{params, Connection, Transaction};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::schema_gen::{
    generate_create_table, generate_drop_table, generate_indexes, generate_insert,
};
use crate::parser::ConstellationLine;
use crate::schema::{TableSchema, ALL_TABLES, CONSTELLATION_LINE, CONSTELLATION_LINE_STAR};

/// Row totals written by one import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub lines: usize,
    pub stars: usize,
}

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        // The store is derived data, rebuilt from CSV on demand
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Drop and recreate all tables, then insert `lines`, as one transaction
    pub fn rebuild(&mut self, lines: &[ConstellationLine]) -> Result<ImportSummary> {
        let tx = self.conn.transaction()?;

        drop_tables(&tx, ALL_TABLES)?;
        create_tables(&tx, ALL_TABLES)?;
        let summary = insert_lines(&tx, lines)?;

        tx.commit().context("Failed to commit import")?;
        info!(lines = summary.lines, stars = summary.stars, "import committed");

        Ok(summary)
    }

    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }
}

/// Drop tables children-first so foreign keys never dangle
fn drop_tables(tx: &Transaction, schemas: &[&TableSchema]) -> Result<()> {
    for schema in schemas.iter().rev() {
        tx.execute(&generate_drop_table(schema), [])
            .with_context(|| format!("Failed to drop table: {}", schema.name))?;
    }
    Ok(())
}

fn create_tables(tx: &Transaction, schemas: &[&TableSchema]) -> Result<()> {
    debug!("Creating {} tables", schemas.len());

    for schema in schemas {
        let sql = generate_create_table(schema);
        tx.execute(&sql, [])
            .with_context(|| format!("Failed to create table: {}", schema.name))?;

        for index_sql in generate_indexes(schema) {
            tx.execute(&index_sql, [])
                .with_context(|| format!("Failed to create index for: {}", schema.name))?;
        }
    }

    Ok(())
}

fn insert_lines(tx: &Transaction, lines: &[ConstellationLine]) -> Result<ImportSummary> {
    let mut line_stmt = tx.prepare_cached(&generate_insert(&CONSTELLATION_LINE))?;
    let mut star_stmt = tx.prepare_cached(&generate_insert(&CONSTELLATION_LINE_STAR))?;
    let mut summary = ImportSummary::default();

    for line in lines {
        line_stmt
            .execute(params![
                line.constellation,
                line.line_number,
                line.star_ids.len() as i64
            ])
            .with_context(|| {
                format!(
                    "Failed to insert line {} of {}",
                    line.line_number, line.constellation
                )
            })?;
        let line_id = tx.last_insert_rowid();

        for (index, star_id) in line.star_ids.iter().enumerate() {
            star_stmt.execute(params![line_id, index as i64 + 1, star_id])?;
        }

        summary.lines += 1;
        summary.stars += line.star_ids.len();
    }

    Ok(summary)
}

/// Replace the contents of `output_db` with `lines`
pub fn import_lines(output_db: &Path, lines: &[ConstellationLine]) -> Result<ImportSummary> {
    let mut writer = SqliteWriter::open(output_db)?;
    let summary = writer.rebuild(lines)?;
    writer.finalize()?;
    Ok(summary)
}
