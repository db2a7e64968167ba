//! Table schema definitions for the constellation line store

use super::types::*;

pub static CONSTELLATION_LINE: TableSchema = TableSchema {
    name: "constellation_line",
    columns: &[
        Column::surrogate_key("line_id"),
        Column::required("constellation", ColumnType::Text),
        Column::required("line_number", ColumnType::Integer),
        Column::required("star_count", ColumnType::Integer),
    ],
    primary_key: &[],
    foreign_keys: &[],
    indexes: &[Index::on(
        "idx_constellation_line_constellation",
        &["constellation"],
    )],
};

pub static CONSTELLATION_LINE_STAR: TableSchema = TableSchema {
    name: "constellation_line_star",
    columns: &[
        Column::required("line_id", ColumnType::Integer),
        Column::required("sequence_index", ColumnType::Integer),
        Column::required("bsc_number", ColumnType::Integer),
    ],
    primary_key: &["line_id", "sequence_index"],
    foreign_keys: &[ForeignKey::new("line_id", "constellation_line", "line_id").cascade()],
    indexes: &[Index::on(
        "idx_constellation_line_star_constellation",
        &["line_id", "sequence_index"],
    )],
};

// =============================================================================
// Schema Registry
// =============================================================================

/// All table schemas in dependency order (parents before children)
pub static ALL_TABLES: &[&TableSchema] = &[&CONSTELLATION_LINE, &CONSTELLATION_LINE_STAR];

/// Get table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
