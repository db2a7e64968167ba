use std::collections::HashSet;

/// Column data type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
    /// Surrogate `INTEGER PRIMARY KEY AUTOINCREMENT` key
    pub auto_increment: bool,
}

impl Column {
    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: false,
            auto_increment: false,
        }
    }

    /// Create an auto-increment integer key column
    pub const fn surrogate_key(name: &'static str) -> Self {
        Self {
            name,
            col_type: ColumnType::Integer,
            nullable: false,
            auto_increment: true,
        }
    }
}

/// Foreign key reference
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
    pub on_delete_cascade: bool,
}

impl ForeignKey {
    pub const fn new(
        column: &'static str,
        references_table: &'static str,
        references_column: &'static str,
    ) -> Self {
        Self {
            column,
            references_table,
            references_column,
            on_delete_cascade: false,
        }
    }

    /// Delete child rows together with the referenced row
    pub const fn cascade(self) -> Self {
        Self {
            on_delete_cascade: true,
            ..self
        }
    }
}

/// Index definition
#[derive(Debug, Clone)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl Index {
    /// Create a non-unique index
    pub const fn on(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            unique: false,
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// Composite primary key; empty when a column is the surrogate key
    pub primary_key: &'static [&'static str],
    pub foreign_keys: &'static [ForeignKey],
    pub indexes: &'static [Index],
}

impl TableSchema {
    /// Get all tables this table depends on (FK parents)
    pub fn dependencies(&self) -> HashSet<&'static str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.references_table)
            .collect()
    }

    /// Column names in declaration order, skipping generated keys
    pub fn insert_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.auto_increment)
            .map(|c| c.name)
            .collect()
    }
}
