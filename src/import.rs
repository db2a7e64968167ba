use anyhow::{Context, Result};

use crate::config::ImportConfig;
use crate::parser::load_lines;
use crate::writer::{import_lines, ImportSummary};

/// Parse the CSV, then rebuild the database from it.
///
/// Parsing completes before the database is opened, so a malformed CSV never
/// touches existing output.
pub fn run_import(config: &ImportConfig) -> Result<ImportSummary> {
    let lines = load_lines(&config.csv_path)
        .with_context(|| format!("Failed to load {:?}", config.csv_path))?;

    import_lines(&config.db_path, &lines)
        .with_context(|| format!("Failed to import into {:?}", config.db_path))
}
