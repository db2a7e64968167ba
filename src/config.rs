use std::path::{Path, PathBuf};

/// Default directory holding the CSV and the generated database
pub const DEFAULT_DATA_DIR: &str = "data";
pub const CSV_FILE_NAME: &str = "ConstellationLines.csv";
pub const DB_FILE_NAME: &str = "ConstellationLines.sqlite";

/// Input and output locations for one import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
}

impl ImportConfig {
    pub fn new(csv_path: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            db_path: db_path.into(),
        }
    }

    /// Standard file names inside `data_dir`
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CSV_FILE_NAME), data_dir.join(DB_FILE_NAME))
    }

    /// Resolve from optional CLI overrides
    pub fn resolve(
        data_dir: Option<PathBuf>,
        csv_path: Option<PathBuf>,
        db_path: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let defaults = Self::from_data_dir(&data_dir);

        Self {
            csv_path: csv_path.unwrap_or(defaults.csv_path),
            db_path: db_path.unwrap_or(defaults.db_path),
        }
    }

    pub fn with_csv_path(self, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            ..self
        }
    }

    pub fn with_db_path(self, db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..self
        }
    }
}
