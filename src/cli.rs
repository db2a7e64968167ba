use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "constellation-lines-to-sqlite")]
#[command(version, about = "Import constellation line definitions into a SQLite database")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the CSV and rebuild the SQLite database
    Import {
        /// Directory containing ConstellationLines.csv and the output database
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Input CSV path (overrides --data-dir)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output SQLite database path (overrides --data-dir)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Parse and validate the CSV without writing anything
    Check {
        /// Directory containing ConstellationLines.csv
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Input CSV path (overrides --data-dir)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the parsed lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the database schema
    Schema,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
