pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod parser;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::ImportConfig;
pub use error::ParseError;
pub use import::run_import;
pub use parser::ConstellationLine;
pub use writer::ImportSummary;
