use anyhow::Result;
use constellation_lines_to_sqlite::{
    cli::{Cli, Commands},
    config::ImportConfig,
    import::run_import,
    parser::load_lines,
    schema::ALL_TABLES,
    writer::generate_schema_script,
};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Import { data_dir, csv, db } => {
            let start = Instant::now();
            let config = ImportConfig::resolve(data_dir, csv, db);
            debug!(?config, "resolved paths");

            let summary = run_import(&config)?;

            debug!(
                stars = summary.stars,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "import finished"
            );
            let db_name = config
                .db_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| config.db_path.display().to_string());
            println!(
                "Imported {} constellation line definitions into {}",
                summary.lines, db_name
            );
        }

        Commands::Check {
            data_dir,
            csv,
            json,
        } => {
            let config = ImportConfig::resolve(data_dir, csv, None);
            let lines = load_lines(&config.csv_path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            } else {
                let mut per_constellation: BTreeMap<&str, usize> = BTreeMap::new();
                for line in &lines {
                    *per_constellation.entry(line.constellation.as_str()).or_default() += 1;
                }
                for (constellation, count) in &per_constellation {
                    println!("  {:<4} {}", constellation, count);
                }
                println!(
                    "\n{} lines across {} constellations",
                    lines.len(),
                    per_constellation.len()
                );
            }
        }

        Commands::Schema => {
            print!("{}", generate_schema_script(ALL_TABLES));
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays reserved for command output
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("constellation_lines_to_sqlite={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
