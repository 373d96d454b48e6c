//! swinv-report - consolidated software inventory reports
//!
//! Reads an inventory export (Excel or CSV), normalizes and aggregates
//! the software titles, enriches them from the metadata store, and writes
//! the consolidated table to stdout or a file.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use swinv_common::config::DbConfig;
use swinv_common::db;
use swinv_report::lookup::SqlLookup;
use swinv_report::render::{self, OutputFormat};
use swinv_report::{reader, InventoryAggregator};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "swinv-report", version, about = "Consolidated software inventory reports")]
struct Cli {
    /// Inventory export to process (.xlsx, .xls or .csv)
    input: PathBuf,

    /// Metadata database (overrides SWINV_DATABASE and the config file)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting swinv-report v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = DbConfig::resolve(cli.database.as_deref());
    let pool = match db::connect(&config).await {
        Ok(pool) => {
            info!("✓ Connected to metadata store: {}", config.database_path.display());
            pool
        }
        Err(e) => {
            error!("Failed to connect to metadata store: {}", e);
            return Err(e.into());
        }
    };
    db::init_schema(&pool).await?;

    let rows = match reader::read_records(&cli.input) {
        Ok(rows) => {
            info!(rows = rows.len(), "Read inventory export: {}", cli.input.display());
            rows
        }
        Err(e) => {
            error!("Failed to process {}: {}", cli.input.display(), e);
            return Err(e.into());
        }
    };

    let aggregator = InventoryAggregator::new(SqlLookup::new(pool));
    let records = aggregator.aggregate(&rows).await;
    info!(groups = records.len(), "Aggregation complete");

    match &cli.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            render::render(&records, cli.format, &mut file)?;
            info!("Wrote report to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            render::render(&records, cli.format, &mut handle)?;
        }
    }

    Ok(())
}
