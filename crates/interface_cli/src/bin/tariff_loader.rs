//! tariff-loader: load tariff 400NG tables from CSV and query them
//!
//! ```bash
//! tariff-loader load --table linehaul --file linehaul_rates.csv
//! tariff-loader check --table zip3 --file zip3s.csv
//! tariff-loader lookup-linehaul --miles 500 --weight 2000 --date 2019-10-01
//! tariff-loader lookup-service-area --zip 50309 --date 2019-10-01
//! tariff-loader health
//! ```
//!
//! # Environment Variables
//!
//! * `LOADER_DATABASE_URL` - PostgreSQL connection string
//! * `LOADER_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `LOADER_LOG_JSON` - `true` for JSON log lines
//! * `LOADER_MAX_CONNECTIONS` - Pool size (default: 5)

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use core_kernel::{HealthCheckable, Miles, Pound};
use domain_tariff::{RateLookup, Zip3};
use infra_db::{create_pool, PostgresTariffAdapter};
use interface_cli::loader::{self, TariffTable};
use interface_cli::{telemetry, LoaderConfig};

#[derive(Debug, Parser)]
#[command(name = "tariff-loader", version, about = "Loads and queries tariff 400NG rate tables")]
struct Cli {
    /// Overrides LOADER_DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validates a CSV file and inserts it in one transaction
    Load {
        #[arg(long, value_enum)]
        table: TariffTable,
        #[arg(long)]
        file: PathBuf,
    },
    /// Validates a CSV file without connecting to the database
    Check {
        #[arg(long, value_enum)]
        table: TariffTable,
        #[arg(long)]
        file: PathBuf,
    },
    /// Prints the CONUS linehaul rate for a distance and weight on a date
    LookupLinehaul {
        #[arg(long)]
        miles: i32,
        #[arg(long)]
        weight: i64,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Prints the service area serving a ZIP code on a date
    LookupServiceArea {
        #[arg(long)]
        zip: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Checks database connectivity
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match LoaderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.database_url.clone() {
        config.database_url = url;
    }

    telemetry::init_tracing(&config.log_level, config.log_json);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tariff-loader failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &LoaderConfig) -> anyhow::Result<()> {
    match command {
        Command::Check { table, file } => {
            let count = loader::check_table(table, loader::open(&file)?)?;
            println!("{}: {} valid rows in {}", table.table_name(), count, file.display());
        }
        Command::Load { table, file } => {
            let adapter = connect(config).await?;
            let inserted = loader::load_table(adapter.repository(), table, loader::open(&file)?)
                .await
                .with_context(|| format!("loading {}", file.display()))?;
            println!("{}: inserted {} rows", table.table_name(), inserted);
        }
        Command::LookupLinehaul { miles, weight, date } => {
            let lookup = RateLookup::new(Arc::new(connect(config).await?));
            let cents = lookup
                .fetch_base_linehaul_rate(Miles(miles), Pound(weight), date)
                .await?;
            println!("{}", cents);
        }
        Command::LookupServiceArea { zip, date } => {
            let zip3 = Zip3::prefix_of(&zip)
                .with_context(|| format!("{zip} is not a ZIP code"))?
                .to_string();
            let lookup = RateLookup::new(Arc::new(connect(config).await?));
            let area = lookup.fetch_service_area_for_zip3(&zip3, date).await?;
            println!("{}", serde_json::to_string_pretty(&area)?);
        }
        Command::Health => {
            let health = connect(config).await?.health_check().await;
            println!("{}", serde_json::to_string_pretty(&health)?);
            anyhow::ensure!(health.is_healthy(), "database is unhealthy");
        }
    }
    Ok(())
}

async fn connect(config: &LoaderConfig) -> anyhow::Result<PostgresTariffAdapter> {
    let pool = create_pool(config.database_config())
        .await
        .context("connecting to the database")?;
    Ok(PostgresTariffAdapter::new(pool))
}
