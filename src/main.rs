use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ecosante_export::config::LoggingConfig;
use ecosante_export::{
    CampaignExporter, EcosanteConfig, EcosanteError, FRAMAFORMS_SURVEY, ForecastApiClient,
    FormVariant, GeoApiClient, SIMPLE_SURVEY,
};

#[derive(Debug, Parser)]
#[command(
    name = "ecosante-export",
    version,
    about = "Build Ecosanté campaign files from a survey export"
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/ecosante-export/config.toml)
    #[arg(long, global = true, env = "ECOSANTE_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// CSV survey export to a single campaign file
    Simple(ExportArgs),
    /// Framaforms TSV export to one file per frequency and channel
    Partitioned(ExportArgs),
}

#[derive(Debug, clap::Args)]
struct ExportArgs {
    /// Survey export to read
    input: PathBuf,

    /// Output directory, overrides the configured one
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Forecast day and file name date (YYYY-MM-DD), today in UTC by default
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl Command {
    fn parts(&self) -> (&'static FormVariant, &ExportArgs) {
        match self {
            Command::Simple(args) => (&SIMPLE_SURVEY, args),
            Command::Partitioned(args) => (&FRAMAFORMS_SURVEY, args),
        }
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EcosanteConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.verbose);

    info!("Starting ecosante-export v{}", ecosante_export::VERSION);

    if let Err(e) = run(&cli, &config).await {
        if let Some(err) = e.downcast_ref::<EcosanteError>() {
            error!("{}", err.user_message());
        }
        error!("Export failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: &Cli, config: &EcosanteConfig) -> Result<()> {
    let (variant, args) = cli.command.parts();
    let today = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let out_dir = args.out.as_ref().unwrap_or(&config.output.directory);

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let exporter = CampaignExporter::new(
        GeoApiClient::new(&config.geocoder)?,
        ForecastApiClient::new(&config.forecast)?,
    );
    let files = exporter
        .export(variant, &text, today)
        .await
        .with_context(|| format!("Failed to export {}", args.input.display()))?;

    let written = files
        .write_all(out_dir)
        .with_context(|| format!("Failed to write into {}", out_dir.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
