//! CLI entry point for the SPARCS cohort builder.
//!
//! Provides subcommands for running the full download-and-clean export,
//! previewing the per-year query filters, and inspecting a finished export.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sparcs_cohort::{
    cohort::MEDICARE,
    config::{Config, TokenPlacement},
    export::run_export,
    fetch::{
        BasicClient,
        auth::{ApiKey, UrlParam},
    },
    filter::{CodeSets, YearBucket, build_filter},
    infra::socrata::{DEFAULT_PAGE_SIZE, SocrataClient},
    output::{ALL_PATIENTS_FILE, load_table},
    registry::{DATASETS, SPARCS_DOMAIN},
    services::dataset_api::DatasetApi,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sparcs_cohort")]
#[command(about = "Build a cleaned multi-year cohort from SPARCS inpatient discharges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every year, reconcile schemas and write the cohorts
    Run {
        /// SPARCS Socrata API token
        #[arg(long, env = "SPARCS_TOKEN", hide_env_values = true)]
        token: String,

        /// Output directory to save files
        #[arg(short, long, env = "SPARCS_OUTPUT_DIR")]
        output: PathBuf,

        /// How the token is sent to the service
        #[arg(long, value_enum, default_value_t = TokenPlacement::Header)]
        token_placement: TokenPlacement,

        /// Open-data host to query
        #[arg(long, default_value = SPARCS_DOMAIN)]
        domain: String,

        /// Rows requested per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Stop reading a dataset after this many rows
        #[arg(long)]
        max_rows: Option<usize>,

        #[command(flatten)]
        codes: CodeArgs,
    },
    /// Print the filter expression sent for each reporting year
    Filters {
        #[command(flatten)]
        codes: CodeArgs,
    },
    /// Summarize a previously written all_patients.csv
    Inspect {
        /// Directory holding a finished export
        #[arg(short, long, env = "SPARCS_OUTPUT_DIR")]
        output: PathBuf,
    },
}

/// Classification codes used to restrict each query. Empty means unfiltered.
#[derive(Args)]
struct CodeArgs {
    /// CCS diagnosis codes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    ccs_diagnosis: Vec<String>,

    /// CCS procedure codes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    ccs_procedure: Vec<String>,

    /// APR DRG codes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    apr_drg: Vec<String>,
}

impl From<CodeArgs> for CodeSets {
    fn from(args: CodeArgs) -> Self {
        CodeSets {
            diagnosis: args.ccs_diagnosis,
            procedure: args.ccs_procedure,
            drg: args.apr_drg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sparcs_cohort.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sparcs_cohort.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            token,
            output,
            token_placement,
            domain,
            page_size,
            max_rows,
            codes,
        } => {
            let config = Config {
                token,
                output_dir: output,
                codes: codes.into(),
                token_placement,
                domain,
                page_size,
                max_rows,
            };
            run(config).await?;
        }
        Commands::Filters { codes } => {
            let codes: CodeSets = codes.into();
            for dataset in DATASETS {
                let filter = build_filter(YearBucket::for_year(dataset.year), &codes);
                info!(year = dataset.year, dataset_id = dataset.id, filter = %filter, "Filter");
            }
        }
        Commands::Inspect { output } => {
            inspect(&output)?;
        }
    }

    Ok(())
}

/// Validates the config, then downloads and cleans every dataset.
#[tracing::instrument(skip_all, fields(output = %config.output_dir.display()))]
async fn run(config: Config) -> Result<()> {
    config.validate()?;
    let output_dir = config.prepare_output_dir()?;

    let http = BasicClient::new().context("building HTTP client")?;
    let api: Box<dyn DatasetApi> = match config.token_placement {
        TokenPlacement::Header => Box::new(
            SocrataClient::new(ApiKey::app_token(http, &config.token)?, &config.domain)
                .with_page_size(config.page_size)
                .with_max_rows(config.max_rows),
        ),
        TokenPlacement::Query => Box::new(
            SocrataClient::new(UrlParam::app_token(http, &config.token), &config.domain)
                .with_page_size(config.page_size)
                .with_max_rows(config.max_rows),
        ),
    };

    let summary = run_export(api.as_ref(), DATASETS, &config.codes, &output_dir).await?;

    info!(
        all_patients = summary.all_patients,
        medicare = summary.medicare_cohort,
        output_dir = %output_dir.display(),
        "DONE"
    );
    Ok(())
}

/// Logs the shape and medicare share of an existing all_patients.csv.
fn inspect(output_dir: &Path) -> Result<()> {
    let path = output_dir.join(ALL_PATIENTS_FILE);
    let table = load_table(&path).with_context(|| format!("loading {}", path.display()))?;

    let medicare = table
        .column(MEDICARE)
        .map(|values| values.filter(|v| v.as_str() == Some("True")).count())
        .unwrap_or(0);

    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.width(),
        medicare,
        "Loaded all patients"
    );
    Ok(())
}
