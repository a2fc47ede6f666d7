use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sales_analytics::analytics::{
    ExportFormat, RankMetric, ReportAssembler, ReportExporter, ReportFilter,
};
use sales_analytics::config::Config;
use sales_analytics::loader::RecordLoader;
use sales_analytics::{AppError, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sales-analytics")]
#[command(about = "Sales revenue statistics, product rankings and monthly trends", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "SALES_ANALYTICS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a sales report
    Report {
        /// Transaction file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of products in the ranking
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Ranking metric: revenue, quantity, count or avg_unit_price
        #[arg(short, long)]
        rank_by: Option<String>,

        /// Output format: text, json or csv
        #[arg(short, long)]
        format: Option<String>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First sale date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last sale date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only include this product (repeatable)
        #[arg(short, long = "product")]
        products: Vec<String>,
    },

    /// Write the filtered transactions as CSV with a derived revenue column
    Records {
        /// Transaction file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the CSV to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First sale date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last sale date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only include this product (repeatable)
        #[arg(short, long = "product")]
        products: Vec<String>,
    },

    /// Load and validate a transaction file without reporting
    Check {
        /// Transaction file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(AppError::from(e).exit_code());
    });

    init_tracing(&config);

    if let Err(e) = run(cli.command, config).await {
        match &e {
            AppError::NoData(reason) => {
                tracing::warn!(reason = %reason, "Report skipped");
                eprintln!("No data available: {}", reason);
            }
            other => {
                tracing::error!(error_code = other.error_code(), message = %other, "Command failed");
                eprintln!("Error: {}", other);
            }
        }
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sales_analytics={}", config.observability.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_input(input: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    input.or_else(|| config.input.path.clone()).ok_or_else(|| {
        AppError::Configuration(
            "no input file given; pass --input or set input.path".to_string(),
        )
    })
}

fn build_filter(from: Option<NaiveDate>, to: Option<NaiveDate>, products: Vec<String>) -> ReportFilter {
    let mut filter = ReportFilter::new();
    if let Some(from) = from {
        filter = filter.with_start_date(from);
    }
    if let Some(to) = to {
        filter = filter.with_end_date(to);
    }
    if !products.is_empty() {
        filter = filter.with_products(products);
    }
    filter
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Report {
            input,
            top_n,
            rank_by,
            format,
            output,
            from,
            to,
            products,
        } => {
            let input = resolve_input(input, &config)?;

            if let Some(top_n) = top_n {
                config.analytics.top_n = top_n;
            }
            if let Some(rank_by) = rank_by {
                config.analytics.rank_metric = rank_by.parse::<RankMetric>()?;
            }

            let output = output.or(config.output.path.clone());
            let format = match format {
                Some(format) => format.parse::<ExportFormat>()?,
                None => output
                    .as_deref()
                    .and_then(ExportFormat::from_path)
                    .unwrap_or(config.output.format),
            };

            let filter = build_filter(from, to, products);
            let records = RecordLoader::load(&input).await?;
            let assembler = ReportAssembler::new(config.analytics.clone());
            let report = assembler.assemble_filtered(&records, &filter)?;

            match output {
                Some(path) => {
                    ReportExporter::export(&report, format, &path).await?;
                    println!("Report written to: {}", path.display());
                }
                None => {
                    print!("{}", ReportExporter::render(&report, format)?);
                }
            }
        }

        Commands::Records {
            input,
            output,
            from,
            to,
            products,
        } => {
            let input = resolve_input(input, &config)?;
            let filter = build_filter(from, to, products);

            let records = RecordLoader::load(&input).await?;
            let filtered = filter.apply(&records)?;
            tracing::debug!(
                before = records.len(),
                after = filtered.len(),
                "Filtered records for export"
            );

            match output {
                Some(path) => {
                    ReportExporter::export_records(&filtered, &path).await?;
                    println!("{} records written to: {}", filtered.len(), path.display());
                }
                None => print!("{}", ReportExporter::render_records(&filtered)),
            }
        }

        Commands::Check { input } => {
            let input = resolve_input(input, &config)?;
            let records = RecordLoader::load(&input).await?;
            println!("{}: {} valid records", input.display(), records.len());
        }
    }

    Ok(())
}
