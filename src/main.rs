//! CLI entry point for the bike rental dashboard.
//!
//! Provides subcommands for writing a static report, serving the interactive
//! dashboard over HTTP and logging the computed views as JSON.

use anyhow::{Context, Result};
use bike_rental_dashboard::{
    charts::render_charts,
    config::DashboardConfig,
    filter::FilterSelection,
    http::{AppState, create_router},
    labels::Season,
    loader::{self, Datasets},
    output::{print_json, print_pretty, write_report},
    render::render,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rental_dashboard")]
#[command(about = "Explore bike-sharing rentals by date, season and weather", long_about = None)]
struct Cli {
    /// Directory tried first for hour.csv and day.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory tried when a file is missing from --data-dir
    #[arg(long, global = true)]
    fallback_data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SelectionArgs {
    /// First day of the range (YYYY-MM-DD), defaults to the first day in the data
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD), defaults to the last day in the data
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Seasons to include, comma separated; defaults to every season in the data
    #[arg(long, value_delimiter = ',')]
    season: Vec<Season>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render charts and summaries for a selection into a report directory
    Render {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory the report is written to
        #[arg(short, long, default_value = "report")]
        output_dir: PathBuf,
    },
    /// Serve the interactive dashboard
    Serve {
        /// Address to listen on, overrides DASHBOARD_BIND_ADDR
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Log the computed views for a selection as JSON
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Also log the Rust debug representation
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_rental_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rental_dashboard.log"));

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

    let mut config = DashboardConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.fallback_data_dir {
        config.fallback_data_dir = dir;
    }

    let datasets = loader::shared(&config)?;

    match cli.command {
        Commands::Render {
            selection,
            output_dir,
        } => {
            let selection = build_selection(&datasets, selection)?;
            let views = render(&datasets, &selection);
            let charts = render_charts(&views)?;
            let written = write_report(&output_dir, &views, &charts)?;

            info!(
                dir = %output_dir.display(),
                files = written.len(),
                hourly_rows = views.hourly_rows,
                daily_rows = views.daily_rows,
                "Report ready"
            );
        }
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind_addr);
            serve(datasets, &addr).await?;
        }
        Commands::Summary { selection, pretty } => {
            let selection = build_selection(&datasets, selection)?;
            let views = render(&datasets, &selection);

            if pretty {
                print_pretty(&views);
            }
            print_json(&views)?;
        }
    }

    Ok(())
}

/// Turns command-line filter arguments into a selection, defaulting to the
/// full extent of the data.
fn build_selection(datasets: &Datasets, args: SelectionArgs) -> Result<FilterSelection> {
    let extent = datasets
        .extent()
        .context("daily table has no records to derive defaults from")?;

    let seasons = if args.season.is_empty() {
        extent.seasons.clone()
    } else {
        args.season
    };

    let selection = FilterSelection::new(
        args.start.unwrap_or(extent.first),
        args.end.unwrap_or(extent.last),
        seasons,
    )?;
    Ok(selection)
}

/// Runs the HTTP server until the process is stopped.
#[tracing::instrument(skip(datasets))]
async fn serve(datasets: Arc<Datasets>, addr: &str) -> Result<()> {
    let state = AppState::new(datasets)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "Dashboard listening");

    axum::serve(listener, app).await?;
    Ok(())
}
