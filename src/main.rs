//! harvest-dash - Main binary
//!
//! Two halves, one artifact:
//!
//! ```text
//! ┌────────────────┐    dataset.csv     ┌────────────────┐
//! │  Synthesizer   │ ────────────────►  │   Dashboard    │
//! │  (generate)    │   (delimited file) │   (serve)      │
//! └────────────────┘                    └────────────────┘
//! ```
//!
//! `generate` writes a full synthetic farm season; `serve` loads the file
//! and exposes the dashboard API; `summary` renders one view to stdout
//! without starting a server.

mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use analytics::analysis_options;
use dataset::{Dataset, load_from_path, write_records_to_path};
use server::{ServerState, create_app};
use synth::SeasonSynthesizer;
use types::{Metric, QuarterFilter, Section};

/// harvest-dash - Synthetic farm-season metrics with a dashboard API
#[derive(Parser, Debug)]
#[command(name = "harvest-dash")]
#[command(about = "Generate a synthetic farm season and serve its dashboard")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the synthetic season dataset and write it to disk
    Generate {
        /// RNG seed; the same seed always produces the same file
        #[arg(long, env = "HARVEST_SEED", default_value_t = config::DEFAULT_SEED)]
        seed: u64,

        /// Season year (January 1 through December 31)
        #[arg(long, env = "HARVEST_YEAR", default_value_t = config::DEFAULT_YEAR)]
        year: i32,

        /// Output path for the dataset artifact
        #[arg(long, env = "HARVEST_DATASET", default_value = config::DEFAULT_DATASET)]
        out: PathBuf,

        /// Print the first rows of the generated series
        #[arg(long)]
        preview: bool,
    },

    /// Serve the dashboard API over HTTP
    Serve {
        /// Dataset file to load
        #[arg(long, env = "HARVEST_DATASET", default_value = config::DEFAULT_DATASET)]
        data: PathBuf,

        /// Host to bind to (overrides HARVEST_SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides HARVEST_SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Render one dashboard view to stdout as JSON
    Summary {
        /// Dataset file to load
        #[arg(long, env = "HARVEST_DATASET", default_value = config::DEFAULT_DATASET)]
        data: PathBuf,

        /// Dashboard section to render
        #[arg(long, default_value = "economic")]
        section: String,

        /// Metric to plot; defaults to the section's default metric
        #[arg(long)]
        metric: Option<String>,

        /// Quarter filter: "all" or 1-4
        #[arg(long, default_value = "all")]
        quarter: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Generate {
            seed,
            year,
            out,
            preview,
        } => generate(seed, year, &out, preview),
        Command::Serve { data, host, port } => serve(&data, host, port).await,
        Command::Summary {
            data,
            section,
            metric,
            quarter,
        } => summary(&data, &section, metric.as_deref(), &quarter),
    }
}

/// Generate a season and write the dataset artifact.
fn generate(
    seed: u64,
    year: i32,
    out: &Path,
    preview: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let synth_config = config::synth_config(seed, year);
    info!(seed, year, days = synth_config.num_days(), "generating season");

    let records = SeasonSynthesizer::new(synth_config)?.generate();
    write_records_to_path(out, &records)?;
    info!(rows = records.len(), path = %out.display(), "dataset written");

    if preview {
        for record in records.iter().take(5) {
            println!(
                "{}  temp {:>5.1}°C  rain {:>5.1}mm  yield {:>6.1}kg  profit {:>8.2}€",
                record.date,
                record.temperature_c,
                record.rainfall_mm,
                record.yield_kg,
                record.profit_eur
            );
        }
    }

    Ok(())
}

/// Load the dataset and run the dashboard server until interrupted.
async fn serve(
    data: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(data)?;
    let server_config = config::server_config(host, port);
    let addr = server_config.bind_addr();

    let app = create_app(ServerState::new(dataset));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "dashboard server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Render one dashboard view and print it as JSON.
fn summary(
    data: &Path,
    section: &str,
    metric: Option<&str>,
    quarter: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(data)?;

    let section: Section = section.parse()?;
    let filter: QuarterFilter = quarter.parse()?;
    let metric = match metric {
        Some(raw) => raw.parse::<Metric>()?,
        None => analysis_options(section).default,
    };

    let view = analytics::render_view(&dataset, section, Some(metric), filter);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn load_dataset(path: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    let dataset = load_from_path(path)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "dataset loaded"
    );
    if !dataset.diagnostics().is_empty() {
        warn!(
            dropped = dataset.diagnostics().len(),
            "some rows were dropped during loading"
        );
    }
    Ok(dataset)
}
