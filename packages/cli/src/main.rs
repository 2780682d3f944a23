#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the mining conflict report toolchain.
//!
//! Reads a CSV export of the conflict report and produces the data behind
//! each dashboard view: geographic hotspots, descriptive rankings, and the
//! department choropleth. Results are written as JSON (or `GeoJSON` for
//! map layers) to a file or stdout.

mod config;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use conflict_map_analytics::{boundaries, summary};
use conflict_map_hotspot::export::{hotspots_to_geojson, labeled_incidents_to_geojson};
use conflict_map_hotspot::{cluster, detect_hotspots, sanitize};
use conflict_map_ingest::CsvOptions;

use crate::config::ReportConfig;

#[derive(Parser)]
#[command(name = "conflict_map", about = "Mining conflict report toolchain")]
struct Cli {
    /// TOML config file (defaults to `conflict_map.toml` when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect conflict hotspots with density-based clustering
    Hotspots {
        #[command(flatten)]
        io: IoArgs,
        /// Neighborhood radius in kilometers
        #[arg(long)]
        epsilon_km: Option<f64>,
        /// Minimum points (including itself) around a core point
        #[arg(long)]
        min_samples: Option<usize>,
        /// Marker size attached to each hotspot
        #[arg(long)]
        marker_size: Option<f64>,
        /// Output format for hotspots
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Emit every incident with its cluster label instead of hotspots
        /// (always `GeoJSON`)
        #[arg(long)]
        labels: bool,
    },
    /// Rank departments and entities and count active cases by phase
    Summary {
        #[command(flatten)]
        io: IoArgs,
        /// Rows kept in each ranking
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Join department case counts onto boundary regions
    Choropleth {
        #[command(flatten)]
        io: IoArgs,
        /// Department boundaries `GeoJSON` file
        #[arg(long)]
        boundaries: PathBuf,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Case export CSV
    #[arg(long, short)]
    input: PathBuf,
    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Output file (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl IoArgs {
    fn csv_options(&self) -> Result<CsvOptions, Box<dyn std::error::Error>> {
        let delimiter = u8::try_from(self.delimiter).map_err(|_| {
            format!(
                "Delimiter must be a single-byte character, got '{}'",
                self.delimiter
            )
        })?;
        Ok(CsvOptions { delimiter })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Geojson,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Hotspots {
            io,
            epsilon_km,
            min_samples,
            marker_size,
            format,
            labels,
        } => {
            if let Some(epsilon_km) = epsilon_km {
                config.hotspot.epsilon_km = epsilon_km;
            }
            if let Some(min_samples) = min_samples {
                config.hotspot.min_samples = min_samples;
            }
            if let Some(marker_size) = marker_size {
                config.hotspot.marker_size = marker_size;
            }
            run_hotspots(&io, &config, format, labels)?;
        }
        Commands::Summary { io, top_n } => {
            if let Some(top_n) = top_n {
                config.summary.top_n = top_n;
            }
            run_summary(&io, &config)?;
        }
        Commands::Choropleth { io, boundaries } => {
            run_choropleth(&io, &boundaries, &config)?;
        }
    }

    Ok(())
}

fn run_hotspots(
    io: &IoArgs,
    config: &ReportConfig,
    format: Format,
    labels: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let cases = conflict_map_ingest::read_cases_from_path(&io.input, io.csv_options()?)?;
    let points = conflict_map_ingest::incident_points(&cases);

    let rendered = if labels {
        let coords = sanitize(&points)?;
        let partition = cluster(&coords, &config.hotspot)?;
        serde_json::to_string_pretty(&labeled_incidents_to_geojson(&coords, &partition))?
    } else {
        let report = detect_hotspots(&points, &config.hotspot)?;
        match format {
            Format::Json => serde_json::to_string_pretty(&report)?,
            Format::Geojson => {
                serde_json::to_string_pretty(&hotspots_to_geojson(&report.representatives))?
            }
        }
    };

    write_output(io.output.as_deref(), &rendered)?;
    Ok(())
}

fn run_summary(io: &IoArgs, config: &ReportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cases = conflict_map_ingest::read_cases_from_path(&io.input, io.csv_options()?)?;
    let summary = summary::summarize(&cases, &config.summary);

    write_output(io.output.as_deref(), &serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}

fn run_choropleth(
    io: &IoArgs,
    boundaries_path: &Path,
    config: &ReportConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let cases = conflict_map_ingest::read_cases_from_path(&io.input, io.csv_options()?)?;

    log::info!("Reading boundaries from {}", boundaries_path.display());
    let boundaries_str = std::fs::read_to_string(boundaries_path)?;
    let regions = boundaries::load_boundary_regions(&boundaries_str, &config.boundaries)?;

    let counts = summary::count_by_department(&cases);
    let entries = boundaries::choropleth(&regions, &counts);

    write_output(io.output.as_deref(), &serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}

fn write_output(path: Option<&Path>, contents: &str) -> std::io::Result<()> {
    if let Some(path) = path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        log::info!("Wrote {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
