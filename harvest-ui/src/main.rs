use std::{io, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use harvest_core::{AreaUnit, LatLng};
use tracing::{debug, info};

use harvest_ui::{
    AppConfig,
    adapters::JsonLinesConsumer,
    app::{self, ManualPlan, MapPlan, PolygonFile},
    csv_loader,
    logging::{init_logging, set_log_level},
    models::AreaField,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Rainwater harvesting planner.
///
/// Collects rooftop and open space areas, a location and a budget, and writes
/// each accepted calculation request to stdout as one JSON line.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `harvest_core=trace`. Overrides the
    /// configuration file and `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan from areas typed by hand.
    Manual(ManualArgs),
    /// Plan from rooftop and property outlines.
    Map(MapArgs),
    /// Plan every row of a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct LocationArgs {
    /// Latitude of the site. Detected (or the configured default) when omitted.
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the site.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn position(&self) -> Option<LatLng> {
        self.lat.zip(self.lng).map(|(lat, lng)| LatLng::new(lat, lng))
    }
}

#[derive(Debug, Args)]
struct ManualArgs {
    /// Rooftop area.
    #[arg(long, default_value = "")]
    rooftop: String,

    #[arg(long, default_value = "m2")]
    rooftop_unit: AreaUnit,

    /// Open space area.
    #[arg(long, default_value = "")]
    open_space: String,

    #[arg(long, default_value = "m2")]
    open_space_unit: AreaUnit,

    /// Budget, e.g. `75k`, `1.5L` or `200000`.
    #[arg(long)]
    budget: Option<String>,

    #[command(flatten)]
    location: LocationArgs,
}

#[derive(Debug, Args)]
struct MapArgs {
    /// JSON file with the `rooftop` and optional `property` outlines.
    #[arg(long)]
    polygons: PathBuf,

    /// Open space to use when no property outline is given.
    #[arg(long, default_value = "")]
    open_space: String,

    #[arg(long, default_value = "m2")]
    open_space_unit: AreaUnit,

    #[arg(long)]
    budget: Option<String>,

    #[command(flatten)]
    location: LocationArgs,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV file of plans.
    #[arg(long)]
    file: PathBuf,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    if let Some(level) = &cli.log_level {
        set_log_level(level)?;
    }
    debug!(?config, "configuration loaded");

    let mut consumer = JsonLinesConsumer::new(io::stdout().lock());

    let accepted = match cli.command {
        Command::Manual(args) => {
            let plan = ManualPlan {
                location: args.location.position(),
                rooftop: AreaField::new(args.rooftop, args.rooftop_unit),
                open_space: AreaField::new(args.open_space, args.open_space_unit),
                budget: args.budget,
            };
            let summary = app::run_manual(&config, plan, &mut consumer).await?;
            for error in &summary.rejected {
                eprintln!("{error}");
            }
            summary.all_submitted()
        }
        Command::Map(args) => {
            let plan = MapPlan {
                polygons: PolygonFile::load(&args.polygons)?,
                open_space: AreaField::new(args.open_space, args.open_space_unit),
                budget: args.budget,
                location: args.location.position(),
            };
            let summary = app::run_map(&config, plan, &mut consumer).await?;
            for error in &summary.rejected {
                eprintln!("{error}");
            }
            summary.all_submitted()
        }
        Command::Batch(args) => {
            let plans = csv_loader::load_from_file(&args.file)?;
            let report = app::run_batch(&config, plans, &mut consumer)?;
            for (row, error) in &report.rejected {
                eprintln!("row {row}: {error}");
            }
            report.is_clean()
        }
    };

    info!(submitted = consumer.submitted(), "done");
    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
