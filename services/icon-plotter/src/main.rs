//! ICON grid and 2 m temperature plotter.
//!
//! Reads an ICON grid definition (NetCDF) and a GRIB2 forecast, draws the
//! grid wireframe and the temperature field over northern Germany, and
//! copies both PNGs into the delivery directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icon_common::BoundingBox;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use icon_plotter::{run, Overrides, PlotConfig};

#[derive(Parser, Debug)]
#[command(name = "icon-plotter")]
#[command(about = "Plot an ICON grid and its 2 m temperature over a map window")]
struct Args {
    /// Plot configuration file (YAML); built-in defaults when missing
    #[arg(long, env = "ICON_PLOT_CONFIG", default_value = "config/plots.yaml")]
    config: PathBuf,

    /// ICON grid definition file (NetCDF)
    #[arg(long, env = "ICON_GRID_FILE")]
    grid_file: Option<PathBuf>,

    /// GRIB2 file holding the field
    #[arg(long, env = "ICON_FIELD_FILE")]
    field_file: Option<PathBuf>,

    /// Directory the figures are rendered into
    #[arg(long, env = "ICON_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Existing directory the figures are copied to
    #[arg(long, env = "ICON_DELIVERY_DIR")]
    delivery_dir: Option<PathBuf>,

    /// Directory with the reference layer GeoJSON files
    #[arg(long, env = "ICON_FEATURES_DIR")]
    features_dir: Option<PathBuf>,

    /// TrueType font for titles and labels
    #[arg(long, env = "ICON_FONT_PATH")]
    font_path: Option<PathBuf>,

    /// Map window "lon0,lon1,lat0,lat1" in degrees
    #[arg(long, value_parser = BoundingBox::parse_extent)]
    extent: Option<BoundingBox>,

    /// Output resolution
    #[arg(long)]
    dpi: Option<f32>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            grid_file: self.grid_file.clone(),
            field_file: self.field_file.clone(),
            output_dir: self.output_dir.clone(),
            delivery_dir: self.delivery_dir.clone(),
            features_dir: self.features_dir.clone(),
            font_path: self.font_path.clone(),
            extent: self.extent,
            dpi: self.dpi,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    info!("Starting ICON plotter");

    let mut config = PlotConfig::load_or_default(&args.config)?;
    config.apply(args.overrides());

    let summary = run(&config)?;
    info!(
        cells = summary.cells,
        masked = summary.masked,
        figures = summary.figures.len(),
        "Plotting finished"
    );
    Ok(())
}
