//! The plotting run: load the grid and the field, draw both figures and
//! deliver them.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use grib2_parser::{read_field, Grib2Tables};
use mesh::{CellField, Triangulation};
use netcdf_parser::load_icon_grid;
use renderer::{Colormap, FeatureLayer, Figure, TextRenderer};
use tracing::{debug, info};

use crate::config::PlotConfig;
use crate::distribute::copy_with_metadata;

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub cells: usize,
    pub masked: usize,
    /// Figures in the output directory, in drawing order.
    pub figures: Vec<PathBuf>,
    /// Their copies in the delivery directory.
    pub delivered: Vec<PathBuf>,
}

/// Everything both figures share.
struct Inputs {
    mesh: Triangulation,
    field: CellField,
    layers: Vec<FeatureLayer>,
    fonts: TextRenderer,
}

fn load_inputs(config: &PlotConfig) -> Result<Inputs> {
    let paths = &config.paths;

    let grid = load_icon_grid(&paths.grid_file, &config.grid)
        .with_context(|| format!("Failed to load grid {}", paths.grid_file.display()))?;
    let grib = read_field(&paths.field_file, &config.field.selector, &Grib2Tables::icon())
        .with_context(|| format!("Failed to load field {}", paths.field_file.display()))?;

    let mesh = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices)
        .context("Failed to build triangulation")?;
    let field = CellField::transformed(&grib.values, config.field.transform);
    field
        .check_matches(&mesh)
        .context("Field does not match the grid")?;

    info!(
        cells = mesh.num_triangles(),
        masked = mesh.masked_count(),
        grid_number = ?grid.number_of_grid_used,
        param = %grib.short_name,
        "Built mesh"
    );

    let layers = config
        .features
        .iter()
        .map(|style| {
            let path = paths.features_dir.join(&style.file);
            FeatureLayer::load(&style.name, &path)
                .with_context(|| {
                    format!(
                        "Failed to load feature layer {} (fetch with scripts/fetch_features.sh)",
                        path.display()
                    )
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Inputs {
        mesh,
        field,
        layers,
        fonts: TextRenderer::from_file(&paths.font_path),
    })
}

fn draw_features(fig: &mut Figure, config: &PlotConfig, inputs: &Inputs) -> Result<()> {
    for (layer, style) in inputs.layers.iter().zip(&config.features) {
        fig.add_feature(layer, style)
            .with_context(|| format!("Failed to draw feature layer {}", style.name))?;
    }
    Ok(())
}

fn plot_grid(config: &PlotConfig, inputs: &Inputs) -> Result<PathBuf> {
    let plot = &config.grid_plot;
    let path = config.grid_plot_path();

    let mut fig = Figure::new(config.figure, &inputs.fonts)?;
    fig.add_map_axes(config.window(), &plot.title, None)?;
    let drawn = fig.triplot(&inputs.mesh, &plot.line)?;
    draw_features(&mut fig, config, inputs)?;
    debug!(triangles = drawn, "Drew wireframe");

    fig.save_png(&path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(path)
}

fn plot_field(config: &PlotConfig, inputs: &Inputs) -> Result<PathBuf> {
    let plot = &config.field_plot;
    let path = config.field_plot_path();
    let cmap = Colormap::by_name(&plot.colormap)
        .with_context(|| format!("Unknown colormap '{}'", plot.colormap))?;

    let mut fig = Figure::new(config.figure, &inputs.fonts)?;
    fig.add_map_axes(
        config.window(),
        &plot.title,
        Some((plot.colorbar.clone(), plot.norm)),
    )?;
    let drawn = fig.tripcolor(&inputs.mesh, &inputs.field, &cmap, &plot.norm)?;
    draw_features(&mut fig, config, inputs)?;
    fig.colorbar(&cmap)?;
    debug!(triangles = drawn, "Drew field");

    fig.save_png(&path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(path)
}

/// Run the whole pipeline once.
pub fn run(config: &PlotConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let inputs = load_inputs(config)?;

    let output_dir = &config.paths.output_dir;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let delivery_dir = &config.paths.delivery_dir;

    let mut figures = Vec::with_capacity(2);
    let mut delivered = Vec::with_capacity(2);

    info!("Start plotting. Global grid.");
    let grid_png = plot_grid(config, &inputs)?;
    delivered.push(copy_with_metadata(&grid_png, delivery_dir)?);
    figures.push(grid_png);

    info!("Plot temperature.");
    let field_png = plot_field(config, &inputs)?;
    delivered.push(copy_with_metadata(&field_png, delivery_dir)?);
    figures.push(field_png);
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Temperature done."
    );

    Ok(RunSummary {
        cells: inputs.mesh.num_triangles(),
        masked: inputs.mesh.masked_count(),
        figures,
        delivered,
    })
}
