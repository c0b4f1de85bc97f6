//! Plot configuration.
//!
//! Everything has a built-in default reproducing the operational plots, so
//! the YAML file (`config/plots.yaml`) only needs to list what differs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grib2_parser::FieldSelector;
use icon_common::{BoundingBox, UnitTransform};
use netcdf_parser::GridVariables;
use renderer::{ColorbarSpec, FeatureStyle, FigureSpec, LineStyle, Normalize};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Root of the plot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub paths: PathsConfig,
    /// Vertex coordinate variables in the grid file.
    pub grid: GridVariables,
    pub field: FieldConfig,
    /// Map window `[lon_min, lon_max, lat_min, lat_max]` in degrees.
    pub extent: [f64; 4],
    pub figure: FigureSpec,
    /// Reference layers, in drawing order.
    pub features: Vec<FeatureStyle>,
    pub grid_plot: GridPlotConfig,
    pub field_plot: FieldPlotConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            grid: GridVariables::default(),
            field: FieldConfig::default(),
            extent: [7.0, 13.0, 53.0, 58.0],
            figure: FigureSpec::default(),
            features: FeatureStyle::defaults(),
            grid_plot: GridPlotConfig::default(),
            field_plot: FieldPlotConfig::default(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub grid_file: PathBuf,
    pub field_file: PathBuf,
    /// Figures are written here first; created when missing.
    pub output_dir: PathBuf,
    /// Figures are copied here afterwards; must already exist.
    pub delivery_dir: PathBuf,
    /// Directory holding the reference layer GeoJSON files.
    pub features_dir: PathBuf,
    pub font_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            grid_file: PathBuf::from("/hpc/uwork/fe11rea/invar/icon_grid_0026_R03B07_G.nc"),
            field_file: PathBuf::from(
                "/hpc/uwork/sschiman/ICON/Plotting/fc_R03B07_rea_ml.2012022302_T2M",
            ),
            output_dir: PathBuf::from("/hpc/uhome/sschiman/Figures"),
            delivery_dir: PathBuf::from("/hpc/uwork/sschiman/TAKE_HOME/"),
            features_dir: PathBuf::from("data/features"),
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
        }
    }
}

/// Which GRIB2 message to plot and how to convert it for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub selector: FieldSelector,
    pub transform: UnitTransform,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            selector: FieldSelector::t2m(),
            transform: UnitTransform::KelvinToCelsius,
        }
    }
}

/// The wireframe figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPlotConfig {
    pub title: String,
    pub file_name: String,
    pub line: LineStyle,
}

impl Default for GridPlotConfig {
    fn default() -> Self {
        Self {
            title: "ICON-DREAM-Global Grid".to_string(),
            file_name: "Global_Grid_example_N_Germany.png".to_string(),
            line: LineStyle::solid(0.2, "#000000"),
        }
    }
}

/// The filled field figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPlotConfig {
    pub title: String,
    pub file_name: String,
    pub colormap: String,
    pub norm: Normalize,
    pub colorbar: ColorbarSpec,
}

impl Default for FieldPlotConfig {
    fn default() -> Self {
        Self {
            title: "T2M, ICON-DREAM-Global Grid".to_string(),
            file_name: "Global_T2M_example_N_Germany.png".to_string(),
            colormap: "coolwarm".to_string(),
            norm: Normalize::new(0.0, 10.0),
            colorbar: ColorbarSpec::new("2 m Temperature [C]"),
        }
    }
}

/// Values given on the command line or in the environment. They win over
/// the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub grid_file: Option<PathBuf>,
    pub field_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub delivery_dir: Option<PathBuf>,
    pub features_dir: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub extent: Option<BoundingBox>,
    pub dpi: Option<f32>,
}

impl PlotConfig {
    /// Replace every value set in `overrides`.
    pub fn apply(&mut self, overrides: Overrides) {
        let paths = &mut self.paths;
        let slots = [
            (&mut paths.grid_file, overrides.grid_file),
            (&mut paths.field_file, overrides.field_file),
            (&mut paths.output_dir, overrides.output_dir),
            (&mut paths.delivery_dir, overrides.delivery_dir),
            (&mut paths.features_dir, overrides.features_dir),
            (&mut paths.font_path, overrides.font_path),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(extent) = overrides.extent {
            self.extent = extent.to_extent();
        }
        if let Some(dpi) = overrides.dpi {
            self.figure.dpi = dpi;
        }
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plot config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse plot config: {}", path.display()))?;

        info!(path = %path.display(), "Loaded plot config");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Plot config not found, using defaults"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// The map window as a bounding box.
    pub fn window(&self) -> BoundingBox {
        BoundingBox::from_extent(self.extent)
    }

    pub fn grid_plot_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.grid_plot.file_name)
    }

    pub fn field_plot_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.field_plot.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_operational_plots() {
        let config = PlotConfig::default();
        assert_eq!(config.extent, [7.0, 13.0, 53.0, 58.0]);
        assert_eq!(config.figure.width_px(), 3000);
        assert_eq!(
            config.grid_plot_path(),
            PathBuf::from("/hpc/uhome/sschiman/Figures/Global_Grid_example_N_Germany.png")
        );
        assert_eq!(
            config.field_plot_path(),
            PathBuf::from("/hpc/uhome/sschiman/Figures/Global_T2M_example_N_Germany.png")
        );
        assert_eq!(config.field_plot.colorbar.shrink, 0.8);
        assert_eq!(config.field.transform, UnitTransform::KelvinToCelsius);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
extent: [0.0, 20.0, 45.0, 60.0]
field_plot:
  norm: { vmin: -10, vmax: 30 }
paths:
  output_dir: /tmp/figures
"#;
        let config: PlotConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.extent, [0.0, 20.0, 45.0, 60.0]);
        assert_eq!(config.field_plot.norm, Normalize::new(-10.0, 30.0));
        assert_eq!(config.field_plot.colormap, "coolwarm");
        assert_eq!(config.paths.output_dir, PathBuf::from("/tmp/figures"));
        assert_eq!(config.paths.delivery_dir, PathsConfig::default().delivery_dir);
        assert_eq!(config.features.len(), 4);
    }

    #[test]
    fn test_feature_styles_from_yaml() {
        let yaml = r##"
features:
  - name: coastline
    file: coast.geojson
    edge: { width_pt: 1.5, color: "#000000" }
  - name: borders
    file: borders.geojson
    edge: { width_pt: 0.5, color: "#333333", pattern: dashed }
"##;
        let config: PlotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.features.len(), 2);
        let edge = config.features[1].edge.as_ref().unwrap();
        assert_eq!(edge.pattern, renderer::LinePattern::Dashed);
        assert_eq!(edge.alpha, 1.0);
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = PlotConfig::default();
        config.apply(Overrides {
            output_dir: Some(PathBuf::from("/tmp/out")),
            extent: Some(BoundingBox::parse_extent("13,7,58,53").unwrap()),
            ..Default::default()
        });

        assert_eq!(config.paths.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.paths.grid_file, PathsConfig::default().grid_file);
        assert_eq!(config.extent, [7.0, 13.0, 53.0, 58.0]);
        assert_eq!(config.figure.dpi, 300.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = PlotConfig::load_or_default(Path::new("/nonexistent/plots.yaml")).unwrap();
        assert_eq!(config, PlotConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.yaml");
        std::fs::write(&path, "extent: [1, 2").unwrap();
        assert!(PlotConfig::load_or_default(&path).is_err());
    }
}
