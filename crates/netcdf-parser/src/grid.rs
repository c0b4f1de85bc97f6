//! ICON grid definition loading.

use std::io;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{get_global_i32_attr, get_global_string_attr, get_string_attr, silence_hdf5_errors};

/// Vertices per ICON cell (triangles).
pub const VERTICES_PER_CELL: usize = 3;

/// Names of the vertex coordinate variables in the grid file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridVariables {
    pub lon: String,
    pub lat: String,
}

impl Default for GridVariables {
    fn default() -> Self {
        Self {
            lon: "clon_vertices".to_string(),
            lat: "clat_vertices".to_string(),
        }
    }
}

/// Per-cell vertex coordinates of an ICON grid, in radians.
///
/// Both arrays are row-major `(ncell, 3)`: `lon_vertices[3 * i + k]` is
/// vertex `k` of cell `i`.
#[derive(Debug, Clone)]
pub struct IconGrid {
    pub lon_vertices: Vec<f64>,
    pub lat_vertices: Vec<f64>,
    /// `number_of_grid_used` global attribute, when present.
    pub number_of_grid_used: Option<i32>,
    /// `uuidOfHGrid` global attribute, when present.
    pub uuid_of_hgrid: Option<String>,
}

impl IconGrid {
    pub fn num_cells(&self) -> usize {
        self.lon_vertices.len() / VERTICES_PER_CELL
    }
}

/// Load the vertex coordinate arrays of an ICON grid file.
///
/// Values are returned in radians. Variables whose `units` attribute says
/// degrees are converted on load.
pub fn load_icon_grid<P: AsRef<Path>>(path: P, variables: &GridVariables) -> NetCdfResult<IconGrid> {
    let path = path.as_ref();
    let start = Instant::now();

    if !path.exists() {
        return Err(NetCdfError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("grid file not found: {}", path.display()),
        )));
    }

    silence_hdf5_errors();

    let file = netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

    let (lon_vertices, lon_cells) = read_vertices(&file, &variables.lon)?;
    let (lat_vertices, lat_cells) = read_vertices(&file, &variables.lat)?;

    if lon_cells != lat_cells {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} cells but {} has {}",
            variables.lon, lon_cells, variables.lat, lat_cells
        )));
    }

    let grid = IconGrid {
        lon_vertices,
        lat_vertices,
        number_of_grid_used: get_global_i32_attr(&file, "number_of_grid_used"),
        uuid_of_hgrid: get_global_string_attr(&file, "uuidOfHGrid"),
    };

    info!(
        path = %path.display(),
        cells = grid.num_cells(),
        number_of_grid_used = ?grid.number_of_grid_used,
        uuid = ?grid.uuid_of_hgrid,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded ICON grid"
    );

    Ok(grid)
}

/// Read a `(cell, 3)` vertex variable as radians, returning the values and cell count.
fn read_vertices(file: &netcdf::File, name: &str) -> NetCdfResult<(Vec<f64>, usize)> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;

    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let ncell = match dims.as_slice() {
        [ncell, nv] if *nv == VERTICES_PER_CELL => *ncell,
        _ => {
            return Err(NetCdfError::InvalidFormat(format!(
                "{} must have shape (cell, {}), found {:?}",
                name, VERTICES_PER_CELL, dims
            )))
        }
    };

    let mut values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

    let units = get_string_attr(&var, "units");
    if units.as_deref().is_some_and(is_degree_unit) {
        debug!(variable = name, units = ?units, "Converting vertex coordinates to radians");
        for v in &mut values {
            *v = v.to_radians();
        }
    }

    Ok((values, ncell))
}

fn is_degree_unit(units: &str) -> bool {
    matches!(
        units.trim().to_ascii_lowercase().as_str(),
        "degree" | "degrees" | "degree_east" | "degrees_east" | "degree_north" | "degrees_north"
    )
}
