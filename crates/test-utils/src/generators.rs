//! Test data generators for synthetic unstructured grids and cell fields.
//!
//! The grids mimic the layout of an ICON grid file: per-cell vertex
//! coordinates in radians, three vertices per cell, no vertex sharing.

/// A synthetic unstructured grid with per-cell vertex coordinates in radians.
///
/// `lon_vertices[3 * i + k]` is vertex `k` of cell `i` (row-major `(ncell, 3)`).
#[derive(Debug, Clone)]
pub struct SyntheticIconGrid {
    pub lon_vertices: Vec<f64>,
    pub lat_vertices: Vec<f64>,
}

impl SyntheticIconGrid {
    pub fn num_cells(&self) -> usize {
        self.lon_vertices.len() / 3
    }
}

/// Creates a regular triangulated grid covering an extent.
///
/// The extent `[x0, x1, y0, y1]` is divided into `ncols * nrows` rectangles,
/// each split into two triangles, giving `2 * ncols * nrows` cells.
///
/// # Example
///
/// ```
/// use test_utils::create_regional_icon_grid;
///
/// let grid = create_regional_icon_grid(4, 2, [0.0, 4.0, 50.0, 52.0]);
/// assert_eq!(grid.num_cells(), 16);
/// assert_eq!(grid.lon_vertices.len(), 48);
/// ```
pub fn create_regional_icon_grid(ncols: usize, nrows: usize, extent: [f64; 4]) -> SyntheticIconGrid {
    let [x0, x1, y0, y1] = extent;
    let dx = (x1 - x0) / ncols as f64;
    let dy = (y1 - y0) / nrows as f64;

    let mut lon = Vec::with_capacity(ncols * nrows * 6);
    let mut lat = Vec::with_capacity(ncols * nrows * 6);

    for row in 0..nrows {
        for col in 0..ncols {
            let west = x0 + col as f64 * dx;
            let east = west + dx;
            let south = y0 + row as f64 * dy;
            let north = south + dy;

            // Lower-left triangle, then upper-right triangle
            for (x, y) in [(west, south), (east, south), (west, north)] {
                lon.push(x.to_radians());
                lat.push(y.to_radians());
            }
            for (x, y) in [(east, south), (east, north), (west, north)] {
                lon.push(x.to_radians());
                lat.push(y.to_radians());
            }
        }
    }

    SyntheticIconGrid {
        lon_vertices: lon,
        lat_vertices: lat,
    }
}

/// Moves every vertex east of `threshold_deg` into the western hemisphere
/// (`lon - 360`), the way a global grid wraps at the antimeridian.
pub fn wrap_longitudes(grid: &SyntheticIconGrid, threshold_deg: f64) -> SyntheticIconGrid {
    let lon_vertices = grid
        .lon_vertices
        .iter()
        .map(|&rad| {
            let deg = rad.to_degrees();
            if deg > threshold_deg {
                (deg - 360.0).to_radians()
            } else {
                rad
            }
        })
        .collect();

    SyntheticIconGrid {
        lon_vertices,
        lat_vertices: grid.lat_vertices.clone(),
    }
}

/// Creates the `(lon, lat)` radian arrays of a single cell given in degrees.
pub fn single_cell_radians(lon_deg: [f64; 3], lat_deg: [f64; 3]) -> (Vec<f64>, Vec<f64>) {
    (
        lon_deg.iter().map(|v| v.to_radians()).collect(),
        lat_deg.iter().map(|v| v.to_radians()).collect(),
    )
}

/// Creates per-cell temperature values in Kelvin.
///
/// Values cycle between roughly 268K (-5C) and 288K (15C), so they straddle
/// the [0, 10] °C colour range on both sides.
pub fn create_temperature_cells(ncell: usize) -> Vec<f32> {
    (0..ncell)
        .map(|i| 268.15 + 20.0 * ((i % 97) as f32 / 96.0))
        .collect()
}
