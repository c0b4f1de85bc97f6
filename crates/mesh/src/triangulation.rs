//! Triangulation built from per-cell vertex coordinates.

use icon_common::BoundingBox;
use tracing::debug;

use crate::error::{MeshError, MeshResult};

/// Longitude span (degrees) above which a triangle is treated as crossing
/// the antimeridian and masked out.
pub const DATELINE_THRESHOLD_DEG: f64 = 180.0;

/// Point coordinates plus triangle indices and a per-triangle mask.
///
/// Coordinates are in degrees. Triangle `i` always references vertices
/// `[3i, 3i + 1, 3i + 2]`.
#[derive(Debug, Clone)]
pub struct Triangulation {
    lon: Vec<f64>,
    lat: Vec<f64>,
    triangles: Vec<[usize; 3]>,
    mask: Vec<bool>,
}

impl Triangulation {
    /// Build a triangulation from flattened `(ncell, 3)` vertex arrays in radians.
    pub fn from_radians(lon_rad: &[f64], lat_rad: &[f64]) -> MeshResult<Self> {
        let lon: Vec<f64> = lon_rad.iter().map(|v| v.to_degrees()).collect();
        let lat: Vec<f64> = lat_rad.iter().map(|v| v.to_degrees()).collect();
        Self::from_degrees(lon, lat)
    }

    /// Build a triangulation from flattened `(ncell, 3)` vertex arrays in degrees.
    pub fn from_degrees(lon: Vec<f64>, lat: Vec<f64>) -> MeshResult<Self> {
        if lon.len() != lat.len() {
            return Err(MeshError::LengthMismatch {
                lon: lon.len(),
                lat: lat.len(),
            });
        }
        if lon.len() % 3 != 0 {
            return Err(MeshError::NotTriangles(lon.len()));
        }

        let ncell = lon.len() / 3;
        let triangles: Vec<[usize; 3]> = (0..ncell).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect();
        let mask: Vec<bool> = triangles
            .iter()
            .map(|tri| longitude_span(&lon, tri) > DATELINE_THRESHOLD_DEG)
            .collect();

        let triangulation = Self {
            lon,
            lat,
            triangles,
            mask,
        };

        debug!(
            triangles = triangulation.num_triangles(),
            masked = triangulation.masked_count(),
            "Built triangulation"
        );

        Ok(triangulation)
    }

    /// Number of triangles (one per grid cell).
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices (three per triangle, not deduplicated).
    pub fn num_vertices(&self) -> usize {
        self.lon.len()
    }

    /// Vertex longitudes in degrees.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Vertex latitudes in degrees.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Triangle index array.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Vertex indices of triangle `i`.
    pub fn triangle(&self, i: usize) -> Option<[usize; 3]> {
        self.triangles.get(i).copied()
    }

    /// `(lon, lat)` of the three vertices of triangle `i`.
    pub fn triangle_vertices(&self, i: usize) -> Option<[(f64, f64); 3]> {
        let [a, b, c] = self.triangle(i)?;
        Some([
            (self.lon[a], self.lat[a]),
            (self.lon[b], self.lat[b]),
            (self.lon[c], self.lat[c]),
        ])
    }

    /// Per-triangle mask, `true` means excluded from rendering.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn is_masked(&self, i: usize) -> bool {
        self.mask.get(i).copied().unwrap_or(false)
    }

    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Replace the mask.
    pub fn set_mask(&mut self, mask: Vec<bool>) -> MeshResult<()> {
        if mask.len() != self.triangles.len() {
            return Err(MeshError::MaskLength {
                mask: mask.len(),
                triangles: self.triangles.len(),
            });
        }
        self.mask = mask;
        Ok(())
    }

    /// Indices of triangles that are not masked.
    pub fn visible_triangles(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &masked)| !masked)
            .map(|(i, _)| i)
    }

    /// Indices of unmasked triangles whose bounding box touches `bbox`.
    pub fn visible_in(&self, bbox: &BoundingBox) -> impl Iterator<Item = usize> + '_ {
        let bbox = *bbox;
        self.visible_triangles().filter(move |&i| {
            let vertices = self.triangles[i].map(|v| (self.lon[v], self.lat[v]));
            BoundingBox::enclosing(vertices).is_some_and(|tri_bbox| tri_bbox.intersects(&bbox))
        })
    }
}

/// Largest absolute longitude difference between any two vertices.
fn longitude_span(lon: &[f64], tri: &[usize; 3]) -> f64 {
    let [a, b, c] = tri.map(|v| lon[v]);
    (a - b).abs().max((b - c).abs()).max((a - c).abs())
}
