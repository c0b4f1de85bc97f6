//! Cell-centred scalar fields.

use icon_common::UnitTransform;

use crate::error::{MeshError, MeshResult};
use crate::triangulation::Triangulation;

/// One scalar value per grid cell, in display units.
#[derive(Debug, Clone)]
pub struct CellField {
    values: Vec<f32>,
    units: Option<String>,
}

impl CellField {
    pub fn new(values: Vec<f32>, units: Option<String>) -> Self {
        Self { values, units }
    }

    /// Convert a Kelvin field to degrees Celsius (`K - 273.15`).
    pub fn from_kelvin(values: &[f32]) -> Self {
        Self::transformed(values, UnitTransform::KelvinToCelsius)
    }

    /// Apply a unit transform to raw values.
    pub fn transformed(values: &[f32], transform: UnitTransform) -> Self {
        Self {
            values: transform.apply_all(values),
            units: transform.target_unit().map(str::to_string),
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Minimum value, ignoring NaN.
    pub fn min(&self) -> Option<f32> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::min)
    }

    /// Maximum value, ignoring NaN.
    pub fn max(&self) -> Option<f32> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::max)
    }

    /// Check the field has exactly one value per triangle of `mesh`.
    pub fn check_matches(&self, mesh: &Triangulation) -> MeshResult<()> {
        if self.values.len() != mesh.num_triangles() {
            return Err(MeshError::FieldLength {
                values: self.values.len(),
                cells: mesh.num_triangles(),
            });
        }
        Ok(())
    }
}
