//! Unit transformations for converting raw field values to display values.

use serde::{Deserialize, Serialize};

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Unit transformation applied to raw data values before display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitTransform {
    /// No transformation
    #[default]
    None,
    /// K → °C: subtract 273.15
    KelvinToCelsius,
    /// Subtract a value
    Subtract(f32),
    /// Linear transform: value * scale + offset
    Linear { scale: f32, offset: f32 },
}

impl UnitTransform {
    /// Apply the transformation to a value.
    pub fn apply(&self, value: f32) -> f32 {
        match self {
            Self::None => value,
            Self::KelvinToCelsius => value - KELVIN_OFFSET,
            Self::Subtract(offset) => value - offset,
            Self::Linear { scale, offset } => value * scale + offset,
        }
    }

    /// Apply the transformation to every value of a slice.
    pub fn apply_all(&self, values: &[f32]) -> Vec<f32> {
        values.iter().map(|&v| self.apply(v)).collect()
    }

    /// Display unit suffix produced by this transform, if known.
    pub fn target_unit(&self) -> Option<&'static str> {
        match self {
            Self::KelvinToCelsius => Some("C"),
            _ => None,
        }
    }
}
