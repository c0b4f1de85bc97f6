//! Message selection by parameter and level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reader::MessageInfo;

/// Identifies the GRIB2 message to read from a file.
///
/// A message matches when its discipline, parameter category and parameter
/// number are equal to the selector's. When a `surface` is given and several
/// messages match, the first one on that fixed surface wins; otherwise the
/// first parameter match is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub discipline: u8,
    pub category: u8,
    pub number: u8,
    /// Preferred first fixed surface `(type, value)`.
    #[serde(default)]
    pub surface: Option<(u8, f64)>,
}

impl Default for FieldSelector {
    fn default() -> Self {
        Self::t2m()
    }
}

impl FieldSelector {
    /// Temperature at 2 m above ground.
    pub const fn t2m() -> Self {
        Self {
            discipline: 0,
            category: 0,
            number: 0,
            surface: Some((103, 2.0)),
        }
    }

    pub const fn parameter(discipline: u8, category: u8, number: u8) -> Self {
        Self {
            discipline,
            category,
            number,
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface_type: u8, value: f64) -> Self {
        self.surface = Some((surface_type, value));
        self
    }

    pub fn matches_parameter(&self, info: &MessageInfo) -> bool {
        info.discipline == self.discipline
            && info.category == Some(self.category)
            && info.number == Some(self.number)
    }

    pub fn matches_surface(&self, info: &MessageInfo) -> bool {
        match (self.surface, info.surface_type, info.surface_value) {
            (None, _, _) => true,
            (Some((ty, value)), Some(info_ty), Some(info_value)) => {
                ty == info_ty && (value - info_value).abs() < 1e-6
            }
            _ => false,
        }
    }

    /// Position in `messages` of the message to read.
    pub fn select(&self, messages: &[MessageInfo]) -> Option<usize> {
        let candidates: Vec<usize> = messages
            .iter()
            .enumerate()
            .filter(|(_, info)| self.matches_parameter(info))
            .map(|(i, _)| i)
            .collect();

        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, ..] => candidates
                .iter()
                .copied()
                .find(|&i| self.matches_surface(&messages[i]))
                .or(Some(*first)),
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "discipline {} category {} number {}",
            self.discipline, self.category, self.number
        )?;
        if let Some((ty, value)) = self.surface {
            write!(f, " on surface {} = {}", ty, value)?;
        }
        Ok(())
    }
}
