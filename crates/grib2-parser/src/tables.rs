//! Short names for GRIB2 parameters and fixed surfaces.
//!
//! Only used to label decoded fields in logs; unknown codes fall back to a
//! name built from the numbers themselves.

use std::collections::HashMap;

/// How a fixed surface type is described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDescription {
    /// The surface has no meaningful value (`surface`, `mean sea level`).
    Static(String),
    /// Text with a `{value}` placeholder (`{value} m above ground`).
    Template(String),
}

impl LevelDescription {
    pub fn format(&self, value: u32) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Template(text) => text.replace("{value}", &value.to_string()),
        }
    }
}

/// Parameter and surface names keyed by their GRIB2 code numbers.
#[derive(Debug, Clone, Default)]
pub struct Grib2Tables {
    /// `(discipline, category, number)` to short name
    parameters: HashMap<(u8, u8, u8), String>,
    /// First fixed surface type to description
    levels: HashMap<u8, LevelDescription>,
}

impl Grib2Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names for the ICON single-level output used by the plots.
    pub fn icon() -> Self {
        let mut tables = Self::new();
        tables.add_parameter(0, 0, 0, "t2m".to_string());
        tables.add_level(1, LevelDescription::Static("surface".to_string()));
        tables.add_level(101, LevelDescription::Static("mean sea level".to_string()));
        tables.add_level(
            103,
            LevelDescription::Template("{value} m above ground".to_string()),
        );
        tables
    }

    pub fn add_parameter(&mut self, discipline: u8, category: u8, number: u8, name: String) {
        self.parameters.insert((discipline, category, number), name);
    }

    pub fn add_level(&mut self, level_type: u8, description: LevelDescription) {
        self.levels.insert(level_type, description);
    }

    /// Short name, or `P{discipline}_{category}_{number}` when unknown.
    pub fn get_parameter_name(&self, discipline: u8, category: u8, number: u8) -> String {
        match self.parameters.get(&(discipline, category, number)) {
            Some(name) => name.clone(),
            None => format!("P{}_{}_{}", discipline, category, number),
        }
    }

    /// Surface description, or `level {type}={value}` when unknown.
    pub fn get_level_description(&self, level_type: u8, level_value: u32) -> String {
        self.levels
            .get(&level_type)
            .map(|desc| desc.format(level_value))
            .unwrap_or_else(|| format!("level {}={}", level_type, level_value))
    }
}
