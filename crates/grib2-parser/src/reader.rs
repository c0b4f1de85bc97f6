//! Reading and decoding GRIB2 messages.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{Grib2Error, Grib2Result};
use crate::selector::FieldSelector;
use crate::tables::Grib2Tables;

/// Identifying metadata of one GRIB2 (sub)message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInfo {
    /// `(message, submessage)` position in the file.
    pub index: (usize, usize),
    pub discipline: u8,
    pub category: Option<u8>,
    pub number: Option<u8>,
    /// First fixed surface type, `None` when missing (255).
    pub surface_type: Option<u8>,
    /// First fixed surface value after applying its scale factor.
    pub surface_value: Option<f64>,
    pub grid_template: u16,
    pub num_points: usize,
}

/// A decoded field: one value per grid point, in the file's units.
#[derive(Debug, Clone)]
pub struct GribField {
    pub info: MessageInfo,
    /// Short parameter name from the lookup tables (e.g. `t2m`).
    pub short_name: String,
    /// Human readable level (e.g. `2 m above ground`).
    pub level: String,
    pub values: Vec<f32>,
}

impl GribField {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_unstructured(&self) -> bool {
        self.info.grid_template == crate::UNSTRUCTURED_GRID_TEMPLATE
    }
}

/// Read the message picked by `selector` from a GRIB2 file.
pub fn read_field(
    path: &Path,
    selector: &FieldSelector,
    tables: &Grib2Tables,
) -> Grib2Result<GribField> {
    let start = Instant::now();
    let file = File::open(path)?;
    let field = read_from(BufReader::new(file), selector, tables)?;

    info!(
        path = %path.display(),
        param = %field.short_name,
        level = %field.level,
        points = field.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded GRIB2 field"
    );

    Ok(field)
}

/// Read the message picked by `selector` from in-memory GRIB2 data.
pub fn read_field_from_bytes(
    data: &[u8],
    selector: &FieldSelector,
    tables: &Grib2Tables,
) -> Grib2Result<GribField> {
    read_from(Cursor::new(data), selector, tables)
}

/// Metadata of every message in a GRIB2 file, in file order.
pub fn list_messages(path: &Path) -> Grib2Result<Vec<MessageInfo>> {
    let file = File::open(path)?;
    scan_messages(BufReader::new(file))
}

fn scan_messages<R: Read + Seek>(reader: R) -> Grib2Result<Vec<MessageInfo>> {
    let grib_file =
        grib::from_reader(reader).map_err(|e| Grib2Error::InvalidFormat(e.to_string()))?;

    Ok(grib_file
        .iter()
        .map(|(index, submsg)| {
            let prod_def = submsg.prod_def();
            let (surface_type, surface_value) = match prod_def.fixed_surfaces() {
                Some((first, _)) => surface(first.surface_type, first.scale_factor, first.scaled_value),
                None => (None, None),
            };
            MessageInfo {
                index,
                discipline: submsg.indicator().discipline,
                category: prod_def.parameter_category(),
                number: prod_def.parameter_number(),
                surface_type,
                surface_value,
                grid_template: submsg.grid_def().grid_tmpl_num(),
                num_points: submsg.grid_def().num_points() as usize,
            }
        })
        .collect())
}

fn read_from<R: Read + Seek>(
    mut reader: R,
    selector: &FieldSelector,
    tables: &Grib2Tables,
) -> Grib2Result<GribField> {
    let messages = scan_messages(&mut reader)?;

    debug!(messages = messages.len(), selector = %selector, "Scanned GRIB2 messages");

    let position = selector
        .select(&messages)
        .ok_or_else(|| Grib2Error::FieldNotFound(selector.to_string()))?;
    let info = messages[position].clone();

    reader.rewind()?;
    let grib_file =
        grib::from_reader(reader).map_err(|e| Grib2Error::InvalidFormat(e.to_string()))?;
    let (_, submsg) = grib_file
        .iter()
        .nth(position)
        .ok_or_else(|| Grib2Error::FieldNotFound(selector.to_string()))?;

    let decoder = grib::Grib2SubmessageDecoder::from(submsg).map_err(|e| {
        Grib2Error::DecodeError {
            index: position,
            reason: e.to_string(),
        }
    })?;
    let values: Vec<f32> = decoder
        .dispatch()
        .map_err(|e| Grib2Error::DecodeError {
            index: position,
            reason: e.to_string(),
        })?
        .collect();

    if values.len() != info.num_points {
        return Err(Grib2Error::PointCountMismatch {
            expected: info.num_points,
            actual: values.len(),
        });
    }

    let short_name = tables.get_parameter_name(
        info.discipline,
        info.category.unwrap_or(255),
        info.number.unwrap_or(255),
    );
    let level = match (info.surface_type, info.surface_value) {
        (Some(ty), Some(value)) => tables.get_level_description(ty, value.round() as u32),
        _ => "unknown level".to_string(),
    };

    Ok(GribField {
        info,
        short_name,
        level,
        values,
    })
}

/// Surface type and scaled value, `(None, None)` for the missing type 255.
fn surface(surface_type: u8, scale_factor: i8, scaled_value: i32) -> (Option<u8>, Option<f64>) {
    if surface_type == 255 {
        return (None, None);
    }
    let value = scaled_value as f64 * 10f64.powi(-(scale_factor as i32));
    (Some(surface_type), Some(value))
}
