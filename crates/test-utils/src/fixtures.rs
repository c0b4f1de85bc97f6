//! Static fixtures: the default map window and small GeoJSON reference layers.

use std::fs;
use std::io;
use std::path::Path;

/// Default map window `[lon_min, lon_max, lat_min, lat_max]` (northern Germany).
pub const NORTH_GERMANY_EXTENT: [f64; 4] = [7.0, 13.0, 53.0, 58.0];

/// A crude North Sea / Baltic coastline through the default window.
pub const COASTLINE_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "north sea coast" },
      "geometry": {
        "type": "LineString",
        "coordinates": [[6.5, 53.4], [8.0, 53.6], [8.6, 54.0], [8.6, 55.0], [8.1, 55.6], [8.2, 56.8], [10.5, 57.7]]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "baltic coast" },
      "geometry": {
        "type": "MultiLineString",
        "coordinates": [
          [[10.0, 54.5], [11.0, 54.0], [12.5, 54.4], [13.5, 54.2]],
          [[10.5, 56.0], [12.0, 56.1], [12.6, 55.7]]
        ]
      }
    }
  ]
}"#;

/// German-Danish border segment.
pub const BORDERS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "DE-DK" },
      "geometry": {
        "type": "LineString",
        "coordinates": [[8.6, 54.9], [9.4, 54.8], [9.9, 54.8]]
      }
    }
  ]
}"#;

/// One polygon lake with a hole and one multipolygon lake.
pub const LAKES_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "schweriner see" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [
          [[11.35, 53.55], [11.55, 53.55], [11.55, 53.75], [11.35, 53.75], [11.35, 53.55]],
          [[11.42, 53.62], [11.48, 53.62], [11.48, 53.68], [11.42, 53.68], [11.42, 53.62]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "ploener seen" },
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[10.35, 54.12], [10.50, 54.12], [10.50, 54.20], [10.35, 54.20], [10.35, 54.12]]],
          [[[10.55, 54.15], [10.60, 54.15], [10.60, 54.18], [10.55, 54.15]]]
        ]
      }
    }
  ]
}"#;

/// Elbe estuary, partially outside the window to the south.
pub const RIVERS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "elbe" },
      "geometry": {
        "type": "LineString",
        "coordinates": [[11.5, 52.5], [10.5, 53.3], [10.0, 53.55], [9.0, 53.85], [8.7, 53.9]]
      }
    }
  ]
}"#;

/// File names of the reference layers, in drawing order.
pub const FEATURE_FILES: [(&str, &str); 4] = [
    ("coastline.geojson", COASTLINE_GEOJSON),
    ("borders.geojson", BORDERS_GEOJSON),
    ("lakes.geojson", LAKES_GEOJSON),
    ("rivers.geojson", RIVERS_GEOJSON),
];

/// Write all reference layer fixtures into `dir`.
pub fn write_feature_fixtures(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, contents) in FEATURE_FILES {
        fs::write(dir.join(name), contents)?;
    }
    Ok(())
}
