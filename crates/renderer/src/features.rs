//! Reference map features (coastlines, borders, lakes, rivers) from GeoJSON.

use std::path::Path;

use icon_common::BoundingBox;
use serde::Deserialize;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// A ring or polyline of `(lon, lat)` points in degrees.
pub type LineString = Vec<(f64, f64)>;

/// Drawable geometry of a feature layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineString),
    /// Exterior ring followed by holes.
    Polygon(Vec<LineString>),
}

impl Shape {
    fn points(&self) -> Box<dyn Iterator<Item = (f64, f64)> + '_> {
        match self {
            Shape::Line(line) => Box::new(line.iter().copied()),
            Shape::Polygon(rings) => Box::new(rings.iter().flatten().copied()),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.points())
    }
}

/// All shapes of one reference layer.
#[derive(Debug, Clone, Default)]
pub struct FeatureLayer {
    pub name: String,
    pub shapes: Vec<Shape>,
}

impl FeatureLayer {
    /// Load a layer from a GeoJSON file.
    pub fn load(name: &str, path: &Path) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RenderError::Feature {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let layer = Self::parse(name, &content).map_err(|reason| RenderError::Feature {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(
            layer = name,
            path = %path.display(),
            shapes = layer.shapes.len(),
            "Loaded feature layer"
        );
        Ok(layer)
    }

    /// Parse GeoJSON text (FeatureCollection, Feature or bare geometry).
    pub fn parse(name: &str, geojson: &str) -> Result<Self, String> {
        let doc: serde_json::Value = serde_json::from_str(geojson).map_err(|e| e.to_string())?;

        let mut shapes = Vec::new();
        match doc.get("type").and_then(|t| t.as_str()) {
            Some("FeatureCollection") => {
                let collection: FeatureCollection =
                    serde_json::from_value(doc).map_err(|e| e.to_string())?;
                for feature in collection.features {
                    if let Some(geometry) = feature.geometry {
                        collect_shapes(geometry, &mut shapes)?;
                    }
                }
            }
            Some("Feature") => {
                let feature: Feature = serde_json::from_value(doc).map_err(|e| e.to_string())?;
                if let Some(geometry) = feature.geometry {
                    collect_shapes(geometry, &mut shapes)?;
                }
            }
            Some(_) => {
                let geometry: Geometry = serde_json::from_value(doc).map_err(|e| e.to_string())?;
                collect_shapes(geometry, &mut shapes)?;
            }
            None => return Err("missing GeoJSON \"type\"".to_string()),
        }

        Ok(Self {
            name: name.to_string(),
            shapes,
        })
    }

    /// Shapes whose bounding box touches `bbox`.
    pub fn shapes_in<'a>(&'a self, bbox: &'a BoundingBox) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes
            .iter()
            .filter(move |s| s.bbox().is_some_and(|b| b.intersects(bbox)))
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point {
        #[allow(dead_code)]
        coordinates: Position,
    },
    MultiPoint {
        #[allow(dead_code)]
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

fn collect_shapes(geometry: Geometry, out: &mut Vec<Shape>) -> Result<(), String> {
    match geometry {
        // Points have no extent to draw
        Geometry::Point { .. } | Geometry::MultiPoint { .. } => {}
        Geometry::LineString { coordinates } => out.push(Shape::Line(to_line(&coordinates)?)),
        Geometry::MultiLineString { coordinates } => {
            for line in &coordinates {
                out.push(Shape::Line(to_line(line)?));
            }
        }
        Geometry::Polygon { coordinates } => out.push(Shape::Polygon(to_rings(&coordinates)?)),
        Geometry::MultiPolygon { coordinates } => {
            for polygon in &coordinates {
                out.push(Shape::Polygon(to_rings(polygon)?));
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for geometry in geometries {
                collect_shapes(geometry, out)?;
            }
        }
    }
    Ok(())
}

fn to_line(positions: &[Position]) -> Result<LineString, String> {
    positions
        .iter()
        .map(|p| match p.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(format!("position needs at least 2 values, got {}", p.len())),
        })
        .collect()
}

fn to_rings(rings: &[Vec<Position>]) -> Result<Vec<LineString>, String> {
    rings.iter().map(|ring| to_line(ring)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_geometry() {
        let layer = FeatureLayer::parse(
            "x",
            r#"{"type": "LineString", "coordinates": [[1, 2], [3, 4, 100]]}"#,
        )
        .unwrap();
        assert_eq!(layer.shapes, vec![Shape::Line(vec![(1.0, 2.0), (3.0, 4.0)])]);
    }

    #[test]
    fn test_parse_single_feature() {
        let layer = FeatureLayer::parse(
            "x",
            r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}"#,
        )
        .unwrap();
        assert!(matches!(layer.shapes[0], Shape::Polygon(ref rings) if rings.len() == 1));
    }

    #[test]
    fn test_points_are_ignored() {
        let layer = FeatureLayer::parse(
            "x",
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [1, 2]},
                {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(layer.shapes.len(), 1);
    }

    #[test]
    fn test_missing_type_rejected() {
        assert!(FeatureLayer::parse("x", r#"{"features": []}"#).is_err());
        assert!(FeatureLayer::parse("x", r#"{"type": "Circle"}"#).is_err());
    }

    #[test]
    fn test_short_position_rejected() {
        let result = FeatureLayer::parse("x", r#"{"type": "LineString", "coordinates": [[1]]}"#);
        assert!(result.is_err());
    }
}
