//! Minimal GeoJSON records for geofenced alerts

use serde::{Deserialize, Serialize};

/// Polygon rings: each ring is a list of `[longitude, latitude]` positions.
pub type PolygonRings = Vec<Vec<Vec<f64>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeatureCollection {
    FeatureCollection { features: Vec<Feature> },
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self::FeatureCollection { features }
    }

    /// Collection holding one polygon feature with empty properties.
    pub fn single_polygon(bbox: Vec<f64>, coordinates: PolygonRings) -> Self {
        Self::new(vec![Feature::new(Geometry::Polygon { bbox: Some(bbox), coordinates })])
    }

    pub fn features(&self) -> &[Feature] {
        match self {
            Self::FeatureCollection { features } => features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Feature {
    Feature {
        geometry: Geometry,
        #[serde(default)]
        properties: serde_json::Map<String, serde_json::Value>,
    },
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self::Feature { geometry, properties: serde_json::Map::new() }
    }

    pub fn geometry(&self) -> &Geometry {
        match self {
            Self::Feature { geometry, .. } => geometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Vec<f64>,
    },
    Polygon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bbox: Option<Vec<f64>>,
        coordinates: PolygonRings,
    },
}
