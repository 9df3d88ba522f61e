//! Circuit catalog storage and GeoJSON loading
//!
//! This module provides the immutable catalog of track-outline features. The catalog is
//! loaded once from a bundled GeoJSON FeatureCollection at application start and never
//! mutated afterwards; all resolution runs against a shared read-only slice of features.

use crate::{CatalogError, CircuitQuery, ProjectedPath, Result};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry of a single track-outline feature.
///
/// Coordinates are raw `(longitude, latitude)` pairs as digitized in the source dataset.
/// Geometry types other than LineString and MultiLineString are retained as
/// [`TrackGeometry::Unsupported`] so that matching such a feature yields the empty path
/// instead of an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrackGeometry {
    /// One continuous polyline describing the track outline
    LineString(Vec<Coord<f64>>),
    /// Several disconnected polylines sharing one drawing frame
    /// (e.g. pit lane plus main loop, or layouts with gaps in the source)
    MultiLineString(Vec<Vec<Coord<f64>>>),
    /// Any other geometry type; never renderable
    Unsupported,
}

/// A single entry of the static circuit catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeographicFeature {
    /// Official track name as recorded in the geographic source
    pub name: String,
    /// City/locality name associated with the track
    pub location: String,
    /// Track-outline geometry in geographic coordinates
    pub geometry: TrackGeometry,
}

/// Immutable catalog of track-outline features
///
/// Thin owner around the feature list with the GeoJSON loaders and a convenience
/// [`resolve`](CircuitCatalog::resolve) that forwards to the pure resolution function.
#[derive(Clone, Debug, Default)]
pub struct CircuitCatalog {
    features: Vec<GeographicFeature>,
}

/// Raw GeoJSON document shapes, used only during loading
#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: RawProperties,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<String>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl CircuitCatalog {
    /// Parse a catalog from a GeoJSON FeatureCollection document.
    ///
    /// Features with malformed coordinates (wrong arity, non-finite components, empty
    /// lines) are skipped with a warning rather than failing the whole catalog; only a
    /// structurally invalid document is an error.
    pub fn from_geojson_str(json: &str) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("catalog::from_geojson_str");
        let doc: RawDocument = serde_json::from_str(json)?;
        if doc.kind != "FeatureCollection" {
            return Err(CatalogError::NotAFeatureCollection(doc.kind));
        }

        let mut features = Vec::with_capacity(doc.features.len());
        for raw in doc.features {
            if let Some(feature) = convert_feature(raw) {
                features.push(feature);
            }
        }

        tracing::debug!("Loaded circuit catalog with {} features", features.len());
        Ok(CircuitCatalog { features })
    }

    /// Load a catalog from a GeoJSON file on disk
    pub fn from_geojson_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("catalog::from_geojson_file");
        let json = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&json)
    }

    /// Build a catalog directly from already-constructed features
    pub fn from_features(features: Vec<GeographicFeature>) -> Self {
        CircuitCatalog { features }
    }

    /// Access the features in catalog order
    #[inline]
    pub fn features(&self) -> &[GeographicFeature] {
        &self.features
    }

    /// Number of features in the catalog
    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the catalog has no features
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Resolve a circuit query against this catalog
    pub fn resolve(&self, query: &CircuitQuery) -> ProjectedPath {
        crate::resolve_projected_path(query, &self.features)
    }
}

/// Convert one raw GeoJSON feature into a catalog entry, or reject it
fn convert_feature(raw: RawFeature) -> Option<GeographicFeature> {
    let name = raw.properties.name.unwrap_or_default();
    let location = raw.properties.location.unwrap_or_default();

    let geometry = match raw.geometry {
        Some(geometry) => match geometry.kind.as_str() {
            "LineString" => match parse_line(&geometry.coordinates) {
                Some(line) if !line.is_empty() => TrackGeometry::LineString(line),
                _ => {
                    tracing::warn!("Skipping feature with invalid LineString coordinates: {name}");
                    return None;
                }
            },
            "MultiLineString" => match parse_multi_line(&geometry.coordinates) {
                Some(lines) if !lines.is_empty() => TrackGeometry::MultiLineString(lines),
                _ => {
                    tracing::warn!("Skipping feature with invalid MultiLineString coordinates: {name}");
                    return None;
                }
            },
            other => {
                tracing::debug!("Keeping feature with unsupported geometry type {other}: {name}");
                TrackGeometry::Unsupported
            }
        },
        None => TrackGeometry::Unsupported,
    };

    Some(GeographicFeature {
        name,
        location,
        geometry,
    })
}

/// Parse a LineString coordinate array, requiring exactly two finite components per point
fn parse_line(value: &serde_json::Value) -> Option<Vec<Coord<f64>>> {
    let pairs: Vec<Vec<f64>> = serde_json::from_value(value.clone()).ok()?;
    let mut line = Vec::with_capacity(pairs.len());
    for pair in pairs {
        if pair.len() != 2 || !pair[0].is_finite() || !pair[1].is_finite() {
            return None;
        }
        line.push(Coord {
            x: pair[0],
            y: pair[1],
        });
    }
    Some(line)
}

/// Parse a MultiLineString coordinate array; every constituent line must be non-empty
fn parse_multi_line(value: &serde_json::Value) -> Option<Vec<Vec<Coord<f64>>>> {
    let arrays: Vec<serde_json::Value> = serde_json::from_value(value.clone()).ok()?;
    let mut lines = Vec::with_capacity(arrays.len());
    for array in &arrays {
        let line = parse_line(array)?;
        if line.is_empty() {
            return None;
        }
        lines.push(line);
    }
    Some(lines)
}
