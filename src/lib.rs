//! Circuit Outline - Track Geometry Matching and Projection
//!
//! This library resolves a circuit's descriptive fields (name, location) against a
//! static catalog of geographic track-outline features and projects the matched
//! geometry into a normalized 2D drawing frame for vector rendering.
//!
//! # Architecture
//!
//! - **[`CircuitCatalog`]**: Immutable storage for features loaded from a GeoJSON catalog
//! - **[`find_feature`]**: Fuzzy matcher from query fields to a catalog feature
//! - **[`project_geometry`]**: Bounding-box projection into the 0-100 drawing frame
//! - **[`resolve_projected_path`]**: End-to-end resolution entry point
//!
//! # Resolution Characteristics
//!
//! Resolution is a pure function of `(query, catalog)`: re-invocation with the same
//! inputs returns the same [`ProjectedPath`], and every anomalous input (no match,
//! unsupported geometry, degenerate bounding box) folds into the empty path rather
//! than an error. Fallible operations exist only at the catalog-loading boundary.

mod catalog;
pub mod matcher;
pub mod projection;

// Public API exports
pub use catalog::{CircuitCatalog, GeographicFeature, TrackGeometry};
pub use matcher::{CircuitQuery, find_feature};
pub use projection::{FRAME_SIZE, ProjectedPath, project_geometry};

/// Error types for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("GeoJSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a FeatureCollection, found: {0}")]
    NotAFeatureCollection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Resolve a circuit query against a feature catalog.
///
/// Finds the first catalog feature matching the query's name or location and projects
/// its geometry into the normalized drawing frame. Returns the empty path when no
/// feature matches or the matched feature has nothing renderable.
pub fn resolve_projected_path(
    query: &CircuitQuery,
    catalog: &[GeographicFeature],
) -> ProjectedPath {
    match matcher::find_feature(query, catalog) {
        Some(feature) => projection::project_geometry(&feature.geometry),
        None => {
            tracing::debug!("No catalog feature matched query {query:?}");
            ProjectedPath::default()
        }
    }
}
