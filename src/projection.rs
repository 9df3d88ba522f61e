//! Projection of geographic track outlines into the normalized drawing frame
//!
//! All sublines of a geometry share a single bounding box, so the relative scale and
//! position between disconnected sublines survive the projection. The longer bounding-box
//! axis maps edge-to-edge onto `[0, 100]`; the shorter axis keeps the same scale factor
//! and is centered within the frame. Latitude grows northwards while drawing-surface Y
//! grows downwards, so the Y axis is flipped.

use crate::catalog::TrackGeometry;
use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// Side length of the square normalized drawing frame
pub const FRAME_SIZE: f64 = 100.0;

/// Ordered subpaths of drawing-space points, each one continuous polyline.
///
/// The empty path is the single terminal state for everything that cannot be drawn:
/// no catalog match, unsupported geometry, no coordinates, or a degenerate bounding
/// box. Consumers render it as a placeholder rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPath {
    subpaths: Vec<Vec<Coord<f64>>>,
}

impl ProjectedPath {
    /// Access the subpaths in original subline order
    #[inline]
    pub fn subpaths(&self) -> &[Vec<Coord<f64>>] {
        &self.subpaths
    }

    /// Check whether there is nothing to draw
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Total number of points across all subpaths
    pub fn total_points(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// Serialize to SVG path data: each subpath becomes `M x,y L x,y ...`.
    ///
    /// The serialization is fully determined by the subpath and point order; the empty
    /// path serializes to the empty string.
    pub fn to_svg_path_data(&self) -> String {
        let mut data = String::new();
        for subpath in &self.subpaths {
            if subpath.is_empty() {
                continue;
            }
            if !data.is_empty() {
                data.push(' ');
            }
            data.push_str("M ");
            let points: Vec<String> = subpath
                .iter()
                .map(|point| format!("{},{}", point.x, point.y))
                .collect();
            data.push_str(&points.join(" L "));
        }
        data
    }
}

/// Project a track geometry into the normalized drawing frame.
///
/// Never fails: unsupported geometry, empty geometry, and a zero-extent bounding box
/// (which would otherwise divide by zero in the scale computation) all resolve to the
/// empty path. Subpath count and point order are preserved from the input sublines.
pub fn project_geometry(geometry: &TrackGeometry) -> ProjectedPath {
    #[cfg(feature = "profiling")]
    profiling::scope!("projection::project_geometry");
    let lines: Vec<&[Coord<f64>]> = match geometry {
        TrackGeometry::LineString(line) => vec![line.as_slice()],
        TrackGeometry::MultiLineString(lines) => lines.iter().map(Vec::as_slice).collect(),
        TrackGeometry::Unsupported => return ProjectedPath::default(),
    };

    let Some(bounds) = bounding_box(&lines) else {
        return ProjectedPath::default();
    };

    let width = bounds.width();
    let height = bounds.height();
    let extent = width.max(height);
    // A single repeated point has no extent; scaling it would leak non-finite coordinates
    if extent <= 0.0 {
        return ProjectedPath::default();
    }

    let scale = FRAME_SIZE / extent;
    let dx = (FRAME_SIZE - width * scale) / 2.0;
    let dy = (FRAME_SIZE - height * scale) / 2.0;
    let min = bounds.min();

    let subpaths = lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|point| Coord {
                    x: (point.x - min.x) * scale + dx,
                    y: (FRAME_SIZE - dy) - (point.y - min.y) * scale,
                })
                .collect()
        })
        .collect();

    ProjectedPath { subpaths }
}

/// Compute the bounding box shared by all sublines, or `None` if there are no points
fn bounding_box(lines: &[&[Coord<f64>]]) -> Option<Rect<f64>> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut found_point = false;

    for line in lines {
        for point in *line {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
            found_point = true;
        }
    }

    if !found_point {
        return None;
    }

    Some(Rect::new(
        Coord { x: min_x, y: min_y },
        Coord { x: max_x, y: max_y },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn test_wide_geometry_centers_the_y_axis() {
        // 2:1 aspect ratio: x spans the full frame, y is centered with dy = 25
        let geometry = TrackGeometry::LineString(line(&[
            (0.0, 0.0),
            (200.0, 100.0),
            (100.0, 50.0),
        ]));
        let path = project_geometry(&geometry);

        assert_eq!(path.subpaths().len(), 1);
        let points = &path.subpaths()[0];
        assert_eq!(points[0], Coord { x: 0.0, y: 75.0 });
        assert_eq!(points[1], Coord { x: 100.0, y: 25.0 });
        assert_eq!(points[2], Coord { x: 50.0, y: 50.0 });

        for point in points {
            assert!((0.0..=100.0).contains(&point.x));
            assert!((25.0..=75.0).contains(&point.y));
        }
    }

    #[test]
    fn test_tall_geometry_centers_the_x_axis() {
        // 1:2 aspect ratio: y spans the full frame, x is centered with dx = 25
        let geometry = TrackGeometry::LineString(line(&[(0.0, 0.0), (5.0, 10.0)]));
        let path = project_geometry(&geometry);

        let points = &path.subpaths()[0];
        assert_eq!(points[0], Coord { x: 25.0, y: 100.0 });
        assert_eq!(points[1], Coord { x: 75.0, y: 0.0 });
    }

    #[test]
    fn test_y_axis_is_flipped() {
        // North (larger latitude) must land higher up, i.e. at a smaller drawing Y
        let geometry = TrackGeometry::LineString(line(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
        let path = project_geometry(&geometry);

        let points = &path.subpaths()[0];
        assert!(points[2].y < points[0].y);
    }

    #[test]
    fn test_degenerate_single_point_is_empty() {
        let geometry = TrackGeometry::LineString(line(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]));
        let path = project_geometry(&geometry);
        assert!(path.is_empty());
    }

    #[test]
    fn test_empty_line_string_is_empty() {
        let geometry = TrackGeometry::LineString(Vec::new());
        assert!(project_geometry(&geometry).is_empty());
    }

    #[test]
    fn test_empty_multi_line_string_is_empty() {
        let geometry = TrackGeometry::MultiLineString(Vec::new());
        assert!(project_geometry(&geometry).is_empty());
    }

    #[test]
    fn test_unsupported_geometry_is_empty() {
        assert!(project_geometry(&TrackGeometry::Unsupported).is_empty());
    }

    #[test]
    fn test_multi_line_preserves_subpath_structure() {
        let geometry = TrackGeometry::MultiLineString(vec![
            line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]),
            line(&[(1.5, 2.0)]),
            line(&[
                (0.0, 4.0),
                (0.5, 4.0),
                (1.0, 4.0),
                (1.5, 4.0),
                (2.0, 4.0),
                (2.5, 4.0),
                (3.0, 4.0),
            ]),
        ]);
        let path = project_geometry(&geometry);

        let lengths: Vec<usize> = path.subpaths().iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![4, 1, 7]);
    }

    #[test]
    fn test_multi_line_shares_one_bounding_box() {
        // Two sublines far apart; per-subline boxes would collapse each onto the frame
        let geometry = TrackGeometry::MultiLineString(vec![
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(90.0, 100.0), (100.0, 100.0)]),
        ]);
        let path = project_geometry(&geometry);

        let first = &path.subpaths()[0];
        let second = &path.subpaths()[1];
        assert_eq!(first[0], Coord { x: 0.0, y: 100.0 });
        assert_eq!(first[1], Coord { x: 10.0, y: 100.0 });
        assert_eq!(second[0], Coord { x: 90.0, y: 0.0 });
        assert_eq!(second[1], Coord { x: 100.0, y: 0.0 });
    }

    #[test]
    fn test_svg_path_data_shape() {
        let geometry = TrackGeometry::MultiLineString(vec![
            line(&[(0.0, 0.0), (200.0, 100.0)]),
            line(&[(100.0, 50.0)]),
        ]);
        let path = project_geometry(&geometry);

        let data = path.to_svg_path_data();
        assert_eq!(data, "M 0,75 L 100,25 M 50,50");
    }

    #[test]
    fn test_empty_path_serializes_to_empty_string() {
        assert_eq!(ProjectedPath::default().to_svg_path_data(), "");
    }
}
