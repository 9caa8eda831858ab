//! Distance queries
//!
//! Euclidean distances between points and from a planar point to the
//! footprint boundary. All functions are total: NaN inputs give NaN outputs.

use glam::{DVec2, DVec3};

use super::Polygon;

/// Euclidean distance between two points in 3D
#[inline]
pub fn distance3(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}

/// Distance from `p` to the closed segment `[v, w]`
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to the nearer endpoint. A degenerate segment (`v == w`)
/// measures to that single point.
///
/// # Example
///
/// ```
/// use prism_placement::geometry::distance_point_to_segment;
/// use glam::DVec2;
///
/// let d = distance_point_to_segment(DVec2::new(3.0, 4.0), DVec2::ZERO, DVec2::ZERO);
/// assert_eq!(d, 5.0);
/// ```
pub fn distance_point_to_segment(p: DVec2, v: DVec2, w: DVec2) -> f64 {
    let segment = w - v;
    let length_squared = segment.length_squared();
    if length_squared == 0.0 {
        return p.distance(v);
    }

    let t = ((p - v).dot(segment) / length_squared).clamp(0.0, 1.0);
    let projection = v + segment * t;
    p.distance(projection)
}

/// Distance from `pt` to the nearest edge of `polygon`
///
/// Every edge is considered, including the closing edge from the last vertex
/// back to the first. An empty polygon yields `f64::INFINITY`.
pub fn min_edge_distance(pt: DVec2, polygon: &Polygon) -> f64 {
    polygon
        .edges()
        .map(|(v, w)| distance_point_to_segment(pt, v, w))
        .fold(f64::INFINITY, |min, d| if d < min { d } else { min })
}
