//! Geometry kernel
//!
//! Pure functions over planar footprints and 3D points: containment,
//! boundary distance, Euclidean distance and area. Nothing here holds state.

mod distance;
mod polygon;

pub use distance::{distance3, distance_point_to_segment, min_edge_distance};
pub use polygon::Polygon;

use glam::DVec2;

/// Even-odd ray-casting containment test
///
/// Casts a horizontal ray from `pt` and counts edge crossings. For each edge
/// `(v[i], v[(i + 1) % n])` a crossing is counted when
/// `(y_i > y) != (y_j > y)` and `x < (x_j - x_i) * (y - y_i) / (y_j - y_i) + x_i`.
/// The strict/non-strict mix fixes how points on edges and vertices resolve,
/// so boundary results are deterministic. Horizontal edges never reach the
/// division because the first condition is already false for them.
///
/// # Example
///
/// ```
/// use prism_placement::geometry::{point_in_polygon, Polygon};
/// use glam::DVec2;
///
/// let rect = Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)]);
/// assert!(point_in_polygon(DVec2::new(2.5, 1.5), &rect));
/// assert!(!point_in_polygon(DVec2::new(6.0, 1.0), &rect));
/// ```
pub fn point_in_polygon(pt: DVec2, polygon: &Polygon) -> bool {
    let mut inside = false;

    for (vi, vj) in polygon.edges() {
        if ((vi.y > pt.y) != (vj.y > pt.y))
            && (pt.x < (vj.x - vi.x) * (pt.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
    }

    inside
}

/// Unsigned polygon area via the shoelace formula
///
/// Clockwise and counter-clockwise orderings give the same, non-negative
/// result.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let twice_signed: f64 = polygon.edges().map(|(a, b)| a.perp_dot(b)).sum();
    (twice_signed / 2.0).abs()
}

/// Axis-aligned bounds of the footprint as `(min, max)`
pub fn polygon_bounds(polygon: &Polygon) -> Option<(DVec2, DVec2)> {
    let first = *polygon.vertices().first()?;
    Some(
        polygon
            .vertices()
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}
