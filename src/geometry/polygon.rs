//! Footprint polygon
//!
//! The 2D base of the extruded volume. Vertices are stored in order and the
//! polygon is implicitly closed (the last vertex connects back to the first).

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{min_edge_distance, point_in_polygon, polygon_area, polygon_bounds};

/// Ordered, implicitly closed vertex sequence in meters
///
/// The polygon is expected to be simple (non-self-intersecting) and to have
/// at least four vertices. Neither is checked here: geometry queries on a
/// malformed footprint still return a value, it is just not meaningful.
///
/// # Example
///
/// ```
/// use prism_placement::Polygon;
/// use glam::DVec2;
///
/// let footprint = Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)]);
/// assert!(footprint.contains(DVec2::new(2.5, 1.5)));
/// assert_eq!(footprint.area(), 15.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<DVec2>,
}

impl Polygon {
    /// Create a polygon from an ordered vertex list
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// Create a polygon from `(x, y)` pairs
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    /// Vertices in order
    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    #[inline]
    pub(crate) fn vertices_mut(&mut self) -> &mut Vec<DVec2> {
        &mut self.vertices
    }

    /// Number of vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the polygon has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over edges `(v[i], v[(i + 1) % n])`, wrap-around edge included
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd containment test for a planar point
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point_in_polygon(point, self)
    }

    /// Distance from `point` to the nearest edge
    #[inline]
    pub fn min_edge_distance(&self, point: DVec2) -> f64 {
        min_edge_distance(point, self)
    }

    /// Unsigned area (shoelace formula)
    #[inline]
    pub fn area(&self) -> f64 {
        polygon_area(self)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty polygon
    #[inline]
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        polygon_bounds(self)
    }
}

impl From<Vec<DVec2>> for Polygon {
    fn from(vertices: Vec<DVec2>) -> Self {
        Self::new(vertices)
    }
}
