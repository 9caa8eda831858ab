//! Scene: footprint, height and the labeled points inside the prism

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{PlacementError, Result};
use crate::generation::{
    generate_with_options, round_to_tenth, GenerationOptions, GenerationReport,
};
use crate::geometry::Polygon;
use crate::point::{PointRole, ScenePoint};
use crate::validation::{self, ValidationReport};

/// Fewest vertices a footprint may be edited down to
pub const MIN_VERTICES: usize = 4;

/// Planar radius within which a pointer grabs a point, in meters
pub const PICK_RADIUS: f64 = 0.2;

/// A footprint extruded to a fixed height, with two fixed sources and any
/// number of movable (micro) points
///
/// The scene is the single mutable aggregate of the system. Geometry and
/// validation only read it, apart from the validator writing each point's
/// `invalid` flag; coordinates change through the editing methods and the
/// generator.
///
/// Every method that changes the footprint, the height or a point ends with
/// a validation pass, so the `invalid` flags always describe the current
/// state. [`Scene::is_valid`] reads them without revalidating.
///
/// # Example
///
/// ```
/// use prism_placement::*;
///
/// let mut scene = Scene::default();
/// scene.set_point_position("F2", DVec3::new(4.0, 2.0, 1.0)).unwrap();
///
/// let config = GeneratorConfigBuilder::new().seed(7).build().unwrap();
/// let report = scene.generate_micros(&config);
/// println!("placed {} points in {} attempts", report.placed, report.attempts);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    polygon: Polygon,
    height: f64,
    sources: [ScenePoint; 2],
    micros: Vec<ScenePoint>,
}

impl Default for Scene {
    /// 5 m × 3 m rectangle, 2 m high, sources `F1` at (1, 1, 1) and `F2` at (4, 3, 1)
    fn default() -> Self {
        Self::new(
            Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)]),
            2.0,
            [DVec3::new(1.0, 1.0, 1.0), DVec3::new(4.0, 3.0, 1.0)],
        )
    }
}

impl Scene {
    /// Create a scene with sources `F1` and `F2` at the given positions and no micros
    ///
    /// Neither the footprint nor the height is checked; an unusable prism
    /// just flags every point invalid. The new scene is already validated.
    pub fn new(polygon: Polygon, height: f64, sources: [DVec3; 2]) -> Self {
        let [f1, f2] = sources;
        let mut scene = Self {
            polygon,
            height,
            sources: [
                ScenePoint::source(ScenePoint::sequential_name(PointRole::Source, 1), f1),
                ScenePoint::source(ScenePoint::sequential_name(PointRole::Source, 2), f2),
            ],
            micros: Vec::new(),
        };
        scene.validate();
        scene
    }

    /// The footprint
    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Extrusion height in meters
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The two fixed sources
    #[inline]
    pub fn sources(&self) -> &[ScenePoint] {
        &self.sources
    }

    /// Movable points, in insertion order
    #[inline]
    pub fn micros(&self) -> &[ScenePoint] {
        &self.micros
    }

    /// All points: sources first, then micros
    pub fn points(&self) -> impl Iterator<Item = &ScenePoint> {
        self.sources.iter().chain(self.micros.iter())
    }

    pub(crate) fn points_mut(&mut self) -> impl Iterator<Item = &mut ScenePoint> {
        self.sources.iter_mut().chain(self.micros.iter_mut())
    }

    /// Total number of points
    #[inline]
    pub fn point_count(&self) -> usize {
        self.sources.len() + self.micros.len()
    }

    /// Check whether no point is flagged, as of the last validation pass
    pub fn is_valid(&self) -> bool {
        self.points().all(|p| !p.is_invalid())
    }

    /// Look up a point by name
    pub fn point(&self, name: &str) -> Option<&ScenePoint> {
        self.points().find(|p| p.name == name)
    }

    fn point_mut(&mut self, name: &str) -> Result<&mut ScenePoint> {
        self.points_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| PlacementError::PointNotFound(name.to_string()))
    }

    /// Footprint area in square meters
    #[inline]
    pub fn surface_area(&self) -> f64 {
        self.polygon.area()
    }

    /// Prism volume in cubic meters (area × height)
    #[inline]
    pub fn volume(&self) -> f64 {
        self.surface_area() * self.height
    }

    /// Move a footprint vertex, then revalidate
    ///
    /// # Errors
    ///
    /// Returns `VertexOutOfRange` if `index` is past the last vertex
    pub fn set_vertex(&mut self, index: usize, position: DVec2) -> Result<()> {
        let len = self.polygon.len();
        let vertex = self
            .polygon
            .vertices_mut()
            .get_mut(index)
            .ok_or(PlacementError::VertexOutOfRange { index, len })?;
        *vertex = position;
        self.validate();
        Ok(())
    }

    /// Append a vertex to the footprint, then revalidate
    pub fn push_vertex(&mut self, position: DVec2) {
        self.polygon.vertices_mut().push(position);
        self.validate();
    }

    /// Remove the last footprint vertex, then revalidate
    ///
    /// # Errors
    ///
    /// Returns `TooFewVertices` if the footprint already has [`MIN_VERTICES`]
    /// or fewer vertices
    pub fn remove_last_vertex(&mut self) -> Result<DVec2> {
        if self.polygon.len() <= MIN_VERTICES {
            return Err(PlacementError::TooFewVertices { min: MIN_VERTICES });
        }
        let removed = self
            .polygon
            .vertices_mut()
            .pop()
            .ok_or(PlacementError::TooFewVertices { min: MIN_VERTICES })?;
        self.validate();
        Ok(removed)
    }

    /// Set the extrusion height, then revalidate
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.validate();
    }

    /// Move a source or micro point, then revalidate
    ///
    /// The position is stored as given, without rounding.
    ///
    /// # Errors
    ///
    /// Returns `PointNotFound` if no point has this name
    pub fn set_point_position(&mut self, name: &str, position: DVec3) -> Result<()> {
        self.point_mut(name)?.position = position;
        self.validate();
        Ok(())
    }

    /// Add a movable point, revalidate, and return its name
    ///
    /// The name is the lowest `P<n>` not already taken.
    pub fn add_micro(&mut self, position: DVec3) -> String {
        let name = (1..)
            .map(|i| ScenePoint::sequential_name(PointRole::Generated, i))
            .find(|candidate| self.point(candidate).is_none())
            .unwrap_or_default();
        self.micros.push(ScenePoint::generated(name.clone(), position));
        self.validate();
        name
    }

    /// Remove a movable point by name, then revalidate
    ///
    /// # Errors
    ///
    /// Returns `NotAMicro` for a source name and `PointNotFound` if no point
    /// has this name
    pub fn remove_micro(&mut self, name: &str) -> Result<ScenePoint> {
        if self.sources.iter().any(|s| s.name == name) {
            return Err(PlacementError::NotAMicro(name.to_string()));
        }
        let index = self
            .micros
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| PlacementError::PointNotFound(name.to_string()))?;
        let removed = self.micros.remove(index);
        self.validate();
        Ok(removed)
    }

    /// Remove every movable point, then revalidate
    pub fn clear_micros(&mut self) {
        self.micros.clear();
        self.validate();
    }

    /// Replace the movable points wholesale, then revalidate
    pub fn replace_micros(&mut self, micros: Vec<ScenePoint>) {
        self.micros = micros;
        self.validate();
    }

    /// First point whose planar position is within `radius` of `at`
    ///
    /// Sources are searched before micros.
    pub fn pick_point(&self, at: DVec2, radius: f64) -> Option<&ScenePoint> {
        self.points().find(|p| p.xy().distance(at) < radius)
    }

    /// Drag a point to a new planar position and revalidate
    ///
    /// The coordinates are rounded to one decimal place with
    /// [`round_to_tenth`](crate::generation::round_to_tenth), which rounds the
    /// stored binary value: `1.15` becomes `1.1` because it is held as
    /// `1.1499...`. z is left unchanged. Returns the overall validity after
    /// the move.
    ///
    /// # Errors
    ///
    /// Returns `PointNotFound` if no point has this name
    pub fn move_point_2d(&mut self, name: &str, to: DVec2) -> Result<bool> {
        let point = self.point_mut(name)?;
        point.position.x = round_to_tenth(to.x);
        point.position.y = round_to_tenth(to.y);
        Ok(self.validate())
    }

    /// Run a validation pass; see [`validation::validate`]
    pub fn validate(&mut self) -> bool {
        validation::validate(self)
    }

    /// Run a validation pass and return every violation; see
    /// [`validation::validate_report`]
    pub fn validate_report(&mut self) -> ValidationReport {
        validation::validate_report(self)
    }

    /// Replace the micros with freshly generated ones, then revalidate
    ///
    /// The random source is a ChaCha8 generator seeded from `config.seed`,
    /// so the same scene and configuration always give the same points.
    pub fn generate_micros(&mut self, config: &GeneratorConfig) -> GenerationReport {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        self.generate_micros_with(&config.options, &mut rng)
    }

    /// Replace the micros using an explicit random source, then revalidate
    pub fn generate_micros_with<R: Rng + ?Sized>(
        &mut self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> GenerationReport {
        let generation =
            generate_with_options(&self.polygon, self.height, &self.sources, options, rng);
        let placed = generation.points.len();
        let attempts = generation.attempts;
        let success = generation.success;

        self.micros = generation.points;
        let scene_valid = self.validate();

        debug!(placed, attempts, success, scene_valid, "installed generated points");

        GenerationReport {
            placed,
            attempts,
            success,
            scene_valid,
        }
    }
}
