//! Constrained random placement of movable points
//!
//! Bounded rejection sampling: candidates are drawn from the footprint's
//! shrunk bounding box and rejected against the same predicates the
//! validator uses, until the target count is reached or the attempt budget
//! (shared across all targets) runs out.

mod sampling;

pub use sampling::{round_to_tenth, SamplingBox};

use glam::DVec3;
use rand::Rng;
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;
use crate::point::{PointRole, ScenePoint};
use crate::validation::{
    coincident, is_well_placed, separation_shortfall, CROSS_GROUP_SEPARATION, MICRO_SEPARATION,
};

/// Number of points a generation run aims to place
pub const DEFAULT_TARGET_COUNT: usize = 5;

/// Attempts shared by all points of one run
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// What to do with accepted points when the target is not reached
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialPolicy {
    /// Return whatever was accepted
    #[default]
    Keep,
    /// Return no points at all
    Rollback,
}

/// Options for a generation run
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Points to place
    pub target_count: usize,
    /// Total candidate draws allowed for the whole run
    pub max_attempts: usize,
    /// Handling of a run that ends short of `target_count`
    pub partial_policy: PartialPolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            partial_policy: PartialPolicy::Keep,
        }
    }
}

/// Result of a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Accepted points, named `P1`, `P2`, ... in acceptance order
    pub points: Vec<ScenePoint>,
    /// True when the target count was reached
    pub success: bool,
    /// Candidate draws consumed
    pub attempts: usize,
}

/// Summary of generating into a scene and revalidating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Points installed in the scene
    pub placed: usize,
    /// Candidate draws consumed
    pub attempts: usize,
    /// True when the target count was reached
    pub success: bool,
    /// Result of the validation pass that followed
    pub scene_valid: bool,
}

impl GenerationReport {
    /// The caller should surface a warning
    #[inline]
    pub fn needs_warning(&self) -> bool {
        !(self.success && self.scene_valid)
    }
}

/// Why a candidate was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Placement,
    NearSource,
    NearAccepted,
    Coincident,
}

fn reject_reason(
    candidate: DVec3,
    polygon: &Polygon,
    height: f64,
    sources: &[ScenePoint],
    accepted: &[ScenePoint],
) -> Option<Rejection> {
    if !is_well_placed(candidate, polygon, height) {
        return Some(Rejection::Placement);
    }
    if sources
        .iter()
        .any(|s| separation_shortfall(s.position, candidate, CROSS_GROUP_SEPARATION).is_some())
    {
        return Some(Rejection::NearSource);
    }
    if accepted
        .iter()
        .any(|m| separation_shortfall(m.position, candidate, MICRO_SEPARATION).is_some())
    {
        return Some(Rejection::NearAccepted);
    }
    if accepted
        .iter()
        .chain(sources.iter())
        .any(|p| coincident(p.position, candidate))
    {
        return Some(Rejection::Coincident);
    }
    None
}

/// Place up to five points with the default budget and policy
///
/// See [`generate_with_options`].
///
/// # Example
///
/// ```
/// use prism_placement::{generate, Polygon, ScenePoint};
/// use glam::DVec3;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let footprint = Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
/// let sources = [
///     ScenePoint::source("F1", DVec3::new(2.0, 2.0, 2.0)),
///     ScenePoint::source("F2", DVec3::new(8.0, 8.0, 2.0)),
/// ];
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let generation = generate(&footprint, 5.0, &sources, &mut rng);
/// assert!(generation.success);
/// assert_eq!(generation.points.len(), 5);
/// ```
pub fn generate<R: Rng + ?Sized>(
    polygon: &Polygon,
    height: f64,
    sources: &[ScenePoint],
    rng: &mut R,
) -> Generation {
    generate_with_options(polygon, height, sources, &GenerationOptions::default(), rng)
}

/// Place points inside the prism by bounded rejection sampling
///
/// # Algorithm
///
/// Each attempt draws one candidate from [`SamplingBox`] (coordinates
/// rounded to 0.1 m) and rejects it if any of these hold:
/// - it breaks a per-point rule (outside, boundary clearance, floor or
///   ceiling clearance)
/// - it is closer than [`CROSS_GROUP_SEPARATION`] to a source
/// - it is closer than [`MICRO_SEPARATION`] to a point accepted this run
/// - it coincides exactly with a source or an accepted point
///
/// Otherwise it is accepted under the next sequential name. The run stops
/// when `target_count` points are accepted or `max_attempts` candidates have
/// been drawn in total. A short run returns the accepted points under
/// [`PartialPolicy::Keep`] and none under [`PartialPolicy::Rollback`].
///
/// Accepted points satisfy every validation rule among themselves and
/// against `sources`.
pub fn generate_with_options<R: Rng + ?Sized>(
    polygon: &Polygon,
    height: f64,
    sources: &[ScenePoint],
    options: &GenerationOptions,
    rng: &mut R,
) -> Generation {
    let bbox = SamplingBox::new(polygon, height);
    if bbox.is_degenerate() {
        debug!(?bbox, "sampling box is degenerate");
    }

    let mut accepted: Vec<ScenePoint> = Vec::with_capacity(options.target_count);
    let mut attempts = 0;

    while accepted.len() < options.target_count && attempts < options.max_attempts {
        attempts += 1;
        let candidate = bbox.sample(rng);

        if let Some(reason) = reject_reason(candidate, polygon, height, sources, &accepted) {
            trace!(attempt = attempts, ?candidate, ?reason, "rejected candidate");
            continue;
        }

        let name = ScenePoint::sequential_name(PointRole::Generated, accepted.len() + 1);
        trace!(attempt = attempts, %name, ?candidate, "accepted candidate");
        accepted.push(ScenePoint::generated(name, candidate));
    }

    let success = accepted.len() == options.target_count;
    if success {
        debug!(placed = accepted.len(), attempts, "generation complete");
    } else {
        warn!(
            placed = accepted.len(),
            wanted = options.target_count,
            attempts,
            policy = ?options.partial_policy,
            "attempt budget exhausted"
        );
        if options.partial_policy == PartialPolicy::Rollback {
            accepted.clear();
        }
    }

    Generation {
        points: accepted,
        success,
        attempts,
    }
}
