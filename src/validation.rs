//! Placement rules and the validation pass
//!
//! A pass evaluates every rule against every point and pair, then writes the
//! resulting `invalid` flag onto each point. Flags accumulate: a point is
//! invalid if it takes part in any violation. Rules, in evaluation order:
//!
//! 1. Per point: inside the footprint, at least [`BOUNDARY_CLEARANCE`] from
//!    its boundary, and z within [`VERTICAL_CLEARANCE`] of floor and ceiling.
//! 2. No two points share all three coordinates.
//! 3. The two sources are at least [`SOURCE_SEPARATION`] apart.
//! 4. Every source/micro pair is at least [`CROSS_GROUP_SEPARATION`] apart.
//! 5. Every micro/micro pair is at least [`MICRO_SEPARATION`] apart.
//!
//! The thresholds are fixed. Nothing here returns an error: degenerate input
//! (for instance a height of 1.0 or less) simply flags every point.

use glam::DVec3;
use tracing::{debug, trace};

use crate::geometry::{distance3, min_edge_distance, point_in_polygon, Polygon};
use crate::point::ScenePoint;
use crate::scene::Scene;

/// Minimum planar distance from a point to the footprint boundary
pub const BOUNDARY_CLEARANCE: f64 = 0.5;

/// Minimum distance from a point to the floor and to the ceiling
pub const VERTICAL_CLEARANCE: f64 = 0.5;

/// Minimum 3D distance between the two sources
pub const SOURCE_SEPARATION: f64 = 0.7;

/// Minimum 3D distance between a source and a micro point
pub const CROSS_GROUP_SEPARATION: f64 = 1.0;

/// Minimum 3D distance between two micro points
pub const MICRO_SEPARATION: f64 = 0.7;

/// A placement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Planar projection outside the footprint
    OutsideFootprint,
    /// Too close to the footprint boundary
    BoundaryClearance,
    /// Too close to the floor
    FloorClearance,
    /// Too close to the ceiling
    CeilingClearance,
    /// Two points at exactly the same coordinates
    Coincident,
    /// Sources too close to each other
    SourceSeparation,
    /// Source and micro point too close
    CrossGroupSeparation,
    /// Two micro points too close
    MicroSeparation,
}

/// One rule firing for one point or pair
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The rule that fired
    pub rule: Rule,
    /// Name of the (first) point involved
    pub first: String,
    /// Name of the second point for pairwise rules
    pub second: Option<String>,
    /// Measured 3D distance for separation rules
    pub distance: Option<f64>,
}

impl Violation {
    fn single(rule: Rule, point: &ScenePoint) -> Self {
        Self {
            rule,
            first: point.name.clone(),
            second: None,
            distance: None,
        }
    }

    fn pair(rule: Rule, a: &ScenePoint, b: &ScenePoint, distance: Option<f64>) -> Self {
        Self {
            rule,
            first: a.name.clone(),
            second: Some(b.name.clone()),
            distance,
        }
    }

    /// Check if the named point takes part in this violation
    pub fn involves(&self, name: &str) -> bool {
        self.first == name || self.second.as_deref() == Some(name)
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Every rule firing, in evaluation order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no rule fired
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations the named point takes part in
    pub fn violations_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.involves(name))
    }
}

/// First per-point rule broken by `position`, if any
///
/// Checks, in order: containment of the planar projection, boundary
/// clearance, floor clearance, ceiling clearance.
pub fn placement_fault(position: DVec3, polygon: &Polygon, height: f64) -> Option<Rule> {
    let xy = position.truncate();
    if !point_in_polygon(xy, polygon) {
        Some(Rule::OutsideFootprint)
    } else if min_edge_distance(xy, polygon) < BOUNDARY_CLEARANCE {
        Some(Rule::BoundaryClearance)
    } else if position.z < VERTICAL_CLEARANCE {
        Some(Rule::FloorClearance)
    } else if position.z > height - VERTICAL_CLEARANCE {
        Some(Rule::CeilingClearance)
    } else {
        None
    }
}

/// Check if `position` satisfies every per-point rule
#[inline]
pub fn is_well_placed(position: DVec3, polygon: &Polygon, height: f64) -> bool {
    placement_fault(position, polygon, height).is_none()
}

/// Exact coordinate equality on all three axes
#[inline]
pub fn coincident(a: DVec3, b: DVec3) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}

/// Distance between `a` and `b` if it is below `min`, otherwise `None`
#[inline]
pub fn separation_shortfall(a: DVec3, b: DVec3, min: f64) -> Option<f64> {
    let d = distance3(a, b);
    (d < min).then_some(d)
}

/// Evaluate every rule without touching the points
///
/// Returns one flag per point (sources first, then micros) and the list of
/// violations. Only the first two entries of `sources` take part in the
/// source separation rule.
pub fn evaluate(
    polygon: &Polygon,
    height: f64,
    sources: &[ScenePoint],
    micros: &[ScenePoint],
) -> (Vec<bool>, Vec<Violation>) {
    let all: Vec<&ScenePoint> = sources.iter().chain(micros.iter()).collect();
    let source_count = sources.len();
    let mut flags = vec![false; all.len()];
    let mut violations = Vec::new();

    let mut record = |indices: &[usize], violation: Violation| {
        trace!(
            rule = ?violation.rule,
            first = %violation.first,
            second = ?violation.second,
            "violation"
        );
        for &i in indices {
            flags[i] = true;
        }
        violations.push(violation);
    };

    // Per-point placement
    for (i, p) in all.iter().enumerate() {
        if let Some(rule) = placement_fault(p.position, polygon, height) {
            record(&[i], Violation::single(rule, p));
        }
    }

    // Exact coincidence across all points
    for i in 0..all.len() {
        for j in i + 1..all.len() {
            if coincident(all[i].position, all[j].position) {
                record(
                    &[i, j],
                    Violation::pair(Rule::Coincident, all[i], all[j], None),
                );
            }
        }
    }

    // Source to source
    if source_count >= 2 {
        if let Some(d) =
            separation_shortfall(all[0].position, all[1].position, SOURCE_SEPARATION)
        {
            record(
                &[0, 1],
                Violation::pair(Rule::SourceSeparation, all[0], all[1], Some(d)),
            );
        }
    }

    // Source to micro
    for s in 0..source_count {
        for m in source_count..all.len() {
            if let Some(d) =
                separation_shortfall(all[s].position, all[m].position, CROSS_GROUP_SEPARATION)
            {
                record(
                    &[s, m],
                    Violation::pair(Rule::CrossGroupSeparation, all[s], all[m], Some(d)),
                );
            }
        }
    }

    // Micro to micro
    for i in source_count..all.len() {
        for j in i + 1..all.len() {
            if let Some(d) =
                separation_shortfall(all[i].position, all[j].position, MICRO_SEPARATION)
            {
                record(
                    &[i, j],
                    Violation::pair(Rule::MicroSeparation, all[i], all[j], Some(d)),
                );
            }
        }
    }

    (flags, violations)
}

/// Run a validation pass over the scene and return the full report
///
/// Every point's `invalid` flag is overwritten with the result of this pass.
pub fn validate_report(scene: &mut Scene) -> ValidationReport {
    let (flags, violations) =
        evaluate(scene.polygon(), scene.height(), scene.sources(), scene.micros());

    for (point, flag) in scene.points_mut().zip(flags) {
        point.set_invalid(flag);
    }

    debug!(
        points = scene.point_count(),
        violations = violations.len(),
        "validated scene"
    );

    ValidationReport { violations }
}

/// Run a validation pass over the scene
///
/// Returns `true` when no rule fired. Every point's `invalid` flag is
/// updated as a side effect.
///
/// # Example
///
/// ```
/// use prism_placement::{validate, Polygon, Scene};
/// use glam::DVec3;
///
/// let footprint = Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)]);
/// let mut scene = Scene::new(
///     footprint,
///     2.0,
///     [DVec3::new(1.0, 1.0, 1.0), DVec3::new(4.0, 2.0, 1.0)],
/// );
/// assert!(validate(&mut scene));
///
/// scene.set_point_position("F2", DVec3::new(1.3, 1.0, 1.0)).unwrap();
/// assert!(!validate(&mut scene));
/// assert!(scene.sources().iter().all(|s| s.is_invalid()));
/// ```
pub fn validate(scene: &mut Scene) -> bool {
    validate_report(scene).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rectangle() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)])
    }

    fn scene() -> Scene {
        Scene::new(
            rectangle(),
            2.0,
            [DVec3::new(1.0, 1.0, 1.0), DVec3::new(4.0, 2.0, 1.0)],
        )
    }

    fn flags(scene: &Scene) -> Vec<bool> {
        scene.points().map(|p| p.is_invalid()).collect()
    }

    #[test]
    fn test_valid_sources() {
        let mut scene = scene();
        assert!(validate(&mut scene));
        assert_eq!(flags(&scene), vec![false, false]);
    }

    #[test]
    fn test_sources_too_close() {
        let mut scene = scene();
        scene.set_point_position("F2", DVec3::new(1.3, 1.0, 1.0)).unwrap();

        let report = validate_report(&mut scene);
        assert!(!report.is_valid());
        assert_eq!(flags(&scene), vec![true, true]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::SourceSeparation);
        let d = report.violations[0].distance.unwrap();
        assert!((d - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_source_on_boundary() {
        // (4, 3) sits on the top edge: outside by tie-breaking
        let mut scene = Scene::new(
            rectangle(),
            2.0,
            [DVec3::new(1.0, 1.0, 1.0), DVec3::new(4.0, 3.0, 1.0)],
        );
        let report = validate_report(&mut scene);
        assert_eq!(flags(&scene), vec![false, true]);
        assert_eq!(report.violations[0].rule, Rule::OutsideFootprint);
    }

    #[test]
    fn test_placement_fault_order() {
        let rect = rectangle();
        let fault = |x, y, z| placement_fault(DVec3::new(x, y, z), &rect, 2.0);
        assert_eq!(fault(6.0, 1.0, 1.0), Some(Rule::OutsideFootprint));
        assert_eq!(fault(2.5, 0.3, 1.0), Some(Rule::BoundaryClearance));
        assert_eq!(fault(2.5, 1.5, 0.4), Some(Rule::FloorClearance));
        assert_eq!(fault(2.5, 1.5, 1.6), Some(Rule::CeilingClearance));
        assert_eq!(fault(2.5, 1.5, 1.0), None);
    }

    #[test]
    fn test_clearance_thresholds_are_inclusive() {
        let rect = rectangle();
        assert!(is_well_placed(DVec3::new(0.5, 0.5, 0.5), &rect, 2.0));
        assert!(is_well_placed(DVec3::new(4.5, 2.5, 1.5), &rect, 2.0));
    }

    #[test]
    fn test_low_ceiling_flags_everything() {
        let mut scene = scene();
        scene.set_height(1.0);
        assert!(!validate(&mut scene));
        assert_eq!(flags(&scene), vec![true, true]);
    }

    #[test]
    fn test_coincident_micros() {
        let mut scene = scene();
        scene.add_micro(DVec3::new(2.5, 1.5, 1.0));
        scene.add_micro(DVec3::new(2.5, 1.5, 1.0));

        let report = validate_report(&mut scene);
        assert_eq!(flags(&scene), vec![false, false, true, true]);
        let rules: Vec<Rule> = report.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec![Rule::Coincident, Rule::MicroSeparation]);
    }

    #[test]
    fn test_cross_group_separation() {
        let mut scene = scene();
        // 0.9 from F1, far from F2
        scene.add_micro(DVec3::new(1.9, 1.0, 1.0));

        let report = validate_report(&mut scene);
        assert_eq!(flags(&scene), vec![true, false, true]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::CrossGroupSeparation);
        assert!(report.violations[0].involves("F1"));
        assert!(report.violations[0].involves("P1"));
    }

    #[test]
    fn test_micro_separation() {
        let mut scene = scene();
        scene.add_micro(DVec3::new(2.5, 1.0, 1.0));
        scene.add_micro(DVec3::new(2.5, 1.6, 1.0));
        scene.add_micro(DVec3::new(2.5, 2.5, 1.0));

        let report = validate_report(&mut scene);
        assert_eq!(flags(&scene), vec![false, false, true, true, false]);
        assert_eq!(report.violations_for("P2").count(), 1);
        assert_eq!(report.violations_for("P3").count(), 0);
    }

    #[test]
    fn test_flags_accumulate_across_rules() {
        let mut scene = scene();
        // Near the boundary and too close to F1
        scene.add_micro(DVec3::new(1.0, 0.2, 1.0));

        let report = validate_report(&mut scene);
        assert_eq!(report.violations_for("P1").count(), 2);
        assert_eq!(flags(&scene), vec![true, false, true]);
    }

    #[test]
    fn test_flags_reset_between_passes() {
        let mut scene = scene();
        scene.set_point_position("F2", DVec3::new(1.3, 1.0, 1.0)).unwrap();
        assert!(!validate(&mut scene));

        scene.set_point_position("F2", DVec3::new(4.0, 2.0, 1.0)).unwrap();
        assert!(validate(&mut scene));
        assert_eq!(flags(&scene), vec![false, false]);
    }

    #[test]
    fn test_nan_position_is_flagged() {
        let mut scene = scene();
        scene.add_micro(DVec3::new(f64::NAN, 1.5, 1.0));
        assert!(!validate(&mut scene));
        assert!(scene.micros()[0].is_invalid());
    }

    proptest! {
        #[test]
        fn prop_validation_is_idempotent(
            coords in proptest::collection::vec((-1.0f64..6.0, -1.0f64..4.0, 0.0f64..2.5), 0..8),
        ) {
            let mut scene = scene();
            for (x, y, z) in coords {
                scene.add_micro(DVec3::new(x, y, z));
            }

            let first = validate_report(&mut scene);
            let first_flags = flags(&scene);
            let second = validate_report(&mut scene);

            prop_assert_eq!(first, second);
            prop_assert_eq!(first_flags, flags(&scene));
        }
    }
}
