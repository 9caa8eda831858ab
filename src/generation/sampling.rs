//! Candidate sampling for the point generator
//!
//! Candidates are drawn uniformly from an axis-aligned box shrunk inward from
//! the footprint bounds, with z drawn between the floor and ceiling
//! clearances. Every coordinate is rounded to one decimal place before the
//! candidate is checked against any rule.

use glam::{DVec2, DVec3};
use rand::Rng;

use crate::geometry::Polygon;
use crate::validation::{BOUNDARY_CLEARANCE, VERTICAL_CLEARANCE};

/// Round to one decimal place (0.1 m grid)
///
/// Rounds the exact binary value, the way a one-decimal fixed-point
/// formatter does: `1.15` is stored as `1.1499...` and becomes `1.1`, not
/// `1.2`. Exact ties (`x.25`, `x.75`) round away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        // x.25 and x.75 times ten are exact
        return (value * 10.0).round() / 10.0;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Region candidates are drawn from
///
/// The box may be degenerate (`min > max` on some axis) when the footprint
/// is narrower than twice the boundary clearance. Sampling still works in
/// that case, it just lands in the inverted interval, and every candidate
/// is later rejected by the clearance rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingBox {
    /// Lower corner of the planar sampling area
    pub min: DVec2,
    /// Upper corner of the planar sampling area
    pub max: DVec2,
    /// Lowest z drawn
    pub z_min: f64,
    /// Highest z drawn
    pub z_max: f64,
}

impl SamplingBox {
    /// Footprint bounds shrunk by the boundary clearance, z between the
    /// vertical clearances
    ///
    /// An empty footprint gives a box at the origin whose candidates all fall
    /// outside it.
    pub fn new(polygon: &Polygon, height: f64) -> Self {
        let (min, max) = polygon.bounds().unwrap_or((DVec2::ZERO, DVec2::ZERO));
        let inset = DVec2::splat(BOUNDARY_CLEARANCE);
        Self {
            min: min + inset,
            max: max - inset,
            z_min: VERTICAL_CLEARANCE,
            z_max: height - VERTICAL_CLEARANCE,
        }
    }

    /// Check if some planar axis is inverted
    pub fn is_degenerate(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Draw one rounded candidate: x, then y, then z
    ///
    /// Uses `min + u * (max - min)` with `u` in `[0, 1)` rather than a range
    /// distribution, so inverted or empty intervals never panic.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3 {
        let x = lerp(self.min.x, self.max.x, rng.gen::<f64>());
        let y = lerp(self.min.y, self.max.y, rng.gen::<f64>());
        let z = lerp(self.z_min, self.z_max, rng.gen::<f64>());
        DVec3::new(round_to_tenth(x), round_to_tenth(y), round_to_tenth(z))
    }
}

#[inline]
fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + t * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rectangle() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)])
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(1.26), 1.3);
        assert_eq!(round_to_tenth(1.04), 1.0);
        assert_eq!(round_to_tenth(-0.26), -0.3);
        assert_eq!(round_to_tenth(2.5), 2.5);
        assert!(round_to_tenth(f64::NAN).is_nan());
    }

    #[test]
    fn test_round_to_tenth_uses_stored_value_on_decimal_ties() {
        // 1.15 and 1.45 sit just below the tie in binary
        assert_eq!(round_to_tenth(1.15), 1.1);
        assert_eq!(round_to_tenth(1.45), 1.4);
        // 2.35 sits just above it
        assert_eq!(round_to_tenth(2.35), 2.4);
        // Exact ties go away from zero
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(-0.25), -0.3);
        assert_eq!(round_to_tenth(3.0), 3.0);
    }

    #[test]
    fn test_sampling_box_shrinks_inward() {
        let bbox = SamplingBox::new(&rectangle(), 2.0);
        assert_eq!(bbox.min, DVec2::new(0.5, 0.5));
        assert_eq!(bbox.max, DVec2::new(4.5, 2.5));
        assert_eq!(bbox.z_min, 0.5);
        assert_eq!(bbox.z_max, 1.5);
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_sampling_box_degenerate() {
        let narrow = Polygon::from_xy(&[(0.0, 0.0), (0.8, 0.0), (0.8, 5.0), (0.0, 5.0)]);
        let bbox = SamplingBox::new(&narrow, 2.0);
        assert!(bbox.is_degenerate());

        // Still samples, inside the inverted interval
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let c = bbox.sample(&mut rng);
            assert!((0.3..=0.5).contains(&c.x));
        }
    }

    #[test]
    fn test_samples_are_rounded_and_in_range() {
        let bbox = SamplingBox::new(&rectangle(), 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let c = bbox.sample(&mut rng);
            for v in [c.x, c.y, c.z] {
                assert_eq!(round_to_tenth(v), v);
            }
            assert!((0.5..=4.5).contains(&c.x));
            assert!((0.5..=2.5).contains(&c.y));
            assert!((0.5..=1.5).contains(&c.z));
        }
    }

    #[test]
    fn test_empty_polygon_box() {
        let bbox = SamplingBox::new(&Polygon::default(), 2.0);
        assert!(bbox.is_degenerate());
    }
}
