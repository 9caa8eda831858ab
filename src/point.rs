//! Labeled points inside the prism
//!
//! Each point carries a unique name, an explicit role and a validity flag
//! that only the validator writes.

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name prefix for fixed sources (`F1`, `F2`)
pub const SOURCE_PREFIX: &str = "F";

/// Name prefix for generated and manually added points (`P1`, `P2`, ...)
pub const GENERATED_PREFIX: &str = "P";

/// Role of a point in the scene
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    /// One of the two fixed sources
    Source,
    /// A generated or manually placed movable point
    Generated,
}

impl PointRole {
    /// Naming prefix used for points of this role
    pub fn prefix(self) -> &'static str {
        match self {
            PointRole::Source => SOURCE_PREFIX,
            PointRole::Generated => GENERATED_PREFIX,
        }
    }
}

/// A labeled 3D point in the scene
///
/// `invalid` is a derived annotation: it is recomputed by every validation
/// pass and is not part of the point's identity.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePoint {
    /// Unique name within the scene
    pub name: String,

    /// Fixed source or movable point
    pub role: PointRole,

    /// Position in meters; z is measured from the floor of the prism
    pub position: DVec3,

    invalid: bool,
}

impl ScenePoint {
    /// Create a point that has not been validated yet
    pub fn new(name: impl Into<String>, role: PointRole, position: DVec3) -> Self {
        Self {
            name: name.into(),
            role,
            position,
            invalid: false,
        }
    }

    /// Create a source point
    pub fn source(name: impl Into<String>, position: DVec3) -> Self {
        Self::new(name, PointRole::Source, position)
    }

    /// Create a generated (movable) point
    pub fn generated(name: impl Into<String>, position: DVec3) -> Self {
        Self::new(name, PointRole::Generated, position)
    }

    /// Name for the `index`-th point of a role, counting from 1
    pub fn sequential_name(role: PointRole, index: usize) -> String {
        format!("{}{}", role.prefix(), index)
    }

    /// Whether the last validation pass flagged this point
    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    #[inline]
    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Check if this is one of the fixed sources
    #[inline]
    pub fn is_source(&self) -> bool {
        self.role == PointRole::Source
    }

    /// Planar projection (z dropped)
    #[inline]
    pub fn xy(&self) -> DVec2 {
        self.position.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names() {
        assert_eq!(ScenePoint::sequential_name(PointRole::Source, 2), "F2");
        assert_eq!(ScenePoint::sequential_name(PointRole::Generated, 5), "P5");
    }

    #[test]
    fn test_new_point_is_not_flagged() {
        let p = ScenePoint::generated("P1", DVec3::new(1.0, 2.0, 3.0));
        assert!(!p.is_invalid());
        assert!(!p.is_source());
        assert_eq!(p.xy(), DVec2::new(1.0, 2.0));
    }

    #[test]
    fn test_role_is_explicit() {
        // A movable point named like a source keeps its role
        let p = ScenePoint::generated("F9", DVec3::ZERO);
        assert_eq!(p.role, PointRole::Generated);
    }
}
