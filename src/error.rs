//! Error types for scene editing and generator configuration
//!
//! Geometry, validation and generation never fail; only editing a scene
//! and building a configuration can.

use thiserror::Error;

/// Errors that can occur while configuring the generator or editing a scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Removing a vertex would leave the footprint below its minimum size
    #[error("footprint needs at least {min} vertices")]
    TooFewVertices { min: usize },

    /// Vertex index past the end of the footprint
    #[error("vertex {index} out of range (footprint has {len} vertices)")]
    VertexOutOfRange { index: usize, len: usize },

    /// No point with the given name exists in the scene
    #[error("point not found: {0}")]
    PointNotFound(String),

    /// The named point exists but is a fixed source, not a movable point
    #[error("point {0} is a source and cannot be removed")]
    NotAMicro(String),
}

/// Result type alias for placement operations
pub type Result<T> = std::result::Result<T, PlacementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlacementError::TooFewVertices { min: 4 }.to_string(),
            "footprint needs at least 4 vertices"
        );
        assert_eq!(
            PlacementError::PointNotFound("P9".into()).to_string(),
            "point not found: P9"
        );
        assert_eq!(
            PlacementError::VertexOutOfRange { index: 7, len: 4 }.to_string(),
            "vertex 7 out of range (footprint has 4 vertices)"
        );
    }
}
