//! Placement checking and constrained random placement inside an extruded polygon
//!
//! A footprint polygon extruded to a fixed height forms a prism. Two fixed
//! sources and any number of movable points live inside it, and must keep
//! fixed clearances from the walls, floor and ceiling and from each other.
//! This crate checks those rules and places new points by bounded rejection
//! sampling.
//!
//! # Quick Start
//!
//! ```rust
//! use prism_placement::*;
//!
//! let footprint = Polygon::from_xy(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)]);
//! let mut scene = Scene::new(
//!     footprint,
//!     2.0,
//!     [DVec3::new(1.0, 1.0, 1.0), DVec3::new(4.0, 2.0, 1.0)],
//! );
//! assert!(scene.validate());
//!
//! let config = GeneratorConfigBuilder::new().seed(42).build().unwrap();
//! let report = scene.generate_micros(&config);
//! if report.needs_warning() {
//!     println!("only {} points could be placed", report.placed);
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for scenes, points and configuration

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod point;
pub mod validation;
pub mod generation;
pub mod scene;

// Re-export core types for convenience
pub use error::{PlacementError, Result};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use geometry::{
    distance3, distance_point_to_segment, min_edge_distance, point_in_polygon, polygon_area,
    Polygon,
};
pub use point::{PointRole, ScenePoint};
pub use validation::{validate, validate_report, Rule, ValidationReport, Violation};
pub use generation::{
    generate, generate_with_options, Generation, GenerationOptions, GenerationReport,
    PartialPolicy,
};
pub use scene::Scene;

// Re-export glam's f64 vectors for convenience
pub use glam::{DVec2, DVec3};
