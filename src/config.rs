//! Generator Configuration and Builder
//!
//! This module provides the configuration for reproducible point generation.
//! The placement thresholds themselves are fixed domain constants (see
//! [`crate::validation`]) and are not part of the configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};
use crate::generation::{GenerationOptions, PartialPolicy};

/// Upper bound accepted for the attempt budget
pub const MAX_ATTEMPT_BUDGET: usize = 1_000_000;

/// Configuration for a reproducible generation run
///
/// The same seed, scene and options always produce the same points.
///
/// # Example
///
/// ```rust
/// use prism_placement::*;
///
/// let config = GeneratorConfigBuilder::new()
///     .seed(42)
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: GeneratorConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Seed for the ChaCha8 random source
    pub seed: u64,

    /// Target count, attempt budget and partial-result policy
    pub options: GenerationOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            options: GenerationOptions::default(),
        }
    }
}

/// Builder for creating GeneratorConfig with validation
///
/// # Example
///
/// ```rust
/// use prism_placement::*;
///
/// // Use defaults: 5 points, 1000 attempts, keep partial results
/// let config = GeneratorConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = GeneratorConfigBuilder::new()
///     .seed(12345)
///     .target_count(8)
///     .unwrap()
///     .max_attempts(5000)
///     .unwrap()
///     .partial_policy(PartialPolicy::Rollback)
///     .build()
///     .unwrap();
/// assert_eq!(config.options.target_count, 8);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    seed: Option<u64>,
    options: GenerationOptions,
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - target_count: 5
    /// - max_attempts: 1000, shared by all points
    /// - partial_policy: Keep
    pub fn new() -> Self {
        Self {
            seed: None,
            options: GenerationOptions::default(),
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set how many points a run tries to place
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0
    pub fn target_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(PlacementError::InvalidConfig(
                "target count must be at least 1".to_string(),
            ));
        }
        self.options.target_count = count;
        Ok(self)
    }

    /// Set the attempt budget shared by all points of a run
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if attempts is 0 or above [`MAX_ATTEMPT_BUDGET`]
    pub fn max_attempts(mut self, attempts: usize) -> Result<Self> {
        if attempts == 0 || attempts > MAX_ATTEMPT_BUDGET {
            return Err(PlacementError::InvalidConfig(format!(
                "attempt budget must be in 1..={} (got {})",
                MAX_ATTEMPT_BUDGET, attempts
            )));
        }
        self.options.max_attempts = attempts;
        Ok(self)
    }

    /// Set what happens to accepted points when a run falls short
    pub fn partial_policy(mut self, policy: PartialPolicy) -> Self {
        self.options.partial_policy = policy;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<GeneratorConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(GeneratorConfig {
            seed,
            options: self.options,
        })
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = GeneratorConfigBuilder::new().build().unwrap();
        assert_eq!(config.options.target_count, 5);
        assert_eq!(config.options.max_attempts, 1000);
        assert_eq!(config.options.partial_policy, PartialPolicy::Keep);
    }

    #[test]
    fn test_builder_custom() {
        let config = GeneratorConfigBuilder::new()
            .seed(42)
            .target_count(3)
            .unwrap()
            .max_attempts(250)
            .unwrap()
            .partial_policy(PartialPolicy::Rollback)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.options.target_count, 3);
        assert_eq!(config.options.max_attempts, 250);
        assert_eq!(config.options.partial_policy, PartialPolicy::Rollback);
    }

    #[test]
    fn test_builder_zero_target() {
        let result = GeneratorConfigBuilder::new().target_count(0);
        assert!(matches!(result, Err(PlacementError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_invalid_budget() {
        assert!(GeneratorConfigBuilder::new().max_attempts(0).is_err());
        assert!(GeneratorConfigBuilder::new()
            .max_attempts(MAX_ATTEMPT_BUDGET + 1)
            .is_err());
        assert!(GeneratorConfigBuilder::new()
            .max_attempts(MAX_ATTEMPT_BUDGET)
            .is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = GeneratorConfigBuilder::new()
            .seed(12345)
            .partial_policy(PartialPolicy::Rollback)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: GeneratorConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
