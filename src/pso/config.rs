//! PSO configuration.

use crate::convergence::DEFAULT_STAGNATION_WINDOW;
use crate::error::ConfigError;
use crate::space::Bounds;

/// Configuration for Particle Swarm Optimization.
///
/// ```
/// use u_opcount::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(100)
///     .with_iterations(200)
///     .with_inertia(0.5)
///     .with_coefficients(2.0, 2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Interval applied to both coordinates of every particle.
    pub bounds: Bounds,

    /// Number of particles.
    pub swarm_size: usize,

    /// Number of iterations. The loop always runs all of them.
    pub iterations: usize,

    /// Inertia weight: fraction of the previous velocity retained.
    pub w: f64,

    /// Cognitive coefficient: pull toward the particle's own best.
    pub c1: f64,

    /// Social coefficient: pull toward the swarm's best.
    pub c2: f64,

    /// Iterations without improvement before the convergence snapshot is taken.
    pub stagnation_window: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            swarm_size: 50,
            iterations: 100,
            w: 0.5,
            c1: 1.5,
            c2: 1.5,
            stagnation_window: DEFAULT_STAGNATION_WINDOW,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Settings used for the single-run GA/PSO comparison.
    ///
    /// - Swarm: 100, Iterations: 200
    /// - w = 0.5, c1 = c2 = 2.0
    pub fn reference() -> Self {
        Self {
            swarm_size: 100,
            iterations: 200,
            w: 0.5,
            c1: 2.0,
            c2: 2.0,
            ..Self::default()
        }
    }

    /// Sets the search bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the number of particles.
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the inertia weight.
    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    /// Sets the stagnation window.
    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        if self.swarm_size == 0 {
            return Err(ConfigError::SwarmSize);
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations { what: "iterations" });
        }
        for (name, value) in [("w", self.w), ("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() {
                return Err(ConfigError::Coefficient { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert_eq!(config.swarm_size, 50);
        assert_eq!(config.iterations, 100);
        assert!((config.w - 0.5).abs() < 1e-10);
        assert!((config.c1 - 1.5).abs() < 1e-10);
        assert!((config.c2 - 1.5).abs() < 1e-10);
        assert_eq!(config.stagnation_window, 20);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_preset() {
        let config = PsoConfig::reference();
        assert_eq!(config.swarm_size, 100);
        assert_eq!(config.iterations, 200);
        assert!((config.c1 - 2.0).abs() < 1e-10);
        assert!((config.c2 - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PsoConfig::default()
            .with_swarm_size(12)
            .with_iterations(30)
            .with_inertia(0.4)
            .with_coefficients(2.5, 1.5)
            .with_stagnation_window(5)
            .with_seed(3);
        assert_eq!(config.swarm_size, 12);
        assert_eq!(config.iterations, 30);
        assert!((config.w - 0.4).abs() < 1e-10);
        assert!((config.c1 - 2.5).abs() < 1e-10);
        assert!((config.c2 - 1.5).abs() < 1e-10);
        assert_eq!(config.stagnation_window, 5);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_validate_empty_swarm() {
        let config = PsoConfig::default().with_swarm_size(0);
        assert_eq!(config.validate(), Err(ConfigError::SwarmSize));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = PsoConfig::default().with_iterations(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroIterations { what: "iterations" })
        );
    }

    #[test]
    fn test_validate_non_finite_coefficient() {
        let config = PsoConfig::default().with_coefficients(f64::NAN, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Coefficient { name: "c1", .. })
        ));
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = PsoConfig::default();
        config.bounds = Bounds { min: 1.0, max: 0.0 };
        assert!(config.validate().is_err());
    }
}
