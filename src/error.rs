//! Configuration errors shared by both optimizers.
//!
//! Every precondition is checked once, at the start of a run, before the
//! evaluator is touched. A run that starts never fails midway.

use thiserror::Error;

/// An invalid optimizer configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// `min > max`, or either bound is not finite.
    #[error("invalid bounds: min {min} must be finite and <= max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// GA population must be positive and even (crossover works on pairs).
    #[error("population_size must be positive and even, got {0}")]
    PopulationSize(usize),

    /// PSO swarm must contain at least one particle.
    #[error("swarm_size must be at least 1")]
    SwarmSize,

    /// Zero generations or iterations would be an empty run.
    #[error("{what} must be at least 1")]
    ZeroIterations { what: &'static str },

    /// A probability parameter outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    /// A PSO coefficient that is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    Coefficient { name: &'static str, value: f64 },

    /// Mutation standard deviation must be finite and non-negative.
    #[error("mutation_sigma must be finite and >= 0, got {0}")]
    MutationSigma(f64),
}

/// Checks that `value` is a probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}
