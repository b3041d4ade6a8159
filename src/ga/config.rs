//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::convergence::DEFAULT_STAGNATION_WINDOW;
use crate::error::{check_probability, ConfigError};
use crate::space::Bounds;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_opcount::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_opcount::ga::GaConfig;
/// use u_opcount::space::Bounds;
///
/// let config = GaConfig::default()
///     .with_bounds(Bounds::new(-500.0, 500.0).unwrap())
///     .with_population_size(100)
///     .with_generations(200)
///     .with_crossover_rate(0.8)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Interval applied to both coordinates of every candidate.
    pub bounds: Bounds,

    /// Number of candidates in the population.
    ///
    /// Must be positive and even: the mating pool is consumed in pairs.
    pub population_size: usize,

    /// Number of generations. The loop always runs all of them.
    pub generations: usize,

    /// Probability of blending a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are copied unchanged.
    pub crossover_rate: f64,

    /// Per-coordinate probability of Gaussian mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_sigma: f64,

    /// Generations without improvement before the convergence snapshot is taken.
    pub stagnation_window: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            population_size: 50,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            mutation_sigma: 5.0,
            stagnation_window: DEFAULT_STAGNATION_WINDOW,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Settings used for the single-run GA/PSO comparison.
    ///
    /// - Population: 100, Generations: 200
    /// - Crossover rate: 0.8, Mutation rate: 0.2
    pub fn reference() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            ..Self::default()
        }
    }

    /// Sets the search bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation standard deviation.
    pub fn with_mutation_sigma(mut self, sigma: f64) -> Self {
        self.mutation_sigma = sigma;
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
        if self.population_size == 0 || !self.population_size.is_multiple_of(2) {
            return Err(ConfigError::PopulationSize(self.population_size));
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroIterations {
                what: "generations",
            });
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        if !self.mutation_sigma.is_finite() || self.mutation_sigma < 0.0 {
            return Err(ConfigError::MutationSigma(self.mutation_sigma));
        }
        Ok(())
    }
}
