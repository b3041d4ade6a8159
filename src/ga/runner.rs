//! GA generational loop.
//!
//! [`GaRunner`] orchestrates one run:
//! initialization → evaluation → best tracking → selection → crossover →
//! mutation → stagnation check → repeat, for a fixed number of generations.

use super::config::GaConfig;
use super::operators::{blend_crossover, gaussian_mutation};
use super::selection::{sample_indices, selection_probabilities};
use super::Candidate;
use crate::convergence::{ConvergenceTracker, Improvement};
use crate::error::ConfigError;
use crate::eval::{ConvergenceSnapshot, Evaluator, Objective, OperationCounters};
use crate::random::rng_from;
use rand::Rng;
use rand_distr::Normal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best candidate ever evaluated. `None` only if the objective never
    /// returned a value below `+inf`.
    pub best_solution: Option<Candidate>,

    /// Fitness of `best_solution` (`+inf` if none).
    pub best_fitness: f64,

    /// Cost state at the last strict improvement of the best fitness.
    pub global_min_info: Option<ConvergenceSnapshot>,

    /// Cost state when stagnation was first detected, or at the end of the
    /// run if it never was.
    pub convergence_info: ConvergenceSnapshot,

    /// Generation at which stagnation was detected.
    pub converged_at: Option<usize>,

    /// Generation of the last strict improvement.
    pub last_improvement: usize,

    /// Arithmetic performed by the GA itself (selection and crossover).
    pub internal: OperationCounters,

    /// Evaluator counters when the run finished.
    pub evaluator_stats: OperationCounters,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness so far, recorded after each generation's evaluation.
    pub fitness_history: Vec<f64>,

    /// Every strict improvement, in order.
    pub improvements: Vec<Improvement>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```
/// use u_opcount::eval::{Evaluator, W22};
/// use u_opcount::ga::{GaConfig, GaRunner};
///
/// let mut evaluator = Evaluator::new(W22);
/// let config = GaConfig::default().with_generations(20).with_seed(42);
/// let result = GaRunner::run(&mut evaluator, &config).unwrap();
///
/// assert_eq!(evaluator.stats().evaluations, 50 * 20);
/// assert!(result.best_fitness.is_finite());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA, seeding from `config.seed`.
    pub fn run<O: Objective>(
        evaluator: &mut Evaluator<O>,
        config: &GaConfig,
    ) -> Result<GaResult, ConfigError> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(evaluator, config, &mut rng)
    }

    /// Runs the GA drawing randomness from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<O: Objective, R: Rng>(
        evaluator: &mut Evaluator<O>,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, ConfigError> {
        Self::run_observed(evaluator, config, rng, |_, _| {})
    }

    /// Runs the GA, calling `observer(generation, population)` with the
    /// next population at the end of every generation.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = config.population_size,
            generations = config.generations
        )
    )]
    pub fn run_observed<O, R, F>(
        evaluator: &mut Evaluator<O>,
        config: &GaConfig,
        rng: &mut R,
        mut observer: F,
    ) -> Result<GaResult, ConfigError>
    where
        O: Objective,
        R: Rng,
        F: FnMut(usize, &[Candidate]),
    {
        config.validate()?;
        let noise = Normal::new(0.0, config.mutation_sigma)
            .map_err(|_| ConfigError::MutationSigma(config.mutation_sigma))?;
        let started = Instant::now();

        let n = config.population_size;
        let bounds = config.bounds;
        let mut internal = OperationCounters::default();
        let mut tracker = ConvergenceTracker::new(config.stagnation_window);
        let mut best_solution: Option<Candidate> = None;
        let mut fitness_history = Vec::with_capacity(config.generations);

        // 1. Initialize population
        let mut population: Vec<Candidate> = (0..n).map(|_| bounds.sample_point(rng)).collect();

        for gen in 0..config.generations {
            // 2. Evaluate
            let fitnesses: Vec<f64> = population
                .iter()
                .map(|c| evaluator.evaluate(c[0], c[1]))
                .collect();

            // 3. Track best (first index wins ties)
            if let Some(idx) = argmin(&fitnesses) {
                let snapshot = ConvergenceSnapshot::new(evaluator.stats(), internal);
                if tracker.offer(gen, fitnesses[idx], snapshot) {
                    best_solution = Some(population[idx]);
                    debug!(
                        generation = gen,
                        best_fitness = fitnesses[idx],
                        evaluations = snapshot.counters.evaluations,
                        "new best"
                    );
                }
            }
            fitness_history.push(tracker.best_value());

            // 4. Selection
            let probabilities = selection_probabilities(&fitnesses);
            internal += probabilities.cost;
            let pool = sample_indices(&probabilities.probabilities, n, rng);

            // 5. Crossover and mutation, pairwise in pool order
            let mut next = Vec::with_capacity(n);
            for pair in pool.chunks_exact(2) {
                let (mut c1, mut c2, cost) = blend_crossover(
                    &population[pair[0]],
                    &population[pair[1]],
                    config.crossover_rate,
                    &bounds,
                    rng,
                );
                internal += cost;
                gaussian_mutation(&mut c1, config.mutation_rate, &noise, &bounds, rng);
                gaussian_mutation(&mut c2, config.mutation_rate, &noise, &bounds, rng);
                next.push(c1);
                next.push(c2);
            }
            population = next;
            observer(gen, &population);

            // 6. Stagnation
            if tracker.check_stagnation(gen, || {
                ConvergenceSnapshot::new(evaluator.stats(), internal)
            }) {
                info!(
                    generation = gen,
                    best_fitness = tracker.best_value(),
                    "stagnation detected"
                );
            }
        }

        let evaluator_stats = evaluator.stats();
        let outcome = tracker.finish(ConvergenceSnapshot::new(evaluator_stats, internal));
        let elapsed = started.elapsed();
        info!(
            best_fitness = outcome.best_value,
            evaluations = evaluator_stats.evaluations,
            elapsed_ms = elapsed.as_millis() as u64,
            "ga run complete"
        );

        Ok(GaResult {
            best_solution,
            best_fitness: outcome.best_value,
            global_min_info: outcome.global_min,
            convergence_info: outcome.convergence,
            converged_at: outcome.converged_at,
            last_improvement: outcome.last_improvement,
            internal,
            evaluator_stats,
            generations: config.generations,
            fitness_history,
            improvements: outcome.improvements,
            elapsed,
        })
    }
}

/// Index of the smallest value, ignoring NaN. First index wins ties.
fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if values[b] <= v => {}
            _ => best = Some(i),
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
