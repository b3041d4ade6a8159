//! PSO iteration loop.

use super::config::PsoConfig;
use super::types::Swarm;
use crate::convergence::{ConvergenceTracker, Improvement};
use crate::error::ConfigError;
use crate::eval::{ConvergenceSnapshot, Evaluator, Objective, OperationCounters};
use crate::random::rng_from;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a PSO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// Best position any particle visited. `None` only if the objective
    /// never returned a value below `+inf`.
    pub gbest_pos: Option<[f64; 2]>,

    /// Value at `gbest_pos` (`+inf` if none).
    pub gbest_val: f64,

    /// Cost state at the last strict improvement of the global best.
    pub global_min_info: Option<ConvergenceSnapshot>,

    /// Cost state when stagnation was first detected, or at the end of the
    /// run if it never was.
    pub convergence_info: ConvergenceSnapshot,

    /// Iteration at which stagnation was detected.
    pub converged_at: Option<usize>,

    /// Iteration of the last strict improvement.
    pub last_improvement: usize,

    /// Arithmetic performed by the velocity updates.
    pub internal: OperationCounters,

    /// Evaluator counters when the run finished.
    pub evaluator_stats: OperationCounters,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Global best value after each iteration's evaluation pass.
    pub value_history: Vec<f64>,

    /// Every strict improvement of the global best, in order.
    pub improvements: Vec<Improvement>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the PSO loop.
///
/// Each iteration evaluates every particle first and only then moves the
/// swarm, so all velocity updates see the iteration's final global best.
///
/// ```
/// use u_opcount::eval::{Evaluator, W22};
/// use u_opcount::pso::{PsoConfig, PsoRunner};
///
/// let mut evaluator = Evaluator::new(W22);
/// let config = PsoConfig::default().with_iterations(20).with_seed(42);
/// let result = PsoRunner::run(&mut evaluator, &config).unwrap();
///
/// assert_eq!(result.internal.multiplications, 10 * 50 * 20);
/// assert!(result.gbest_val.is_finite());
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO, seeding from `config.seed`.
    pub fn run<O: Objective>(
        evaluator: &mut Evaluator<O>,
        config: &PsoConfig,
    ) -> Result<PsoResult, ConfigError> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(evaluator, config, &mut rng)
    }

    /// Runs PSO drawing randomness from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<O: Objective, R: Rng>(
        evaluator: &mut Evaluator<O>,
        config: &PsoConfig,
        rng: &mut R,
    ) -> Result<PsoResult, ConfigError> {
        Self::run_observed(evaluator, config, rng, |_, _| {})
    }

    /// Runs PSO, calling `observer(iteration, swarm)` after each update pass.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(swarm_size = config.swarm_size, iterations = config.iterations)
    )]
    pub fn run_observed<O, R, F>(
        evaluator: &mut Evaluator<O>,
        config: &PsoConfig,
        rng: &mut R,
        mut observer: F,
    ) -> Result<PsoResult, ConfigError>
    where
        O: Objective,
        R: Rng,
        F: FnMut(usize, &Swarm),
    {
        config.validate()?;
        let started = Instant::now();

        let bounds = config.bounds;
        let coefficients = (config.w, config.c1, config.c2);
        let mut internal = OperationCounters::default();
        let mut tracker = ConvergenceTracker::new(config.stagnation_window);
        let mut value_history = Vec::with_capacity(config.iterations);

        let mut swarm = Swarm::random(config.swarm_size, &bounds, rng);

        for it in 0..config.iterations {
            // Evaluation pass
            for particle in swarm.particles.iter_mut() {
                let value = evaluator.evaluate(particle.position[0], particle.position[1]);
                particle.observe(value);

                let snapshot = ConvergenceSnapshot::new(evaluator.stats(), internal);
                if tracker.offer(it, value, snapshot) {
                    swarm.best_value = value;
                    swarm.best_position = Some(particle.position);
                    debug!(
                        iteration = it,
                        gbest_val = value,
                        evaluations = snapshot.counters.evaluations,
                        "new global best"
                    );
                }
            }
            value_history.push(swarm.best_value);

            // Update pass
            let global_best = swarm.best_position;
            for particle in swarm.particles.iter_mut() {
                let r1 = [rng.random::<f64>(), rng.random::<f64>()];
                let r2 = [rng.random::<f64>(), rng.random::<f64>()];
                internal += particle.update_velocity(global_best, coefficients, r1, r2);
                particle.advance(&bounds);
            }
            observer(it, &swarm);

            if tracker.check_stagnation(it, || {
                ConvergenceSnapshot::new(evaluator.stats(), internal)
            }) {
                info!(
                    iteration = it,
                    gbest_val = swarm.best_value,
                    "stagnation detected"
                );
            }
        }

        let evaluator_stats = evaluator.stats();
        let outcome = tracker.finish(ConvergenceSnapshot::new(evaluator_stats, internal));
        let elapsed = started.elapsed();
        info!(
            gbest_val = outcome.best_value,
            evaluations = evaluator_stats.evaluations,
            elapsed_ms = elapsed.as_millis() as u64,
            "pso run complete"
        );

        Ok(PsoResult {
            gbest_pos: swarm.best_position,
            gbest_val: outcome.best_value,
            global_min_info: outcome.global_min,
            convergence_info: outcome.convergence,
            converged_at: outcome.converged_at,
            last_improvement: outcome.last_improvement,
            internal,
            evaluator_stats,
            iterations: config.iterations,
            value_history,
            improvements: outcome.improvements,
            elapsed,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
