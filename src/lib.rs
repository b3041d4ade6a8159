//! Operation-counted metaheuristics for two-variable minimization.
//!
//! Runs a Genetic Algorithm and a Particle Swarm Optimizer on the same
//! objective while counting every objective call and the characteristic
//! arithmetic of each algorithm, so the two can be compared by cost as
//! well as by result:
//!
//! - **Evaluator** ([`eval`]): wraps the objective, counts evaluations and
//!   attributes multiplications/divisions through the objective's cost model.
//! - **Genetic Algorithm** ([`ga`]): inverted roulette selection, blend
//!   crossover, clipped Gaussian mutation.
//! - **Particle Swarm Optimization** ([`pso`]): inertia-weight velocity
//!   update with clipped positions.
//! - **Sweeps** ([`sweep`]): hyperparameter grids reduced to CSV report rows.
//!
//! Both runners record a [`ConvergenceSnapshot`](eval::ConvergenceSnapshot)
//! at the last improvement of the best value (`global_min_info`) and when
//! the best has not improved for more than the stagnation window
//! (`convergence_info`). Detection never stops a run early.
//!
//! # Example
//!
//! ```
//! use u_opcount::eval::{Evaluator, W22};
//! use u_opcount::ga::{GaConfig, GaRunner};
//! use u_opcount::pso::{PsoConfig, PsoRunner};
//!
//! let mut evaluator = Evaluator::new(W22);
//! let ga = GaRunner::run(&mut evaluator, &GaConfig::default().with_seed(1)).unwrap();
//!
//! evaluator.reset();
//! let pso = PsoRunner::run(&mut evaluator, &PsoConfig::default().with_seed(1)).unwrap();
//!
//! let ga_cost = ga.global_min_info.unwrap().total_operations();
//! let pso_cost = pso.global_min_info.unwrap().total_operations();
//! assert!(ga_cost > 0 && pso_cost > 0);
//! ```

pub mod convergence;
pub mod error;
pub mod eval;
pub mod ga;
pub mod pso;
pub mod random;
pub mod space;
pub mod sweep;

pub use error::ConfigError;
