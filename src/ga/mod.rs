//! Genetic Algorithm over 2D real-valued candidates.
//!
//! Every generation evaluates the whole population through the shared
//! [`Evaluator`](crate::eval::Evaluator), draws a mating pool with
//! inverted fitness-proportionate selection, blends consecutive pairs and
//! applies clipped Gaussian mutation. Selection normalization and crossover
//! arithmetic are charged to the run's internal counters.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (bounds, population, rates, seed)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Best candidate plus cost snapshots
//!
//! # Submodules
//!
//! - [`selection`]: inverted roulette weights and with-replacement sampling
//! - [`operators`]: blend crossover and Gaussian mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
pub mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};

/// A GA solution vector `(x, y)`.
pub type Candidate = [f64; 2];
