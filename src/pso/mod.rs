//! Particle Swarm Optimization over 2D positions.
//!
//! Each iteration runs a full evaluation pass (personal and global bests
//! are updated on strict improvement) followed by an update pass that moves
//! every particle with the classic inertia-weight rule and clips it into
//! the bounds. Velocity arithmetic is charged to the run's internal
//! multiplication counter. PSO never attributes divisions.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: bounds, swarm size, iterations, `w`, `c1`, `c2`, seed
//! - [`PsoRunner`]: Executes the iteration loop
//! - [`PsoResult`]: Global best plus cost snapshots
//! - [`Particle`], [`Swarm`]: swarm state, visible to run observers
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;
mod types;

pub use config::PsoConfig;
pub use runner::{PsoResult, PsoRunner};
pub use types::{Particle, Swarm, VELOCITY_UPDATE_COST};
