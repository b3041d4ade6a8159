//! Instrumented objective evaluation.
//!
//! The [`Evaluator`] is the single point through which both optimizers call
//! the objective. Every call is counted, and the arithmetic cost reported by
//! the objective's cost model is added to the running [`OperationCounters`].
//!
//! # Key Types
//!
//! - [`Objective`]: a two-variable function with an attached cost model
//! - [`W22`]: the reference benchmark `(x−y)·(−x·sin(√|x|) − y·sin(√|y|))`
//! - [`FnObjective`]: any closure paired with a fixed per-call cost
//! - [`ConvergenceSnapshot`]: counters captured at a convergence event

mod counters;
mod evaluator;
mod objective;

pub use counters::{ConvergenceSnapshot, OperationCost, OperationCounters};
pub use evaluator::Evaluator;
pub use objective::{FnObjective, Objective, W22};
