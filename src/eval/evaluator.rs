//! Counting wrapper around an [`Objective`].

use super::counters::OperationCounters;
use super::objective::Objective;

/// Counts objective calls and the arithmetic they cost.
///
/// One evaluator serves one optimizer run at a time. Reusing it for a
/// second run without calling [`reset`](Self::reset) merges the two runs'
/// accounting.
///
/// ```
/// use u_opcount::eval::{Evaluator, W22};
///
/// let mut evaluator = Evaluator::new(W22);
/// evaluator.evaluate(1.0, 2.0);
/// evaluator.evaluate(3.0, 4.0);
///
/// let stats = evaluator.stats();
/// assert_eq!(stats.evaluations, 2);
/// assert_eq!(stats.multiplications, 6);
/// assert_eq!(stats.divisions, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator<O> {
    objective: O,
    counters: OperationCounters,
}

impl<O: Objective> Evaluator<O> {
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            counters: OperationCounters::default(),
        }
    }

    /// Scores `(x, y)` and charges the call to the counters.
    ///
    /// Only call this for candidates that are genuinely being scored.
    pub fn evaluate(&mut self, x: f64, y: f64) -> f64 {
        self.counters.evaluations += 1;
        self.counters += self.objective.cost(x, y);
        self.objective.value(x, y)
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        self.counters = OperationCounters::default();
    }

    /// Copy of the current counters.
    pub fn stats(&self) -> OperationCounters {
        self.counters
    }
}
