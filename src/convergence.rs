//! Best-value and stagnation tracking shared by both runners.
//!
//! The tracker records the `global_min_info` snapshot on every strict
//! improvement and the `convergence_info` snapshot the first time the
//! number of steps since the last improvement exceeds the window. It never
//! stops a run.

use crate::eval::ConvergenceSnapshot;

/// Generations/iterations without improvement before a run counts as stagnated.
pub const DEFAULT_STAGNATION_WINDOW: usize = 20;

/// A strict improvement of the best value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Generation or iteration index (0-based).
    pub index: usize,
    /// New best value.
    pub value: f64,
    /// Cost state at the moment of the improvement.
    pub snapshot: ConvergenceSnapshot,
}

#[derive(Debug, Clone)]
pub(crate) struct ConvergenceTracker {
    window: usize,
    best_value: f64,
    last_improvement: usize,
    global_min: Option<ConvergenceSnapshot>,
    convergence: Option<ConvergenceSnapshot>,
    converged_at: Option<usize>,
    improvements: Vec<Improvement>,
}

/// Final state of a [`ConvergenceTracker`].
#[derive(Debug, Clone)]
pub(crate) struct ConvergenceOutcome {
    pub best_value: f64,
    pub last_improvement: usize,
    pub global_min: Option<ConvergenceSnapshot>,
    pub convergence: ConvergenceSnapshot,
    pub converged_at: Option<usize>,
    pub improvements: Vec<Improvement>,
}

impl ConvergenceTracker {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            best_value: f64::INFINITY,
            last_improvement: 0,
            global_min: None,
            convergence: None,
            converged_at: None,
            improvements: Vec::new(),
        }
    }

    pub fn best_value(&self) -> f64 {
        self.best_value
    }

    /// Records `value` at step `index` if it is strictly below the best.
    ///
    /// Returns `true` when the best improved.
    pub fn offer(&mut self, index: usize, value: f64, snapshot: ConvergenceSnapshot) -> bool {
        if value.is_nan() || value >= self.best_value {
            return false;
        }
        self.best_value = value;
        self.last_improvement = index;
        self.global_min = Some(snapshot);
        self.improvements.push(Improvement {
            index,
            value,
            snapshot,
        });
        true
    }

    /// Whether step `index` is past the stagnation window.
    pub fn is_stagnant(&self, index: usize) -> bool {
        index.saturating_sub(self.last_improvement) > self.window
    }

    /// Captures the convergence snapshot at `index` if stagnation has
    /// just been reached. Fires at most once per run.
    pub fn check_stagnation(
        &mut self,
        index: usize,
        snapshot: impl FnOnce() -> ConvergenceSnapshot,
    ) -> bool {
        if self.convergence.is_some() || !self.is_stagnant(index) {
            return false;
        }
        self.convergence = Some(snapshot());
        self.converged_at = Some(index);
        true
    }

    /// Closes the run, using `final_snapshot` when stagnation never fired.
    pub fn finish(self, final_snapshot: ConvergenceSnapshot) -> ConvergenceOutcome {
        ConvergenceOutcome {
            best_value: self.best_value,
            last_improvement: self.last_improvement,
            global_min: self.global_min,
            convergence: self.convergence.unwrap_or(final_snapshot),
            converged_at: self.converged_at,
            improvements: self.improvements,
        }
    }
}
