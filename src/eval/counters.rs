//! Operation tallies and event snapshots.

use std::ops::{Add, AddAssign};

/// Arithmetic attributed to a single step (objective call or internal update).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationCost {
    pub multiplications: u64,
    pub divisions: u64,
}

impl OperationCost {
    pub const fn new(multiplications: u64, divisions: u64) -> Self {
        Self {
            multiplications,
            divisions,
        }
    }

    pub const fn multiplications(n: u64) -> Self {
        Self::new(n, 0)
    }

    pub const fn divisions(n: u64) -> Self {
        Self::new(0, n)
    }
}

/// Evaluation, multiplication and division tallies.
///
/// Counters only grow during a run. They are zeroed by
/// [`Evaluator::reset`](super::Evaluator::reset) or by starting a new set
/// of internal counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationCounters {
    pub evaluations: u64,
    pub multiplications: u64,
    pub divisions: u64,
}

impl OperationCounters {
    /// Multiplications plus divisions.
    pub fn operations(&self) -> u64 {
        self.multiplications + self.divisions
    }
}

impl AddAssign<OperationCost> for OperationCounters {
    fn add_assign(&mut self, cost: OperationCost) {
        self.multiplications += cost.multiplications;
        self.divisions += cost.divisions;
    }
}

impl Add for OperationCounters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            evaluations: self.evaluations + rhs.evaluations,
            multiplications: self.multiplications + rhs.multiplications,
            divisions: self.divisions + rhs.divisions,
        }
    }
}

/// Cost state captured when a convergence event happens.
///
/// `counters` is a copy of the evaluator's tallies at that moment, the
/// other two fields are the optimizer's own arithmetic up to the same point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceSnapshot {
    pub counters: OperationCounters,
    pub internal_multiplications: u64,
    pub internal_divisions: u64,
}

impl ConvergenceSnapshot {
    pub fn new(counters: OperationCounters, internal: OperationCounters) -> Self {
        Self {
            counters,
            internal_multiplications: internal.multiplications,
            internal_divisions: internal.divisions,
        }
    }

    /// Objective multiplications plus internal multiplications.
    pub fn total_multiplications(&self) -> u64 {
        self.counters.multiplications + self.internal_multiplications
    }

    /// Objective divisions plus internal divisions.
    pub fn total_divisions(&self) -> u64 {
        self.counters.divisions + self.internal_divisions
    }

    /// All multiplications and divisions needed to reach this point.
    pub fn total_operations(&self) -> u64 {
        self.total_multiplications() + self.total_divisions()
    }
}
