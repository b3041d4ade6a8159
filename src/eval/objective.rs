//! Objective functions and their cost models.

use super::counters::OperationCost;

/// A two-variable function to minimize, with the arithmetic it performs.
///
/// `cost` reports the multiplications and divisions one call of `value`
/// performs for the given inputs. Keeping the cost next to the function
/// lets the [`Evaluator`](super::Evaluator) instrument any objective.
///
/// Implementations must be pure: same inputs, same output, no state.
pub trait Objective {
    fn value(&self, x: f64, y: f64) -> f64;

    fn cost(&self, x: f64, y: f64) -> OperationCost;
}

/// Reference benchmark:
/// `f(x, y) = (x − y) · (−x·sin(√|x|) − y·sin(√|y|))`.
///
/// Three multiplications per call (`−x·sin`, `−y·sin`, the outer product),
/// no divisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct W22;

impl W22 {
    pub const COST: OperationCost = OperationCost::multiplications(3);
}

impl Objective for W22 {
    fn value(&self, x: f64, y: f64) -> f64 {
        let z = -x * x.abs().sqrt().sin() - y * y.abs().sqrt().sin();
        (x - y) * z
    }

    fn cost(&self, _x: f64, _y: f64) -> OperationCost {
        Self::COST
    }
}

/// A closure objective with a fixed per-call cost.
///
/// ```
/// use u_opcount::eval::{FnObjective, Objective, OperationCost};
///
/// let sphere = FnObjective::new(|x, y| x * x + y * y, OperationCost::multiplications(2));
/// assert_eq!(sphere.value(3.0, 4.0), 25.0);
/// assert_eq!(sphere.cost(3.0, 4.0).multiplications, 2);
/// ```
#[derive(Clone)]
pub struct FnObjective<F> {
    f: F,
    cost: OperationCost,
}

impl<F> FnObjective<F>
where
    F: Fn(f64, f64) -> f64,
{
    pub fn new(f: F, cost: OperationCost) -> Self {
        Self { f, cost }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(f64, f64) -> f64,
{
    fn value(&self, x: f64, y: f64) -> f64 {
        (self.f)(x, y)
    }

    fn cost(&self, _x: f64, _y: f64) -> OperationCost {
        self.cost
    }
}

impl<O: Objective + ?Sized> Objective for &O {
    fn value(&self, x: f64, y: f64) -> f64 {
        (**self).value(x, y)
    }

    fn cost(&self, x: f64, y: f64) -> OperationCost {
        (**self).cost(x, y)
    }
}
