//! Real-coded genetic operators for 2D candidates.
//!
//! - [`blend_crossover`]: affine combination of two parents with one shared `alpha`
//! - [`gaussian_mutation`]: per-coordinate additive noise, clipped into bounds
//!
//! # References
//!
//! - Wright (1991), "Genetic Algorithms for Real Parameter Optimization"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

use super::Candidate;
use crate::eval::OperationCost;
use crate::space::Bounds;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Multiplications for one blended pair: 2 children × 2 coordinates × 2 terms.
pub const CROSSOVER_COST: OperationCost = OperationCost::multiplications(8);

/// Blends two parents with probability `rate`.
///
/// With `alpha ~ U[0, 1)`:
/// `child1 = alpha·p1 + (1−alpha)·p2`, `child2 = alpha·p2 + (1−alpha)·p1`.
/// When crossover does not fire the children are copies and cost nothing.
///
/// Blended children are clipped into `bounds`: for parents on the boundary
/// the rounded affine combination can land one ulp outside it.
pub fn blend_crossover<R: Rng>(
    parent1: &Candidate,
    parent2: &Candidate,
    rate: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> (Candidate, Candidate, OperationCost) {
    if rng.random::<f64>() >= rate {
        return (*parent1, *parent2, OperationCost::default());
    }

    let alpha: f64 = rng.random();
    let beta = 1.0 - alpha;
    let child1 = [
        alpha * parent1[0] + beta * parent2[0],
        alpha * parent1[1] + beta * parent2[1],
    ];
    let child2 = [
        alpha * parent2[0] + beta * parent1[0],
        alpha * parent2[1] + beta * parent1[1],
    ];
    (
        bounds.clamp_point(child1),
        bounds.clamp_point(child2),
        CROSSOVER_COST,
    )
}

/// Adds `noise` to each coordinate with probability `rate`, then clips it.
///
/// Coordinates that are not mutated are left untouched.
pub fn gaussian_mutation<R: Rng>(
    candidate: &mut Candidate,
    rate: f64,
    noise: &Normal<f64>,
    bounds: &Bounds,
    rng: &mut R,
) {
    for gene in candidate.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = bounds.clamp(*gene + noise.sample(rng));
        }
    }
}
