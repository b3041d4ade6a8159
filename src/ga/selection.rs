//! Fitness-proportionate selection for minimization.
//!
//! Fitness is inverted into weights `w_i = (max_fitness − f_i) + 1`, so the
//! worst candidate still has weight 1 and every candidate can be drawn.
//! Weights are normalized into probabilities and the mating pool is drawn
//! with replacement.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel selection)

use crate::eval::OperationCost;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// A probability distribution over the population.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionProbabilities {
    pub probabilities: Vec<f64>,
    /// Divisions spent normalizing. Zero when the uniform fallback was used.
    pub cost: OperationCost,
}

impl SelectionProbabilities {
    /// Whether the weights were normalized, as opposed to replaced by the
    /// uniform fallback.
    pub fn is_normalized(&self) -> bool {
        self.cost.divisions > 0
    }
}

/// Inverted weights `(max − f_i) + 1`.
pub fn inverted_weights(fitnesses: &[f64]) -> Vec<f64> {
    let max_fitness = fitnesses
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    fitnesses.iter().map(|&f| (max_fitness - f) + 1.0).collect()
}

/// Normalizes weights into probabilities.
///
/// Normalizing costs one division per weight. When the total weight is
/// zero, or not finite, every index gets `1 / n` instead and no division
/// is attributed.
pub fn normalize(weights: &[f64]) -> SelectionProbabilities {
    let n = weights.len();
    let total: f64 = weights.iter().sum();

    if total == 0.0 || !total.is_finite() {
        let uniform = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        return SelectionProbabilities {
            probabilities: vec![uniform; n],
            cost: OperationCost::default(),
        };
    }

    SelectionProbabilities {
        probabilities: weights.iter().map(|&w| w / total).collect(),
        cost: OperationCost::divisions(n as u64),
    }
}

/// Selection probabilities for a population's fitness values.
pub fn selection_probabilities(fitnesses: &[f64]) -> SelectionProbabilities {
    normalize(&inverted_weights(fitnesses))
}

/// Draws `count` indices with replacement according to `probabilities`.
///
/// Falls back to uniform draws if the distribution cannot be sampled
/// (e.g. every probability is zero).
pub fn sample_indices<R: Rng>(probabilities: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let n = probabilities.len();
    if n == 0 {
        return Vec::new();
    }

    match WeightedIndex::new(probabilities) {
        Ok(dist) => (0..count).map(|_| dist.sample(rng)).collect(),
        Err(_) => (0..count).map(|_| rng.random_range(0..n)).collect(),
    }
}
