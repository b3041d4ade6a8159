//! Particle and swarm state.

use crate::eval::OperationCost;
use crate::space::Bounds;
use rand::Rng;

/// Multiplications per particle per velocity update:
/// `w·v`, `c1·r1`, `(c1·r1)·(pbest − pos)`, `c2·r2`, `(c2·r2)·(gbest − pos)`,
/// each over two coordinates.
pub const VELOCITY_UPDATE_COST: OperationCost = OperationCost::multiplications(10);

/// One particle: position, velocity and personal best.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub best_position: [f64; 2],
    /// `+inf` until the particle is first evaluated.
    pub best_value: f64,
}

impl Particle {
    /// Random position inside `bounds`, random velocity in `[-1, 1)`.
    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        let position = bounds.sample_point(rng);
        let velocity = [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)];
        Self {
            position,
            velocity,
            best_position: position,
            best_value: f64::INFINITY,
        }
    }

    /// Records `value` at the current position if it strictly improves
    /// the personal best.
    pub fn observe(&mut self, value: f64) -> bool {
        if value < self.best_value {
            self.best_value = value;
            self.best_position = self.position;
            true
        } else {
            false
        }
    }

    /// `v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)`.
    ///
    /// Without a global best the social term is zero.
    pub fn update_velocity(
        &mut self,
        global_best: Option<[f64; 2]>,
        coefficients: (f64, f64, f64),
        r1: [f64; 2],
        r2: [f64; 2],
    ) -> OperationCost {
        let (w, c1, c2) = coefficients;
        for d in 0..2 {
            let cognitive = c1 * r1[d] * (self.best_position[d] - self.position[d]);
            let social = match global_best {
                Some(g) => c2 * r2[d] * (g[d] - self.position[d]),
                None => 0.0,
            };
            self.velocity[d] = w * self.velocity[d] + cognitive + social;
        }
        VELOCITY_UPDATE_COST
    }

    /// `x += v`, clipped into `bounds`. The velocity itself is not clipped.
    pub fn advance(&mut self, bounds: &Bounds) {
        self.position = bounds.clamp_point([
            self.position[0] + self.velocity[0],
            self.position[1] + self.velocity[1],
        ]);
    }
}

/// A fixed-size swarm with its shared global best.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swarm {
    pub particles: Vec<Particle>,
    /// Unset until some particle reports a value below `+inf`.
    pub best_position: Option<[f64; 2]>,
    pub best_value: f64,
}

impl Swarm {
    pub fn random<R: Rng>(size: usize, bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            particles: (0..size).map(|_| Particle::random(bounds, rng)).collect(),
            best_position: None,
            best_value: f64::INFINITY,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
