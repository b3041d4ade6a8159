//! Search-space bounds.

use crate::error::ConfigError;
use rand::Rng;

/// Closed interval `[min, max]` applied to both coordinates.
///
/// ```
/// use u_opcount::space::Bounds;
///
/// let bounds = Bounds::new(-500.0, 500.0).unwrap();
/// assert_eq!(bounds.clamp(612.0), 500.0);
/// assert!(bounds.contains(-500.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -500.0,
            max: 500.0,
        }
    }
}

impl Bounds {
    /// Creates validated bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Fails when either end is not finite or `min > max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clips `value` into the interval.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clips both coordinates of a point.
    #[inline]
    pub fn clamp_point(&self, point: [f64; 2]) -> [f64; 2] {
        [self.clamp(point[0]), self.clamp(point[1])]
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether both coordinates of `point` lie inside the interval.
    #[inline]
    pub fn contains_point(&self, point: [f64; 2]) -> bool {
        self.contains(point[0]) && self.contains(point[1])
    }

    /// Uniform sample from the interval.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max)
    }

    /// Uniform sample of a 2D point.
    pub fn sample_point<R: Rng>(&self, rng: &mut R) -> [f64; 2] {
        [self.sample(rng), self.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_new_rejects_inverted() {
        assert_eq!(
            Bounds::new(1.0, -1.0),
            Err(ConfigError::InvalidBounds {
                min: 1.0,
                max: -1.0
            })
        );
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(Bounds::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_degenerate_interval_is_valid() {
        let b = Bounds::new(3.0, 3.0).unwrap();
        let mut rng = create_rng(1);
        assert_eq!(b.sample(&mut rng), 3.0);
        assert_eq!(b.clamp(-10.0), 3.0);
    }

    #[test]
    fn test_samples_stay_inside() {
        let b = Bounds::new(-2.0, 5.0).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(b.contains_point(b.sample_point(&mut rng)));
        }
    }

    #[test]
    fn test_clamp_point() {
        let b = Bounds::default();
        assert_eq!(b.clamp_point([-900.0, 12.5]), [-500.0, 12.5]);
    }
}
