//! Continuous observation and action spaces.
use crate::error::MushrCoreError;
use serde::{Deserialize, Serialize};

/// Box space for continuous values with per-element bounds.
///
/// Bounds may be infinite, as for observation spaces of physics environments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    /// Lower bound for each element.
    pub low: Vec<f64>,

    /// Upper bound for each element.
    pub high: Vec<f64>,
}

impl BoxSpace {
    /// Creates a new box space with given bounds.
    ///
    /// Panics if `low` and `high` have different lengths.
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Self {
        assert_eq!(low.len(), high.len(), "Low and high must have same length");
        Self { low, high }
    }

    /// Creates a box space with the same bounds for all elements.
    pub fn uniform(dim: usize, low: f64, high: f64) -> Self {
        Self::new(vec![low; dim], vec![high; dim])
    }

    /// Creates a box space from -inf to +inf.
    pub fn unbounded(dim: usize) -> Self {
        Self::uniform(dim, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Number of elements.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Shape of the space, always one-dimensional.
    pub fn shape(&self) -> [usize; 1] {
        [self.dim()]
    }

    /// Returns `true` if `value` has the right length and lies within the bounds.
    pub fn contains(&self, value: &[f64]) -> bool {
        value.len() == self.dim()
            && value
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(&v, (&l, &h))| v >= l && v <= h)
    }

    /// Draws a uniform sample.
    ///
    /// Fails if any dimension has an infinite bound.
    pub fn sample(&self) -> Result<Vec<f64>, MushrCoreError> {
        self.low
            .iter()
            .zip(self.high.iter())
            .enumerate()
            .map(|(i, (&l, &h))| {
                if l.is_finite() && h.is_finite() {
                    Ok(l + (h - l) * fastrand::f64())
                } else {
                    Err(MushrCoreError::UnboundedSpace(i))
                }
            })
            .collect()
    }
}
