//! Action of MuSHR environments.
use mushr_core::{Act, BoxSpace};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Represents an action, `[steering, velocity]` for every car in the scene.
///
/// Values are sent to the actuators as they are. The bounds declared by
/// [`ActionBounds`] are informative and never enforced by the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct MushrAct {
    /// Stores an action.
    pub act: Array1<f64>,
}

impl MushrAct {
    /// Constructs an action of a single car.
    pub fn new(steering: f64, velocity: f64) -> Self {
        Self {
            act: Array1::from(vec![steering, velocity]),
        }
    }

    /// Steering angle of the `i`-th car.
    pub fn steering(&self, i: usize) -> Option<f64> {
        self.act.get(2 * i).copied()
    }

    /// Velocity of the `i`-th car.
    pub fn velocity(&self, i: usize) -> Option<f64> {
        self.act.get(2 * i + 1).copied()
    }

    /// Actuator controls.
    pub fn to_vec(&self) -> Vec<f64> {
        self.act.to_vec()
    }
}

impl From<Vec<f64>> for MushrAct {
    fn from(v: Vec<f64>) -> Self {
        Self {
            act: Array1::from(v),
        }
    }
}

impl Act for MushrAct {
    fn len(&self) -> usize {
        self.act.len()
    }
}

/// Bounds of the action of a single car.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionBounds {
    /// Lower and upper bound of the steering angle in radians.
    pub steering: [f64; 2],

    /// Lower and upper bound of the forward velocity.
    pub velocity: [f64; 2],
}

impl Default for ActionBounds {
    fn default() -> Self {
        Self {
            steering: [-0.33, 0.33],
            velocity: [0.0, 1.2],
        }
    }
}

impl ActionBounds {
    /// Action space of `n_cars` cars, the bounds repeated for every car.
    pub fn space(&self, n_cars: usize) -> BoxSpace {
        let low = (0..n_cars)
            .flat_map(|_| vec![self.steering[0], self.velocity[0]])
            .collect();
        let high = (0..n_cars)
            .flat_map(|_| vec![self.steering[1], self.velocity[1]])
            .collect();
        BoxSpace::new(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_space_repeats_bounds_per_car() {
        let space = ActionBounds::default().space(2);

        assert_eq!(space.low, vec![-0.33, 0.0, -0.33, 0.0]);
        assert_eq!(space.high, vec![0.33, 1.2, 0.33, 1.2]);
    }

    #[test]
    fn test_accessors() {
        let act = MushrAct::from(vec![0.1, 0.5, -0.2, 1.0]);

        assert_eq!(act.steering(1), Some(-0.2));
        assert_eq!(act.velocity(0), Some(0.5));
        assert_eq!(act.velocity(2), None);
    }
}
