//! Reward computation.
use crate::MushrAct;
use anyhow::Result;
use mushr_core::record::Record;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// Computes the reward of a step and its diagnostics.
///
/// The environment calls [`CostFunction::compute`] once per step, after the
/// physics has advanced and the observation has been computed.
pub trait CostFunction {
    /// Configuration.
    type Config: Clone + Debug + Default + Serialize + DeserializeOwned;

    /// Builds the cost function.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Returns the reward for `act` and a record of diagnostic values.
    fn compute(&mut self, act: &MushrAct) -> (f32, Record);
}

/// Configuration of [`ZeroCost`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ZeroCostConfig {}

/// Reward 0 with empty diagnostics for any action.
#[derive(Clone, Debug, Default)]
pub struct ZeroCost;

impl CostFunction for ZeroCost {
    type Config = ZeroCostConfig;

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self)
    }

    fn compute(&mut self, _act: &MushrAct) -> (f32, Record) {
        (0.0, Record::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cost() {
        let mut cost = ZeroCost::build(&ZeroCostConfig::default()).unwrap();
        for act in [
            MushrAct::new(0.0, 0.0),
            MushrAct::new(5.0, -3.0),
            MushrAct::from(vec![f64::NAN; 4]),
        ]
        .iter()
        {
            let (reward, info) = cost.compute(act);
            assert_eq!(reward, 0.0);
            assert!(info.is_empty());
        }
    }
}
