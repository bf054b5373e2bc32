//! Wrappers of environments.
use crate::{
    record::{Record, RecordValue},
    Env, Step,
};
use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

/// Configuration of [`TimeLimit`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimeLimitConfig<C> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// The number of steps after which an episode is truncated.
    pub max_episode_steps: usize,
}

impl<C> TimeLimitConfig<C> {
    /// Constructs a configuration.
    pub fn new(env_config: C, max_episode_steps: usize) -> Self {
        Self {
            env_config,
            max_episode_steps,
        }
    }
}

/// Truncates episodes after a fixed number of steps.
///
/// When an episode ends, the logging record gets an `episode_length` entry.
pub struct TimeLimit<E: Env> {
    env: E,
    max_episode_steps: usize,
    count_steps: usize,
}

impl<E: Env> TimeLimit<E> {
    /// Wraps an environment.
    pub fn new(env: E, max_episode_steps: usize) -> Self {
        Self {
            env,
            max_episode_steps,
            count_steps: 0,
        }
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Returns a mutable reference to the wrapped environment.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Unwraps the environment.
    pub fn into_inner(self) -> E {
        self.env
    }

    /// The maximum number of steps in an episode.
    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    /// The number of steps taken in the current episode.
    pub fn elapsed_steps(&self) -> usize {
        self.count_steps
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Config = TimeLimitConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self::new(
            E::build(&config.env_config, seed)?,
            config.max_episode_steps,
        ))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let (step, mut record) = self.env.step(a)?;
        self.count_steps += 1;

        let is_truncated = step.is_truncated || self.count_steps >= self.max_episode_steps;
        if step.is_terminated || is_truncated {
            trace!("Episode ends after {} steps", self.count_steps);
            record.insert(
                "episode_length",
                RecordValue::Scalar(self.count_steps as f32),
            );
            self.count_steps = 0;
        }

        Ok((
            Step::new(
                step.obs,
                step.act,
                step.reward,
                step.is_terminated,
                is_truncated,
                step.info,
                step.init_obs,
            ),
            record,
        ))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.count_steps = 0;
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.count_steps = 0;
        self.env.reset_with_index(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Act, DefaultEvaluator, Evaluator, Obs, Policy};

    #[derive(Clone, Debug)]
    struct CounterObs(usize);

    impl Obs for CounterObs {
        fn len(&self) -> usize {
            1
        }
    }

    #[derive(Clone, Debug)]
    struct UnitAct;

    impl Act for UnitAct {
        fn len(&self) -> usize {
            1
        }
    }

    /// Never ends an episode on its own and pays one unit of reward per step.
    struct Counter {
        t: usize,
    }

    impl Env for Counter {
        type Config = ();
        type Obs = CounterObs;
        type Act = UnitAct;
        type Info = ();

        fn build(_config: &(), _seed: i64) -> Result<Self> {
            Ok(Self { t: 0 })
        }

        fn step(&mut self, a: &UnitAct) -> Result<(Step<Self>, Record)> {
            self.t += 1;
            let step = Step::new(CounterObs(self.t), a.clone(), 1.0, false, false, (), None);
            Ok((step, Record::empty()))
        }

        fn reset(&mut self) -> Result<CounterObs> {
            self.t = 0;
            Ok(CounterObs(0))
        }

        fn reset_with_index(&mut self, _ix: usize) -> Result<CounterObs> {
            self.reset()
        }
    }

    struct Constant;

    impl Policy<TimeLimit<Counter>> for Constant {
        fn sample(&mut self, _obs: &CounterObs) -> UnitAct {
            UnitAct
        }
    }

    #[test]
    fn test_truncates_at_max_episode_steps() -> Result<()> {
        let mut env = TimeLimit::<Counter>::build(&TimeLimitConfig::new((), 3), 0)?;
        env.reset()?;

        for _ in 0..2 {
            let (step, record) = env.step(&UnitAct)?;
            assert!(!step.is_done());
            assert!(record.is_empty());
        }
        let (step, record) = env.step(&UnitAct)?;
        assert!(step.is_truncated);
        assert!(!step.is_terminated);
        assert_eq!(record.get_scalar("episode_length")?, 3.0);
        assert_eq!(env.elapsed_steps(), 0);

        Ok(())
    }

    #[test]
    fn test_step_with_reset_sets_init_obs() -> Result<()> {
        let mut env = TimeLimit::new(Counter { t: 0 }, 2);
        env.reset()?;

        let (step, _) = env.step_with_reset(&UnitAct)?;
        assert!(step.init_obs.is_none());
        let (step, _) = env.step_with_reset(&UnitAct)?;
        assert_eq!(step.obs.0, 2);
        assert_eq!(step.init_obs.map(|o| o.0), Some(0));

        Ok(())
    }

    #[test]
    fn test_default_evaluator_averages_returns() -> Result<()> {
        let config = TimeLimitConfig::new((), 5);
        let mut evaluator = DefaultEvaluator::<TimeLimit<Counter>>::new(&config, 0, 3)?;
        let record = evaluator.evaluate(&mut Constant)?;

        assert_eq!(record.get_scalar("Episode return")?, 5.0);

        Ok(())
    }
}
