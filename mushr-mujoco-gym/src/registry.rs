//! Lookup table of environment ids.
use crate::{CostFunction, MushrBlockEnv, MushrEnvConfig, MushrEnvError, SceneConfig, Simulator};
use anyhow::Result;
use log::info;
use mushr_core::{Env, TimeLimit, TimeLimitConfig};
use std::collections::BTreeMap;

/// A registered environment.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvSpec {
    /// Environment id, e.g., `MushrBlock-v0`.
    pub id: String,

    /// Scene of the environment.
    pub scene: SceneConfig,

    /// Episodes are truncated after this number of steps.
    pub max_episode_steps: usize,
}

/// Environment ids and the configurations they stand for.
///
/// ```no_run
/// use mushr_core::Env;
/// use mushr_mujoco_gym::{EnvRegistry, MujocoSim, MushrAct, ZeroCost};
///
/// # fn main() -> anyhow::Result<()> {
/// let registry = EnvRegistry::new();
/// let mut env = registry.make::<MujocoSim, ZeroCost>("MushrBlock-v0", 0)?;
/// let _obs = env.reset()?;
/// let (_step, _) = env.step(&MushrAct::new(0.1, 0.5))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct EnvRegistry {
    specs: BTreeMap<String, EnvSpec>,
}

impl Default for EnvRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvRegistry {
    /// Registry with the environments of this crate.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(EnvSpec {
            id: "MushrBlock-v0".to_string(),
            scene: SceneConfig::block(),
            max_episode_steps: 1000,
        });
        registry.register(EnvSpec {
            id: "MultiAgentMushrBlockObstacles-v0".to_string(),
            scene: SceneConfig::multi_agent_block_obstacles(),
            max_episode_steps: 1000,
        });
        registry
    }

    /// Registry without entries.
    pub fn empty() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    /// Adds an environment, replacing an existing entry with the same id.
    pub fn register(&mut self, spec: EnvSpec) {
        self.specs.insert(spec.id.clone(), spec);
    }

    /// Looks up an environment.
    pub fn spec(&self, id: &str) -> Result<&EnvSpec> {
        self.specs
            .get(id)
            .ok_or_else(|| MushrEnvError::UnknownEnvId(id.to_string()).into())
    }

    /// Registered ids in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(|k| k.as_str())
    }

    /// Configuration of a registered environment with default settings.
    pub fn config<C: CostFunction>(&self, id: &str) -> Result<TimeLimitConfig<MushrEnvConfig<C>>> {
        let spec = self.spec(id)?;
        Ok(TimeLimitConfig::new(
            MushrEnvConfig::default().scene(spec.scene.clone()),
            spec.max_episode_steps,
        ))
    }

    /// Builds a registered environment with default settings.
    pub fn make<S, C>(&self, id: &str, seed: i64) -> Result<TimeLimit<MushrBlockEnv<S, C>>>
    where
        S: Simulator,
        C: CostFunction,
    {
        info!("Make {}", id);
        TimeLimit::build(&self.config::<C>(id)?, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZeroCost;

    #[test]
    fn test_registered_ids() {
        let registry = EnvRegistry::new();
        let ids = registry.ids().collect::<Vec<_>>();

        assert_eq!(ids, vec!["MultiAgentMushrBlockObstacles-v0", "MushrBlock-v0"]);
        assert_eq!(registry.spec("MushrBlock-v0").unwrap().max_episode_steps, 1000);
        assert_eq!(
            registry
                .spec("MultiAgentMushrBlockObstacles-v0")
                .unwrap()
                .scene
                .cars
                .len(),
            2
        );
    }

    #[test]
    fn test_unknown_id() {
        let registry = EnvRegistry::new();
        let err = registry.config::<ZeroCost>("Pong-v0").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MushrEnvError>(),
            Some(MushrEnvError::UnknownEnvId(id)) if id == "Pong-v0"
        ));
    }
}
