//! The block-pushing environment.
use crate::{
    layout::StateLayout, CameraConfig, CostFunction, Frame, Metadata, MujocoSim, MushrAct,
    MushrEnvConfig, MushrEnvError, MushrObs, ObsMode, RenderMode, Simulator, ZeroCost,
};
use anyhow::Result;
use mushr_core::{
    record::{Record, RecordValue},
    BoxSpace, Env, Step,
};
use log::{debug, info, trace, warn};

/// MuSHR cars pushing a block, simulated with MuJoCo.
///
/// The environment maps `[steering, velocity]` of every car onto the
/// actuators of the scene and projects the state onto an observation of the
/// planar poses and velocities of the block and the cars (see [`ObsMode`]).
///
/// It never ends an episode: [`Step::is_terminated`] and
/// [`Step::is_truncated`] are always `false`. Wrap it in
/// [`TimeLimit`](mushr_core::TimeLimit), as
/// [`EnvRegistry::make`](crate::EnvRegistry::make) does, to bound episodes.
///
/// Rewards are delegated to the cost function `C`.
pub struct MushrBlockEnv<S = MujocoSim, C = ZeroCost>
where
    S: Simulator,
    C: CostFunction,
{
    sim: S,
    layout: StateLayout,
    cost: C,
    frame_skip: usize,
    obs_mode: ObsMode,
    render_mode: Option<RenderMode>,
    camera: CameraConfig,
    observation_space: BoxSpace,
    action_space: BoxSpace,
    metadata: Metadata,
}

impl<S, C> MushrBlockEnv<S, C>
where
    S: Simulator,
    C: CostFunction,
{
    /// Observation space, unbounded in every dimension.
    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// Action space, `[steering, velocity]` per car.
    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    /// Render modes and frame rate.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Simulated seconds per environment step.
    pub fn dt(&self) -> f64 {
        self.sim.timestep() * self.frame_skip as f64
    }

    /// Physics substeps per environment step.
    pub fn frame_skip(&self) -> usize {
        self.frame_skip
    }

    /// Layout of the state vectors.
    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    /// The simulation session.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Rendering mode.
    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    /// Replaces the cost function.
    pub fn set_cost_function(&mut self, cost: C) {
        self.cost = cost;
    }

    /// Current observation.
    pub fn get_obs(&self) -> Result<MushrObs> {
        let qpos = self.sim.qpos()?;
        let qvel = self.sim.qvel()?;
        self.obs_mode.observe(&self.layout, &qpos, &qvel)
    }

    /// Overwrites qpos and qvel.
    pub fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<()> {
        self.layout.check_state(qpos, qvel)?;
        self.sim.set_state(qpos, qvel)
    }

    /// Restores the initial configuration of the scene and returns the observation.
    pub fn reset_model(&mut self) -> Result<MushrObs> {
        let qpos = self.sim.init_qpos().to_vec();
        let qvel = self.sim.init_qvel().to_vec();
        self.set_state(&qpos, &qvel)?;
        self.get_obs()
    }

    /// Places the cars and the block and returns the observation.
    ///
    /// `init_states` holds `[x, y, qw, qx, qy, qz]` of every car, in the order
    /// of the scene configuration, followed by the same six values of the
    /// block. Heights, joint angles and velocities keep their current values.
    pub fn set_init_states(&mut self, init_states: &[f64]) -> Result<MushrObs> {
        let expected = self.layout.init_states_len();
        if init_states.len() != expected {
            return Err(MushrEnvError::InitStateLen {
                expected,
                actual: init_states.len(),
            }
            .into());
        }

        let mut qpos = self.sim.qpos()?;
        let qvel = self.sim.qvel()?;
        let bodies = self
            .layout
            .cars()
            .iter()
            .chain(std::iter::once(self.layout.block()));
        for (body, pose) in bodies.zip(init_states.chunks(6)) {
            body.set_planar_pose(&mut qpos, &pose[..2], &pose[2..]);
        }
        debug!("Initial states set to {:?}", init_states);

        self.set_state(&qpos, &qvel)?;
        self.get_obs()
    }

    /// Renders the current state with the configured mode.
    ///
    /// Returns `None` without a rendering mode and for [`RenderMode::Human`].
    pub fn render(&mut self) -> Result<Option<Frame>> {
        match self.render_mode {
            Some(mode) => self.sim.render(mode, &self.camera),
            None => {
                warn!("render() is called without a rendering mode");
                Ok(None)
            }
        }
    }

    /// Closes viewers and renderers.
    pub fn close(&mut self) -> Result<()> {
        self.sim.close()
    }
}

impl<S, C> Env for MushrBlockEnv<S, C>
where
    S: Simulator,
    C: CostFunction,
{
    type Config = MushrEnvConfig<C>;
    type Obs = MushrObs;
    type Act = MushrAct;
    type Info = Record;

    /// Constructs [`MushrBlockEnv`].
    ///
    /// The environment is deterministic and `seed` is only logged.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let scene = &config.scene;
        if scene.frame_skip == 0 {
            return Err(MushrEnvError::InvalidFrameSkip(scene.frame_skip).into());
        }
        let model_path = config.model_path();
        if !model_path.is_file() {
            return Err(MushrEnvError::SceneNotFound(model_path).into());
        }
        info!("Build MushrBlockEnv from {:?} (seed = {})", model_path, seed);

        let sim = S::load(&model_path)?;
        let layout = StateLayout::resolve(&sim, scene)?;
        let n_cars = layout.n_cars();
        if sim.nu() != 2 * n_cars {
            return Err(MushrEnvError::ActuatorMismatch {
                expected: 2 * n_cars,
                actual: sim.nu(),
                n_cars,
            }
            .into());
        }

        let observation_space = BoxSpace::unbounded(config.obs_mode.obs_dim(&layout));
        let action_space = scene.action_bounds.space(n_cars);
        let metadata = Metadata::new(sim.timestep() * scene.frame_skip as f64);
        info!(
            "Observation dim = {}, action dim = {}, render_mode = {}, render_fps = {}",
            observation_space.dim(),
            action_space.dim(),
            config.render_mode.map_or("none", |m| m.as_str()),
            metadata.render_fps
        );

        Ok(Self {
            sim,
            layout,
            cost: C::build(&config.cost_config)?,
            frame_skip: scene.frame_skip,
            obs_mode: config.obs_mode,
            render_mode: config.render_mode,
            camera: config.camera.clone(),
            observation_space,
            action_space,
            metadata,
        })
    }

    /// Advances the physics by `frame_skip` substeps.
    ///
    /// Actions outside the action space are passed to the actuators unchanged.
    /// The returned record holds the diagnostics of the cost function together
    /// with `reward` and `obs`.
    fn step(&mut self, a: &MushrAct) -> Result<(Step<Self>, Record)> {
        trace!("MushrBlockEnv::step({:?})", a.act);
        let ctrl = a.to_vec();
        if ctrl.len() != self.sim.nu() {
            return Err(MushrEnvError::ActionDim {
                expected: self.sim.nu(),
                actual: ctrl.len(),
            }
            .into());
        }
        self.sim.do_simulation(&ctrl, self.frame_skip)?;

        let obs = self.get_obs()?;
        let (reward, info) = self.cost.compute(a);

        if self.render_mode == Some(RenderMode::Human) {
            self.render()?;
        }

        let mut record = info.clone();
        record.merge_inplace(Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            (
                "obs",
                RecordValue::Array1(obs.obs.iter().map(|&x| x as f32).collect()),
            ),
        ]));
        let step = Step::new(obs, a.clone(), reward, false, false, info, None);

        Ok((step, record))
    }

    /// Resets the simulation and restores the initial configuration of the scene.
    fn reset(&mut self) -> Result<MushrObs> {
        debug!("MushrBlockEnv::reset()");
        self.sim.reset_data()?;
        let obs = self.reset_model()?;

        if self.render_mode == Some(RenderMode::Human) {
            self.render()?;
        }

        Ok(obs)
    }

    /// Same as [`Env::reset`], the initial configuration is not randomized.
    fn reset_with_index(&mut self, _ix: usize) -> Result<MushrObs> {
        self.reset()
    }
}
