//! Physics simulation session.
//!
//! [`Simulator`] is the seam between the environment and the physics engine.
//! [`MujocoSim`] implements it on top of the MuJoCo Python bindings.
mod mujoco;
pub use self::mujoco::MujocoSim;

use crate::{CameraConfig, Frame, RenderMode};
use anyhow::Result;
use std::path::Path;

/// Type of a joint, numbered as `mjtJoint` in MuJoCo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointKind {
    /// Six degrees of freedom, seven position coordinates.
    Free,
    /// Three rotational degrees of freedom.
    Ball,
    /// One translational degree of freedom.
    Slide,
    /// One rotational degree of freedom.
    Hinge,
}

impl JointKind {
    /// Converts MuJoCo's `mjtJoint` value.
    pub fn from_mj(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Free),
            1 => Some(Self::Ball),
            2 => Some(Self::Slide),
            3 => Some(Self::Hinge),
            _ => None,
        }
    }
}

/// A joint of the loaded scene and its addresses in the state vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JointInfo {
    /// Type of the joint.
    pub kind: JointKind,

    /// Start index in qpos.
    pub qpos_adr: usize,

    /// Start index in qvel.
    pub dof_adr: usize,
}

/// A physics simulation session owning the generalized state `(qpos, qvel)`.
pub trait Simulator {
    /// Loads a scene description.
    fn load(model_path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Length of qpos.
    fn nq(&self) -> usize;

    /// Length of qvel.
    fn nv(&self) -> usize;

    /// Number of actuators.
    fn nu(&self) -> usize;

    /// Duration of a single physics substep in seconds.
    fn timestep(&self) -> f64;

    /// Looks up a joint by name, `None` if the scene has no such joint.
    fn joint(&self, name: &str) -> Result<Option<JointInfo>>;

    /// qpos of the initial configuration declared by the scene.
    fn init_qpos(&self) -> &[f64];

    /// qvel of the initial configuration declared by the scene.
    fn init_qvel(&self) -> &[f64];

    /// Current qpos.
    fn qpos(&self) -> Result<Vec<f64>>;

    /// Current qvel.
    fn qvel(&self) -> Result<Vec<f64>>;

    /// Resets all simulation data, including time, controls and warm starts.
    fn reset_data(&mut self) -> Result<()>;

    /// Overwrites qpos and qvel and recomputes derived quantities.
    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<()>;

    /// Sets `ctrl` as actuator controls and advances `n_frames` substeps.
    fn do_simulation(&mut self, ctrl: &[f64], n_frames: usize) -> Result<()>;

    /// Renders the current state.
    ///
    /// Returns `None` for [`RenderMode::Human`], which draws to a window.
    fn render(&mut self, mode: RenderMode, camera: &CameraConfig) -> Result<Option<Frame>>;

    /// Releases viewers and renderers.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
