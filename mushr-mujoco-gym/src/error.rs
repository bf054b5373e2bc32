//! Errors of the MuSHR environments.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or driving a MuSHR environment.
#[derive(Error, Debug)]
pub enum MushrEnvError {
    /// The scene description file does not exist.
    #[error("Scene file does not exist: {0}")]
    SceneNotFound(PathBuf),

    /// Frame skip must be at least one substep.
    #[error("frame_skip must be positive, got {0}")]
    InvalidFrameSkip(usize),

    /// No environment is registered with the id.
    #[error("Unknown environment id: {0}")]
    UnknownEnvId(String),

    /// The scene has no joint with the name.
    #[error("Joint not found in scene: {0}")]
    JointNotFound(String),

    /// The joint exists but is not a free joint.
    #[error("Joint {0} is not a free joint")]
    NotFreeJoint(String),

    /// The joint's slots do not fit into the state vectors of the scene.
    #[error("Joint {name} does not fit in state vectors (nq = {nq}, nv = {nv})")]
    LayoutOutOfRange {
        /// Joint name.
        name: String,
        /// Length of qpos.
        nq: usize,
        /// Length of qvel.
        nv: usize,
    },

    /// The scene has a different number of actuators than the cars need.
    #[error("Scene has {actual} actuators, {expected} expected for {n_cars} car(s)")]
    ActuatorMismatch {
        /// Expected number of actuators.
        expected: usize,
        /// Number of actuators in the scene.
        actual: usize,
        /// Number of cars in the scene configuration.
        n_cars: usize,
    },

    /// The action does not have one element per actuator.
    #[error("Action dimension mismatch: expected {expected}, found {actual}")]
    ActionDim {
        /// Number of actuators.
        expected: usize,
        /// Length of the given action.
        actual: usize,
    },

    /// The initial states do not have six elements per body.
    #[error("Initial states must have {expected} elements, found {actual}")]
    InitStateLen {
        /// Expected length.
        expected: usize,
        /// Length of the given sequence.
        actual: usize,
    },

    /// The state vectors do not have the lengths of the scene.
    #[error("State length mismatch: expected (nq, nv) = ({nq}, {nv}), found ({qpos}, {qvel})")]
    StateLen {
        /// Length of qpos in the scene.
        nq: usize,
        /// Length of qvel in the scene.
        nv: usize,
        /// Length of the given qpos.
        qpos: usize,
        /// Length of the given qvel.
        qvel: usize,
    },
}
