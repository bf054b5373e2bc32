#![warn(missing_docs)]
//! MuSHR cars pushing a block, simulated with [MuJoCo](https://mujoco.org).
//!
//! [`MushrBlockEnv`] is a thin adapter over a MuJoCo simulation session. It
//! loads a scene description, maps `[steering, velocity]` actions onto the
//! actuators of the cars, projects the generalized state `(qpos, qvel)` onto a
//! compact observation and delegates rewards to a [`CostFunction`].
//!
//! The physics session is reached through the MuJoCo Python bindings with
//! [`PyO3`](https://github.com/PyO3/pyo3), so the `mujoco` Python package
//! (version 3 or later) must be importable by the embedded interpreter.
//! [`Simulator`] is the seam to the physics engine and [`MujocoSim`] its
//! implementation.
//!
//! ## State layout
//!
//! Cars and the block are free bodies of the scene. Their slots in qpos and
//! qvel are looked up by joint name when the environment is built (see
//! [`StateLayout`]) and the scene is rejected if a joint is missing or is not
//! a free joint.
//!
//! ## Observation
//!
//! [`ObsMode::Quaternion`] lists `[x, y, qw, qx, qy, qz]` of the block and of
//! every car, followed by `[vx, vy, wx, wy]` of the block and of every car.
//! [`ObsMode::Planar`] replaces the orientation with the yaw angle and the
//! angular velocity with the yaw rate. The observation space is derived from
//! the mode and the number of cars.
//!
//! ## Environments
//!
//! [`EnvRegistry`] maps ids to configurations:
//!
//! * `MushrBlock-v0`: one car and a block.
//! * `MultiAgentMushrBlockObstacles-v0`: two cars, a block and static obstacles.
//!
//! Both truncate episodes after 1000 steps through [`mushr_core::TimeLimit`].
mod act;
mod config;
mod cost;
mod env;
mod error;
pub mod layout;
mod obs;
mod registry;
mod render;
pub mod sim;
pub use act::{ActionBounds, MushrAct};
pub use config::{default_model_dir, CameraConfig, MushrEnvConfig, SceneConfig, PACKAGED_MODEL_DIR};
pub use cost::{CostFunction, ZeroCost, ZeroCostConfig};
pub use env::MushrBlockEnv;
pub use error::MushrEnvError;
pub use layout::StateLayout;
pub use obs::{yaw, MushrObs, ObsMode};
pub use registry::{EnvRegistry, EnvSpec};
pub use render::{Frame, Metadata, RenderMode};
pub use sim::{MujocoSim, Simulator};
