//! Configuration of [`MushrBlockEnv`](crate::MushrBlockEnv).
//!
//! Scene files are looked up in the directory given by the environment
//! variable `MUSHR_MODEL_DIR` if it exists, otherwise in the `assets/models`
//! directory packaged with this crate.
use crate::{ActionBounds, CostFunction, ObsMode, RenderMode};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    env,
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Directory of the scene files packaged with this crate.
pub const PACKAGED_MODEL_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/models");

/// Default directory of scene files.
pub fn default_model_dir() -> PathBuf {
    match env::var("MUSHR_MODEL_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from(PACKAGED_MODEL_DIR),
    }
}

/// Camera parameters passed through to the renderer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Body tracked by the camera, `-1` for a free camera.
    pub trackbodyid: i32,

    /// Distance from the camera to its look-at point.
    pub distance: f64,

    /// Elevation in degrees.
    pub elevation: Option<f64>,

    /// Azimuth in degrees.
    pub azimuth: Option<f64>,

    /// Width of offscreen frames in pixels.
    pub width: usize,

    /// Height of offscreen frames in pixels.
    pub height: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            trackbodyid: -1,
            distance: 4.0,
            elevation: None,
            azimuth: None,
            width: 480,
            height: 480,
        }
    }
}

/// A scene and the names of its free joints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    /// File name of the scene description.
    pub model_file: String,

    /// Physics substeps per environment step.
    pub frame_skip: usize,

    /// Free joints of the cars. Actions have `[steering, velocity]` per car in this order.
    pub cars: Vec<String>,

    /// Free joint of the block.
    pub block: String,

    /// Bounds of the action of a single car.
    pub action_bounds: ActionBounds,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::block()
    }
}

impl SceneConfig {
    /// A single car and a block.
    pub fn block() -> Self {
        Self {
            model_file: "block.xml".to_string(),
            frame_skip: 50,
            cars: vec!["car_joint".to_string()],
            block: "block_joint".to_string(),
            action_bounds: ActionBounds::default(),
        }
    }

    /// Two cars, a block and static obstacles.
    pub fn multi_agent_block_obstacles() -> Self {
        Self {
            model_file: "multi_robot_block_obstacles.xml".to_string(),
            frame_skip: 50,
            cars: vec!["car0_joint".to_string(), "car1_joint".to_string()],
            block: "block_joint".to_string(),
            action_bounds: ActionBounds::default(),
        }
    }
}

/// Configuration of [`MushrBlockEnv`](crate::MushrBlockEnv).
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::Config: Serialize",
    deserialize = "C::Config: DeserializeOwned"
))]
pub struct MushrEnvConfig<C: CostFunction> {
    /// Scene.
    pub scene: SceneConfig,

    /// Directory of scene files.
    pub model_dir: PathBuf,

    /// Camera.
    pub camera: CameraConfig,

    /// Rendering mode, `None` for no rendering.
    pub render_mode: Option<RenderMode>,

    /// Layout of observations.
    pub obs_mode: ObsMode,

    /// Configuration of the cost function.
    pub cost_config: C::Config,
}

impl<C: CostFunction> Clone for MushrEnvConfig<C> {
    fn clone(&self) -> Self {
        Self {
            scene: self.scene.clone(),
            model_dir: self.model_dir.clone(),
            camera: self.camera.clone(),
            render_mode: self.render_mode,
            obs_mode: self.obs_mode,
            cost_config: self.cost_config.clone(),
        }
    }
}

impl<C: CostFunction> fmt::Debug for MushrEnvConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MushrEnvConfig")
            .field("scene", &self.scene)
            .field("model_dir", &self.model_dir)
            .field("camera", &self.camera)
            .field("render_mode", &self.render_mode)
            .field("obs_mode", &self.obs_mode)
            .field("cost_config", &self.cost_config)
            .finish()
    }
}

impl<C: CostFunction> Default for MushrEnvConfig<C> {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            model_dir: default_model_dir(),
            camera: CameraConfig::default(),
            render_mode: None,
            obs_mode: ObsMode::default(),
            cost_config: C::Config::default(),
        }
    }
}

impl<C: CostFunction> MushrEnvConfig<C> {
    /// Sets the scene.
    pub fn scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Sets the file name of the scene description.
    pub fn model_file(mut self, model_file: impl Into<String>) -> Self {
        self.scene.model_file = model_file.into();
        self
    }

    /// Sets the directory of scene files.
    pub fn model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    /// Sets the number of physics substeps per step.
    pub fn frame_skip(mut self, frame_skip: usize) -> Self {
        self.scene.frame_skip = frame_skip;
        self
    }

    /// Sets the camera.
    pub fn camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Sets the rendering mode.
    pub fn render_mode(mut self, render_mode: Option<RenderMode>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Sets the layout of observations.
    pub fn obs_mode(mut self, obs_mode: ObsMode) -> Self {
        self.obs_mode = obs_mode;
        self
    }

    /// Sets the configuration of the cost function.
    pub fn cost_config(mut self, cost_config: C::Config) -> Self {
        self.cost_config = cost_config;
        self
    }

    /// Path of the scene description.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.scene.model_file)
    }

    /// Constructs [`MushrEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`MushrEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
