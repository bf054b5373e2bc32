//! MuJoCo simulation session through the Python bindings.
use super::{JointInfo, JointKind, Simulator};
use crate::{CameraConfig, Frame, RenderMode};
use anyhow::{anyhow, Result};
use log::{info, trace, warn};
use numpy::{PyArray1, PyArray2, PyArray3};
use pyo3::{
    types::{PyModule, PyTuple},
    IntoPy, Py, PyObject, Python, ToPyObject,
};
use std::path::Path;

/// Python functions wrapping `mujoco` calls.
const HELPER: &str = include_str!("mushr_sim.py");

/// A MuJoCo model and its data, owned on the Python side.
///
/// Requires Python with the `mujoco` package (version 3 or later).
pub struct MujocoSim {
    helper: PyObject,
    model: PyObject,
    data: PyObject,
    nq: usize,
    nv: usize,
    nu: usize,
    timestep: f64,
    init_qpos: Vec<f64>,
    init_qvel: Vec<f64>,
    viewer: Option<PyObject>,
    renderer: Option<PyObject>,
}

impl MujocoSim {
    fn read(&self, py: Python, attr: &str) -> Result<Vec<f64>> {
        let obj = self.data.getattr(py, attr)?;
        let arr: &PyArray1<f64> = obj.extract(py)?;
        let v = arr.readonly().as_array().to_vec();
        Ok(v)
    }

    fn call(&self, py: Python, name: &str, args: impl IntoPy<Py<PyTuple>>) -> Result<PyObject> {
        Ok(self.helper.call_method1(py, name, args)?)
    }
}

impl Simulator for MujocoSim {
    fn load(model_path: &Path) -> Result<Self> {
        Python::with_gil(|py| -> Result<Self> {
            let helper = PyModule::from_code(py, HELPER, "mushr_sim.py", "mushr_sim")?;
            let version: String = helper.getattr("version")?.call0()?.extract()?;
            info!("MuJoCo version = {}", version);

            let path = model_path
                .to_str()
                .ok_or_else(|| anyhow!("Scene path is not valid UTF-8: {:?}", model_path))?;
            let (model, data): (PyObject, PyObject) =
                helper.getattr("load")?.call1((path,))?.extract()?;
            let (nq, nv, nu, timestep): (usize, usize, usize, f64) = helper
                .getattr("dims")?
                .call1((model.clone_ref(py),))?
                .extract()?;
            info!(
                "Loaded {:?}: nq = {}, nv = {}, nu = {}, timestep = {}",
                model_path, nq, nv, nu, timestep
            );

            let mut sim = Self {
                helper: helper.to_object(py),
                model,
                data,
                nq,
                nv,
                nu,
                timestep,
                init_qpos: vec![],
                init_qvel: vec![],
                viewer: None,
                renderer: None,
            };
            sim.init_qpos = sim.read(py, "qpos")?;
            sim.init_qvel = sim.read(py, "qvel")?;
            Ok(sim)
        })
    }

    fn nq(&self) -> usize {
        self.nq
    }

    fn nv(&self) -> usize {
        self.nv
    }

    fn nu(&self) -> usize {
        self.nu
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn joint(&self, name: &str) -> Result<Option<JointInfo>> {
        Python::with_gil(|py| {
            let ret: Option<(i32, usize, usize)> = self
                .call(py, "joint", (self.model.clone_ref(py), name))?
                .extract(py)?;
            match ret {
                None => Ok(None),
                Some((kind, qpos_adr, dof_adr)) => {
                    let kind = JointKind::from_mj(kind)
                        .ok_or_else(|| anyhow!("Unknown joint type {} of {}", kind, name))?;
                    Ok(Some(JointInfo {
                        kind,
                        qpos_adr,
                        dof_adr,
                    }))
                }
            }
        })
    }

    fn init_qpos(&self) -> &[f64] {
        &self.init_qpos
    }

    fn init_qvel(&self) -> &[f64] {
        &self.init_qvel
    }

    fn qpos(&self) -> Result<Vec<f64>> {
        Python::with_gil(|py| self.read(py, "qpos"))
    }

    fn qvel(&self) -> Result<Vec<f64>> {
        Python::with_gil(|py| self.read(py, "qvel"))
    }

    fn reset_data(&mut self) -> Result<()> {
        Python::with_gil(|py| {
            self.call(py, "reset", (self.model.clone_ref(py), self.data.clone_ref(py)))?;
            Ok(())
        })
    }

    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<()> {
        Python::with_gil(|py| {
            self.call(
                py,
                "set_state",
                (
                    self.model.clone_ref(py),
                    self.data.clone_ref(py),
                    PyArray1::from_slice(py, qpos),
                    PyArray1::from_slice(py, qvel),
                ),
            )?;
            Ok(())
        })
    }

    fn do_simulation(&mut self, ctrl: &[f64], n_frames: usize) -> Result<()> {
        trace!("MujocoSim::do_simulation({:?}, {})", ctrl, n_frames);
        Python::with_gil(|py| {
            self.call(
                py,
                "do_simulation",
                (
                    self.model.clone_ref(py),
                    self.data.clone_ref(py),
                    PyArray1::from_slice(py, ctrl),
                    n_frames,
                ),
            )?;
            Ok(())
        })
    }

    fn render(&mut self, mode: RenderMode, camera: &CameraConfig) -> Result<Option<Frame>> {
        Python::with_gil(|py| {
            let cam = (
                camera.trackbodyid,
                camera.distance,
                camera.elevation,
                camera.azimuth,
            );

            if mode == RenderMode::Human {
                if self.viewer.is_none() {
                    let viewer = self.call(
                        py,
                        "open_viewer",
                        (
                            self.model.clone_ref(py),
                            self.data.clone_ref(py),
                            cam.0,
                            cam.1,
                            cam.2,
                            cam.3,
                        ),
                    )?;
                    self.viewer = Some(viewer);
                }
                if let Some(viewer) = self.viewer.as_ref() {
                    self.call(py, "sync_viewer", (viewer.clone_ref(py),))?;
                }
                return Ok(None);
            }

            let renderer = match self.renderer.as_ref() {
                Some(renderer) => renderer.clone_ref(py),
                None => {
                    let renderer = self.call(
                        py,
                        "renderer",
                        (self.model.clone_ref(py), camera.width, camera.height),
                    )?;
                    self.renderer = Some(renderer.clone_ref(py));
                    renderer
                }
            };
            let depth = mode == RenderMode::DepthArray;
            let frame = self.call(
                py,
                "render",
                (
                    renderer,
                    self.model.clone_ref(py),
                    self.data.clone_ref(py),
                    depth,
                    cam.0,
                    cam.1,
                    cam.2,
                    cam.3,
                ),
            )?;

            let frame = if depth {
                let arr: &PyArray2<f32> = frame.extract(py)?;
                let depth = arr.readonly().as_array().to_owned();
                Frame::Depth(depth)
            } else {
                let arr: &PyArray3<u8> = frame.extract(py)?;
                let rgb = arr.readonly().as_array().to_owned();
                Frame::Rgb(rgb)
            };
            Ok(Some(frame))
        })
    }

    fn close(&mut self) -> Result<()> {
        Python::with_gil(|py| {
            if let Some(viewer) = self.viewer.take() {
                self.call(py, "close_viewer", (viewer,))?;
            }
            if let Some(renderer) = self.renderer.take() {
                self.call(py, "close_renderer", (renderer,))?;
            }
            Ok(())
        })
    }
}

impl Drop for MujocoSim {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close MuJoCo viewer or renderer: {}", e);
        }
    }
}
