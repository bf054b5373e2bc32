//! Rendering modes and rendered frames.
use anyhow::Result;
use image::{GrayImage, RgbImage};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the environment is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Interactive viewer window, updated at every step.
    Human,
    /// Offscreen RGB image.
    RgbArray,
    /// Offscreen depth image.
    DepthArray,
}

impl RenderMode {
    /// All supported modes.
    pub const ALL: [RenderMode; 3] = [Self::Human, Self::RgbArray, Self::DepthArray];

    /// Name of the mode as used in Gymnasium.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::RgbArray => "rgb_array",
            Self::DepthArray => "depth_array",
        }
    }
}

/// Metadata of an environment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
    /// Supported render modes.
    pub render_modes: Vec<RenderMode>,

    /// Frames per second of rendering, `1 / dt` rounded half to even.
    pub render_fps: u32,
}

impl Metadata {
    /// Metadata of an environment advancing `dt` seconds per step.
    pub fn new(dt: f64) -> Self {
        Self {
            render_modes: RenderMode::ALL.to_vec(),
            render_fps: (1.0 / dt).round_ties_even() as u32,
        }
    }
}

/// A rendered image.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// `height x width x 3` pixels.
    Rgb(Array3<u8>),
    /// `height x width` depth values.
    Depth(Array2<f32>),
}

impl Frame {
    /// `(height, width)` of the frame.
    pub fn size(&self) -> (usize, usize) {
        match self {
            Self::Rgb(a) => (a.shape()[0], a.shape()[1]),
            Self::Depth(a) => (a.shape()[0], a.shape()[1]),
        }
    }

    /// Saves the frame as an image file. Depth is normalized to the full gray range.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let (h, w) = self.size();
        match self {
            Self::Rgb(a) => {
                let buf = a.iter().copied().collect::<Vec<_>>();
                let img = RgbImage::from_raw(w as u32, h as u32, buf)
                    .ok_or_else(|| anyhow::anyhow!("Invalid RGB frame of size {}x{}", h, w))?;
                img.save(path)?;
            }
            Self::Depth(a) => {
                let (min, max) = a
                    .iter()
                    .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
                        (lo.min(d), hi.max(d))
                    });
                let scale = if max > min { 255.0 / (max - min) } else { 0.0 };
                let buf = a.iter().map(|&d| ((d - min) * scale) as u8).collect();
                let img = GrayImage::from_raw(w as u32, h as u32, buf)
                    .ok_or_else(|| anyhow::anyhow!("Invalid depth frame of size {}x{}", h, w))?;
                img.save(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_render_fps() {
        // 0.002 s timestep, 50 substeps
        assert_eq!(Metadata::new(0.1).render_fps, 10);
        assert_eq!(Metadata::new(0.03).render_fps, 33);
        assert_eq!(Metadata::new(0.4).render_fps, 2);
    }

    #[test]
    fn test_render_mode_names() {
        let names = RenderMode::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>();

        assert_eq!(names, vec!["human", "rgb_array", "depth_array"]);
        for mode in RenderMode::ALL.iter() {
            let parsed: RenderMode = serde_yaml::from_str(mode.as_str()).unwrap();
            assert_eq!(parsed, *mode);
        }
    }

    #[test]
    fn test_save_frames() -> Result<()> {
        let dir = TempDir::new("frames")?;
        Frame::Rgb(Array3::zeros((4, 6, 3))).save(dir.path().join("rgb.png"))?;
        Frame::Depth(Array2::from_elem((4, 6), 1.5)).save(dir.path().join("depth.png"))?;

        assert!(dir.path().join("rgb.png").exists());
        assert!(dir.path().join("depth.png").exists());
        Ok(())
    }
}
