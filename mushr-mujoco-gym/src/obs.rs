//! Observation of MuSHR environments.
use crate::layout::{FreeBody, StateLayout};
use anyhow::Result;
use mushr_core::Obs;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Observation, a projection of qpos and qvel onto the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct MushrObs {
    /// Stores an observation.
    pub obs: Array1<f64>,
}

impl From<Vec<f64>> for MushrObs {
    fn from(v: Vec<f64>) -> Self {
        Self {
            obs: Array1::from(v),
        }
    }
}

impl Obs for MushrObs {
    fn len(&self) -> usize {
        self.obs.len()
    }
}

/// Layout of the observation vector.
///
/// Both layouts list the poses of the block and then of each car, followed
/// by the velocities of the block and then of each car.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObsMode {
    /// Pose `[x, y, qw, qx, qy, qz]`, velocity `[vx, vy, wx, wy]`.
    ///
    /// 20 values for one car.
    Quaternion,

    /// Pose `[x, y, yaw]`, velocity `[vx, vy, wz]`.
    ///
    /// 12 values for one car.
    Planar,
}

impl Default for ObsMode {
    fn default() -> Self {
        Self::Quaternion
    }
}

impl ObsMode {
    /// Number of pose values per body.
    pub fn pose_dim(&self) -> usize {
        match self {
            Self::Quaternion => 6,
            Self::Planar => 3,
        }
    }

    /// Number of velocity values per body.
    pub fn vel_dim(&self) -> usize {
        match self {
            Self::Quaternion => 4,
            Self::Planar => 3,
        }
    }

    /// Length of observations for a layout.
    pub fn obs_dim(&self, layout: &StateLayout) -> usize {
        (layout.n_cars() + 1) * (self.pose_dim() + self.vel_dim())
    }

    /// Projects the state onto an observation.
    pub fn observe(&self, layout: &StateLayout, qpos: &[f64], qvel: &[f64]) -> Result<MushrObs> {
        layout.check_state(qpos, qvel)?;

        let mut obs = Vec::with_capacity(self.obs_dim(layout));
        for body in layout.observed_bodies() {
            self.push_pose(&mut obs, body, qpos);
        }
        for body in layout.observed_bodies() {
            self.push_velocity(&mut obs, body, qvel);
        }

        Ok(obs.into())
    }

    fn push_pose(&self, obs: &mut Vec<f64>, body: &FreeBody, qpos: &[f64]) {
        let pos = body.position(qpos);
        let quat = body.quaternion(qpos);
        obs.extend_from_slice(&pos[..2]);
        match self {
            Self::Quaternion => obs.extend_from_slice(quat),
            Self::Planar => obs.push(yaw(quat)),
        }
    }

    fn push_velocity(&self, obs: &mut Vec<f64>, body: &FreeBody, qvel: &[f64]) {
        let lin = body.linear_velocity(qvel);
        let ang = body.angular_velocity(qvel);
        obs.extend_from_slice(&lin[..2]);
        match self {
            Self::Quaternion => obs.extend_from_slice(&ang[..2]),
            Self::Planar => obs.push(ang[2]),
        }
    }
}

/// Rotation about the z axis of a quaternion `[w, x, y, z]`.
pub fn yaw(quat: &[f64]) -> f64 {
    let (w, x, y, z) = (quat[0], quat[1], quat[2], quat[3]);
    (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn layout() -> StateLayout {
        let car = FreeBody {
            name: "car_joint".to_string(),
            qpos_adr: 0,
            dof_adr: 0,
        };
        let block = FreeBody {
            name: "block_joint".to_string(),
            qpos_adr: 14,
            dof_adr: 13,
        };
        StateLayout::new(21, 19, vec![car], block).unwrap()
    }

    fn state() -> (Vec<f64>, Vec<f64>) {
        let mut qpos = vec![0.0; 21];
        qpos[..7].copy_from_slice(&[1.0, 2.0, 0.05, 1.0, 0.0, 0.0, 0.0]);
        let s = FRAC_PI_2.sin() / 2f64.sqrt();
        qpos[14..].copy_from_slice(&[3.0, 4.0, 0.1, s, 0.0, 0.0, s]);
        let qvel = (0..19).map(|i| i as f64 * 0.1).collect();
        (qpos, qvel)
    }

    #[test]
    fn test_quaternion_layout() {
        let (qpos, qvel) = state();
        let obs = ObsMode::Quaternion.observe(&layout(), &qpos, &qvel).unwrap();
        let v = obs.obs.to_vec();

        assert_eq!(v.len(), 20);
        assert_eq!(&v[0..2], &[3.0, 4.0]);
        assert_eq!(&v[2..6], &qpos[17..21]);
        assert_eq!(&v[6..12], &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
        // block: linear xy, angular xy
        assert_eq!(&v[12..16], &[qvel[13], qvel[14], qvel[16], qvel[17]]);
    }

    #[test]
    fn test_planar_layout() {
        let (qpos, qvel) = state();
        let obs = ObsMode::Planar.observe(&layout(), &qpos, &qvel).unwrap();
        let v = obs.obs.to_vec();

        assert_eq!(v.len(), 12);
        assert_eq!(&v[0..2], &[3.0, 4.0]);
        assert!((v[2] - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(&v[3..6], &[1.0, 2.0, 0.0]);
        assert_eq!(&v[6..9], &[qvel[13], qvel[14], qvel[18]]);
        assert_eq!(&v[9..12], &[qvel[0], qvel[1], qvel[5]]);
    }

    #[test]
    fn test_obs_dim_matches_observation() {
        let (qpos, qvel) = state();
        for mode in [ObsMode::Quaternion, ObsMode::Planar].iter() {
            let obs = mode.observe(&layout(), &qpos, &qvel).unwrap();
            assert_eq!(obs.len(), mode.obs_dim(&layout()));
        }
    }

    #[test]
    fn test_rejects_short_state() {
        let (qpos, qvel) = state();

        assert!(ObsMode::Planar.observe(&layout(), &qpos[..20], &qvel).is_err());
    }
}
