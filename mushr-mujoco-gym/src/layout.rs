//! Named layout of the generalized state vectors.
//!
//! Cars and the block are free bodies. Each free joint occupies seven
//! entries of qpos, `[x, y, z, qw, qx, qy, qz]`, and six entries of qvel,
//! `[vx, vy, vz, wx, wy, wz]`. The addresses are looked up by joint name in
//! the loaded scene, so the environment does not depend on the order in
//! which the scene declares its bodies.
use crate::{MushrEnvError, SceneConfig, Simulator};
use crate::sim::JointKind;
use anyhow::Result;
use log::debug;

const FREE_QPOS: usize = 7;
const FREE_QVEL: usize = 6;

/// Slots of a free body in qpos and qvel.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeBody {
    /// Name of the free joint.
    pub name: String,

    /// Start index in qpos.
    pub qpos_adr: usize,

    /// Start index in qvel.
    pub dof_adr: usize,
}

impl FreeBody {
    /// `[x, y, z]`.
    pub fn position<'a>(&self, qpos: &'a [f64]) -> &'a [f64] {
        &qpos[self.qpos_adr..self.qpos_adr + 3]
    }

    /// `[qw, qx, qy, qz]`.
    pub fn quaternion<'a>(&self, qpos: &'a [f64]) -> &'a [f64] {
        &qpos[self.qpos_adr + 3..self.qpos_adr + FREE_QPOS]
    }

    /// `[vx, vy, vz]`.
    pub fn linear_velocity<'a>(&self, qvel: &'a [f64]) -> &'a [f64] {
        &qvel[self.dof_adr..self.dof_adr + 3]
    }

    /// `[wx, wy, wz]`.
    pub fn angular_velocity<'a>(&self, qvel: &'a [f64]) -> &'a [f64] {
        &qvel[self.dof_adr + 3..self.dof_adr + FREE_QVEL]
    }

    /// Writes the planar position and the orientation, keeping z.
    pub fn set_planar_pose(&self, qpos: &mut [f64], xy: &[f64], quat: &[f64]) {
        qpos[self.qpos_adr..self.qpos_adr + 2].copy_from_slice(xy);
        qpos[self.qpos_adr + 3..self.qpos_adr + FREE_QPOS].copy_from_slice(quat);
    }
}

/// Layout of cars and the block in the state vectors of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct StateLayout {
    nq: usize,
    nv: usize,
    cars: Vec<FreeBody>,
    block: FreeBody,
}

impl StateLayout {
    /// Constructs a layout, checking that every body fits in the state vectors.
    pub fn new(nq: usize, nv: usize, cars: Vec<FreeBody>, block: FreeBody) -> Result<Self> {
        for body in cars.iter().chain(std::iter::once(&block)) {
            if body.qpos_adr + FREE_QPOS > nq || body.dof_adr + FREE_QVEL > nv {
                return Err(MushrEnvError::LayoutOutOfRange {
                    name: body.name.clone(),
                    nq,
                    nv,
                }
                .into());
            }
        }
        Ok(Self {
            nq,
            nv,
            cars,
            block,
        })
    }

    /// Resolves the free joints named in `scene` against the loaded simulation.
    pub fn resolve<S: Simulator>(sim: &S, scene: &SceneConfig) -> Result<Self> {
        let lookup = |name: &String| -> Result<FreeBody> {
            let joint = sim
                .joint(name)?
                .ok_or_else(|| MushrEnvError::JointNotFound(name.clone()))?;
            if joint.kind != JointKind::Free {
                return Err(MushrEnvError::NotFreeJoint(name.clone()).into());
            }
            debug!(
                "Joint {}: qpos[{}..{}], qvel[{}..{}]",
                name,
                joint.qpos_adr,
                joint.qpos_adr + FREE_QPOS,
                joint.dof_adr,
                joint.dof_adr + FREE_QVEL
            );
            Ok(FreeBody {
                name: name.clone(),
                qpos_adr: joint.qpos_adr,
                dof_adr: joint.dof_adr,
            })
        };

        let cars = scene
            .cars
            .iter()
            .map(|name| lookup(name))
            .collect::<Result<Vec<_>>>()?;
        let block = lookup(&scene.block)?;
        Self::new(sim.nq(), sim.nv(), cars, block)
    }

    /// Length of qpos.
    pub fn nq(&self) -> usize {
        self.nq
    }

    /// Length of qvel.
    pub fn nv(&self) -> usize {
        self.nv
    }

    /// Number of cars.
    pub fn n_cars(&self) -> usize {
        self.cars.len()
    }

    /// Cars in the order of the scene configuration.
    pub fn cars(&self) -> &[FreeBody] {
        &self.cars
    }

    /// The block.
    pub fn block(&self) -> &FreeBody {
        &self.block
    }

    /// The block followed by the cars, the order of bodies in observations.
    pub fn observed_bodies(&self) -> impl Iterator<Item = &FreeBody> {
        std::iter::once(&self.block).chain(self.cars.iter())
    }

    /// Length of the sequence accepted by `set_init_states`.
    pub fn init_states_len(&self) -> usize {
        6 * (self.cars.len() + 1)
    }

    /// Checks that the state vectors have the lengths of the scene.
    pub fn check_state(&self, qpos: &[f64], qvel: &[f64]) -> Result<()> {
        if qpos.len() != self.nq || qvel.len() != self.nv {
            return Err(MushrEnvError::StateLen {
                nq: self.nq,
                nv: self.nv,
                qpos: qpos.len(),
                qvel: qvel.len(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, qpos_adr: usize, dof_adr: usize) -> FreeBody {
        FreeBody {
            name: name.to_string(),
            qpos_adr,
            dof_adr,
        }
    }

    #[test]
    fn test_block_slots_follow_joint_address() {
        let layout =
            StateLayout::new(21, 19, vec![body("car_joint", 0, 0)], body("block_joint", 14, 13))
                .unwrap();
        let qpos = (0..21).map(|i| i as f64).collect::<Vec<_>>();
        let qvel = (0..19).map(|i| i as f64).collect::<Vec<_>>();
        let block = layout.block();

        assert_eq!(block.position(&qpos), &[14.0, 15.0, 16.0]);
        assert_eq!(block.quaternion(&qpos), &[17.0, 18.0, 19.0, 20.0]);
        assert_eq!(block.linear_velocity(&qvel), &[13.0, 14.0, 15.0]);
        assert_eq!(block.angular_velocity(&qvel), &[16.0, 17.0, 18.0]);
        assert_eq!(layout.init_states_len(), 12);
    }

    #[test]
    fn test_set_planar_pose_keeps_height() {
        let car = body("car_joint", 0, 0);
        let mut qpos = vec![0.0, 0.0, 0.05, 1.0, 0.0, 0.0, 0.0];
        car.set_planar_pose(&mut qpos, &[1.0, 2.0], &[0.0, 0.0, 0.0, 1.0]);

        assert_eq!(qpos, vec![1.0, 2.0, 0.05, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rejects_body_outside_state() {
        let result = StateLayout::new(20, 19, vec![body("car_joint", 0, 0)], body("block_joint", 14, 13));
        let err = result.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MushrEnvError>(),
            Some(MushrEnvError::LayoutOutOfRange { .. })
        ));
    }
}
