//! Core state types for the orbital simulation.
//!
//! Positions are in simulation distance units (km), velocities in units per
//! second. Physical state lives here, separate from the static satellite
//! records in [`crate::simulation::hierarchy`], so the same stepping code can
//! run on the live system and on a scratch copy of the lead buffer's tail.

use nalgebra::{Vector2, Vector3};
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Position/velocity pair of a single satellite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl BodyState {
    pub fn new(x: NVec2, v: NVec2) -> Self {
        Self { x, v }
    }

    pub fn at_rest() -> Self {
        Self {
            x: NVec2::zeros(),
            v: NVec2::zeros(),
        }
    }
}

/// Live state of every satellite, indexed by `SatelliteId`
#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<BodyState>, // one entry per satellite
    pub t: f64, // simulated time (s)
}

impl System {
    pub fn at_rest(n: usize) -> Self {
        Self {
            bodies: vec![BodyState::at_rest(); n],
            t: 0.0,
        }
    }
}
