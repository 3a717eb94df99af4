//! Configuration types for loading orbital scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – frame cadence, lead factor, time multipliers
//! - [`ParametersConfig`] – physical constants and lead thresholds
//! - [`BodyConfig`]       – one entry per satellite, parents first
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! ```yaml
//! engine:
//!   physics_fps: 240
//!   lead_factor: 10000
//!   max_lead_length: 1000
//!
//! parameters:
//!   G: 6.674e-11            # SI
//!   meters_per_unit: 1000   # distances are km
//!
//! bodies:
//!   - name: Sun
//!     kind: planet
//!     mass: 5.97e24
//!     radius: 6378
//!     color: white
//!   - name: Kerbin
//!     kind: planet
//!     parent: Sun
//!     mass: 0.73e24
//!     radius: 4737
//!     orbital_radius: 76800
//!   - name: Vessel
//!     kind: spacecraft
//!     parent: Kerbin
//!     mass: 10
//!     orbital_radius: 7878
//!     true_anomaly: 3.14159
//! ```
//!
//! Any engine or parameter field left out falls back to its default.

use serde::Deserialize;

use crate::simulation::engine::EngineSettings;
use crate::simulation::params::Parameters;

/// Which specialization a body is
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    #[serde(rename = "planet")]
    Planet,

    #[serde(rename = "spacecraft")]
    Spacecraft,
}

/// Frame loop configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub physics_fps: Option<f64>, // physics frames per second
    pub lead_factor: Option<f64>, // lead step / time step
    pub max_lead_length: Option<usize>, // intervals in a full lead
    pub time_multipliers: Option<Vec<f64>>, // selectable simulation speeds
    pub thrust_percent: Option<f64>, // speed change per burn
    pub reparent_guard_frames: Option<u64>, // min frames between reparent recomputes
}

impl EngineConfig {
    pub fn settings(&self) -> EngineSettings {
        let d = EngineSettings::default();
        EngineSettings {
            physics_fps: self.physics_fps.unwrap_or(d.physics_fps),
            lead_factor: self.lead_factor.unwrap_or(d.lead_factor),
            max_lead_length: self.max_lead_length.unwrap_or(d.max_lead_length),
            time_multipliers: self.time_multipliers.clone().unwrap_or(d.time_multipliers),
            thrust_percent: self.thrust_percent.unwrap_or(d.thrust_percent),
            reparent_guard_frames: self.reparent_guard_frames.unwrap_or(d.reparent_guard_frames),
        }
    }
}

/// Physical constants and lead thresholds
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: Option<f64>, // gravitational constant (SI)
    pub meters_per_unit: Option<f64>, // unit conversion
    pub min_distance: Option<f64>, // gravity separation clamp
    pub lead_proximity_radius: Option<f64>, // early exit radius of a full lead
    pub lead_drift_threshold: Option<f64>, // drift that forces a full lead
}

impl ParametersConfig {
    pub fn parameters(&self) -> Parameters {
        let d = Parameters::default();
        Parameters {
            G: self.G.unwrap_or(d.G),
            meters_per_unit: self.meters_per_unit.unwrap_or(d.meters_per_unit),
            min_distance: self.min_distance.unwrap_or(d.min_distance),
            lead_proximity_radius: self.lead_proximity_radius.unwrap_or(d.lead_proximity_radius),
            lead_drift_threshold: self.lead_drift_threshold.unwrap_or(d.lead_drift_threshold),
        }
    }
}

/// Configuration for a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // unique name, used by children to reference their parent
    pub kind: BodyKind, // planet or spacecraft
    #[serde(default)]
    pub parent: Option<String>, // parent name, absent for the root
    pub mass: f64, // kg
    #[serde(default)]
    pub radius: f64, // display radius (km)
    #[serde(default)]
    pub color: String, // renderer tag
    #[serde(default)]
    pub orbital_radius: f64, // distance from parent at t = 0 (km)
    #[serde(default)]
    pub orbital_velocity: f64, // tangential speed (km/s), 0 = circular
    #[serde(default)]
    pub true_anomaly: f64, // phase around the parent (rad)
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // frame loop settings
    #[serde(default)]
    pub parameters: ParametersConfig, // physical constants
    pub bodies: Vec<BodyConfig>, // bodies, every parent before its children
}
