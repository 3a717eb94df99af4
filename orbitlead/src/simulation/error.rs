//! Error taxonomy for the orbital core
//!
//! Configuration errors are raised while the hierarchy is built, buffer
//! errors when the lead buffer is used out of order. Both abort a run.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    // ---- configuration ----
    #[error("satellite `{name}` has invalid mass {mass} (must be positive and finite)")]
    InvalidMass { name: String, mass: f64 },

    #[error("satellite `{name}` has invalid orbital radius {radius} (must be positive and finite)")]
    InvalidOrbitalRadius { name: String, radius: f64 },

    #[error("satellite `{name}` has non-finite orbit (velocity {velocity}, true anomaly {true_anomaly})")]
    InvalidOrbit { name: String, velocity: f64, true_anomaly: f64 },

    #[error("satellite `{name}` has invalid display radius {radius}")]
    InvalidRadius { name: String, radius: f64 },

    #[error("satellite `{name}` references unknown parent `{parent}`")]
    UnknownParent { name: String, parent: String },

    #[error("satellite `{name}` cannot orbit spacecraft `{parent}`")]
    SpacecraftParent { name: String, parent: String },

    #[error("satellite name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("hierarchy has no root body")]
    MissingRoot,

    #[error("hierarchy already has root `{0}`")]
    DuplicateRoot(String),

    #[error("hierarchy has no spacecraft")]
    MissingSpacecraft,

    #[error("hierarchy already has spacecraft `{0}`")]
    DuplicateSpacecraft(String),

    #[error("spacecraft `{0}` must be added with `spacecraft`, not as a planet")]
    SpacecraftNotPlanet(String),

    #[error("root body `{0}` must be a planet with no parent")]
    InvalidRoot(String),

    #[error("invalid parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    // ---- lead buffer discipline ----
    #[error("lead buffer queried before any full lead calculation")]
    LeadNotCalculated,

    #[error("lead buffer is stale; a full lead recalculation is required")]
    StaleLead,

    #[error("cannot remove a lead interval from an empty lead buffer")]
    EmptyLead,
}

pub type SimResult<T> = Result<T, SimError>;
