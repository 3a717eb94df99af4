pub mod simulation;
pub mod configuration;

pub use simulation::states::{BodyState, System, NVec2, NVec3};
pub use simulation::error::{SimError, SimResult};
pub use simulation::hierarchy::{Hierarchy, HierarchyBuilder, Orbit, Satellite, SatelliteId, SatelliteKind};
pub use simulation::forces::{ForceModel, NewtonianGravity};
pub use simulation::lead::{LeadBuffer, LeadNode, LeadState};
pub use simulation::params::Parameters;
pub use simulation::world::{ThrustDirection, World};
pub use simulation::engine::{Command, Engine, EngineSettings, FrameReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, BodyKind, EngineConfig, ParametersConfig, ScenarioConfig};
