//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing the engine (frame cadence) and the world (hierarchy placed on
//! its initial orbits). Parents are referenced by name and must be declared
//! before their children.

use crate::configuration::config::{BodyConfig, BodyKind, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::hierarchy::{Hierarchy, HierarchyBuilder, Orbit, Satellite};
use crate::simulation::world::World;

pub struct Scenario {
    pub engine: Engine,
    pub world: World,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> SimResult<Self> {
        let hierarchy = build_hierarchy(&cfg.bodies)?;
        let world = World::new(hierarchy, cfg.parameters.parameters())?;
        let engine = Engine::new(cfg.engine.settings())?;
        Ok(Self { engine, world })
    }
}

/// Map body configs onto a validated hierarchy
pub fn build_hierarchy(bodies: &[BodyConfig]) -> SimResult<Hierarchy> {
    let mut builder = HierarchyBuilder::new();
    for bc in bodies {
        let satellite = match bc.kind {
            BodyKind::Planet => Satellite::planet(&bc.name, bc.mass),
            BodyKind::Spacecraft => Satellite::spacecraft(&bc.name, bc.mass),
        }
        .with_radius(bc.radius)
        .with_color(&bc.color);

        let Some(parent_name) = &bc.parent else {
            builder.root(satellite)?;
            continue;
        };
        let parent = builder.find(parent_name).ok_or_else(|| SimError::UnknownParent {
            name: bc.name.clone(),
            parent: parent_name.clone(),
        })?;
        let orbit = Orbit {
            radius: bc.orbital_radius,
            velocity: bc.orbital_velocity,
            true_anomaly: bc.true_anomaly,
        };
        match bc.kind {
            BodyKind::Planet => builder.orbiting(parent, satellite, orbit)?,
            BodyKind::Spacecraft => builder.spacecraft(parent, satellite, orbit)?,
        };
    }
    builder.build()
}
