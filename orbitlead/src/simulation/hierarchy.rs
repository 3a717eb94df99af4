//! Satellite hierarchy stored as an arena
//!
//! Every satellite is addressed by a stable [`SatelliteId`]. Parent links are
//! ids; children are derived by scanning parent links. The flattened order
//! lists the planet tree in pre-order from the root, followed by the single
//! spacecraft, so a parent always precedes its descendants.

use std::collections::HashSet;
use std::fmt;

use super::error::{SimError, SimResult};

/// Stable index of a satellite in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SatelliteId(pub usize);

impl SatelliteId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteKind {
    Planet,
    Spacecraft,
}

/// Initial placement around the parent at t = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f64, // distance from parent (units)
    pub velocity: f64, // tangential speed (units/s), 0 = circular
    pub true_anomaly: f64, // phase angle (rad)
}

impl Orbit {
    /// Circular orbit: speed is derived from the parent's mass at initialization
    pub fn circular(radius: f64, true_anomaly: f64) -> Self {
        Self {
            radius,
            velocity: 0.0,
            true_anomaly,
        }
    }

    pub fn is_circular(&self) -> bool {
        self.velocity == 0.0
    }
}

/// Static description of one body in the hierarchy
#[derive(Debug, Clone)]
pub struct Satellite {
    pub name: String,
    pub kind: SatelliteKind,
    pub mass: f64,
    pub radius: f64, // display radius (units)
    pub color: String, // opaque tag for renderers
    pub parent: Option<SatelliteId>,
    pub orbit: Option<Orbit>, // None only for the root
}

impl Satellite {
    pub fn planet(name: impl Into<String>, mass: f64) -> Self {
        Self {
            name: name.into(),
            kind: SatelliteKind::Planet,
            mass,
            radius: 0.0,
            color: String::new(),
            parent: None,
            orbit: None,
        }
    }

    pub fn spacecraft(name: impl Into<String>, mass: f64) -> Self {
        Self {
            kind: SatelliteKind::Spacecraft,
            ..Self::planet(name, mass)
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn is_planet(&self) -> bool {
        self.kind == SatelliteKind::Planet
    }

    pub fn is_spacecraft(&self) -> bool {
        self.kind == SatelliteKind::Spacecraft
    }
}

/// Validated arena of satellites
#[derive(Debug, Clone)]
pub struct Hierarchy {
    satellites: Vec<Satellite>,
    order: Vec<SatelliteId>,
    root: SatelliteId,
    spacecraft: SatelliteId,
    spacecraft_home: SatelliteId, // parent the spacecraft was built around
}

impl Hierarchy {
    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn root(&self) -> SatelliteId {
        self.root
    }

    pub fn spacecraft(&self) -> SatelliteId {
        self.spacecraft
    }

    /// Flattened traversal order, parents before descendants
    pub fn order(&self) -> &[SatelliteId] {
        &self.order
    }

    /// Planets in flattened order, root included
    pub fn planets(&self) -> impl Iterator<Item = SatelliteId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |id| self[*id].is_planet())
    }

    pub fn ids(&self) -> impl Iterator<Item = SatelliteId> {
        (0..self.satellites.len()).map(SatelliteId)
    }

    pub fn get(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.get(id.0)
    }

    pub fn parent(&self, id: SatelliteId) -> Option<SatelliteId> {
        self[id].parent
    }

    pub fn children(&self, id: SatelliteId) -> Vec<SatelliteId> {
        self.ids().filter(|c| self[*c].parent == Some(id)).collect()
    }

    pub fn find(&self, name: &str) -> Option<SatelliteId> {
        self.satellites
            .iter()
            .position(|s| s.name == name)
            .map(SatelliteId)
    }

    /// Rebind or release the spacecraft. Planet links are fixed after build,
    /// so the flattened order stays valid.
    pub(crate) fn set_spacecraft_parent(&mut self, parent: Option<SatelliteId>) {
        let sc = self.spacecraft;
        self.satellites[sc.0].parent = parent;
    }

    /// Rebind the spacecraft to the parent it was built around
    pub(crate) fn restore_spacecraft_parent(&mut self) {
        self.set_spacecraft_parent(Some(self.spacecraft_home));
    }

    fn flatten(satellites: &[Satellite], root: SatelliteId, spacecraft: SatelliteId) -> Vec<SatelliteId> {
        let mut order = Vec::with_capacity(satellites.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            // push in reverse so children come out in insertion order
            let children = satellites
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_planet() && s.parent == Some(id))
                .map(|(i, _)| SatelliteId(i));
            let mut children: Vec<_> = children.collect();
            children.reverse();
            stack.extend(children);
        }
        order.push(spacecraft);
        order
    }
}

impl std::ops::Index<SatelliteId> for Hierarchy {
    type Output = Satellite;

    fn index(&self, id: SatelliteId) -> &Satellite {
        &self.satellites[id.0]
    }
}

/// Incremental builder. Parents must be added before their children, which
/// rules out forward references by construction.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    satellites: Vec<Satellite>,
    names: HashSet<String>,
    root: Option<SatelliteId>,
    spacecraft: Option<SatelliteId>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the central body, fixed at the origin
    pub fn root(&mut self, planet: Satellite) -> SimResult<SatelliteId> {
        if let Some(root) = self.root {
            return Err(SimError::DuplicateRoot(self.satellites[root.0].name.clone()));
        }
        if !planet.is_planet() {
            return Err(SimError::InvalidRoot(planet.name));
        }
        let id = self.push(Satellite {
            parent: None,
            orbit: None,
            ..planet
        })?;
        self.root = Some(id);
        Ok(id)
    }

    /// Add a planet orbiting `parent`
    pub fn orbiting(&mut self, parent: SatelliteId, planet: Satellite, orbit: Orbit) -> SimResult<SatelliteId> {
        if !planet.is_planet() {
            return Err(SimError::SpacecraftNotPlanet(planet.name));
        }
        self.attach(parent, planet, orbit)
    }

    /// Add the spacecraft, initially bound to `parent`
    pub fn spacecraft(&mut self, parent: SatelliteId, craft: Satellite, orbit: Orbit) -> SimResult<SatelliteId> {
        if let Some(sc) = self.spacecraft {
            return Err(SimError::DuplicateSpacecraft(self.satellites[sc.0].name.clone()));
        }
        let craft = Satellite {
            kind: SatelliteKind::Spacecraft,
            ..craft
        };
        let id = self.attach(parent, craft, orbit)?;
        self.spacecraft = Some(id);
        Ok(id)
    }

    /// Look up an already added satellite by name
    pub fn find(&self, name: &str) -> Option<SatelliteId> {
        self.satellites
            .iter()
            .position(|s| s.name == name)
            .map(SatelliteId)
    }

    pub fn build(self) -> SimResult<Hierarchy> {
        let root = self.root.ok_or(SimError::MissingRoot)?;
        let spacecraft = self.spacecraft.ok_or(SimError::MissingSpacecraft)?;
        let spacecraft_home = self.satellites[spacecraft.0].parent.ok_or(SimError::MissingSpacecraft)?;
        let order = Hierarchy::flatten(&self.satellites, root, spacecraft);
        Ok(Hierarchy {
            satellites: self.satellites,
            order,
            root,
            spacecraft,
            spacecraft_home,
        })
    }

    fn attach(&mut self, parent: SatelliteId, satellite: Satellite, orbit: Orbit) -> SimResult<SatelliteId> {
        let Some(p) = self.satellites.get(parent.0) else {
            return Err(SimError::UnknownParent {
                name: satellite.name,
                parent: parent.to_string(),
            });
        };
        if p.is_spacecraft() {
            return Err(SimError::SpacecraftParent {
                name: satellite.name,
                parent: p.name.clone(),
            });
        }
        if !(orbit.radius.is_finite() && orbit.radius > 0.0) {
            return Err(SimError::InvalidOrbitalRadius {
                name: satellite.name,
                radius: orbit.radius,
            });
        }
        if !(orbit.velocity.is_finite() && orbit.true_anomaly.is_finite()) {
            return Err(SimError::InvalidOrbit {
                name: satellite.name,
                velocity: orbit.velocity,
                true_anomaly: orbit.true_anomaly,
            });
        }
        self.push(Satellite {
            parent: Some(parent),
            orbit: Some(orbit),
            ..satellite
        })
    }

    fn push(&mut self, satellite: Satellite) -> SimResult<SatelliteId> {
        if !(satellite.mass.is_finite() && satellite.mass > 0.0) {
            return Err(SimError::InvalidMass {
                name: satellite.name,
                mass: satellite.mass,
            });
        }
        if !(satellite.radius.is_finite() && satellite.radius >= 0.0) {
            return Err(SimError::InvalidRadius {
                name: satellite.name,
                radius: satellite.radius,
            });
        }
        if !self.names.insert(satellite.name.clone()) {
            return Err(SimError::DuplicateName(satellite.name));
        }
        let id = SatelliteId(self.satellites.len());
        self.satellites.push(satellite);
        Ok(id)
    }
}
