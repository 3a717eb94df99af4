//! Gravity and the per-kind force models
//!
//! Distances are held in simulation units (km) and `G` in SI, so every
//! separation is multiplied by `meters_per_unit` before entering `G`, and
//! every resulting acceleration or speed is divided by it on the way back.
//! Initial placement, stepping, the lead buffer and the escape test all go
//! through [`NewtonianGravity`], which keeps the conversion in one place.

use super::hierarchy::{Hierarchy, SatelliteId, SatelliteKind};
use super::params::Parameters;
use super::states::{BodyState, NVec2};

/// Newtonian point-mass gravity with a minimum separation clamp
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant (SI)
    pub meters_per_unit: f64, // unit conversion
    pub min_distance: f64, // separation clamp (units)
}

impl NewtonianGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self {
            G: p.G,
            meters_per_unit: p.meters_per_unit,
            min_distance: p.min_distance,
        }
    }

    fn clamp(&self, distance: f64) -> f64 {
        distance.max(self.min_distance)
    }

    /// Force magnitude in newtons between masses `m1` and `m2` at `distance` units
    pub fn force(&self, m1: f64, m2: f64, distance: f64) -> f64 {
        let r = self.clamp(distance) * self.meters_per_unit;
        self.G * m1 * m2 / (r * r)
    }

    /// Acceleration (units/s^2) at `x` toward a body of mass `m` at `source`
    pub fn acceleration_toward(&self, x: &NVec2, source: &NVec2, m: f64) -> NVec2 {
        // r points from the attracted body to the source
        let r = source - x;
        let d = r.norm();
        if d == 0.0 {
            return NVec2::zeros();
        }
        let dm = self.clamp(d) * self.meters_per_unit;
        // a = G m / r^2 in m/s^2, back to units/s^2
        let magnitude = self.G * m / (dm * dm) / self.meters_per_unit;
        r * (magnitude / d)
    }

    /// Circular orbit speed (units/s) at `radius` units around mass `m`
    pub fn circular_speed(&self, m: f64, radius: f64) -> f64 {
        let r = self.clamp(radius) * self.meters_per_unit;
        (self.G * m / r).sqrt() / self.meters_per_unit
    }

    /// Escape speed (units/s) at `distance` units from mass `m`
    pub fn escape_speed(&self, m: f64, distance: f64) -> f64 {
        let r = self.clamp(distance) * self.meters_per_unit;
        (2.0 * self.G * m / r).sqrt() / self.meters_per_unit
    }

    /// Kepler period (s) of a circular orbit of `radius` units around mass `m`
    pub fn period(&self, m: f64, radius: f64) -> f64 {
        let r = self.clamp(radius) * self.meters_per_unit;
        std::f64::consts::TAU * (r * r * r / (self.G * m)).sqrt()
    }
}

/// Which bodies pull on a satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceModel {
    /// Only the satellite's own parent. Keeps planet orbits stable.
    ParentOnly,
    /// Vector sum over every planet in the system.
    AllPlanets,
}

impl ForceModel {
    pub fn for_kind(kind: SatelliteKind) -> Self {
        match kind {
            SatelliteKind::Planet => ForceModel::ParentOnly,
            SatelliteKind::Spacecraft => ForceModel::AllPlanets,
        }
    }

    /// Acceleration on `target` given the states in `bodies` (indexed by id)
    pub fn acceleration(
        &self,
        gravity: &NewtonianGravity,
        hierarchy: &Hierarchy,
        target: SatelliteId,
        bodies: &[BodyState],
    ) -> NVec2 {
        let x = bodies[target.index()].x;
        match self {
            ForceModel::ParentOnly => match hierarchy.parent(target) {
                Some(p) => gravity.acceleration_toward(&x, &bodies[p.index()].x, hierarchy[p].mass),
                None => NVec2::zeros(),
            },
            ForceModel::AllPlanets => hierarchy
                .planets()
                .filter(|p| *p != target)
                .map(|p| gravity.acceleration_toward(&x, &bodies[p.index()].x, hierarchy[p].mass))
                .sum(),
        }
    }
}

/// Planet exerting the strongest pull on `target`, with that force (N)
pub fn dominant_body(
    gravity: &NewtonianGravity,
    hierarchy: &Hierarchy,
    target: SatelliteId,
    bodies: &[BodyState],
) -> Option<(SatelliteId, f64)> {
    let x = bodies[target.index()].x;
    let m = hierarchy[target].mass;
    hierarchy
        .planets()
        .filter(|p| *p != target)
        .map(|p| {
            let d = (bodies[p.index()].x - x).norm();
            (p, gravity.force(m, hierarchy[p].mass, d))
        })
        .fold(None, |best, (p, f)| match best {
            Some((_, bf)) if bf >= f => best,
            _ => Some((p, f)),
        })
}
