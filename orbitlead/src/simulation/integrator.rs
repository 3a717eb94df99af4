//! Fixed-step time integration for the satellite hierarchy
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked first, then the
//! position drifts with the new velocity. The passes below work on any slice
//! of [`BodyState`] indexed by `SatelliteId`, so the live system and the lead
//! buffer share exactly the same rules.

use super::forces::{ForceModel, NewtonianGravity};
use super::hierarchy::{Hierarchy, SatelliteId};
use super::states::{BodyState, NVec2};

/// v_n+1 = v_n + dt a_n, then x_n+1 = x_n + dt v_n+1
pub fn semi_implicit_euler(state: &mut BodyState, a: NVec2, dt: f64) {
    state.v += dt * a;
    state.x += dt * state.v;
}

/// Advance every planet except the root, in flattened order, under
/// parent-only gravity. Parents move before their children.
pub fn advance_planets(gravity: &NewtonianGravity, hierarchy: &Hierarchy, bodies: &mut [BodyState], dt: f64) {
    let root = hierarchy.root();
    for id in hierarchy.order() {
        let sat = &hierarchy[*id];
        if *id == root || !sat.is_planet() {
            continue;
        }
        let a = ForceModel::for_kind(sat.kind).acceleration(gravity, hierarchy, *id, bodies);
        semi_implicit_euler(&mut bodies[id.index()], a, dt);
    }
}

/// Advance the spacecraft under the summed pull of every planet
pub fn advance_spacecraft(gravity: &NewtonianGravity, hierarchy: &Hierarchy, bodies: &mut [BodyState], dt: f64) {
    let sc: SatelliteId = hierarchy.spacecraft();
    let a = ForceModel::for_kind(hierarchy[sc].kind).acceleration(gravity, hierarchy, sc, bodies);
    semi_implicit_euler(&mut bodies[sc.index()], a, dt);
}
