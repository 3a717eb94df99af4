//! Simulation core: the satellite hierarchy, its live state and the lead
//! buffers that run ahead of it.
//!
//! The frame loop drives a `World` in a fixed order: lead maintenance, render,
//! input, then [`World::step_planets`] followed by [`World::step_spacecraft`].
//! The lead is meant to sit slightly ahead of now, so it must be maintained
//! before the real step it predicts.

use std::f64::consts::FRAC_PI_2;

use log::{debug, info};

use super::coordinate::polar;
use super::error::{SimError, SimResult};
use super::forces::{dominant_body, NewtonianGravity};
use super::hierarchy::{Hierarchy, Satellite, SatelliteId};
use super::integrator::{advance_planets, advance_spacecraft};
use super::lead::{LeadBuffer, LeadNode, LeadState};
use super::params::Parameters;
use super::states::{BodyState, NVec2, System};

/// Sign of a burn along the current velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustDirection {
    Prograde,
    Retrograde,
}

impl ThrustDirection {
    pub fn sign(self) -> f64 {
        match self {
            ThrustDirection::Prograde => 1.0,
            ThrustDirection::Retrograde => -1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    hierarchy: Hierarchy,
    system: System,
    leads: Vec<LeadBuffer>,
    params: Parameters,
    gravity: NewtonianGravity,
    lead_state: LeadState,
}

impl World {
    /// Validate parameters and place every satellite on its initial orbit
    pub fn new(hierarchy: Hierarchy, params: Parameters) -> SimResult<Self> {
        params.validate()?;
        let n = hierarchy.len();
        let mut world = Self {
            gravity: NewtonianGravity::from_params(&params),
            system: System::at_rest(n),
            leads: vec![LeadBuffer::new(); n],
            hierarchy,
            params,
            lead_state: LeadState::Uncalculated,
        };
        world.initialize();
        Ok(world)
    }

    /// Root at the origin and at rest; every other satellite placed at
    /// `orbit.radius` along `true_anomaly` from its parent, moving
    /// tangentially (anomaly + 90 degrees) relative to the parent. The
    /// spacecraft is rebound to the body it was built around.
    pub fn initialize(&mut self) {
        let root = self.hierarchy.root();
        self.hierarchy.restore_spacecraft_parent();
        self.system = System::at_rest(self.hierarchy.len());
        for lead in &mut self.leads {
            lead.clear();
        }
        self.lead_state = LeadState::Uncalculated;

        for &id in self.hierarchy.order() {
            if id == root {
                continue;
            }
            let sat = &self.hierarchy[id];
            let (Some(parent), Some(orbit)) = (sat.parent, sat.orbit) else {
                continue;
            };
            let anchor = self.system.bodies[parent.index()];
            let speed = if orbit.is_circular() {
                self.gravity.circular_speed(self.hierarchy[parent].mass, orbit.radius)
            } else {
                orbit.velocity
            };
            self.system.bodies[id.index()] = BodyState {
                x: anchor.x + polar(orbit.radius, orbit.true_anomaly),
                v: anchor.v + polar(speed, orbit.true_anomaly + FRAC_PI_2),
            };
        }
        info!(
            "initialized world: {} satellites, spacecraft `{}` bound to `{}`",
            self.hierarchy.len(),
            self.hierarchy[self.hierarchy.spacecraft()].name,
            self.parent_name(self.hierarchy.spacecraft()),
        );
    }

    // =========================================================================================
    // real-time stepping
    // =========================================================================================

    /// Advance every planet by `dt` under parent-only gravity. Opens the
    /// frame's physical step, so it also advances the simulated clock.
    pub fn step_planets(&mut self, dt: f64) {
        advance_planets(&self.gravity, &self.hierarchy, &mut self.system.bodies, dt);
        self.system.t += dt;
    }

    /// Advance the spacecraft by `dt` under the pull of every planet, then
    /// run the capture/escape test against the dominant body.
    ///
    /// Returns `true` when the spacecraft's parent changed. There is no
    /// hysteresis band: a relative speed hovering at the escape speed flips
    /// the state on every call.
    pub fn step_spacecraft(&mut self, dt: f64) -> bool {
        advance_spacecraft(&self.gravity, &self.hierarchy, &mut self.system.bodies, dt);

        let sc = self.hierarchy.spacecraft();
        let Some((dominant, _)) = dominant_body(&self.gravity, &self.hierarchy, sc, &self.system.bodies) else {
            return false;
        };
        let craft = self.system.bodies[sc.index()];
        let body = self.system.bodies[dominant.index()];
        let relative_speed = (craft.v - body.v).norm();
        let escape = self
            .gravity
            .escape_speed(self.hierarchy[dominant].mass, (craft.x - body.x).norm());

        let new_parent = match self.hierarchy.parent(sc) {
            Some(_) if relative_speed >= escape => None,
            None if relative_speed < escape => Some(dominant),
            _ => return false,
        };
        self.hierarchy.set_spacecraft_parent(new_parent);
        self.invalidate_lead();
        match new_parent {
            Some(p) => info!(
                "spacecraft captured by `{}` (relative speed {:.4} < escape {:.4})",
                self.hierarchy[p].name, relative_speed, escape
            ),
            None => info!(
                "spacecraft escaped `{}` (relative speed {:.4} >= escape {:.4})",
                self.hierarchy[dominant].name, relative_speed, escape
            ),
        }
        true
    }

    /// Both passes, planets first
    pub fn step(&mut self, dt: f64) -> bool {
        self.step_planets(dt);
        self.step_spacecraft(dt)
    }

    /// Scale the spacecraft's speed by `1 + sign * percent`, keeping its
    /// direction. Any buffered lead becomes stale.
    pub fn engage_thrust(&mut self, direction: ThrustDirection, percent: f64) {
        let sc = self.hierarchy.spacecraft();
        let v = &mut self.system.bodies[sc.index()].v;
        *v *= 1.0 + direction.sign() * percent;
        let speed = v.norm();
        self.invalidate_lead();
        debug!("thrust {:?} {:.4}: speed now {:.6}", direction, percent, speed);
    }

    fn invalidate_lead(&mut self) {
        if self.lead_state == LeadState::Valid {
            self.lead_state = LeadState::Stale;
        }
    }

    // =========================================================================================
    // lead buffer
    // =========================================================================================

    /// Rebuild every lead buffer from the live state.
    ///
    /// Each buffer is seeded with a copy of the current state, then extended
    /// by up to `max_length` intervals of `lead_step`. Extension stops early
    /// once the spacecraft, measured in its parent's co-moving frame, has left
    /// and re-entered the proximity radius around its starting offset, i.e.
    /// after roughly one predicted orbit. Returns the number of intervals.
    pub fn calculate_full_lead(&mut self, lead_step: f64, max_length: usize) -> usize {
        let t = self.system.t;
        for (lead, state) in self.leads.iter_mut().zip(&self.system.bodies) {
            lead.seed(*state, t);
        }
        self.lead_state = LeadState::Valid;

        let sc = self.hierarchy.spacecraft();
        let anchor = self.hierarchy.parent(sc).or_else(|| {
            dominant_body(&self.gravity, &self.hierarchy, sc, &self.system.bodies).map(|(id, _)| id)
        });
        let offset = |bodies: &[BodyState], a: SatelliteId| bodies[sc.index()].x - bodies[a.index()].x;
        let start = anchor.map(|a| offset(&self.system.bodies, a));
        let radius = self.params.lead_proximity_radius;

        let mut departed = false;
        let mut intervals = 0;
        while intervals < max_length {
            let tail = self.extend_lead(lead_step);
            intervals += 1;
            let (Some(a), Some(start)) = (anchor, start) else {
                continue;
            };
            let d = (offset(&tail, a) - start).norm();
            if !departed {
                departed = d > radius;
            } else if d <= radius {
                break;
            }
        }
        debug!(
            "full lead: {} intervals of {:.3} s (max {})",
            intervals, lead_step, max_length
        );
        intervals
    }

    /// Append one predicted state to the back of every buffer, stepping the
    /// last buffered states with the same rules as the live system.
    pub fn calculate_one_lead_interval(&mut self, lead_step: f64) -> SimResult<()> {
        if self.lead_state == LeadState::Uncalculated {
            return Err(SimError::LeadNotCalculated);
        }
        if self.leads.iter().any(LeadBuffer::is_empty) {
            return Err(SimError::EmptyLead);
        }
        self.extend_lead(lead_step);
        Ok(())
    }

    /// Drop the front of every buffer
    pub fn remove_lead_interval(&mut self) -> SimResult<()> {
        if self.lead_state == LeadState::Uncalculated {
            return Err(SimError::LeadNotCalculated);
        }
        if self.leads.iter().any(LeadBuffer::is_empty) {
            return Err(SimError::EmptyLead);
        }
        for lead in &mut self.leads {
            lead.pop_front()?;
        }
        Ok(())
    }

    // Callers guarantee every buffer is non-empty
    fn extend_lead(&mut self, lead_step: f64) -> Vec<BodyState> {
        let mut tail: Vec<BodyState> = Vec::with_capacity(self.leads.len());
        let mut t = self.system.t;
        for lead in &self.leads {
            if let Some(node) = lead.back() {
                tail.push(node.state);
                t = node.t;
            }
        }
        advance_planets(&self.gravity, &self.hierarchy, &mut tail, lead_step);
        advance_spacecraft(&self.gravity, &self.hierarchy, &mut tail, lead_step);
        for (lead, state) in self.leads.iter_mut().zip(&tail) {
            lead.push_back(LeadNode {
                state: *state,
                t: t + lead_step,
            });
        }
        tail
    }

    pub fn lead_state(&self) -> LeadState {
        self.lead_state
    }

    /// Lead buffer of `id`; fails before the first full lead
    pub fn lead(&self, id: SatelliteId) -> SimResult<&LeadBuffer> {
        match self.lead_state {
            LeadState::Uncalculated => Err(SimError::LeadNotCalculated),
            _ => Ok(&self.leads[id.index()]),
        }
    }

    /// Lead buffer of `id`, refusing buffers invalidated since the last full lead
    pub fn trusted_lead(&self, id: SatelliteId) -> SimResult<&LeadBuffer> {
        match self.lead_state {
            LeadState::Stale => Err(SimError::StaleLead),
            _ => self.lead(id),
        }
    }

    /// Distance between the live spacecraft and the front of its lead
    pub fn distance_to_first_lead(&self) -> SimResult<f64> {
        let sc = self.hierarchy.spacecraft();
        let node = self.lead(sc)?.front().ok_or(SimError::EmptyLead)?;
        Ok((node.position() - self.position(sc)).norm())
    }

    /// Distance between the live spacecraft and the end of its lead
    pub fn distance_to_last_lead(&self) -> SimResult<f64> {
        let sc = self.hierarchy.spacecraft();
        let node = self.lead(sc)?.back().ok_or(SimError::EmptyLead)?;
        Ok((node.position() - self.position(sc)).norm())
    }

    // =========================================================================================
    // read accessors
    // =========================================================================================

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn satellite(&self, id: SatelliteId) -> &Satellite {
        &self.hierarchy[id]
    }

    /// Flattened traversal order, parents before descendants
    pub fn order(&self) -> &[SatelliteId] {
        self.hierarchy.order()
    }

    pub fn root(&self) -> SatelliteId {
        self.hierarchy.root()
    }

    pub fn spacecraft(&self) -> SatelliteId {
        self.hierarchy.spacecraft()
    }

    pub fn find(&self, name: &str) -> Option<SatelliteId> {
        self.hierarchy.find(name)
    }

    pub fn state(&self, id: SatelliteId) -> BodyState {
        self.system.bodies[id.index()]
    }

    pub fn position(&self, id: SatelliteId) -> NVec2 {
        self.system.bodies[id.index()].x
    }

    pub fn velocity(&self, id: SatelliteId) -> NVec2 {
        self.system.bodies[id.index()].v
    }

    pub fn mass(&self, id: SatelliteId) -> f64 {
        self.hierarchy[id].mass
    }

    pub fn radius(&self, id: SatelliteId) -> f64 {
        self.hierarchy[id].radius
    }

    pub fn color(&self, id: SatelliteId) -> &str {
        &self.hierarchy[id].color
    }

    pub fn parent(&self, id: SatelliteId) -> Option<SatelliteId> {
        self.hierarchy.parent(id)
    }

    pub fn children(&self, id: SatelliteId) -> Vec<SatelliteId> {
        self.hierarchy.children(id)
    }

    /// Simulated time (s)
    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    fn parent_name(&self, id: SatelliteId) -> &str {
        self.hierarchy
            .parent(id)
            .map_or("nothing", |p| self.hierarchy[p].name.as_str())
    }
}
