//! Headless frame loop
//!
//! Owns frame cadence, the time multiplier, the targeted satellite and the
//! "recalculate lead" flag. Each call to [`Engine::frame`] runs the fixed
//! sequence: lead maintenance, render, input, physical step (planets then
//! spacecraft), then decide whether the next frame needs a full lead.

use log::{debug, warn};

use super::error::{SimError, SimResult};
use super::hierarchy::SatelliteId;
use super::world::{ThrustDirection, World};

/// Runtime engine settings
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub physics_fps: f64, // physics frames per real second
    pub lead_factor: f64, // lead step / time step at the first multiplier
    pub max_lead_length: usize, // intervals in a full lead
    pub time_multipliers: Vec<f64>, // selectable simulation speeds
    pub thrust_percent: f64, // speed change per burn
    pub reparent_guard_frames: u64, // min frames between reparent-triggered recomputes
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            physics_fps: 240.0,
            lead_factor: 10000.0,
            max_lead_length: 1000,
            time_multipliers: vec![1.0, 10.0, 100.0, 1000.0, 10000.0],
            thrust_percent: 0.005,
            reparent_guard_frames: 30,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> SimResult<()> {
        let checks = [
            ("physics_fps", self.physics_fps),
            ("lead_factor", self.lead_factor),
            ("thrust_percent", self.thrust_percent),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        if self.max_lead_length == 0 {
            return Err(SimError::InvalidParameter {
                name: "max_lead_length",
                value: 0.0,
            });
        }
        match self.time_multipliers.iter().find(|m| !(m.is_finite() && **m > 0.0)) {
            Some(&value) => Err(SimError::InvalidParameter {
                name: "time_multipliers",
                value,
            }),
            None if self.time_multipliers.is_empty() => Err(SimError::InvalidParameter {
                name: "time_multipliers",
                value: 0.0,
            }),
            None => Ok(()),
        }
    }
}

/// User input fed into a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Thrust(ThrustDirection),
    CycleTarget(i32),
    ChangeTimeMultiplier(i32),
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub lead_recomputed: bool,
    pub lead_advances: usize,
    pub thrust_engaged: bool,
    pub reparented: bool,
    pub lead_drift: bool,
    pub time: f64,
}

/// How many slide steps (one interval + one removal) a frame performs
///
/// - `lead_factor > 1`: once every `round(lead_factor)` frames
/// - `lead_factor < 1`: `round(1 / lead_factor)` times per frame
/// - `lead_factor == 1`: once per frame
pub fn lead_advances(lead_factor: f64, iteration: u64) -> usize {
    if lead_factor > 1.0 {
        let period = (lead_factor.round() as u64).max(1);
        usize::from(iteration % period == 0)
    } else if lead_factor < 1.0 {
        (1.0 / lead_factor).round() as usize
    } else {
        1
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    settings: EngineSettings,
    multiplier_index: usize,
    time_step: f64, // real step (s)
    lead_step: f64, // lead step (s)
    lead_factor: f64,
    iteration: u64,
    calculate_lead: bool,
    reparent_pending: bool,
    frames_since_lead: u64,
    target: usize, // index into the flattened order
}

impl Engine {
    pub fn new(settings: EngineSettings) -> SimResult<Self> {
        settings.validate()?;
        let time_step = settings.time_multipliers[0] / settings.physics_fps;
        let lead_factor = settings.lead_factor;
        Ok(Self {
            multiplier_index: 0,
            time_step,
            lead_step: time_step * lead_factor,
            lead_factor,
            iteration: 0,
            calculate_lead: true,
            reparent_pending: false,
            frames_since_lead: 0,
            target: 0,
            settings,
        })
    }

    /// Run one frame. `render` sees the world after lead maintenance and
    /// before input and stepping.
    pub fn frame<F>(&mut self, world: &mut World, inputs: &[Command], render: F) -> SimResult<FrameReport>
    where
        F: FnOnce(&World, &Engine),
    {
        let mut report = FrameReport::default();

        // 1. lead maintenance
        if self.calculate_lead {
            world.calculate_full_lead(self.lead_step, self.settings.max_lead_length);
            self.calculate_lead = false;
            self.frames_since_lead = 0;
            report.lead_recomputed = true;
        } else {
            report.lead_advances = lead_advances(self.lead_factor, self.iteration);
            for _ in 0..report.lead_advances {
                world.calculate_one_lead_interval(self.lead_step)?;
                world.remove_lead_interval()?;
            }
        }

        // 2. render
        render(world, self);

        // 3. input
        for command in inputs {
            match *command {
                Command::Thrust(direction) => {
                    world.engage_thrust(direction, self.settings.thrust_percent);
                    report.thrust_engaged = true;
                }
                Command::CycleTarget(change) => self.cycle_target(world, change),
                Command::ChangeTimeMultiplier(change) => self.change_time_multiplier(change),
            }
        }

        // 4. physical step
        world.step_planets(self.time_step);
        report.reparented = world.step_spacecraft(self.time_step);

        // 5. next frame's lead flag
        self.frames_since_lead += 1;
        if report.reparented {
            self.reparent_pending = true;
        }
        let reparent_due = self.reparent_pending && self.frames_since_lead >= self.settings.reparent_guard_frames;
        if report.reparented && !reparent_due {
            warn!(
                "reparent recompute deferred ({} of {} guard frames elapsed)",
                self.frames_since_lead, self.settings.reparent_guard_frames
            );
        }
        report.lead_drift = world.distance_to_first_lead()? > world.params().lead_drift_threshold;
        self.calculate_lead = report.thrust_engaged || reparent_due || report.lead_drift;
        if self.calculate_lead {
            self.reparent_pending = false;
            debug!(
                "lead recompute scheduled (thrust {}, reparent {}, drift {})",
                report.thrust_engaged, reparent_due, report.lead_drift
            );
        }

        self.iteration = self.iteration.wrapping_add(1);
        report.time = world.time();
        Ok(report)
    }

    /// Move the target `change` places along the flattened order, wrapping
    pub fn cycle_target(&mut self, world: &World, change: i32) {
        let n = world.order().len() as i64;
        if n == 0 {
            return;
        }
        self.target = (self.target as i64 + change as i64).rem_euclid(n) as usize;
    }

    /// Select a neighbouring time multiplier; out-of-range moves are ignored.
    /// The lead step is kept, so the lead factor follows the new time step.
    pub fn change_time_multiplier(&mut self, change: i32) {
        let index = self.multiplier_index as i64 + change as i64;
        if index < 0 || index >= self.settings.time_multipliers.len() as i64 {
            return;
        }
        self.multiplier_index = index as usize;
        self.time_step = self.settings.time_multipliers[self.multiplier_index] / self.settings.physics_fps;
        self.lead_factor = self.lead_step / self.time_step;
        debug!(
            "time multiplier x{}: time step {:.5} s, lead factor {:.3}",
            self.settings.time_multipliers[self.multiplier_index], self.time_step, self.lead_factor
        );
    }

    pub fn target(&self, world: &World) -> Option<SatelliteId> {
        world.order().get(self.target).copied()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn lead_step(&self) -> f64 {
        self.lead_step
    }

    pub fn lead_factor(&self) -> f64 {
        self.lead_factor
    }

    pub fn time_multiplier(&self) -> f64 {
        self.settings.time_multipliers[self.multiplier_index]
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Whether the next frame starts with a full lead recompute
    pub fn lead_recompute_scheduled(&self) -> bool {
        self.calculate_lead
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}
