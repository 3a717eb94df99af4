//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` (SI) and the km -> m conversion factor,
//! - minimum separation used to clamp gravity at close range,
//! - lead proximity radius (early exit of a full lead) and drift threshold

use super::error::{SimError, SimResult};

/// Meters per simulation distance unit (km)
pub const METERS_PER_KM: f64 = 1000.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant (m^3 kg^-1 s^-2)
    pub meters_per_unit: f64, // unit conversion, applied to every distance entering G
    pub min_distance: f64, // separation clamp (units)
    pub lead_proximity_radius: f64, // full lead stops after re-entering this radius (units)
    pub lead_drift_threshold: f64, // spacecraft-to-first-lead distance forcing a recompute (units)
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 6.674e-11,
            meters_per_unit: METERS_PER_KM,
            min_distance: 1.0,
            lead_proximity_radius: 1000.0,
            lead_drift_threshold: 500.0,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> SimResult<()> {
        let checks = [
            ("G", self.G),
            ("meters_per_unit", self.meters_per_unit),
            ("min_distance", self.min_distance),
            ("lead_proximity_radius", self.lead_proximity_radius),
            ("lead_drift_threshold", self.lead_drift_threshold),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
