//! Small geometry helpers on top of nalgebra vectors.

use super::states::{NVec2, NVec3};

/// Vector of length `r` at `angle` radians from the +x axis
pub fn polar(r: f64, angle: f64) -> NVec2 {
    NVec2::new(r * angle.cos(), r * angle.sin())
}

/// Bearing from `from` to `to`, `atan2(dy, dx)` in (-pi, pi]
pub fn bearing(from: &NVec2, to: &NVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Euclidean distance ignoring the z component
pub fn distance_xy(a: &NVec3, b: &NVec3) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Euclidean distance ignoring the y component
pub fn distance_xz(a: &NVec3, b: &NVec3) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}
