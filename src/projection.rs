//! Polar-to-Cartesian projection of hit locations.
//!
//! Home plate is the origin; exit direction 0° points straight up the
//! field, positive angles toward right field.

use crate::types::RawEvent;

/// Landing coordinates in feet, or `None` when the row is missing either
/// polar measurement (such rows contribute no point, matching the data
/// source's silent handling of gaps).
pub fn project(ev: &RawEvent) -> Option<(f64, f64)> {
    let distance = ev.hit_distance.filter(|v| v.is_finite())?;
    let direction = ev.exit_direction.filter(|v| v.is_finite())?;
    let rad = direction.to_radians();
    Some((distance * rad.sin(), distance * rad.cos()))
}
