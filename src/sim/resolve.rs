//! Penetration resolution along the vertical axis
//!
//! Escape is always straight up: coarse fixed steps until the contact vector
//! clears, then a binary search back down toward the surface. Side and
//! corner hits are resolved vertically too - a known simplification, kept
//! deliberately.

use std::fmt;

use super::body::Body;
use super::contact::sample;
use crate::consts::{RESOLVE_COARSE_CAP, RESOLVE_COARSE_STEP, RESOLVE_ITERATIONS};
use crate::level::Region;

/// The coarse phase ran out of iterations without leaving the terrain.
///
/// Means the body is buried in solid geometry (bad spawn point or a
/// malformed outline). Callers respawn rather than abort the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryExhausted {
    /// Vertical distance climbed before giving up, px.
    pub climbed: f32,
}

impl fmt::Display for GeometryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no escape from terrain after climbing {:.0}px",
            self.climbed
        )
    }
}

impl std::error::Error for GeometryExhausted {}

/// Push an overlapping body out of the terrain, straight up.
///
/// Mutates the body's center only; the integrator owns every velocity
/// consequence (friction, normal force). On success the body ends within a
/// final binary-search step of the surface, in light contact rather than
/// hovering, so the grounded state holds from tick to tick.
pub fn resolve(body: &mut Body, region: &dyn Region) -> Result<(), GeometryExhausted> {
    let start_y = body.pose.center.y;

    // Coarse phase: fixed steps up until every probe clears.
    let mut rounds = 0;
    while sample(body, region).any() {
        if rounds == RESOLVE_COARSE_CAP {
            return Err(GeometryExhausted {
                climbed: start_y - body.pose.center.y,
            });
        }
        body.pose.center.y -= RESOLVE_COARSE_STEP;
        rounds += 1;
    }

    // Fine phase: halve the step toward the surface.
    let mut step = RESOLVE_COARSE_STEP;
    for _ in 0..RESOLVE_ITERATIONS {
        if sample(body, region).any() {
            body.pose.center.y -= step;
        } else {
            body.pose.center.y += step;
        }
        step *= 0.5;
    }

    // Settle back onto the surface by twice the final step so the body does
    // not hover a hair above it.
    body.pose.center.y += 2.0 * step;
    Ok(())
}
