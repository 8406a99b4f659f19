//! The per-tick motion integrator
//!
//! Advances the body by one frame: held-input thrust, translation with the
//! pre-tick velocity, gravity, rotation, penetration resolution, friction
//! and normal force, then the out-of-bounds checks. The ordering is
//! semi-implicit Euler (translate with the old velocity, then integrate
//! forces) and must be preserved - it is what keeps grounded bodies stable
//! across frame rates.

use super::body::Body;
use super::contact::sample;
use super::orientation;
use super::resolve::{GeometryExhausted, resolve};
use crate::consts::{FRICTION, GRAVITY, MAX_SPEED, SENSITIVITY};
use crate::level::{LevelBounds, Region};

/// Input sampled for a single tick.
///
/// `left`/`right` and the spin pair are held-key levels; `restart` and
/// `quit` are one-shot edges consumed by the session before integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub spin_cw: bool,
    pub spin_ccw: bool,
    pub restart: bool,
    pub quit: bool,
}

impl TickInput {
    /// -1 left, +1 right, 0 when neither or both are held.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// +1 clockwise, -1 counterclockwise, 0 when neither or both are held.
    pub fn spin(&self) -> f32 {
        match (self.spin_cw, self.spin_ccw) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// What the integrator observed this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Pose or velocity moved - the renderer needs a redraw.
    pub changed: bool,
    /// Body fell past the level's bottom bound.
    pub fell: bool,
    /// Body fully crossed the level's right bound.
    pub crossed: bool,
}

/// Advance the body by `dt` seconds against one level's terrain.
pub fn step(
    body: &mut Body,
    region: &dyn Region,
    bounds: &LevelBounds,
    input: &TickInput,
    dt: f32,
) -> Result<StepOutcome, GeometryExhausted> {
    let pose_before = body.pose;
    let velocity_before = body.velocity;

    // 1. Held-input thrust, capped at the horizontal speed limit.
    let thrust = input.horizontal();
    if thrust != 0.0 {
        body.velocity.x =
            (body.velocity.x + thrust * SENSITIVITY * dt).clamp(-MAX_SPEED, MAX_SPEED);
    }

    // 2. Translate with the pre-gravity velocity.
    body.pose.center += body.velocity * dt;

    // 3. Gravity.
    body.velocity.y += GRAVITY * dt;

    // 4. Rotation: toppling on a single support, player spin only while
    //    fully clear of the terrain.
    let contacts = sample(body, region);
    let rotated = if contacts.any() {
        orientation::topple(body, &contacts, dt)
    } else {
        orientation::spin(body, input.spin(), dt)
    };

    // 5. The rotation may have shifted probes in or out of the terrain;
    //    re-sample before resolving what remains.
    let contacts = if rotated {
        sample(body, region)
    } else {
        contacts
    };
    if contacts.any() {
        resolve(body, region)?;
        // Friction decays horizontal speed toward zero without crossing it;
        // the normal force cancels gravity exactly, no bounce.
        let drag = (FRICTION * dt).min(body.velocity.x.abs());
        body.velocity.x -= body.velocity.x.signum() * drag;
        body.velocity.y = 0.0;
    }

    // 6. Termination thresholds: fully below the bottom bound, or fully
    //    past the right bound.
    let fell = body.pose.center.y - body.radius > bounds.bottom;
    let crossed = body.pose.center.x - body.radius > bounds.right;

    let changed = body.pose != pose_before || body.velocity != velocity_before;
    Ok(StepOutcome {
        changed,
        fell,
        crossed,
    })
}
