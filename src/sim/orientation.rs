//! Rotational response: gravity toppling and player spin
//!
//! A body balanced on exactly one probe point tips over; a body in free
//! space can be spun by the player. Fully supported (or fully clear) bodies
//! get no gravity rotation at all.

use super::body::Body;
use super::contact::ContactVector;
use crate::consts::{ROTATION_GRAVITY, ROTATION_SENSITIVITY};
use crate::wrap_degrees;

/// Below this the support is directly above or below the center and the
/// body is in (unstable) balance.
const BALANCE_EPS: f32 = 1e-4;

/// Tip the body away from a single support point.
///
/// The support's world angle is its layout angle offset by the current
/// rotation. A support left of center (`cos < 0`) tips the body clockwise,
/// a support right of center counterclockwise - always away from the
/// contact, never into it. Returns whether the rotation changed.
pub fn topple(body: &mut Body, contacts: &ContactVector, dt: f32) -> bool {
    let Some(index) = contacts.solo() else {
        return false;
    };
    let support = wrap_degrees(body.layout.support_angle(index) + body.pose.rotation);
    let lean = support.to_radians().cos();
    if lean.abs() <= BALANCE_EPS || dt <= 0.0 {
        return false;
    }
    body.rotate_by(-lean.signum() * ROTATION_GRAVITY * dt);
    true
}

/// Player-driven spin: `direction` is +1 clockwise, -1 counterclockwise,
/// 0 for none. Uncapped, wrapped mod 360. Returns whether the rotation
/// changed.
pub fn spin(body: &mut Body, direction: f32, dt: f32) -> bool {
    if direction == 0.0 || dt <= 0.0 {
        return false;
    }
    body.rotate_by(direction * ROTATION_SENSITIVITY * dt);
    true
}
