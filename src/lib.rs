//! Glissade - physics core for a momentum platformer
//!
//! Core modules:
//! - `sim`: deterministic physics (body, contact sampling, toppling,
//!   penetration resolution, the per-tick driver)
//! - `level`: geometry-oracle and level-provider contracts
//! - `session`: level/session controller, outcomes, best-time bookkeeping
//! - `input`: held-key state and key mapping
//! - `draw`: quad geometry for the rendering collaborator
//! - `persistence`: key-value record stores
//! - `platform`: logging setup and frame pacing

pub mod draw;
pub mod input;
pub mod level;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod session;
pub mod sim;

pub use records::Records;
pub use session::{Outcome, Session, SessionPhase};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration, px/s².
    pub const GRAVITY: f32 = 1000.0;
    /// Grounded horizontal deceleration, px/s².
    pub const FRICTION: f32 = 500.0;
    /// Held-key horizontal acceleration, px/s².
    pub const SENSITIVITY: f32 = 1000.0;
    /// Horizontal speed cap, px/s.
    pub const MAX_SPEED: f32 = 750.0;
    /// Character half-extent, px.
    pub const BODY_RADIUS: f32 = 50.0;

    /// Topple rate off a single support point, degrees/s.
    pub const ROTATION_GRAVITY: f32 = 90.0;
    /// Player spin rate, degrees/s.
    pub const ROTATION_SENSITIVITY: f32 = 180.0;

    /// Coarse escape step for penetration resolution, px.
    pub const RESOLVE_COARSE_STEP: f32 = 100.0;
    /// Binary-search refinement iterations.
    pub const RESOLVE_ITERATIONS: u32 = 16;
    /// Coarse steps allowed before the geometry is declared inescapable.
    pub const RESOLVE_COARSE_CAP: u32 = 64;

    /// Default level extent, px.
    pub const LEVEL_WIDTH: f32 = 1920.0;
    pub const LEVEL_HEIGHT: f32 = 1280.0;

    /// Target frame admission rate.
    pub const TARGET_FPS: f64 = 60.0;
}

/// Wrap an angle in degrees to `[0, 360)`.
///
/// The raw remainder is negative for negative inputs and must be folded back
/// into range before it is stored on a pose.
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Rotate a vector by `degrees`, clockwise in screen space (+y down).
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_degrees_basics() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
        assert_eq!(wrap_degrees(-360.0), 0.0);
    }

    #[test]
    fn test_rotate_deg_quarter_turn() {
        // +x rotated 90 degrees clockwise (screen space) points down (+y)
        let v = rotate_deg(Vec2::new(1.0, 0.0), 90.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn wrap_degrees_stays_in_range(degrees in -1.0e6f32..1.0e6) {
            let wrapped = wrap_degrees(degrees);
            prop_assert!((0.0..360.0).contains(&wrapped));
        }
    }
}
