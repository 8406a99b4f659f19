//! The kinematic body: pose, velocity, and probe layout
//!
//! There is exactly one dynamic body per level. The session recreates it on
//! every level (re)start instead of mutating it in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::SampleLayout;
use crate::{rotate_deg, wrap_degrees};

/// Position and orientation in screen space (+y down).
///
/// `rotation` is degrees clockwise, always stored in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub center: Vec2,
    pub rotation: f32,
}

/// The controllable character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pose: Pose,
    /// px/s. Horizontal magnitude is capped by the integrator.
    pub velocity: Vec2,
    /// Half-extent of the square, px.
    pub radius: f32,
    /// Probe layout used for every contact query against this body.
    pub layout: SampleLayout,
}

impl Body {
    /// A body at rest with no rotation.
    pub fn new(center: Vec2, radius: f32, layout: SampleLayout) -> Self {
        Self {
            pose: Pose {
                center,
                rotation: 0.0,
            },
            velocity: Vec2::ZERO,
            radius,
            layout,
        }
    }

    /// Rotate by `delta` degrees, keeping the stored rotation in `[0, 360)`.
    pub fn rotate_by(&mut self, delta: f32) {
        self.pose.rotation = wrap_degrees(self.pose.rotation + delta);
    }

    /// World-space position of probe point `index` for the current pose.
    pub fn sample_point(&self, index: usize) -> Vec2 {
        let local = self.layout.offsets()[index] * self.radius;
        self.pose.center + rotate_deg(local, self.pose.rotation)
    }
}
