//! Draw geometry for the rendering collaborator
//!
//! The core never draws. It supplies the character's oriented quad plus the
//! accent "platform" strip along its bottom edge, and a capability trait the
//! host's renderer drives.

use glam::Vec2;

use crate::rotate_deg;
use crate::sim::Body;

/// What a quad should be painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Body,
    Accent,
}

/// Minimal painting surface the host must provide.
pub trait Surface {
    fn fill_quad(&mut self, corners: [Vec2; 4], tint: Tint);
}

/// Anything the host can ask to paint itself.
pub trait Renderable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// The character's oriented square and its accent strip, world space,
/// corners in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyQuad {
    pub corners: [Vec2; 4],
    pub accent: [Vec2; 4],
}

/// Geometry for the body's current pose.
pub fn body_quad(body: &Body) -> BodyQuad {
    let place = |locals: [Vec2; 4]| {
        locals.map(|local| body.pose.center + rotate_deg(local * body.radius, body.pose.rotation))
    };
    BodyQuad {
        corners: place([
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]),
        // Strip over the bottom quarter of the square.
        accent: place([
            Vec2::new(-1.0, 0.75),
            Vec2::new(1.0, 0.75),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]),
    }
}

impl Renderable for Body {
    fn draw(&self, surface: &mut dyn Surface) {
        let quad = body_quad(self);
        surface.fill_quad(quad.corners, Tint::Body);
        surface.fill_quad(quad.accent, Tint::Accent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SampleLayout;

    #[test]
    fn test_unrotated_quad_is_axis_aligned() {
        let body = Body::new(Vec2::new(100.0, 200.0), 50.0, SampleLayout::Corners);
        let quad = body_quad(&body);
        assert_eq!(quad.corners[0], Vec2::new(50.0, 150.0));
        assert_eq!(quad.corners[2], Vec2::new(150.0, 250.0));
        // Accent strip hugs the bottom edge.
        assert_eq!(quad.accent[0], Vec2::new(50.0, 237.5));
        assert_eq!(quad.accent[3], Vec2::new(50.0, 250.0));
    }

    #[test]
    fn test_half_turn_swaps_opposite_corners() {
        let mut body = Body::new(Vec2::ZERO, 50.0, SampleLayout::Corners);
        body.rotate_by(180.0);
        let quad = body_quad(&body);
        assert!((quad.corners[0] - Vec2::new(50.0, 50.0)).length() < 1e-3);
        assert!((quad.corners[2] - Vec2::new(-50.0, -50.0)).length() < 1e-3);
    }

    #[test]
    fn test_renderable_emits_body_then_accent() {
        struct Recorder(Vec<Tint>);
        impl Surface for Recorder {
            fn fill_quad(&mut self, _corners: [Vec2; 4], tint: Tint) {
                self.0.push(tint);
            }
        }
        let body = Body::new(Vec2::ZERO, 50.0, SampleLayout::Corners);
        let mut recorder = Recorder(Vec::new());
        body.draw(&mut recorder);
        assert_eq!(recorder.0, vec![Tint::Body, Tint::Accent]);
    }
}
