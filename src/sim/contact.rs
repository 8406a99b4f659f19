//! Contact sampling against the level's geometry oracle
//!
//! The tricky invariant of the whole engine lives here: a contact vector is
//! only meaningful for the pose it was sampled at. Every code path that moves
//! or rotates the body must re-sample before reasoning about contacts again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::level::Region;
use crate::wrap_degrees;

/// Upper bound on probe points across all layouts.
pub const MAX_SAMPLES: usize = 8;

/// Corner probes of the unit square.
const CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// Corner probes plus axis-aligned edge midpoints.
const CORNERS_AND_EDGES: [Vec2; 8] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 0.0),
];

/// Probe layouts, coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleLayout {
    /// Four corners at `√2 · radius` from the center. Cheap, coarse.
    Corners,
    /// Corners plus edge midpoints; the layout to use whenever
    /// rotation-aware resolution matters.
    #[default]
    CornersAndEdges,
}

impl SampleLayout {
    /// Local probe offsets in unit-square coordinates, fixed order.
    pub fn offsets(self) -> &'static [Vec2] {
        match self {
            SampleLayout::Corners => &CORNERS,
            SampleLayout::CornersAndEdges => &CORNERS_AND_EDGES,
        }
    }

    /// Angular position of probe `index` around an unrotated body, degrees
    /// clockwise from +x. Index 0 is the top-left corner at 225.
    pub fn support_angle(self, index: usize) -> f32 {
        let spacing = 360.0 / self.offsets().len() as f32;
        wrap_degrees(index as f32 * spacing + 225.0)
    }
}

/// Per-probe contact booleans for a single pose, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactVector {
    hits: [bool; MAX_SAMPLES],
    len: usize,
}

impl ContactVector {
    /// Number of probes sampled.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether probe `index` touched the terrain.
    pub fn get(&self, index: usize) -> bool {
        self.hits[index]
    }

    /// Whether any probe touched the terrain.
    pub fn any(&self) -> bool {
        self.hits[..self.len].iter().any(|&hit| hit)
    }

    pub fn count(&self) -> usize {
        self.hits[..self.len].iter().filter(|&&hit| hit).count()
    }

    /// The index of the single active probe, if exactly one is active.
    pub fn solo(&self) -> Option<usize> {
        let mut found = None;
        for (index, &hit) in self.hits[..self.len].iter().enumerate() {
            if hit {
                if found.is_some() {
                    return None;
                }
                found = Some(index);
            }
        }
        found
    }
}

/// Probe the region at every sample point of the body's current pose.
///
/// No side effects; two calls with no intervening pose mutation return
/// identical vectors.
pub fn sample(body: &Body, region: &dyn Region) -> ContactVector {
    let mut hits = [false; MAX_SAMPLES];
    let len = body.layout.offsets().len();
    for (index, hit) in hits[..len].iter_mut().enumerate() {
        *hit = region.contains(body.sample_point(index));
    }
    ContactVector { hits, len }
}
