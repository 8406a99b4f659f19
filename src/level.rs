//! Level geometry contracts
//!
//! Terrain is an opaque region built once per level by an external geometry
//! provider from a closed outline plus a spawn marker. The physics core only
//! ever asks one question of it: is this point inside?

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// The geometry oracle.
///
/// Must be side-effect-free and cheap; it is queried at every probe point of
/// every contact sample, many times per tick.
pub trait Region {
    /// Whether `point` lies inside solid terrain.
    fn contains(&self, point: Vec2) -> bool;
}

/// Fall-out and completion thresholds, px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBounds {
    /// A body fully past this x has finished the level.
    pub right: f32,
    /// A body fully below this y has fallen out.
    pub bottom: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            right: LEVEL_WIDTH,
            bottom: LEVEL_HEIGHT,
        }
    }
}

/// One playable level: terrain, spawn marker, and bounds.
///
/// Replaced wholesale on level change; the physics core never mutates it.
pub struct Level {
    pub geometry: Box<dyn Region>,
    /// Bottom-center spawn marker. The session subtracts the body's vertical
    /// half-extent so the body rests just above it.
    pub spawn: Vec2,
    pub bounds: LevelBounds,
}

/// Supplies levels by number, starting at 1.
pub trait LevelProvider {
    /// `None` means there is no such level; the session reads that as "all
    /// levels complete", not as an error.
    fn load(&self, number: u32) -> Option<Level>;
}
