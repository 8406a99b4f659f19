//! Deterministic physics module
//!
//! All motion and collision logic lives here. This module must be pure and
//! deterministic:
//! - Same inputs, same body state out
//! - No wall-clock reads, no RNG
//! - No rendering or platform dependencies

pub mod body;
pub mod contact;
pub mod orientation;
pub mod resolve;
pub mod tick;

pub use body::{Body, Pose};
pub use contact::{ContactVector, SampleLayout, sample};
pub use resolve::{GeometryExhausted, resolve};
pub use tick::{StepOutcome, TickInput, step};
