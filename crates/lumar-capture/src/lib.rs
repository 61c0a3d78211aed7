//! LUMAR Capture Gating
//!
//! Decides, from noisy continuous pose samples, when and what kind of
//! observation is worth transmitting. Per session this is:
//! - a stability window over recent device poses,
//! - a fixed-capacity view-slot tracker for near-field multi-view coverage,
//! - the gating state machine that runs stability, cadence, and visibility
//!   tests in order and builds the resulting keyframe packet.

pub mod gating;
pub mod slots;
pub mod stability;

pub use gating::*;
pub use slots::*;
pub use stability::*;
