//! # Ghost
//!
//! Translucent apparitions composited over the photo. Selecting the ghost ends
//! the random effect selection for that photo.

mod effect;

pub use effect::GhostEffect;

pub const DEFAULT_GHOST_OPACITY: u8 = 150;
pub const GHOST_TOP_MARGIN: i64 = 10;
pub const GHOST_BLUR_SIGMA: f32 = 2.0;
