//! # Face Swirl
//!
//! Elliptical twist confined to each detected face box. The remap itself is a
//! pure function of crop coordinates ([`swirl_source_coordinate`]) so it can be
//! checked without building images.

mod effect;

pub use effect::{
    ellipse_radius, inside_ellipse, seam_mask, swirl_crop, swirl_source_coordinate, SwirlEffect,
};

/// Per-pixel random spread applied to the twist angle (±2%)
pub const JITTER: f32 = 0.02;

/// Mask value used when blending the swirled face back
pub const SWIRL_OPACITY: u8 = 230;

/// Softening applied to the swirled crop before blending
pub const WARP_BLUR_SIGMA: f32 = 0.8;

/// Feathering of the elliptical seam
pub const SEAM_BLUR_SIGMA: f32 = 4.0;

pub const DEFAULT_STRENGTH: f32 = 1.0;
