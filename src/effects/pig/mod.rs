//! # Pig props
//!
//! Three overlay effects used by the piggy mode:
//!
//! - [`FlyingPigsEffect`] scatters pigs across the upper third of the photo,
//!   one per horizontal band so they never overlap
//! - [`PigNoseEffect`] sizes a snout to each face's nose tip
//! - [`PigLogoEffect`] stamps a logo into the bottom-right corner of one photo

mod flying;
mod logo;
mod nose;

pub use flying::FlyingPigsEffect;
pub use logo::PigLogoEffect;
pub use nose::{nose_placement, PigNoseEffect};

/// Hard cap on pigs per photo, whatever the width allows
pub const MAX_FLYING_PIGS: usize = 5;

pub const FLYING_PIG_OPACITY: u8 = 220;
pub const PIG_NOSE_OPACITY: u8 = 255;
pub const PIG_LOGO_OPACITY: u8 = 255;

pub const PROP_BLUR_SIGMA: f32 = 1.0;

/// Snout width relative to the nose tip span
pub const NOSE_SCALE: f32 = 2.0;

/// Fraction of the bridge-to-tip distance the snout is lifted by
pub const NOSE_LIFT: f32 = 0.25;

/// Distance of the logo from the right and bottom edges
pub const LOGO_MARGIN: u32 = 10;

pub const DEFAULT_LOGO_PHOTO_INDEX: u32 = 4;
