//! # Frames
//!
//! Full-canvas overlays. [`RandomFullFrameEffect`] and [`FinalFrameEffect`]
//! run per photo; [`StripFrameEffect`] runs once over the assembled strip.
//! Frames are pasted at full opacity with no mask blur.

mod full_frame;
mod strip_frame;

pub use full_frame::{overlay_full_frame, FinalFrameEffect, RandomFullFrameEffect};
pub use strip_frame::{FrameChoice, StripFrameEffect};

pub const FRAME_OPACITY: u8 = 255;
pub const FRAME_BLUR_SIGMA: f32 = 0.0;

pub const DEFAULT_FINAL_FRAME_PHOTO_INDEX: u32 = 4;
