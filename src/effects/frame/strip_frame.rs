use image::RgbaImage;
use rand::RngCore;
use tracing::info;

use crate::effects::resources::ResourceSet;

use super::full_frame::overlay_full_frame;

/// How a strip frame picks among its loaded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameChoice {
    /// Always the first image in file-name order
    Fixed,
    /// A uniformly random image per strip
    Random,
}

/// Themed frame laid over an assembled strip
///
/// Unlike the per-photo effects this works on the whole strip, after
/// assembly, so it has no photo frame or faces to look at.
pub struct StripFrameEffect {
    frames: ResourceSet,
    choice: FrameChoice,
}

impl StripFrameEffect {
    pub fn new(frames: ResourceSet, choice: FrameChoice) -> Self {
        Self { frames, choice }
    }

    pub fn choice(&self) -> FrameChoice {
        self.choice
    }

    pub fn frames(&self) -> &ResourceSet {
        &self.frames
    }

    /// Scale the chosen frame to the strip and blend it on top
    pub fn apply(&self, strip: RgbaImage, rng: &mut dyn RngCore) -> RgbaImage {
        let frame = match self.choice {
            FrameChoice::Fixed => self.frames.first(),
            FrameChoice::Random => self.frames.choose(rng),
        };
        info!(
            "Framing {}x{} strip with a {}x{} frame from {:?}",
            strip.width(),
            strip.height(),
            frame.width(),
            frame.height(),
            self.frames.source()
        );
        overlay_full_frame(strip, frame)
    }
}
