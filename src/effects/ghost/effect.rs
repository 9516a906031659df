use image::RgbaImage;
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::overlay::{apply_overlay, OverlayStyle, Placement},
    effects::resources::ResourceSet,
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

use super::{GHOST_BLUR_SIGMA, GHOST_TOP_MARGIN};

/// Drops a translucent ghost into the top centre of the photo
pub struct GhostEffect {
    ghosts: ResourceSet,
    opacity: u8,
}

impl GhostEffect {
    pub fn new(ghosts: ResourceSet, opacity: u8) -> Self {
        Self { ghosts, opacity }
    }

    /// Top-left corner for a ghost: horizontally centred, a few pixels down
    pub fn placement_for(image_width: u32, ghost_width: u32) -> (i64, i64) {
        let left = (image_width / 2) as i64 - (ghost_width / 2) as i64;
        (left, GHOST_TOP_MARGIN)
    }
}

impl Effect for GhostEffect {
    fn name(&self) -> &str {
        "ghost"
    }

    fn description(&self) -> &str {
        "Adds a see-through ghost hovering over the group"
    }

    fn process(
        &self,
        image: RgbaImage,
        _frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        let ghost = self.ghosts.choose(rng);
        let (x, y) = Self::placement_for(image.width(), ghost.width());
        debug!("Placing {}x{} ghost at {},{}", ghost.width(), ghost.height(), x, y);

        let placements = [Placement::borrowed(x, y, ghost)];
        Ok(apply_overlay(image, &placements, OverlayStyle::new(self.opacity, GHOST_BLUR_SIGMA)))
    }
}
