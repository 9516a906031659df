use image::RgbaImage;
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::overlay::{apply_overlay, OverlayStyle, Placement},
    effects::resources::ResourceSet,
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

use super::{LOGO_MARGIN, PIG_LOGO_OPACITY, PROP_BLUR_SIGMA};

/// Stamps the logo into the bottom-right corner of a single photo
pub struct PigLogoEffect {
    logos: ResourceSet,
    photo_index: u32,
}

impl PigLogoEffect {
    pub fn new(logos: ResourceSet, photo_index: u32) -> Self {
        Self { logos, photo_index }
    }

    pub fn photo_index(&self) -> u32 {
        self.photo_index
    }

    /// Top-left corner that keeps the logo `LOGO_MARGIN` off the bottom-right edges
    pub fn corner_position(width: u32, height: u32, logo: &RgbaImage) -> (i64, i64) {
        (
            width as i64 - logo.width() as i64 - LOGO_MARGIN as i64,
            height as i64 - logo.height() as i64 - LOGO_MARGIN as i64,
        )
    }
}

impl Effect for PigLogoEffect {
    fn name(&self) -> &str {
        "pig-logo"
    }

    fn description(&self) -> &str {
        "Adds the logo to the corner of one photo in the strip"
    }

    fn process(
        &self,
        image: RgbaImage,
        frame: &PhotoFrame,
        _rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        if frame.photo_index != self.photo_index {
            return Ok(image);
        }

        let logo = self.logos.first();
        let (x, y) = Self::corner_position(image.width(), image.height(), logo);
        debug!("Logo on photo {} at {},{}", frame.photo_index, x, y);

        let placements = [Placement::borrowed(x, y, logo)];
        Ok(apply_overlay(image, &placements, OverlayStyle::new(PIG_LOGO_OPACITY, PROP_BLUR_SIGMA)))
    }
}
