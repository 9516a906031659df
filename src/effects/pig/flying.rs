use image::RgbaImage;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::{
    effects::overlay::{apply_overlay, band_count, band_positions, OverlayStyle, Placement},
    effects::resources::ResourceSet,
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

use super::{FLYING_PIG_OPACITY, MAX_FLYING_PIGS, PROP_BLUR_SIGMA};

/// Scatters pigs across the sky above the group
pub struct FlyingPigsEffect {
    pigs: ResourceSet,
}

impl FlyingPigsEffect {
    pub fn new(pigs: ResourceSet) -> Self {
        Self { pigs }
    }

    /// Pick pigs and lay them out one per band
    pub fn placements<'a>(
        &'a self,
        width: u32,
        height: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Placement<'a>> {
        let requested = rng.gen_range(1..=MAX_FLYING_PIGS);
        let count = band_count(width, self.pigs.max_width(), requested, MAX_FLYING_PIGS);
        if count < requested {
            debug!("Only room for {} of {} pigs in {}px", count, requested, width);
        }

        let pigs: Vec<&RgbaImage> = (0..count).map(|_| self.pigs.choose(rng)).collect();
        let widths: Vec<u32> = pigs.iter().map(|pig| pig.width()).collect();
        let xs = band_positions(width, &widths, rng);

        pigs.into_iter()
            .zip(xs)
            .map(|(pig, x)| {
                let y = rng.gen_range(0..=height / 3).min(height.saturating_sub(pig.height()));
                Placement::borrowed(x as i64, y as i64, pig)
            })
            .collect()
    }
}

impl Effect for FlyingPigsEffect {
    fn name(&self) -> &str {
        "flying-pigs"
    }

    fn description(&self) -> &str {
        "Sends a few pigs flying over everyone's heads"
    }

    fn process(
        &self,
        image: RgbaImage,
        _frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        let placements = self.placements(image.width(), image.height(), rng);
        debug!("Placing {} flying pigs", placements.len());
        Ok(apply_overlay(image, &placements, OverlayStyle::new(FLYING_PIG_OPACITY, PROP_BLUR_SIGMA)))
    }
}
