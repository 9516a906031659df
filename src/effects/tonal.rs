//! Global colour adjustment

use image::{Rgba, RgbaImage};
use rand::RngCore;

use crate::{
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

pub const DEFAULT_SATURATION: f32 = 0.7;
pub const DEFAULT_CONTRAST: f32 = 1.0;

/// Saturation and contrast scalars applied to the whole photo
///
/// Both factors blend each pixel against a grey reference: its own luma for
/// saturation, the mean luma of the photo for contrast. 0.0 collapses onto the
/// reference, 1.0 leaves the pixel alone, larger values push away from it.
pub struct TonalEffect {
    saturation: f32,
    contrast: f32,
}

impl TonalEffect {
    pub fn new(saturation: f32, contrast: f32) -> Self {
        Self { saturation, contrast }
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }
}

impl Default for TonalEffect {
    fn default() -> Self {
        Self::new(DEFAULT_SATURATION, DEFAULT_CONTRAST)
    }
}

/// Integer luma in 0..=255
pub fn luma(pixel: &Rgba<u8>) -> u8 {
    ((299 * pixel[0] as u32 + 587 * pixel[1] as u32 + 114 * pixel[2] as u32) / 1000) as u8
}

fn blend_channel(value: u8, reference: f32, factor: f32) -> u8 {
    (reference + (value as f32 - reference) * factor).round().clamp(0.0, 255.0) as u8
}

/// Blend the colour channels towards the pixel's own luma
pub fn adjust_saturation(image: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        let grey = luma(pixel) as f32;
        for c in 0..3 {
            pixel[c] = blend_channel(pixel[c], grey, factor);
        }
    }
}

/// Blend the colour channels towards the image's mean luma
pub fn adjust_contrast(image: &mut RgbaImage, factor: f32) {
    if factor == 1.0 || image.width() == 0 || image.height() == 0 {
        return;
    }
    let total: u64 = image.pixels().map(|p| luma(p) as u64).sum();
    let mean = (total as f64 / (image.width() as u64 * image.height() as u64) as f64).round() as f32;

    for pixel in image.pixels_mut() {
        for c in 0..3 {
            pixel[c] = blend_channel(pixel[c], mean, factor);
        }
    }
}

impl Effect for TonalEffect {
    fn name(&self) -> &str {
        "saturation"
    }

    fn description(&self) -> &str {
        "Washes out or boosts the colour and contrast of the whole photo"
    }

    fn process(
        &self,
        mut image: RgbaImage,
        _frame: &PhotoFrame,
        _rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        adjust_saturation(&mut image, self.saturation);
        adjust_contrast(&mut image, self.contrast);
        Ok(image)
    }
}
