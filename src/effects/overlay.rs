//! Alpha-mask compositing shared by every overlay-style effect.
//!
//! The flow is always the same:
//!
//! 1. paste auxiliary images onto a transparent canvas the size of the target;
//! 2. mark every canvas pixel with non-zero alpha in a single-channel mask,
//!    using one fixed opacity for the whole effect;
//! 3. blur the mask to soften edges;
//! 4. blend canvas over target through the mask.
//!
//! Pixels the mask never touches come back bit-identical.

use std::borrow::Cow;

use image::{imageops, imageops::FilterType, GrayImage, Luma, Rgba, RgbaImage};
use rand::{Rng, RngCore};

/// One auxiliary image and where its top-left corner lands on the target
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    pub x: i64,
    pub y: i64,
    pub image: Cow<'a, RgbaImage>,
}

impl<'a> Placement<'a> {
    pub fn borrowed(x: i64, y: i64, image: &'a RgbaImage) -> Self {
        Self { x, y, image: Cow::Borrowed(image) }
    }

    pub fn owned(x: i64, y: i64, image: RgbaImage) -> Self {
        Self { x, y, image: Cow::Owned(image) }
    }
}

/// Mask strength and edge softness for one overlay effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Value written into the mask wherever the overlay is visible
    pub opacity: u8,

    /// Gaussian sigma applied to the mask; 0 disables the blur
    pub blur_sigma: f32,
}

impl OverlayStyle {
    pub const fn new(opacity: u8, blur_sigma: f32) -> Self {
        Self { opacity, blur_sigma }
    }
}

/// Mask value for one canvas pixel
///
/// Any visible pixel gets the effect's opacity, regardless of how visible it
/// is. Transparent pixels stay unmasked.
pub fn mask_value(alpha: u8, opacity: u8) -> u8 {
    if alpha == 0 {
        0
    } else {
        opacity
    }
}

/// Build the unblurred mask for an overlay canvas
pub fn build_mask(canvas: &RgbaImage, opacity: u8) -> GrayImage {
    GrayImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        Luma([mask_value(canvas.get_pixel(x, y)[3], opacity)])
    })
}

/// Blend `foreground` over `background` with per-pixel weights from `mask`
///
/// All three images must share dimensions.
pub fn composite(foreground: &RgbaImage, background: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    let mut output = background.clone();
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let weight = mask.get_pixel(x, y)[0];
        if weight == 0 {
            continue;
        }
        *pixel = blend_pixel(foreground.get_pixel(x, y), pixel, weight);
    }
    output
}

/// Linear blend of two pixels, `weight` in 0..=255 favouring `foreground`
///
/// Only colour is blended; the background keeps its own alpha.
pub fn blend_pixel(foreground: &Rgba<u8>, background: &Rgba<u8>, weight: u8) -> Rgba<u8> {
    let m = weight as f32 / 255.0;
    let mut out = [0u8, 0, 0, background[3]];
    for (c, value) in out.iter_mut().take(3).enumerate() {
        let blended = foreground[c] as f32 * m + background[c] as f32 * (1.0 - m);
        *value = blended.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Paste placements onto a transparent canvas and blend it over `target`
///
/// With no placements the target is returned untouched.
pub fn apply_overlay(target: RgbaImage, placements: &[Placement<'_>], style: OverlayStyle) -> RgbaImage {
    if placements.is_empty() {
        return target;
    }

    let (width, height) = target.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
    for placement in placements {
        imageops::replace(&mut canvas, &*placement.image, placement.x, placement.y);
    }

    let mut mask = build_mask(&canvas, style.opacity);
    if style.blur_sigma > 0.0 {
        mask = imageops::blur(&mask, style.blur_sigma);
    }

    composite(&canvas, &target, &mask)
}

/// Resize preserving aspect ratio so the result is `width` pixels wide
pub fn scale_to_width(image: &RgbaImage, width: u32) -> RgbaImage {
    let width = width.max(1);
    let height = ((image.height() as f64 * width as f64 / image.width().max(1) as f64).round() as u32).max(1);
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Resize to exactly cover a canvas
pub fn scale_to_canvas(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// How many equally sized horizontal bands fit across an image
///
/// Never more than were requested, never more than `hard_max`, and never more
/// than `floor(image_width / max_item_width)`.
pub fn band_count(image_width: u32, max_item_width: u32, requested: usize, hard_max: usize) -> usize {
    if max_item_width == 0 {
        return 0;
    }
    let fit = (image_width / max_item_width) as usize;
    requested.min(fit).min(hard_max)
}

/// Left edge for each item, one item per band
///
/// The image width is split into `item_widths.len()` equal bands; each item
/// lands at a random offset inside its own band and never crosses into the
/// next one. Callers must size the list with [`band_count`] first.
pub fn band_positions(image_width: u32, item_widths: &[u32], rng: &mut dyn RngCore) -> Vec<u32> {
    if item_widths.is_empty() {
        return Vec::new();
    }
    let band_width = image_width / item_widths.len() as u32;

    item_widths
        .iter()
        .enumerate()
        .map(|(band, &item_width)| {
            let start = band as u32 * band_width;
            let slack = band_width.saturating_sub(item_width);
            start + rng.gen_range(0..=slack)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 90, 255]))
    }

    #[test]
    fn test_transparent_overlay_leaves_target_unchanged() {
        let target = gradient(64, 48);
        let ghost = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 0]));
        let placements = [Placement::borrowed(10, 10, &ghost)];

        let output = apply_overlay(target.clone(), &placements, OverlayStyle::new(150, 2.0));
        assert_eq!(output, target);
    }

    #[test]
    fn test_no_placements_is_identity() {
        let target = gradient(16, 16);
        let output = apply_overlay(target.clone(), &[], OverlayStyle::new(255, 1.0));
        assert_eq!(output, target);
    }

    #[test]
    fn test_mask_is_single_opacity() {
        let mut canvas = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 0]));
        canvas.put_pixel(1, 0, Rgba([1, 2, 3, 1]));
        canvas.put_pixel(2, 0, Rgba([1, 2, 3, 255]));

        let mask = build_mask(&canvas, 150);
        let values: Vec<u8> = mask.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 150, 150, 0]);
    }

    #[test]
    fn test_full_opacity_unblurred_overlay_replaces_pixels() {
        let target = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let prop = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 255]));
        let placements = [Placement::borrowed(3, 3, &prop)];

        let output = apply_overlay(target, &placements, OverlayStyle::new(255, 0.0));
        assert_eq!(*output.get_pixel(3, 3), Rgba([200, 100, 50, 255]));
        assert_eq!(*output.get_pixel(4, 4), Rgba([200, 100, 50, 255]));
        assert_eq!(*output.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_placement_outside_canvas_is_clipped() {
        let target = gradient(10, 10);
        let prop = RgbaImage::from_pixel(6, 6, Rgba([255, 0, 0, 255]));
        let placements = [Placement::borrowed(-3, 7, &prop)];

        let output = apply_overlay(target, &placements, OverlayStyle::new(255, 0.0));
        assert_eq!(output.dimensions(), (10, 10));
        assert_eq!(*output.get_pixel(0, 9), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_blend_extremes() {
        let fg = Rgba([200, 100, 0, 255]);
        let bg = Rgba([0, 50, 100, 255]);
        assert_eq!(blend_pixel(&fg, &bg, 0), bg);
        assert_eq!(blend_pixel(&fg, &bg, 255), fg);
    }

    #[test]
    fn test_blend_keeps_background_alpha() {
        let fg = Rgba([255, 255, 255, 0]);
        let bg = Rgba([0, 0, 0, 255]);
        assert_eq!(blend_pixel(&fg, &bg, 150), Rgba([150, 150, 150, 255]));
        assert_eq!(blend_pixel(&Rgba([10, 20, 30, 90]), &bg, 255), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_blurred_overlay_keeps_target_opaque() {
        let target = gradient(64, 48);
        let ghost = RgbaImage::from_fn(20, 20, |x, _| Rgba([255, 255, 255, if x < 10 { 255 } else { 80 }]));
        let placements = [Placement::borrowed(20, 10, &ghost)];

        let output = apply_overlay(target, &placements, OverlayStyle::new(150, 2.0));
        assert!(output.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_band_count_limits() {
        // 600 / 250 = 2 bands fit
        assert_eq!(band_count(600, 250, 5, 10), 2);
        assert_eq!(band_count(600, 100, 3, 10), 3);
        assert_eq!(band_count(600, 100, 9, 4), 4);
        assert_eq!(band_count(100, 250, 3, 10), 0);
        assert_eq!(band_count(100, 0, 3, 10), 0);
    }

    #[test]
    fn test_band_positions_never_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        let widths = [90, 120, 100];
        let count = band_count(400, 120, widths.len(), 5);
        assert_eq!(count, 3);

        for _ in 0..50 {
            let xs = band_positions(400, &widths, &mut rng);
            let band = 400 / 3;
            for (i, (&x, &w)) in xs.iter().zip(widths.iter()).enumerate() {
                assert!(x >= i as u32 * band);
                assert!(x + w <= (i as u32 + 1) * band);
            }
        }
    }

    #[test]
    fn test_scale_to_width_keeps_aspect() {
        let img = RgbaImage::new(200, 100);
        assert_eq!(scale_to_width(&img, 50).dimensions(), (50, 25));
        assert_eq!(scale_to_canvas(&img, 30, 40).dimensions(), (30, 40));
    }
}
