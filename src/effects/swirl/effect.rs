use std::f64::consts::TAU;

use image::{imageops, GrayImage, Luma, RgbaImage};
use rand::{Rng, RngCore};
use tracing::debug;

use crate::{
    effects::overlay::composite,
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

use super::{JITTER, SEAM_BLUR_SIGMA, SWIRL_OPACITY, WARP_BLUR_SIGMA};

/// Twists the inside of every face box around its centre
///
/// The warp always samples the untouched snapshot, so stacking it after other
/// effects never swirls already-swirled pixels.
pub struct SwirlEffect {
    strength: f32,
}

impl SwirlEffect {
    pub fn new(strength: f32) -> Self {
        Self { strength }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }
}

/// Distance from the centre to the ellipse boundary along angle `theta`
///
/// `a` is the vertical semi-axis, `b` the horizontal one.
pub fn ellipse_radius(a: f64, b: f64, theta: f64) -> f64 {
    let (sin, cos) = theta.sin_cos();
    (a * b) / (a * a * cos * cos + b * b * sin * sin).sqrt()
}

/// Polar position of a crop pixel relative to the crop centre
///
/// Returns `(distance, angle, swirl_amount)`; `swirl_amount <= 0` means the
/// pixel lies on or outside the inscribed ellipse.
fn polar(x: u32, y: u32, width: u32, height: u32) -> (f64, f64, f64) {
    let a = height as f64 / 2.0;
    let b = width as f64 / 2.0;
    let u = x as f64 - b;
    let v = y as f64 - a;

    let distance = u.hypot(v);
    let theta = v.atan2(u);
    let radius = ellipse_radius(a, b, theta);
    let amount = if radius > 0.0 { 1.0 - distance / radius } else { 0.0 };
    (distance, theta, amount)
}

/// Whether a crop pixel sits exactly on the swirl centre
pub fn is_centre(x: u32, y: u32, width: u32, height: u32) -> bool {
    polar(x, y, width, height).0 == 0.0
}

/// Whether a crop pixel is part of the swirled region
pub fn inside_ellipse(x: u32, y: u32, width: u32, height: u32) -> bool {
    let (distance, _, amount) = polar(x, y, width, height);
    distance == 0.0 || amount > 0.0
}

/// Where the crop pixel at `(x, y)` should take its colour from
///
/// `None` keeps the pixel as it is: the exact centre, anything outside the
/// ellipse, and samples that would land outside the crop.
pub fn swirl_source_coordinate(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    strength: f32,
    jitter: f32,
) -> Option<(u32, u32)> {
    let (distance, theta, amount) = polar(x, y, width, height);
    if distance == 0.0 || amount <= 0.0 {
        return None;
    }

    let twist = amount * strength as f64 * TAU * jitter as f64;
    let (sin, cos) = (theta + twist).sin_cos();
    let sx = (width as f64 / 2.0 + distance * cos).round();
    let sy = (height as f64 / 2.0 + distance * sin).round();

    if sx < 0.0 || sy < 0.0 || sx >= width as f64 || sy >= height as f64 {
        return None;
    }
    Some((sx as u32, sy as u32))
}

/// Swirl a crop, sampling only from the unwarped input
pub fn swirl_crop(source: &RgbaImage, strength: f32, rng: &mut dyn RngCore) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut output = source.clone();

    for y in 0..height {
        for x in 0..width {
            let jitter = rng.gen_range(1.0 - JITTER..=1.0 + JITTER);
            if let Some((sx, sy)) = swirl_source_coordinate(x, y, width, height, strength, jitter) {
                output.put_pixel(x, y, *source.get_pixel(sx, sy));
            }
        }
    }

    output
}

/// Soft elliptical mask used to blend the swirled crop back
///
/// The blur feathers the edge inwards only: pixels outside the ellipse stay at
/// zero so the surroundings come back untouched. The exact centre is never
/// swirled, so it stays at zero too.
pub fn seam_mask(width: u32, height: u32, opacity: u8, blur_sigma: f32) -> GrayImage {
    let hard = GrayImage::from_fn(width, height, |x, y| {
        Luma([if inside_ellipse(x, y, width, height) { opacity } else { 0 }])
    });
    let mut soft = if blur_sigma > 0.0 {
        imageops::blur(&hard, blur_sigma)
    } else {
        hard.clone()
    };

    for (x, y, pixel) in soft.enumerate_pixels_mut() {
        if hard.get_pixel(x, y)[0] == 0 || is_centre(x, y, width, height) {
            pixel[0] = 0;
        }
    }
    soft
}

impl Effect for SwirlEffect {
    fn name(&self) -> &str {
        "swirl"
    }

    fn description(&self) -> &str {
        "Swirls each face around the centre of its bounding box"
    }

    fn process(
        &self,
        mut image: RgbaImage,
        frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        let (width, height) = frame.snapshot.dimensions();

        for (index, face) in frame.faces.iter().enumerate() {
            let bbox = face.bounding_box.clamp_to(width, height);
            if bbox.is_empty() {
                debug!("Face {} has an empty box, not swirling", index);
                continue;
            }
            let (crop_w, crop_h) = (bbox.width(), bbox.height());

            let original = imageops::crop_imm(&frame.snapshot, bbox.left, bbox.top, crop_w, crop_h).to_image();
            let warped = swirl_crop(&original, self.strength, rng);
            let warped = imageops::blur(&warped, WARP_BLUR_SIGMA);

            let current = imageops::crop_imm(&image, bbox.left, bbox.top, crop_w, crop_h).to_image();
            let mask = seam_mask(crop_w, crop_h, SWIRL_OPACITY, SEAM_BLUR_SIGMA);
            let blended = composite(&warped, &current, &mask);

            imageops::replace(&mut image, &blended, bbox.left as i64, bbox.top as i64);
            debug!("Swirled face {} ({}x{} at {},{})", index, crop_w, crop_h, bbox.left, bbox.top);
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::{BoundingBox, FaceGeometry};
    use image::Rgba;
    use rand::{rngs::StdRng, SeedableRng};

    fn noisy(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 31 % 256) as u8, (y * 17 % 256) as u8, ((x + y) * 7 % 256) as u8, 255])
        })
    }

    #[test]
    fn test_ellipse_radius_axes() {
        assert!((ellipse_radius(75.0, 100.0, 0.0) - 100.0).abs() < 1e-9);
        assert!((ellipse_radius(75.0, 100.0, std::f64::consts::FRAC_PI_2) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_centre_and_outside_are_skipped() {
        // 200x150 crop: centre sits at (100, 75)
        assert_eq!(swirl_source_coordinate(100, 75, 200, 150, 1.0, 1.0), None);
        assert_eq!(swirl_source_coordinate(0, 0, 200, 150, 1.0, 1.0), None);
        assert_eq!(swirl_source_coordinate(199, 149, 200, 150, 1.0, 1.0), None);
        assert!(swirl_source_coordinate(110, 75, 200, 150, 1.0, 1.0).is_some());
    }

    #[test]
    fn test_zero_strength_is_identity_inside_ellipse() {
        for y in 0..150 {
            for x in 0..200 {
                if let Some(source) = swirl_source_coordinate(x, y, 200, 150, 0.0, 1.0) {
                    assert_eq!(source, (x, y));
                }
            }
        }

        let crop = noisy(200, 150);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(swirl_crop(&crop, 0.0, &mut rng), crop);
    }

    #[test]
    fn test_swirl_keeps_outside_and_centre() {
        let crop = noisy(200, 150);
        let mut rng = StdRng::seed_from_u64(11);
        let warped = swirl_crop(&crop, 1.0, &mut rng);

        let mut changed = 0;
        for (x, y, pixel) in warped.enumerate_pixels() {
            if !inside_ellipse(x, y, 200, 150) {
                assert_eq!(pixel, crop.get_pixel(x, y));
            } else if pixel != crop.get_pixel(x, y) {
                changed += 1;
            }
        }
        assert_eq!(warped.get_pixel(100, 75), crop.get_pixel(100, 75));
        assert!(changed > 0);
    }

    #[test]
    fn test_seeded_swirl_is_reproducible() {
        let crop = noisy(60, 80);
        let a = swirl_crop(&crop, 2.5, &mut StdRng::seed_from_u64(5));
        let b = swirl_crop(&crop, 2.5, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seam_mask_is_zero_outside() {
        let mask = seam_mask(40, 30, 230, 3.0);
        for (x, y, pixel) in mask.enumerate_pixels() {
            if !inside_ellipse(x, y, 40, 30) {
                assert_eq!(pixel[0], 0);
            }
        }
        assert_eq!(mask.get_pixel(20, 15)[0], 0);
        assert!(mask.get_pixel(22, 15)[0] > 0);
    }

    #[test]
    fn test_effect_only_touches_face_ellipse() {
        let source = noisy(400, 300);
        let face = FaceGeometry::new(BoundingBox::new(100, 300, 250, 100));
        let frame = PhotoFrame {
            snapshot: source.clone(),
            faces: vec![face],
            photo_index: 1,
        };
        let mut rng = StdRng::seed_from_u64(9);

        let output = SwirlEffect::new(1.0)
            .process(source.clone(), &frame, &mut rng)
            .unwrap();

        assert_eq!(output.dimensions(), (400, 300));
        for (x, y, pixel) in output.enumerate_pixels() {
            let in_box = (100..300).contains(&x) && (100..250).contains(&y);
            if !in_box || !inside_ellipse(x - 100, y - 100, 200, 150) {
                assert_eq!(pixel, source.get_pixel(x, y), "pixel {},{} changed", x, y);
            }
        }
        // crop centre (100, 75) lands on (200, 175)
        assert_eq!(output.get_pixel(200, 175), source.get_pixel(200, 175));
    }

    #[test]
    fn test_no_faces_is_identity() {
        let source = noisy(50, 40);
        let frame = PhotoFrame {
            snapshot: source.clone(),
            faces: Vec::new(),
            photo_index: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let output = SwirlEffect::new(3.0).process(source.clone(), &frame, &mut rng).unwrap();
        assert_eq!(output, source);
    }
}
