use image::RgbaImage;
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::overlay::{apply_overlay, scale_to_canvas, OverlayStyle, Placement},
    effects::resources::ResourceSet,
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

use super::{FRAME_BLUR_SIGMA, FRAME_OPACITY};

/// Stretch `overlay` over the whole of `image` and blend it at full opacity
pub fn overlay_full_frame(image: RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let scaled = scale_to_canvas(overlay, image.width(), image.height());
    let placements = [Placement::owned(0, 0, scaled)];
    apply_overlay(image, &placements, OverlayStyle::new(FRAME_OPACITY, FRAME_BLUR_SIGMA))
}

/// Covers each photo with a frame picked at random
pub struct RandomFullFrameEffect {
    frames: ResourceSet,
}

impl RandomFullFrameEffect {
    pub fn new(frames: ResourceSet) -> Self {
        Self { frames }
    }
}

impl Effect for RandomFullFrameEffect {
    fn name(&self) -> &str {
        "full-frame"
    }

    fn description(&self) -> &str {
        "Lays a randomly chosen full-size frame over the photo"
    }

    fn process(
        &self,
        image: RgbaImage,
        _frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        let overlay = self.frames.choose(rng);
        debug!("Full frame overlay {}x{}", overlay.width(), overlay.height());
        Ok(overlay_full_frame(image, overlay))
    }
}

/// Covers only the closing photo of the session
pub struct FinalFrameEffect {
    frame: ResourceSet,
    photo_index: u32,
}

impl FinalFrameEffect {
    pub fn new(frame: ResourceSet, photo_index: u32) -> Self {
        Self { frame, photo_index }
    }
}

impl Effect for FinalFrameEffect {
    fn name(&self) -> &str {
        "final-frame"
    }

    fn description(&self) -> &str {
        "Lays the closing frame over the last photo"
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
        Ok(overlay_full_frame(image, self.frame.first()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::{rngs::StdRng, SeedableRng};

    /// Opaque border two pixels wide around a transparent window
    fn border_frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if x < 2 || y < 2 || x >= width - 2 || y >= height - 2 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    fn frame(image: &RgbaImage, photo_index: u32) -> PhotoFrame {
        PhotoFrame {
            snapshot: image.clone(),
            faces: Vec::new(),
            photo_index,
        }
    }

    #[test]
    fn test_full_frame_keeps_dimensions_and_window() {
        let base = RgbaImage::from_pixel(40, 30, Rgba([5, 5, 5, 255]));
        let effect = RandomFullFrameEffect::new(
            ResourceSet::from_images("frames", vec![border_frame(40, 30)]).unwrap(),
        );
        let output = effect
            .process(base.clone(), &frame(&base, 2), &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(output.dimensions(), (40, 30));
        assert_eq!(*output.get_pixel(0, 0), Rgba([200, 0, 0, 255]));
        assert_eq!(*output.get_pixel(20, 15), Rgba([5, 5, 5, 255]));
    }

    #[test]
    fn test_final_frame_is_gated() {
        let base = RgbaImage::from_pixel(40, 30, Rgba([5, 5, 5, 255]));
        let effect = FinalFrameEffect::new(
            ResourceSet::from_images("final", vec![border_frame(40, 30)]).unwrap(),
            4,
        );
        let mut rng = StdRng::seed_from_u64(0);

        let untouched = effect.process(base.clone(), &frame(&base, 3), &mut rng).unwrap();
        assert_eq!(untouched, base);

        let framed = effect.process(base.clone(), &frame(&base, 4), &mut rng).unwrap();
        assert_eq!(*framed.get_pixel(39, 29), Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn test_overlay_is_scaled_to_photo() {
        let base = RgbaImage::from_pixel(80, 60, Rgba([5, 5, 5, 255]));
        let output = overlay_full_frame(base, &RgbaImage::from_pixel(8, 6, Rgba([0, 90, 0, 255])));
        assert_eq!(output.dimensions(), (80, 60));
        assert_eq!(*output.get_pixel(79, 59), Rgba([0, 90, 0, 255]));
    }
}
