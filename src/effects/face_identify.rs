//! Debug overlay showing what the detector found

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::traits::{Effect, PhotoFrame},
    error::Result,
};

pub const BOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const LANDMARK_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Box outline thickness in pixels
const BOX_THICKNESS: i32 = 2;
const LANDMARK_RADIUS: i32 = 2;

/// Outlines every face box and marks each landmark point
pub struct FaceIdentifyEffect;

impl FaceIdentifyEffect {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaceIdentifyEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for FaceIdentifyEffect {
    fn name(&self) -> &str {
        "identify-face"
    }

    fn description(&self) -> &str {
        "Draws the detected face boxes and landmarks"
    }

    fn process(
        &self,
        mut image: RgbaImage,
        frame: &PhotoFrame,
        _rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        for (index, face) in frame.faces.iter().enumerate() {
            let bbox = &face.bounding_box;
            if !bbox.is_empty() {
                for offset in 0..BOX_THICKNESS {
                    let width = bbox.width() as i32 - offset * 2;
                    let height = bbox.height() as i32 - offset * 2;
                    if width <= 0 || height <= 0 {
                        break;
                    }
                    let rect = Rect::at(bbox.left as i32 + offset, bbox.top as i32 + offset)
                        .of_size(width as u32, height as u32);
                    draw_hollow_rect_mut(&mut image, rect, BOX_COLOR);
                }
            }

            let mut names: Vec<&String> = face.landmarks.keys().collect();
            names.sort();
            for name in names {
                for point in &face.landmarks[name] {
                    draw_filled_circle_mut(&mut image, (point.x, point.y), LANDMARK_RADIUS, LANDMARK_COLOR);
                }
            }
            debug!("Marked face {} with {} landmark groups", index, face.landmarks.len());
        }
        Ok(image)
    }
}
