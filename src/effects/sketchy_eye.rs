//! Hollowed-out eyes

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut};
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::traits::{Effect, PhotoFrame},
    error::{EffectError, Result},
    faces::types::{centroid, extent, Point, LEFT_EYE},
};

const SOCKET_COLOR: Rgba<u8> = Rgba([8, 4, 4, 255]);
const GLINT_COLOR: Rgba<u8> = Rgba([235, 240, 255, 255]);

/// Socket size relative to the eye outline
const SOCKET_SCALE: f32 = 1.6;

/// Replaces every eye with a dark socket and a pin-prick of light
pub struct SketchyEyeEffect;

impl SketchyEyeEffect {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SketchyEyeEffect {
    fn default() -> Self {
        Self::new()
    }
}

/// Centre and radii of the socket drawn over one eye outline
pub fn socket_for(eye: &[Point]) -> Option<((i32, i32), i32, i32)> {
    let (min_x, min_y, max_x, max_y) = extent(eye)?;
    let (cx, cy) = centroid(eye)?;

    let half_width = ((max_x - min_x) as f32 / 2.0 * SOCKET_SCALE).round().max(1.0) as i32;
    let half_height = ((max_y - min_y) as f32 / 2.0 * SOCKET_SCALE)
        .round()
        .max(half_width as f32 / 2.0) as i32;

    Some(((cx.round() as i32, cy.round() as i32), half_width, half_height.max(1)))
}

impl Effect for SketchyEyeEffect {
    fn name(&self) -> &str {
        "eyes"
    }

    fn description(&self) -> &str {
        "Hollows out everyone's eyes"
    }

    fn process(
        &self,
        mut image: RgbaImage,
        frame: &PhotoFrame,
        _rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        for (index, face) in frame.faces.iter().enumerate() {
            for eye in face.eyes(index)? {
                let ((cx, cy), rx, ry) = socket_for(eye).ok_or_else(|| EffectError::MissingLandmark {
                    feature: LEFT_EYE.to_string(),
                    face: index,
                })?;
                draw_filled_ellipse_mut(&mut image, (cx, cy), rx, ry, SOCKET_COLOR);
                draw_filled_circle_mut(&mut image, (cx, cy), (ry / 4).max(1), GLINT_COLOR);
            }
            debug!("Hollowed eyes of face {}", index);
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::{
        types::{LEFT_EYE, RIGHT_EYE},
        BoundingBox, FaceGeometry,
    };
    use crate::error::BoothError;
    use rand::{rngs::StdRng, SeedableRng};

    fn eye(cx: i32, cy: i32) -> Vec<(i32, i32)> {
        vec![(cx - 10, cy), (cx - 5, cy - 4), (cx + 5, cy - 4), (cx + 10, cy), (cx + 5, cy + 4), (cx - 5, cy + 4)]
    }

    fn frame_with(face: FaceGeometry) -> (RgbaImage, PhotoFrame) {
        let base = RgbaImage::from_pixel(120, 100, Rgba([180, 150, 130, 255]));
        let frame = PhotoFrame {
            snapshot: base.clone(),
            faces: vec![face],
            photo_index: 1,
        };
        (base, frame)
    }

    #[test]
    fn test_socket_geometry() {
        let points: Vec<Point> = eye(40, 30).into_iter().map(Point::from).collect();
        let ((cx, cy), rx, ry) = socket_for(&points).unwrap();
        assert_eq!((cx, cy), (40, 30));
        assert_eq!(rx, 16);
        assert_eq!(ry, 8);
        assert!(socket_for(&[]).is_none());
    }

    #[test]
    fn test_eyes_become_sockets() {
        let face = FaceGeometry::new(BoundingBox::new(10, 100, 90, 20))
            .with_landmark(LEFT_EYE, eye(40, 30))
            .with_landmark(RIGHT_EYE, eye(80, 30));
        let (base, frame) = frame_with(face);

        let output = SketchyEyeEffect::new()
            .process(base.clone(), &frame, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(*output.get_pixel(40, 30), GLINT_COLOR);
        assert_eq!(*output.get_pixel(52, 30), SOCKET_COLOR);
        assert_eq!(*output.get_pixel(80, 36), SOCKET_COLOR);
        assert_eq!(*output.get_pixel(5, 95), *base.get_pixel(5, 95));
    }

    #[test]
    fn test_missing_eye_is_an_error() {
        let face = FaceGeometry::new(BoundingBox::new(10, 100, 90, 20)).with_landmark(LEFT_EYE, eye(40, 30));
        let (base, frame) = frame_with(face);

        let err = SketchyEyeEffect::new()
            .process(base, &frame, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        match err {
            BoothError::Effect(EffectError::MissingLandmark { feature, face }) => {
                assert_eq!(feature, RIGHT_EYE);
                assert_eq!(face, 0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
