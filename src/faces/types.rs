use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EffectError;

pub const LEFT_EYE: &str = "left_eye";
pub const RIGHT_EYE: &str = "right_eye";
pub const TOP_LIP: &str = "top_lip";
pub const BOTTOM_LIP: &str = "bottom_lip";
pub const NOSE_TIP: &str = "nose_tip";
pub const NOSE_BRIDGE: &str = "nose_bridge";

/// Extra rows the detector adds above a face box
pub const DETECTOR_TOP_PADDING: u32 = 10;
/// Extra rows the detector adds below a face box (chins get clipped otherwise)
pub const DETECTOR_BOTTOM_PADDING: u32 = 15;

/// A landmark point in image pixel coordinates
///
/// Accepts either `[x, y]` pairs (the detector's native output) or `{"x", "y"}`
/// objects when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair(i32, i32),
    Named { x: i32, y: i32 },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair(x, y) | PointRepr::Named { x, y } => Self { x, y },
        }
    }
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Face bounding box in detector order: top, right, bottom, left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl BoundingBox {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Apply the detector's padding: 10px up (stopping at row 0) and 15px down
    /// (stopping at the image height).
    pub fn pad_for_detector(&self, image_height: u32) -> Self {
        Self {
            top: self.top.saturating_sub(DETECTOR_TOP_PADDING),
            right: self.right,
            bottom: self.bottom.saturating_add(DETECTOR_BOTTOM_PADDING).min(image_height),
            left: self.left,
        }
    }

    /// Clamp the box to an image of the given dimensions
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let left = self.left.min(width);
        let top = self.top.min(height);
        Self {
            top,
            right: self.right.min(width).max(left),
            bottom: self.bottom.min(height).max(top),
            left,
        }
    }
}

/// Geometry of one detected face
///
/// Produced once per frame by the external detector and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub bounding_box: BoundingBox,

    #[serde(default)]
    pub landmarks: HashMap<String, Vec<Point>>,
}

impl FaceGeometry {
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            landmarks: HashMap::new(),
        }
    }

    /// Builder-style helper for attaching a landmark group
    pub fn with_landmark<I, P>(mut self, name: &str, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        self.landmarks
            .insert(name.to_string(), points.into_iter().map(Into::into).collect());
        self
    }

    /// Look up a named landmark group
    ///
    /// `face` is only used to label the error.
    pub fn landmark(&self, name: &str, face: usize) -> Result<&[Point], EffectError> {
        self.landmarks
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| EffectError::MissingLandmark {
                feature: name.to_string(),
                face,
            })
    }

    /// Both eyes, left first
    pub fn eyes(&self, face: usize) -> Result<[&[Point]; 2], EffectError> {
        Ok([self.landmark(LEFT_EYE, face)?, self.landmark(RIGHT_EYE, face)?])
    }

    /// Top and bottom lip points concatenated
    pub fn mouth(&self, face: usize) -> Result<Vec<Point>, EffectError> {
        let mut points = self.landmark(TOP_LIP, face)?.to_vec();
        points.extend_from_slice(self.landmark(BOTTOM_LIP, face)?);
        Ok(points)
    }
}

/// Mean of a point group, `None` when empty
pub fn centroid(points: &[Point]) -> Option<(f32, f32)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x as f32, sy + p.y as f32));
    Some((sx / n, sy / n))
}

/// Axis-aligned extent of a point group as (min_x, min_y, max_x, max_y)
pub fn extent(points: &[Point]) -> Option<(i32, i32, i32, i32)> {
    let first = points.first()?;
    Some(points.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_clamps_to_image() {
        let bbox = BoundingBox::new(4, 300, 590, 100);
        let padded = bbox.pad_for_detector(600);
        assert_eq!(padded.top, 0);
        assert_eq!(padded.bottom, 600);
        assert_eq!(padded.left, 100);
        assert_eq!(padded.right, 300);

        let padded = BoundingBox::new(100, 300, 250, 100).pad_for_detector(600);
        assert_eq!(padded.top, 90);
        assert_eq!(padded.bottom, 265);
    }

    #[test]
    fn test_padding_saturates_at_u32_max() {
        let padded = BoundingBox::new(5, 10, u32::MAX - 3, 0).pad_for_detector(u32::MAX);
        assert_eq!(padded.bottom, u32::MAX);
        assert_eq!(padded.top, 0);
    }

    #[test]
    fn test_missing_landmark() {
        let face = FaceGeometry::new(BoundingBox::new(0, 10, 10, 0))
            .with_landmark(LEFT_EYE, [(1, 1), (2, 2)]);

        assert_eq!(face.landmark(LEFT_EYE, 0).unwrap().len(), 2);
        match face.eyes(3) {
            Err(EffectError::MissingLandmark { feature, face }) => {
                assert_eq!(feature, RIGHT_EYE);
                assert_eq!(face, 3);
            }
            other => panic!("expected MissingLandmark, got {:?}", other),
        }
    }

    #[test]
    fn test_mouth_concatenates_lips() {
        let face = FaceGeometry::new(BoundingBox::new(0, 10, 10, 0))
            .with_landmark(TOP_LIP, [(1, 1)])
            .with_landmark(BOTTOM_LIP, [(2, 2), (3, 3)]);
        assert_eq!(face.mouth(0).unwrap().len(), 3);
    }

    #[test]
    fn test_centroid_and_extent() {
        let points = [Point::new(0, 0), Point::new(10, 4)];
        assert_eq!(centroid(&points), Some((5.0, 2.0)));
        assert_eq!(extent(&points), Some((0, 0, 10, 4)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_clamp_to() {
        let bbox = BoundingBox::new(10, 900, 700, 50).clamp_to(800, 600);
        assert_eq!(bbox, BoundingBox::new(10, 800, 600, 50));
        assert!(!bbox.is_empty());
    }
}
