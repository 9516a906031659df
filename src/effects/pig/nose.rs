use image::RgbaImage;
use rand::RngCore;
use tracing::debug;

use crate::{
    effects::overlay::{apply_overlay, scale_to_width, OverlayStyle, Placement},
    effects::resources::ResourceSet,
    effects::traits::{Effect, PhotoFrame},
    error::{EffectError, Result},
    faces::types::{centroid, extent, NOSE_BRIDGE, NOSE_TIP},
    faces::FaceGeometry,
};

use super::{NOSE_LIFT, NOSE_SCALE, PIG_NOSE_OPACITY, PROP_BLUR_SIGMA};

/// Puts a pig snout on every face
pub struct PigNoseEffect {
    noses: ResourceSet,
}

impl PigNoseEffect {
    pub fn new(noses: ResourceSet) -> Self {
        Self { noses }
    }
}

/// Snout width and centre for one face
///
/// The width follows the horizontal span of the nose tip. The centre starts at
/// the tip centroid and is lifted towards the lowest bridge point.
pub fn nose_placement(face: &FaceGeometry, index: usize) -> Result<(u32, (f32, f32))> {
    let tip = face.landmark(NOSE_TIP, index)?;
    let bridge = face.landmark(NOSE_BRIDGE, index)?;

    let missing = |feature: &str| EffectError::MissingLandmark {
        feature: feature.to_string(),
        face: index,
    };
    let (min_x, _, max_x, _) = extent(tip).ok_or_else(|| missing(NOSE_TIP))?;
    let (cx, cy) = centroid(tip).ok_or_else(|| missing(NOSE_TIP))?;
    let bridge_bottom = bridge
        .iter()
        .map(|p| p.y)
        .max()
        .ok_or_else(|| missing(NOSE_BRIDGE))?;

    let span = (max_x - min_x).max(1) as f32;
    let width = (span * NOSE_SCALE).round().max(1.0) as u32;
    let lift = (cy - bridge_bottom as f32).max(0.0) * NOSE_LIFT;

    Ok((width, (cx, cy - lift)))
}

impl Effect for PigNoseEffect {
    fn name(&self) -> &str {
        "pig-nose"
    }

    fn description(&self) -> &str {
        "Swaps every nose for a pig snout"
    }

    fn process(
        &self,
        image: RgbaImage,
        frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage> {
        let mut placements = Vec::with_capacity(frame.faces.len());

        for (index, face) in frame.faces.iter().enumerate() {
            let (width, (cx, cy)) = nose_placement(face, index)?;
            let snout = scale_to_width(self.noses.choose(rng), width);
            let x = (cx - snout.width() as f32 / 2.0).round() as i64;
            let y = (cy - snout.height() as f32 / 2.0).round() as i64;
            debug!("Snout {}x{} for face {} at {},{}", snout.width(), snout.height(), index, x, y);
            placements.push(Placement::owned(x, y, snout));
        }

        Ok(apply_overlay(image, &placements, OverlayStyle::new(PIG_NOSE_OPACITY, PROP_BLUR_SIGMA)))
    }
}
