use image::{DynamicImage, RgbaImage};
use rand::RngCore;
use tracing::debug;

use crate::{error::Result, faces::FaceGeometry};

/// Core trait that all booth effects implement
///
/// Effects take ownership of the working image and hand back a new one of the
/// same dimensions. Anything an effect needs besides the working image comes
/// from the read-only [`PhotoFrame`].
pub trait Effect: Send + Sync {
    /// Returns the registry name of this effect
    fn name(&self) -> &str;

    /// Returns a human-readable description of this effect
    fn description(&self) -> &str;

    /// Apply the effect
    ///
    /// # Arguments
    ///
    /// * `image` - The working image, possibly already modified by earlier effects
    /// * `frame` - The pre-effect snapshot, detected faces and photo index
    /// * `rng` - Random source for placements and jitter
    ///
    /// # Returns
    ///
    /// The processed image, or an error if a required landmark is missing.
    fn process(
        &self,
        image: RgbaImage,
        frame: &PhotoFrame,
        rng: &mut dyn RngCore,
    ) -> Result<RgbaImage>;
}

/// Read-only per-photo inputs shared by every effect in a sequence
#[derive(Debug, Clone)]
pub struct PhotoFrame {
    /// The frame as captured, before any effect ran
    pub snapshot: RgbaImage,

    /// Faces found by the detector
    pub faces: Vec<FaceGeometry>,

    /// 1-based position of this photo in the session
    pub photo_index: u32,
}

/// Working state for one photo while its effects run
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    image: RgbaImage,
    frame: PhotoFrame,
}

impl ProcessingContext {
    /// Create a context from a captured frame
    ///
    /// The snapshot is taken here, once, and never refreshed.
    pub fn new(captured: DynamicImage, faces: Vec<FaceGeometry>, photo_index: u32) -> Self {
        let image = captured.into_rgba8();
        Self {
            frame: PhotoFrame {
                snapshot: image.clone(),
                faces,
                photo_index,
            },
            image,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn frame(&self) -> &PhotoFrame {
        &self.frame
    }

    pub fn photo_index(&self) -> u32 {
        self.frame.photo_index
    }

    /// Run one effect, replacing the working image with its output
    pub fn apply(&mut self, effect: &dyn Effect, rng: &mut dyn RngCore) -> Result<()> {
        debug!("Running effect {} on photo {}", effect.name(), self.frame.photo_index);
        let image = std::mem::take(&mut self.image);
        self.image = effect.process(image, &self.frame, rng)?;
        Ok(())
    }

    /// Run a sequence of effects in order, stopping at the first failure
    pub fn apply_all<'a, I>(&mut self, effects: I, rng: &mut dyn RngCore) -> Result<()>
    where
        I: IntoIterator<Item = &'a dyn Effect>,
    {
        for effect in effects {
            self.apply(effect, rng)?;
        }
        Ok(())
    }

    /// Consume the context and return the processed image
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
