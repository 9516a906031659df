use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::{AssemblyError, Result};

use super::{BORDER, MAX_PHOTOS, PHOTO_HEIGHT, PHOTO_WIDTH, STRIP_HEIGHT, STRIP_WIDTH};

/// How one photo fits its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFit {
    /// Width after scaling to `PHOTO_HEIGHT`
    pub scaled_width: u32,

    /// Columns cut from each side to reach `PHOTO_WIDTH`
    pub trim: u32,

    /// Extra left offset inside the slot when the photo is too narrow
    pub inset: u32,
}

/// Scale-then-trim arithmetic for a `width` x `height` photo
pub fn slot_fit(width: u32, height: u32) -> SlotFit {
    let scale = PHOTO_HEIGHT as f64 / height.max(1) as f64;
    let scaled_width = ((width as f64 * scale) as u32).max(1);

    if scaled_width >= PHOTO_WIDTH {
        SlotFit {
            scaled_width,
            trim: (scaled_width - PHOTO_WIDTH) / 2,
            inset: 0,
        }
    } else {
        SlotFit {
            scaled_width,
            trim: 0,
            inset: (PHOTO_WIDTH - scaled_width) / 2,
        }
    }
}

/// Top-left corner of photo slot `index` (0-based)
pub fn slot_origin(index: usize) -> (u32, u32) {
    (BORDER, BORDER + index as u32 * (BORDER + PHOTO_HEIGHT))
}

/// Every photo in a strip must match the first one
pub fn check_sizes(sizes: &[(u32, u32)]) -> Result<()> {
    let Some(&expected) = sizes.first() else {
        return Ok(());
    };
    for (index, &found) in sizes.iter().enumerate() {
        if found != expected {
            return Err(AssemblyError::SizeMismatch { index, expected, found }.into());
        }
    }
    Ok(())
}

/// Builds printable strips
#[derive(Debug, Clone)]
pub struct StripAssembler {
    background: Rgba<u8>,
    bottom_panel: Option<RgbaImage>,
}

impl StripAssembler {
    pub fn new(background: Rgba<u8>) -> Self {
        Self {
            background,
            bottom_panel: None,
        }
    }

    /// Decorative image anchored to the bottom edge
    pub fn with_bottom_panel(mut self, panel: RgbaImage) -> Self {
        self.bottom_panel = Some(panel);
        self
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Lay out up to four same-sized photos on a fresh strip
    pub fn assemble(&self, photos: &[RgbaImage]) -> Result<RgbaImage> {
        let first = photos.first().ok_or(AssemblyError::NoPhotos)?;
        if photos.len() > MAX_PHOTOS {
            return Err(AssemblyError::TooManyPhotos {
                count: photos.len(),
                max: MAX_PHOTOS,
            }
            .into());
        }

        let expected = first.dimensions();
        let sizes: Vec<(u32, u32)> = photos.iter().map(|photo| photo.dimensions()).collect();
        check_sizes(&sizes)?;

        let fit = slot_fit(expected.0, expected.1);
        if fit.inset > 0 {
            warn!(
                "Photos are {}px wide once scaled, narrower than the {}px slot; centring them",
                fit.scaled_width, PHOTO_WIDTH
            );
        }
        debug!("Slot fit for {}x{} photos: {:?}", expected.0, expected.1, fit);

        let mut strip = RgbaImage::from_pixel(STRIP_WIDTH, STRIP_HEIGHT, self.background);
        for (index, photo) in photos.iter().enumerate() {
            let slot = fit_to_slot(photo, &fit);
            let (x, y) = slot_origin(index);
            imageops::replace(&mut strip, &slot, (x + fit.inset) as i64, y as i64);
            debug!("Photo {} placed at {},{}", index + 1, x + fit.inset, y);
        }

        if let Some(panel) = &self.bottom_panel {
            stamp_bottom_panel(&mut strip, panel);
        }

        info!("Assembled strip from {} photos", photos.len());
        Ok(strip)
    }
}

/// Resize one photo to the slot height and crop it to the slot width
///
/// The strip is printed, so slot pixels are always written opaque.
fn fit_to_slot(photo: &RgbaImage, fit: &SlotFit) -> RgbaImage {
    let scaled = imageops::resize(photo, fit.scaled_width, PHOTO_HEIGHT, FilterType::Lanczos3);
    let width = fit.scaled_width.min(PHOTO_WIDTH);
    let mut slot = imageops::crop_imm(&scaled, fit.trim, 0, width, PHOTO_HEIGHT).to_image();
    for pixel in slot.pixels_mut() {
        pixel[3] = 255;
    }
    slot
}

/// Copy the visible pixels of `panel` onto the bottom of the strip
///
/// Transparent panel pixels leave the strip alone; every other pixel is
/// written opaque, without blending. Rows above the strip are dropped.
pub fn stamp_bottom_panel(strip: &mut RgbaImage, panel: &RgbaImage) {
    let top = strip.height() as i64 - panel.height() as i64;
    let width = panel.width().min(strip.width());

    for y in 0..panel.height() {
        let target_y = top + y as i64;
        if target_y < 0 {
            continue;
        }
        for x in 0..width {
            let pixel = panel.get_pixel(x, y);
            if pixel[3] == 0 {
                continue;
            }
            strip.put_pixel(x, target_y as u32, Rgba([pixel[0], pixel[1], pixel[2], 255]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{BOTTOM_PANEL_HEIGHT, BOTTOM_SPACE_HEIGHT};
    use crate::error::BoothError;

    const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn solid(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_slot_fit_for_common_captures() {
        // 1920x1080 scales to 664 wide, 50px trimmed each side
        assert_eq!(
            slot_fit(1920, 1080),
            SlotFit { scaled_width: 664, trim: 50, inset: 0 }
        );
        // 800x600 scales to 498 wide, too narrow for the slot
        assert_eq!(
            slot_fit(800, 600),
            SlotFit { scaled_width: 498, trim: 0, inset: 33 }
        );
    }

    #[test]
    fn test_slot_origins() {
        assert_eq!(slot_origin(0), (18, 18));
        assert_eq!(slot_origin(1), (18, 410));
        assert_eq!(slot_origin(3), (18, 1194));
        // last slot ends exactly where the bottom space begins
        assert_eq!(slot_origin(3).1 + PHOTO_HEIGHT, STRIP_HEIGHT - BOTTOM_SPACE_HEIGHT);
    }

    #[test]
    fn test_four_photos_fill_the_slots() {
        let photos: Vec<RgbaImage> = (0..4).map(|i| solid(1920, 1080, 50 + i * 40)).collect();
        let strip = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap();

        assert_eq!(strip.dimensions(), (STRIP_WIDTH, STRIP_HEIGHT));
        for (index, value) in [50u8, 90, 130, 170].iter().enumerate() {
            let (x, y) = slot_origin(index);
            let centre = strip.get_pixel(x + PHOTO_WIDTH / 2, y + PHOTO_HEIGHT / 2);
            assert_eq!(*centre, Rgba([*value, *value, *value, 255]));
        }
        // borders and bottom space keep the background
        assert_eq!(*strip.get_pixel(5, 5), BACKGROUND);
        assert_eq!(*strip.get_pixel(300, 18 + PHOTO_HEIGHT + 5), BACKGROUND);
        assert_eq!(*strip.get_pixel(300, STRIP_HEIGHT - 10), BACKGROUND);
        assert_eq!(*strip.get_pixel(STRIP_WIDTH - 1, 200), BACKGROUND);
    }

    #[test]
    fn test_narrow_photos_are_centred() {
        let photos = vec![solid(800, 600, 200)];
        let strip = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap();

        assert_eq!(strip.dimensions(), (STRIP_WIDTH, STRIP_HEIGHT));
        assert_eq!(*strip.get_pixel(BORDER + 10, 100), BACKGROUND);
        assert_eq!(*strip.get_pixel(BORDER + 33 + 5, 100), Rgba([200, 200, 200, 255]));
        assert_eq!(*strip.get_pixel(300, 100), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_four_vga_photos_make_a_full_strip() {
        let photos: Vec<RgbaImage> = (0..4).map(|i| solid(800, 600, 40 + i * 50)).collect();
        let strip = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap();

        assert_eq!(strip.dimensions(), (600, 1800));
        let (x, y) = slot_origin(3);
        assert_eq!(*strip.get_pixel(x + PHOTO_WIDTH / 2, y + PHOTO_HEIGHT / 2), Rgba([190, 190, 190, 255]));
    }

    #[test]
    fn test_one_pixel_height_difference_rejected() {
        let photos = vec![solid(800, 600, 1), solid(800, 601, 1)];
        let err = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap_err();
        assert!(matches!(
            err,
            BoothError::Assembly(AssemblyError::SizeMismatch {
                index: 1,
                expected: (800, 600),
                found: (800, 601),
            })
        ));
    }

    #[test]
    fn test_ghosted_photos_assemble_opaque() {
        use crate::effects::{Effect, GhostEffect, PhotoFrame, ResourceSet};
        use rand::{rngs::StdRng, SeedableRng};

        let base = solid(640, 480, 0);
        let ghost = RgbaImage::from_pixel(100, 120, Rgba([255, 255, 255, 255]));
        let effect = GhostEffect::new(ResourceSet::from_images("ghosts", vec![ghost]).unwrap(), 150);
        let frame = PhotoFrame {
            snapshot: base.clone(),
            faces: Vec::new(),
            photo_index: 1,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let ghosted = effect.process(base, &frame, &mut rng).unwrap();
        assert!(ghosted.pixels().all(|p| p[3] == 255));

        let photos = vec![ghosted; 4];
        let strip = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap();
        assert!(strip.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_translucent_photos_are_written_opaque() {
        let photos = vec![RgbaImage::from_pixel(1920, 1080, Rgba([80, 80, 80, 100]))];
        let strip = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap();
        let (x, y) = slot_origin(0);
        assert_eq!(*strip.get_pixel(x + 10, y + 10), Rgba([80, 80, 80, 255]));
    }

    #[test]
    fn test_mismatched_sizes_rejected() {
        let photos = vec![solid(640, 480, 1), solid(640, 480, 1), solid(800, 600, 1)];
        let err = StripAssembler::new(BACKGROUND).assemble(&photos).unwrap_err();
        match err {
            BoothError::Assembly(AssemblyError::SizeMismatch { index, expected, found }) => {
                assert_eq!(index, 2);
                assert_eq!(expected, (640, 480));
                assert_eq!(found, (800, 600));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_photo_count_limits() {
        let assembler = StripAssembler::new(BACKGROUND);
        assert!(matches!(
            assembler.assemble(&[]).unwrap_err(),
            BoothError::Assembly(AssemblyError::NoPhotos)
        ));

        let five: Vec<RgbaImage> = (0..5).map(|_| solid(10, 10, 0)).collect();
        assert!(matches!(
            assembler.assemble(&five).unwrap_err(),
            BoothError::Assembly(AssemblyError::TooManyPhotos { count: 5, max: 4 })
        ));
    }

    #[test]
    fn test_bottom_panel_copies_only_visible_pixels() {
        let mut panel = RgbaImage::from_pixel(STRIP_WIDTH, BOTTOM_PANEL_HEIGHT, Rgba([0, 0, 0, 0]));
        panel.put_pixel(10, BOTTOM_PANEL_HEIGHT - 1, Rgba([255, 0, 0, 40]));
        panel.put_pixel(20, 0, Rgba([0, 255, 0, 255]));

        let photos = vec![solid(1920, 1080, 77)];
        let strip = StripAssembler::new(BACKGROUND)
            .with_bottom_panel(panel)
            .assemble(&photos)
            .unwrap();

        assert_eq!(*strip.get_pixel(10, STRIP_HEIGHT - 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*strip.get_pixel(20, STRIP_HEIGHT - BOTTOM_PANEL_HEIGHT), Rgba([0, 255, 0, 255]));
        assert_eq!(*strip.get_pixel(11, STRIP_HEIGHT - 1), BACKGROUND);
    }

    #[test]
    fn test_oversized_panel_is_clipped() {
        let mut strip = solid(20, 20, 0);
        let panel = RgbaImage::from_pixel(40, 30, Rgba([9, 9, 9, 255]));
        stamp_bottom_panel(&mut strip, &panel);
        assert_eq!(strip.dimensions(), (20, 20));
        assert_eq!(*strip.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
        assert_eq!(*strip.get_pixel(19, 19), Rgba([9, 9, 9, 255]));
    }
}
