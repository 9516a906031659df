use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::info;

/// Space left of the first strip and right of the second
pub const SHEET_MARGIN: u32 = 10;

/// Space between the two strips
pub const SHEET_GAP: u32 = 10;

pub const CUT_LINE_WIDTH: u32 = 4;
pub const DASH_LENGTH: u32 = 20;
pub const CUT_LINE_COLOR: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Two copies of a strip side by side, for printing on 4x6 paper
pub struct PrintSheet;

impl PrintSheet {
    /// Sheet dimensions for a strip of the given size
    pub fn dimensions(strip_width: u32, strip_height: u32) -> (u32, u32) {
        (2 * strip_width + 2 * SHEET_MARGIN + SHEET_GAP, strip_height)
    }

    /// Left edge of the dashed cut line
    pub fn cut_line_x(strip_width: u32) -> u32 {
        SHEET_MARGIN + strip_width + (SHEET_GAP - CUT_LINE_WIDTH) / 2
    }

    /// Place the strip twice and draw a dashed cut line between the copies
    pub fn compose(strip: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
        let (strip_width, strip_height) = strip.dimensions();
        let (width, height) = Self::dimensions(strip_width, strip_height);

        let mut sheet = RgbaImage::from_pixel(width, height, background);
        imageops::replace(&mut sheet, strip, SHEET_MARGIN as i64, 0);
        imageops::replace(&mut sheet, strip, (SHEET_MARGIN + strip_width + SHEET_GAP) as i64, 0);

        let x = Self::cut_line_x(strip_width) as i32;
        let mut y = 0;
        while y < height {
            if cut_line_is_drawn(y) {
                let length = DASH_LENGTH.min(height - y);
                let dash = Rect::at(x, y as i32).of_size(CUT_LINE_WIDTH, length);
                draw_filled_rect_mut(&mut sheet, dash, CUT_LINE_COLOR);
            }
            y += DASH_LENGTH;
        }

        info!("Composed {}x{} print sheet", width, height);
        sheet
    }
}

/// Whether row `y` falls on a dash (20 on, 20 off, starting on)
pub fn cut_line_is_drawn(y: u32) -> bool {
    (y / DASH_LENGTH) % 2 == 0
}
