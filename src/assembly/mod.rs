//! # Strip Assembly
//!
//! Lays processed photos out on a 2x6 inch strip at print resolution, and
//! optionally doubles the strip onto a 4x6 sheet with a cut line.
//!
//! ```text
//!  ┌──────────────┐  ─┬─ BORDER
//!  │   photo 1    │   │ PHOTO_HEIGHT
//!  ├──────────────┤  ─┴─ BORDER
//!  │   photo 2    │
//!  │     ...      │
//!  │   photo 4    │
//!  ├──────────────┤
//!  │ bottom panel │  BOTTOM_SPACE_HEIGHT
//!  └──────────────┘
//! ```

pub mod dual;
pub mod strip;

pub use dual::{cut_line_is_drawn, PrintSheet};
pub use strip::{slot_fit, SlotFit, StripAssembler};

pub const PRINTER_DPI: u32 = 300;

pub const STRIP_WIDTH: u32 = PRINTER_DPI * 2;
pub const STRIP_HEIGHT: u32 = PRINTER_DPI * 6;

pub const BORDER: u32 = PRINTER_DPI * 2 / 16 / 2;
pub const PHOTO_WIDTH: u32 = (PRINTER_DPI - BORDER) * 2;
pub const PHOTO_HEIGHT: u32 = PRINTER_DPI + (PRINTER_DPI * 2 / 16) * 2;

pub const MAX_PHOTOS: usize = 4;

pub const BOTTOM_SPACE_HEIGHT: u32 = STRIP_HEIGHT - (PHOTO_HEIGHT + BORDER) * MAX_PHOTOS as u32;
pub const BOTTOM_PANEL_HEIGHT: u32 = PRINTER_DPI * 4 / 3;
