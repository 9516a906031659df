//! # Spooky Booth
//!
//! Face-anchored photo booth effects and printable photo strips.
//!
//! Each captured photo comes with the faces an external detector found in it.
//! The booth picks a handful of effects per photo (swirled faces, ghosts,
//! hollow eyes, pig props, themed frames), runs them in order, and lays the
//! results out on a 2x6 inch strip at 300 DPI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rand::{rngs::StdRng, SeedableRng};
//! use spooky_booth::{
//!     booth::{BoothEngine, CapturedPhoto},
//!     config::Config,
//!     mode::PresentationMode,
//! };
//!
//! # fn main() -> spooky_booth::Result<()> {
//! let engine = BoothEngine::new(Config::default(), PresentationMode::Spooky)?;
//! let photos = CapturedPhoto::open_dir("captures/")?;
//!
//! let output = engine.run_session(photos, &mut StdRng::from_entropy())?;
//! output.strip.save("strip.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`faces`] - Detector output: face boxes and landmark groups
//! - [`effects`] - Effects, effect registry and selection policy
//! - [`assembly`] - Strip layout and print sheets
//! - [`booth`] - The session engine tying it together
//! - [`mode`] - Presentation themes
//! - [`config`] - Configuration management
//!
//! ## Creating Custom Effects
//!
//! You can create custom effects by implementing the [`Effect`](effects::Effect) trait:
//!
//! ```rust,no_run
//! use image::RgbaImage;
//! use rand::RngCore;
//! use spooky_booth::effects::{Effect, PhotoFrame};
//! use spooky_booth::Result;
//!
//! struct Negative;
//!
//! impl Effect for Negative {
//!     fn name(&self) -> &str {
//!         "negative"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Inverts the colours"
//!     }
//!
//!     fn process(&self, mut image: RgbaImage, _frame: &PhotoFrame, _rng: &mut dyn RngCore) -> Result<RgbaImage> {
//!         image::imageops::invert(&mut image);
//!         Ok(image)
//!     }
//! }
//! ```

pub mod assembly;
pub mod booth;
pub mod config;
pub mod effects;
pub mod error;
pub mod faces;
pub mod mode;

// Re-export commonly used types for convenience
pub use crate::{
    booth::{BoothEngine, CapturedPhoto, SessionOutput},
    config::Config,
    effects::{Effect, EffectKind, EffectRegistry},
    error::{BoothError, Result},
    mode::PresentationMode,
};
