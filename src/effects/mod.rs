//! # Booth Effects
//!
//! Each effect turns one photo into another of the same size. Effects are
//! built once per session (loading any images they paste) and then run on
//! every photo, in the order the [`EffectSelector`] or the presentation mode
//! lists them.
//!
//! ## Built-in Effects
//!
//! - **swirl**: twists each face around the centre of its box
//! - **ghost**: translucent apparition at the top of the photo
//! - **eyes**: hollowed-out eye sockets
//! - **saturation**: global saturation and contrast
//! - **identify-face**: draws detector output, for debugging
//! - **flying-pigs**, **pig-nose**, **pig-logo**: piggy mode props
//! - **full-frame**, **final-frame**: full-size overlays
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spooky_booth::config::Config;
//! use spooky_booth::effects::{EffectKind, EffectRegistry};
//!
//! let registry = EffectRegistry::new();
//! let kinds = EffectRegistry::resolve(&["swirl", "saturation"]).unwrap();
//! let effects = registry.build_all(&kinds, &Config::default()).unwrap();
//! assert_eq!(effects[0].name(), EffectKind::Swirl.name());
//! ```

pub mod face_identify;
pub mod frame;
pub mod ghost;
pub mod overlay;
pub mod pig;
pub mod registry;
pub mod resources;
pub mod selector;
pub mod sketchy_eye;
pub mod swirl;
pub mod tonal;
pub mod traits;

pub use registry::{EffectKind, EffectRegistry};
pub use resources::ResourceSet;
pub use selector::EffectSelector;
pub use traits::{Effect, PhotoFrame, ProcessingContext};

pub use face_identify::FaceIdentifyEffect;
pub use frame::{FinalFrameEffect, FrameChoice, RandomFullFrameEffect, StripFrameEffect};
pub use ghost::GhostEffect;
pub use pig::{FlyingPigsEffect, PigLogoEffect, PigNoseEffect};
pub use sketchy_eye::SketchyEyeEffect;
pub use swirl::SwirlEffect;
pub use tonal::TonalEffect;
