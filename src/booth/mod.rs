//! # Booth Engine
//!
//! Runs a photo booth session: captured photos go in, processed photos and
//! printable strips come out.

pub mod capture;
pub mod engine;

pub use capture::CapturedPhoto;
pub use engine::{apply_effects, BoothEngine, SessionOutput};
