//! # Face Geometry
//!
//! Bounding boxes and landmark groups produced by the external face detector.
//! Geometry is read-only once loaded; effects look up the landmark groups they
//! need and fail with `MissingLandmark` when the detector did not supply one.

pub mod loader;
pub mod types;

pub use loader::FaceLoader;
pub use types::{BoundingBox, FaceGeometry, Point};
