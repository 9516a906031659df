use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{InputError, Result};
use crate::faces::types::FaceGeometry;

/// Reads face geometry written by the external detector
///
/// Detector output is a JSON array with one object per face, stored next to
/// the captured frame as `<frame stem>.json`.
pub struct FaceLoader;

impl FaceLoader {
    /// Parse detector output from a JSON string
    pub fn from_json(json: &str, source: &str) -> Result<Vec<FaceGeometry>> {
        serde_json::from_str(json).map_err(|e| {
            InputError::InvalidFaces {
                path: source.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Load detector output from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<FaceGeometry>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| InputError::LoadFailed {
            path: path.display().to_string(),
        })?;

        let faces = Self::from_json(&content, &path.display().to_string())?;
        debug!("Loaded {} faces from {:?}", faces.len(), path);
        Ok(faces)
    }

    /// Path of the sidecar file for a captured frame
    pub fn sidecar_path<P: AsRef<Path>>(frame_path: P) -> PathBuf {
        frame_path.as_ref().with_extension("json")
    }

    /// Load the sidecar for a frame, treating a missing file as "no faces"
    pub fn load_for_frame<P: AsRef<Path>>(frame_path: P) -> Result<Vec<FaceGeometry>> {
        let sidecar = Self::sidecar_path(frame_path.as_ref());
        if !sidecar.exists() {
            warn!("No face data for {:?}, face effects will be skipped", frame_path.as_ref());
            return Ok(Vec::new());
        }
        Self::load(sidecar)
    }
}
