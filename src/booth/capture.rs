use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::{
    error::{InputError, Result},
    faces::{FaceGeometry, FaceLoader},
};

/// A captured frame and the faces the detector found in it
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub image: DynamicImage,
    pub faces: Vec<FaceGeometry>,
}

impl CapturedPhoto {
    pub fn new(image: DynamicImage, faces: Vec<FaceGeometry>) -> Self {
        Self { image, faces }
    }

    /// Load a frame and its detector sidecar
    ///
    /// Face boxes get the detector padding (10px up, 15px down) clamped to
    /// the frame, as the face effects expect.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|_| InputError::LoadFailed {
            path: path.display().to_string(),
        })?;

        let height = image.height();
        let faces = FaceLoader::load_for_frame(path)?
            .into_iter()
            .map(|mut face| {
                face.bounding_box = face.bounding_box.pad_for_detector(height);
                face
            })
            .collect::<Vec<_>>();

        debug!("Opened {:?}: {}x{}, {} faces", path, image.width(), height, faces.len());
        Ok(Self { image, faces })
    }

    /// Load every frame in a session directory, in file-name order
    pub fn open_dir<P: AsRef<Path>>(directory: P) -> Result<Vec<Self>> {
        let paths = session_frames(directory.as_ref())?;
        let photos = paths.iter().map(Self::open).collect::<Result<Vec<_>>>()?;
        info!("Loaded {} captured photos from {:?}", photos.len(), directory.as_ref());
        Ok(photos)
    }
}

/// Image files directly inside `directory`, sorted
pub fn session_frames(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(InputError::LoadFailed {
            path: directory.display().to_string(),
        }
        .into());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_frame_file(path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_frame_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(true);
    if hidden {
        return false;
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg"),
        None => false,
    }
}
