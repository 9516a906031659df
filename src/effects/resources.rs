use std::path::{Path, PathBuf};

use image::RgbaImage;
use rand::{seq::SliceRandom, RngCore};
use tracing::{debug, info, warn};

use crate::error::{EffectError, Result};

/// Auxiliary images an overlay effect pastes onto photos
///
/// Loaded once when the effect is built and never modified afterwards, so a
/// single set can be shared across photos and threads.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    source: PathBuf,
    images: Vec<RgbaImage>,
}

impl ResourceSet {
    /// Load every image in a flat directory, sorted by file name
    ///
    /// Subdirectories and hidden files are ignored. Files that fail to decode
    /// are skipped with a warning. An empty result is an error.
    pub fn load_dir<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let no_resources = || EffectError::NoResourcesFound {
            path: directory.display().to_string(),
        };

        if !directory.is_dir() {
            return Err(no_resources().into());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && !is_hidden_file(path) && is_image_file(path))
            .collect();
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            match image::open(path) {
                Ok(img) => {
                    debug!("Loaded resource {:?} ({}x{})", path, img.width(), img.height());
                    images.push(img.into_rgba8());
                }
                Err(e) => warn!("Could not load resource {:?}: {}", path, e),
            }
        }

        if images.is_empty() {
            return Err(no_resources().into());
        }

        info!("Loaded {} resource images from {:?}", images.len(), directory);
        Ok(Self {
            source: directory.to_path_buf(),
            images,
        })
    }

    /// Build a set from images already in memory
    pub fn from_images<P: Into<PathBuf>>(source: P, images: Vec<RgbaImage>) -> Result<Self> {
        let source = source.into();
        if images.is_empty() {
            return Err(EffectError::NoResourcesFound {
                path: source.display().to_string(),
            }
            .into());
        }
        Ok(Self { source, images })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn images(&self) -> &[RgbaImage] {
        &self.images
    }

    /// The first image in file-name order
    pub fn first(&self) -> &RgbaImage {
        &self.images[0]
    }

    /// A uniformly random image
    pub fn choose(&self, rng: &mut dyn RngCore) -> &RgbaImage {
        self.images.choose(rng).unwrap_or(&self.images[0])
    }

    /// Width of the widest image
    pub fn max_width(&self) -> u32 {
        self.images.iter().map(|img| img.width()).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn is_image_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "png" | "jpg" | "jpeg"
        ),
        None => false,
    }
}

fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
