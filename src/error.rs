use thiserror::Error;

/// Main error type for the booth library
#[derive(Error, Debug)]
pub enum BoothError {
    #[error("Effect error: {0}")]
    Effect(#[from] EffectError),

    #[error("Strip assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Effect-specific errors
#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Face {face} has no '{feature}' landmarks")]
    MissingLandmark { feature: String, face: usize },

    #[error("No usable images found in resource directory: {path}")]
    NoResourcesFound { path: String },

    #[error("Unknown effect: {name}")]
    InvalidEffectName { name: String },

    #[error("Effect application failed: {effect} - {reason}")]
    EffectFailed { effect: String, reason: String },
}

/// Strip assembly errors
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Photo {index} is {found:?} but the strip expects {expected:?}")]
    SizeMismatch {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("No photos to assemble")]
    NoPhotos,

    #[error("Too many photos for one strip: {count} (max {max})")]
    TooManyPhotos { count: usize, max: usize },
}

/// Errors reading captured frames or detector output
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to load input: {path}")]
    LoadFailed { path: String },

    #[error("Invalid face data in {path}: {reason}")]
    InvalidFaces { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using BoothError
pub type Result<T> = std::result::Result<T, BoothError>;

impl BoothError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    ///
    /// A missing landmark only sinks the current photo, so the session can
    /// carry on with a fresh capture.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Input(InputError::LoadFailed { .. }) => true,
            Self::Effect(EffectError::MissingLandmark { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Effect(EffectError::InvalidEffectName { name }) => {
                format!(
                    "Effect '{}' not found. Available effects: {}",
                    name,
                    crate::effects::EffectKind::ALL
                        .iter()
                        .map(|kind| kind.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::Effect(EffectError::NoResourcesFound { path }) => {
                format!("No images found in '{}'. Check the resources directory.", path)
            }
            Self::Input(InputError::LoadFailed { path }) => {
                format!("Could not load '{}'. Please check the file exists and is an image.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
