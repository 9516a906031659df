use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    effects::{
        frame::DEFAULT_FINAL_FRAME_PHOTO_INDEX,
        ghost::DEFAULT_GHOST_OPACITY,
        pig::DEFAULT_LOGO_PHOTO_INDEX,
        swirl::DEFAULT_STRENGTH,
        tonal::{DEFAULT_CONTRAST, DEFAULT_SATURATION},
    },
    error::{ConfigError, Result},
    mode::PresentationMode,
};

/// Main configuration for the booth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-effect tuning
    pub effects: EffectsConfig,

    /// Random effect selection policy
    pub selection: SelectionConfig,

    /// Strip layout and output settings
    pub strip: StripConfig,

    /// Where auxiliary images live
    pub resources: ResourceConfig,

    /// Threading and randomness
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.effects.validate()?;
        self.selection.validate()?;
        self.processing.validate()?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Effect tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Swirl twist multiplier; 0 disables the twist
    pub swirl_strength: f32,

    /// Mask value for ghost overlays
    pub ghost_opacity: u8,

    /// Saturation factor of the tonal effect (1.0 = unchanged)
    pub saturation: f32,

    /// Contrast factor of the tonal effect (1.0 = unchanged)
    pub contrast: f32,

    /// Photo that receives the pig logo
    pub logo_photo_index: u32,

    /// Photo that receives the closing frame
    pub final_frame_photo_index: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            swirl_strength: DEFAULT_STRENGTH,
            ghost_opacity: DEFAULT_GHOST_OPACITY,
            saturation: DEFAULT_SATURATION,
            contrast: DEFAULT_CONTRAST,
            logo_photo_index: DEFAULT_LOGO_PHOTO_INDEX,
            final_frame_photo_index: DEFAULT_FINAL_FRAME_PHOTO_INDEX,
        }
    }
}

impl EffectsConfig {
    fn validate(&self) -> Result<()> {
        if !self.swirl_strength.is_finite() || self.swirl_strength < 0.0 {
            return Err(invalid("effects.swirl_strength", self.swirl_strength).into());
        }

        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(invalid("effects.saturation", self.saturation).into());
        }

        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(invalid("effects.contrast", self.contrast).into());
        }

        if self.logo_photo_index == 0 {
            return Err(invalid("effects.logo_photo_index", self.logo_photo_index).into());
        }

        if self.final_frame_photo_index == 0 {
            return Err(invalid("effects.final_frame_photo_index", self.final_frame_photo_index).into());
        }

        Ok(())
    }
}

/// Stochastic selection policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Most random effects a single photo can get
    pub max_effects: usize,

    /// Starting continue threshold, compared against a roll in [0, 100)
    pub initial_threshold: f64,

    /// Multiplier applied to the threshold after each non-terminal pick
    pub threshold_decay: f64,

    /// Percent chance of finishing with the tonal effect
    pub tonal_chance: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_effects: 4,
            initial_threshold: 100.0,
            threshold_decay: 2.0 / 3.0,
            tonal_chance: 50,
        }
    }
}

impl SelectionConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold_decay) {
            return Err(invalid("selection.threshold_decay", self.threshold_decay).into());
        }

        if !self.initial_threshold.is_finite() || self.initial_threshold < 0.0 {
            return Err(invalid("selection.initial_threshold", self.initial_threshold).into());
        }

        if self.tonal_chance > 100 {
            return Err(invalid("selection.tonal_chance", self.tonal_chance).into());
        }

        Ok(())
    }
}

/// Strip output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Theme used when the command line does not pick one
    pub mode: PresentationMode,

    /// Also produce the side-by-side print sheet
    pub print_sheet: bool,

    /// Also assemble the untouched photos into a strip
    pub original_strip: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Spooky,
            print_sheet: false,
            original_strip: true,
        }
    }
}

/// Resource directories, relative to `root` unless absolute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub root: PathBuf,
    pub ghosts: PathBuf,
    pub flying_pigs: PathBuf,
    pub pig_noses: PathBuf,
    pub pig_logo: PathBuf,
    pub full_frames: PathBuf,
    pub final_frame: PathBuf,
    pub barbie_frame: PathBuf,
    pub pig_pit_frames: PathBuf,

    /// Directory holding `<mode>.png` bottom panels
    pub bottom_panels: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("resources"),
            ghosts: PathBuf::from("ghosts"),
            flying_pigs: PathBuf::from("pigs/flying"),
            pig_noses: PathBuf::from("pigs/noses"),
            pig_logo: PathBuf::from("pigs/logo"),
            full_frames: PathBuf::from("casey"),
            final_frame: PathBuf::from("casey/logo"),
            barbie_frame: PathBuf::from("barbie"),
            pig_pit_frames: PathBuf::from("pigs/pit"),
            bottom_panels: PathBuf::from("panels"),
        }
    }
}

impl ResourceConfig {
    /// Resolve a resource directory against the root
    pub fn resolve<P: AsRef<Path>>(&self, directory: P) -> PathBuf {
        self.root.join(directory)
    }

    /// Bottom panel file for a mode
    pub fn bottom_panel(&self, mode: PresentationMode) -> PathBuf {
        self.resolve(&self.bottom_panels).join(mode.bottom_panel_file())
    }
}

/// Threading and randomness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Process the photos of a session on a worker pool
    pub parallel: bool,

    /// Worker pool size
    pub threads: usize,

    /// Fixed session seed; unset draws one from the OS
    pub seed: Option<u64>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: num_cpus::get(),
            seed: None,
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(invalid("processing.threads", self.threads).into());
        }
        Ok(())
    }
}
