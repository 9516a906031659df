use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{
    config::Config,
    effects::{
        Effect, FaceIdentifyEffect, FinalFrameEffect, FlyingPigsEffect, GhostEffect, PigLogoEffect,
        PigNoseEffect, RandomFullFrameEffect, ResourceSet, SketchyEyeEffect, SwirlEffect, TonalEffect,
    },
    error::{BoothError, EffectError, Result},
};

/// Every effect the booth knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Ghost,
    Eyes,
    Swirl,
    Saturation,
    IdentifyFace,
    FlyingPigs,
    PigNose,
    PigLogo,
    FullFrame,
    FinalFrame,
}

impl EffectKind {
    pub const ALL: [EffectKind; 10] = [
        EffectKind::IdentifyFace,
        EffectKind::Swirl,
        EffectKind::Ghost,
        EffectKind::Saturation,
        EffectKind::Eyes,
        EffectKind::FlyingPigs,
        EffectKind::PigNose,
        EffectKind::PigLogo,
        EffectKind::FullFrame,
        EffectKind::FinalFrame,
    ];

    /// Name used on the command line and in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ghost => "ghost",
            Self::Eyes => "eyes",
            Self::Swirl => "swirl",
            Self::Saturation => "saturation",
            Self::IdentifyFace => "identify-face",
            Self::FlyingPigs => "flying-pigs",
            Self::PigNose => "pig-nose",
            Self::PigLogo => "pig-logo",
            Self::FullFrame => "full-frame",
            Self::FinalFrame => "final-frame",
        }
    }

    /// Picking this effect ends random selection for the photo
    pub fn is_exclusive_terminal(&self) -> bool {
        matches!(self, Self::Ghost)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EffectError::InvalidEffectName { name: s.to_string() }.into())
    }
}

type EffectFactory = Box<dyn Fn(&Config) -> Result<Box<dyn Effect>> + Send + Sync>;

/// Registry for building effects by kind
///
/// Factories load whatever resource images their effect needs, so building is
/// the only place effect construction touches the filesystem.
pub struct EffectRegistry {
    effects: HashMap<EffectKind, EffectFactory>,
}

impl EffectRegistry {
    /// Create a new effect registry with all built-in effects
    pub fn new() -> Self {
        let mut registry = Self {
            effects: HashMap::new(),
        };

        registry.register_builtin_effects();
        registry
    }

    fn register_builtin_effects(&mut self) {
        self.register(EffectKind::IdentifyFace, |_| Ok(Box::new(FaceIdentifyEffect::new())));

        self.register(EffectKind::Swirl, |config| {
            Ok(Box::new(SwirlEffect::new(config.effects.swirl_strength)))
        });

        self.register(EffectKind::Ghost, |config| {
            let ghosts = ResourceSet::load_dir(config.resources.resolve(&config.resources.ghosts))?;
            Ok(Box::new(GhostEffect::new(ghosts, config.effects.ghost_opacity)))
        });

        self.register(EffectKind::Saturation, |config| {
            Ok(Box::new(TonalEffect::new(config.effects.saturation, config.effects.contrast)))
        });

        self.register(EffectKind::Eyes, |_| Ok(Box::new(SketchyEyeEffect::new())));

        self.register(EffectKind::FlyingPigs, |config| {
            let pigs = ResourceSet::load_dir(config.resources.resolve(&config.resources.flying_pigs))?;
            Ok(Box::new(FlyingPigsEffect::new(pigs)))
        });

        self.register(EffectKind::PigNose, |config| {
            let noses = ResourceSet::load_dir(config.resources.resolve(&config.resources.pig_noses))?;
            Ok(Box::new(PigNoseEffect::new(noses)))
        });

        self.register(EffectKind::PigLogo, |config| {
            let logo = ResourceSet::load_dir(config.resources.resolve(&config.resources.pig_logo))?;
            Ok(Box::new(PigLogoEffect::new(logo, config.effects.logo_photo_index)))
        });

        self.register(EffectKind::FullFrame, |config| {
            let frames = ResourceSet::load_dir(config.resources.resolve(&config.resources.full_frames))?;
            Ok(Box::new(RandomFullFrameEffect::new(frames)))
        });

        self.register(EffectKind::FinalFrame, |config| {
            let frame = ResourceSet::load_dir(config.resources.resolve(&config.resources.final_frame))?;
            Ok(Box::new(FinalFrameEffect::new(frame, config.effects.final_frame_photo_index)))
        });
    }

    /// Register or replace the factory for a kind
    pub fn register<F>(&mut self, kind: EffectKind, factory: F)
    where
        F: Fn(&Config) -> Result<Box<dyn Effect>> + Send + Sync + 'static,
    {
        self.effects.insert(kind, Box::new(factory));
    }

    /// Turn effect names into kinds
    ///
    /// Fails on the first unknown name. Nothing is loaded, so a typo is
    /// reported before any resource directory is read.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<EffectKind>> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }

    /// Build one effect
    pub fn build(&self, kind: EffectKind, config: &Config) -> Result<Box<dyn Effect>> {
        let factory = self
            .effects
            .get(&kind)
            .ok_or_else(|| EffectError::InvalidEffectName { name: kind.name().to_string() })?;
        factory(config)
    }

    /// Build every effect in order
    pub fn build_all(&self, kinds: &[EffectKind], config: &Config) -> Result<Vec<Box<dyn Effect>>> {
        kinds.iter().map(|&kind| self.build(kind, config)).collect()
    }

    /// Check if a kind has a factory
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    /// Get all registered effect names
    pub fn available_effects(&self) -> Vec<&'static str> {
        EffectKind::ALL
            .iter()
            .filter(|kind| self.has_effect(**kind))
            .map(|kind| kind.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
