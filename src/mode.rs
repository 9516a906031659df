//! Presentation modes
//!
//! A mode is the theme of a booth session. Beyond the text shown to guests it
//! decides which effects run on each photo, whether the assembled strip gets a
//! frame, and which bottom panel and background colour the strip uses.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::effects::{frame::FrameChoice, EffectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationMode {
    Spooky,
    Piggy,
    Casey,
    Barbie,
    PigPit,
}

impl PresentationMode {
    pub const ALL: [PresentationMode; 5] = [
        PresentationMode::Spooky,
        PresentationMode::Piggy,
        PresentationMode::Casey,
        PresentationMode::Barbie,
        PresentationMode::PigPit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spooky => "spooky",
            Self::Piggy => "piggy",
            Self::Casey => "casey",
            Self::Barbie => "barbie",
            Self::PigPit => "pig-pit",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Spooky => "Spooky Booth",
            Self::Piggy => "Piggy Booth",
            Self::Casey => "Casey's 30th B-Day Photo Booth",
            Self::Barbie => "Barbie Booth",
            Self::PigPit => "Pig Pit Booth",
        }
    }

    pub fn start_prompt(&self) -> &'static str {
        match self {
            Self::Spooky => "ENTER your phone number to get SPOOKED!",
            Self::Piggy | Self::PigPit => "ENTER your phone number PIGGIES!",
            Self::Casey => "Enter your phone number party people!",
            Self::Barbie => "Press ENTER to get started!",
        }
    }

    /// What to shout before each of the four shots
    pub fn shot_prompts(&self) -> [&'static str; 4] {
        match self {
            Self::Spooky => ["Cheese!", "Cheese!", "Die!", "Cheese!"],
            Self::Piggy | Self::PigPit => ["Cheese!", "Cheese!", "Bacon!", "Cheese!"],
            Self::Casey => ["Cheese!", "Cheese!", "Mashed Potato!", "Cheese!"],
            Self::Barbie => ["Cheese!", "Cheese!", "Work it Cowgirl!", "That's it Cowgirl!"],
        }
    }

    pub fn processing_prompt(&self) -> &'static str {
        match self {
            Self::Spooky => "Detecting ghosts...",
            Self::Piggy | Self::PigPit => "Finding little piggies...",
            Self::Casey | Self::Barbie => "Assembling your photos...",
        }
    }

    /// Strip background behind the photos
    pub fn background_color(&self) -> Rgba<u8> {
        match self {
            Self::Spooky => Rgba([0, 0, 0, 255]),
            Self::Piggy | Self::PigPit => Rgba([255, 192, 203, 255]),
            Self::Casey => Rgba([255, 255, 255, 255]),
            Self::Barbie => Rgba([224, 33, 138, 255]),
        }
    }

    /// File name of the bottom panel inside the panel directory
    pub fn bottom_panel_file(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Effects every photo gets, or `None` when the random selector decides
    pub fn fixed_effects(&self) -> Option<&'static [EffectKind]> {
        match self {
            Self::Spooky => None,
            Self::Piggy => Some(&[EffectKind::FlyingPigs, EffectKind::PigNose, EffectKind::PigLogo]),
            Self::Casey => Some(&[EffectKind::FullFrame, EffectKind::FinalFrame]),
            Self::Barbie | Self::PigPit => Some(&[]),
        }
    }

    /// Frame laid over the assembled strip, if any
    pub fn strip_frame(&self) -> Option<FrameChoice> {
        match self {
            Self::Barbie => Some(FrameChoice::Fixed),
            Self::PigPit => Some(FrameChoice::Random),
            _ => None,
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|mode| mode.name()).collect();
                format!("unknown mode '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
