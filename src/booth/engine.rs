use std::collections::HashMap;

use image::{DynamicImage, RgbaImage};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    assembly::{strip::check_sizes, PrintSheet, StripAssembler, MAX_PHOTOS},
    config::Config,
    effects::{
        Effect, EffectKind, EffectRegistry, EffectSelector, ProcessingContext, ResourceSet,
        StripFrameEffect,
    },
    error::{AssemblyError, BoothError, EffectError, Result},
    faces::FaceGeometry,
    mode::PresentationMode,
};

use super::capture::CapturedPhoto;

/// Everything one booth session produces
#[derive(Debug, Clone)]
pub struct SessionOutput {
    /// Processed photos, in capture order
    pub photos: Vec<RgbaImage>,

    /// Effects each photo received
    pub applied: Vec<Vec<EffectKind>>,

    /// The strip with effects and any themed frame
    pub strip: RgbaImage,

    /// The same layout built from the untouched captures
    pub original_strip: Option<RgbaImage>,

    /// Two copies of `strip` side by side with a cut line
    pub print_sheet: Option<RgbaImage>,
}

/// Work for one photo, fixed before any processing starts
struct PhotoJob {
    context: ProcessingContext,
    kinds: Vec<EffectKind>,
    seed: u64,
}

/// Main engine that turns captured photos into finished strips
///
/// The engine follows a clear pipeline:
/// 1. Preparation - check the captures and build a context for each
/// 2. Selection - decide each photo's effects and draw its seed
/// 3. Processing - run the effects, one photo per worker when parallel
/// 4. Assembly - lay out the strips, frame them, build the print sheet
pub struct BoothEngine {
    config: Config,
    mode: PresentationMode,
    selector: EffectSelector,
    effects: HashMap<EffectKind, Box<dyn Effect>>,
    strip_frame: Option<StripFrameEffect>,
    assembler: StripAssembler,
}

impl BoothEngine {
    /// Create an engine with the built-in effects
    pub fn new(config: Config, mode: PresentationMode) -> Result<Self> {
        Self::with_registry(config, mode, &EffectRegistry::new())
    }

    /// Create an engine, building effects from `registry`
    ///
    /// Every effect the mode can ever select is built here, so resource
    /// directories are read once per engine and never during a session.
    pub fn with_registry(config: Config, mode: PresentationMode, registry: &EffectRegistry) -> Result<Self> {
        config.validate()?;

        let mut effects = HashMap::new();
        for kind in EffectSelector::candidates(mode) {
            debug!("Building effect {}", kind);
            effects.insert(kind, registry.build(kind, &config)?);
        }

        let strip_frame = match mode.strip_frame() {
            Some(choice) => {
                let directory = match mode {
                    PresentationMode::PigPit => &config.resources.pig_pit_frames,
                    _ => &config.resources.barbie_frame,
                };
                let frames = ResourceSet::load_dir(config.resources.resolve(directory))?;
                Some(StripFrameEffect::new(frames, choice))
            }
            None => None,
        };

        let mut assembler = StripAssembler::new(mode.background_color());
        let panel_path = config.resources.bottom_panel(mode);
        if panel_path.is_file() {
            match image::open(&panel_path) {
                Ok(panel) => assembler = assembler.with_bottom_panel(panel.into_rgba8()),
                Err(e) => warn!("Could not load bottom panel {:?}: {}", panel_path, e),
            }
        } else {
            warn!("No bottom panel at {:?}, strips will have a plain bottom", panel_path);
        }

        info!("🎃 {} ready with {} effects", mode.title(), effects.len());
        Ok(Self {
            selector: EffectSelector::new(config.selection.clone()),
            config,
            mode,
            effects,
            strip_frame,
            assembler,
        })
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full session over captured photos
    ///
    /// All randomness is drawn from `rng`: selections and one seed per photo
    /// are taken in capture order before processing, so the output for a given
    /// seed does not depend on `processing.parallel`.
    pub fn run_session(&self, captures: Vec<CapturedPhoto>, rng: &mut dyn RngCore) -> Result<SessionOutput> {
        info!("📸 Starting {} session with {} photos", self.mode, captures.len());

        // Step 1: Preparation
        let jobs = self.prepare(captures, rng)?;
        let originals: Vec<RgbaImage> = if self.config.strip.original_strip {
            jobs.iter().map(|job| job.context.frame().snapshot.clone()).collect()
        } else {
            Vec::new()
        };
        let applied: Vec<Vec<EffectKind>> = jobs.iter().map(|job| job.kinds.clone()).collect();

        // Step 2/3: Processing
        let photos = self.process_jobs(jobs)?;

        // Step 4: Assembly
        let mut strip = self.assembler.assemble(&photos)?;
        if let Some(frame) = &self.strip_frame {
            strip = frame.apply(strip, rng);
        }

        let original_strip = if originals.is_empty() {
            None
        } else {
            Some(self.assembler.assemble(&originals)?)
        };

        let print_sheet = if self.config.strip.print_sheet {
            Some(PrintSheet::compose(&strip, self.mode.background_color()))
        } else {
            None
        };

        info!("✅ Session complete");
        Ok(SessionOutput {
            photos,
            applied,
            strip,
            original_strip,
            print_sheet,
        })
    }

    /// Check the captures, then pick effects and a seed per photo
    fn prepare(&self, captures: Vec<CapturedPhoto>, rng: &mut dyn RngCore) -> Result<Vec<PhotoJob>> {
        if captures.is_empty() {
            return Err(AssemblyError::NoPhotos.into());
        }
        if captures.len() > MAX_PHOTOS {
            return Err(AssemblyError::TooManyPhotos {
                count: captures.len(),
                max: MAX_PHOTOS,
            }
            .into());
        }
        let sizes: Vec<(u32, u32)> = captures.iter().map(|c| (c.image.width(), c.image.height())).collect();
        check_sizes(&sizes)?;

        Ok(captures
            .into_iter()
            .enumerate()
            .map(|(index, capture)| {
                let kinds = self.selector.select(self.mode, rng);
                let seed = rng.next_u64();
                let photo_index = index as u32 + 1;
                info!(
                    "Photo {}: [{}]",
                    photo_index,
                    kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
                );
                PhotoJob {
                    context: ProcessingContext::new(capture.image, capture.faces, photo_index),
                    kinds,
                    seed,
                }
            })
            .collect())
    }

    fn process_jobs(&self, jobs: Vec<PhotoJob>) -> Result<Vec<RgbaImage>> {
        if !self.config.processing.parallel {
            return jobs.into_iter().map(|job| self.process_job(job)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.processing.threads)
            .build()
            .map_err(|e| BoothError::generic(format!("Failed to start worker pool: {}", e)))?;
        debug!("Processing photos on {} threads", self.config.processing.threads);

        pool.install(|| jobs.into_par_iter().map(|job| self.process_job(job)).collect())
    }

    fn process_job(&self, job: PhotoJob) -> Result<RgbaImage> {
        let PhotoJob { mut context, kinds, seed } = job;
        let mut rng = StdRng::seed_from_u64(seed);

        for kind in kinds {
            let effect = self.effects.get(&kind).ok_or_else(|| EffectError::EffectFailed {
                effect: kind.name().to_string(),
                reason: format!("not available in {} mode", self.mode),
            })?;
            context.apply(effect.as_ref(), &mut rng)?;
        }

        debug!("Finished photo {}", context.photo_index());
        Ok(context.into_image())
    }
}

/// Run an explicit list of effects over a single image
///
/// This is the one-shot path used to try effects on a single frame outside a
/// session.
pub fn apply_effects(
    effects: &[Box<dyn Effect>],
    image: DynamicImage,
    faces: Vec<FaceGeometry>,
    rng: &mut dyn RngCore,
) -> Result<RgbaImage> {
    let mut context = ProcessingContext::new(image, faces, 1);
    context.apply_all(effects.iter().map(|effect| effect.as_ref()), rng)?;
    Ok(context.into_image())
}
