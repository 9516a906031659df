use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use spooky_booth::{
    booth::{apply_effects, BoothEngine, CapturedPhoto},
    config::Config,
    effects::EffectRegistry,
    mode::PresentationMode,
};

#[derive(Parser)]
#[command(
    name = "spooky-booth",
    version,
    about = "Photo booth effects and printable photo strips",
    long_about = "Spooky Booth swirls faces, summons ghosts and hands out pig noses, then lays the photos out on a 2x6 inch strip ready for printing."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for every random choice, for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a list of effects over a single image
    Apply {
        /// The image to process; faces are read from the matching .json file
        #[arg(short, long)]
        input: PathBuf,

        /// Effects to run, in order (identify-face, swirl, ghost, saturation, eyes, ...)
        #[arg(short, long, num_args = 1.., required = true)]
        effects: Vec<String>,

        /// Directory for the processed image
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Turn a directory of captured photos into strips
    Strip {
        /// Directory holding up to four captured photos and their .json faces
        #[arg(short, long)]
        photos: PathBuf,

        /// Presentation mode (spooky, piggy, casey, barbie, pig-pit)
        #[arg(short, long)]
        mode: Option<PresentationMode>,

        /// Directory for the strips
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Also write a print sheet with two strips side by side
        #[arg(long)]
        print_sheet: bool,

        /// Process photos in parallel
        #[arg(long)]
        parallel: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Spooky Booth v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if cli.seed.is_some() {
        config.processing.seed = cli.seed;
    }

    let mut rng = match config.processing.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Command::Apply { input, effects, output_dir } => {
            // Resolve names before anything touches the disk
            let kinds = EffectRegistry::resolve(&effects).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let registry = EffectRegistry::new();
            let effects = registry.build_all(&kinds, &config)?;

            let photo = CapturedPhoto::open(&input)?;
            info!("Applying {} effects to {:?}", effects.len(), input);
            let result = apply_effects(&effects, photo.image, photo.faces, &mut rng)?;

            let names: Vec<&str> = kinds.iter().map(|kind| kind.name()).collect();
            let stem = input
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("photo");
            let output_path = output_file(&output_dir, &format!("{}-{}", stem, names.join("-")))?;
            result.save(&output_path)?;
            info!("Saved {:?}", output_path);
        }

        Command::Strip { photos, mode, output_dir, print_sheet, parallel } => {
            if print_sheet {
                config.strip.print_sheet = true;
            }
            if parallel {
                config.processing.parallel = true;
            }
            let mode = mode.unwrap_or(config.strip.mode);
            info!("{}", mode.processing_prompt());

            let engine = BoothEngine::new(config, mode)?;
            let captures = CapturedPhoto::open_dir(&photos)?;
            let output = engine
                .run_session(captures, &mut rng)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            let timestamp = Local::now().format("%d_%m_%Y-%H_%M_%S").to_string();
            let strip_path = output_file(&output_dir, &format!("{}-{}", mode, timestamp))?;
            output.strip.save(&strip_path)?;
            info!("Strip saved to {:?}", strip_path);

            if let Some(original) = &output.original_strip {
                let path = output_file(&output_dir, &format!("{}-{}-original", mode, timestamp))?;
                original.save(&path)?;
                info!("Original strip saved to {:?}", path);
            }

            if let Some(sheet) = &output.print_sheet {
                let path = output_file(&output_dir, &format!("{}-{}-print", mode, timestamp))?;
                sheet.save(&path)?;
                info!("Print sheet saved to {:?}", path);
            }
        }
    }

    Ok(())
}

/// PNG path inside `directory`, creating the directory if needed
fn output_file(directory: &Path, name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("could not create output directory {:?}", directory))?;
    Ok(directory.join(format!("{}.png", name)))
}
