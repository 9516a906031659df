use rand::{Rng, RngCore};
use tracing::debug;

use crate::{config::SelectionConfig, effects::EffectKind, mode::PresentationMode};

/// Effects the random policy draws from
pub const RANDOM_POOL: [EffectKind; 3] = [EffectKind::Ghost, EffectKind::Eyes, EffectKind::Swirl];

/// The effect optionally tacked on after the random picks
pub const TONAL_FINISHER: EffectKind = EffectKind::Saturation;

/// Decides which effects each photo gets
#[derive(Debug, Clone)]
pub struct EffectSelector {
    config: SelectionConfig,
}

impl EffectSelector {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// Every kind `select` can return for a mode
    ///
    /// Used to build effects up front, once per session.
    pub fn candidates(mode: PresentationMode) -> Vec<EffectKind> {
        match mode.fixed_effects() {
            Some(kinds) => kinds.to_vec(),
            None => {
                let mut kinds = RANDOM_POOL.to_vec();
                kinds.push(TONAL_FINISHER);
                kinds
            }
        }
    }

    /// Effects for one photo, in the order they run
    ///
    /// Fixed mode lists are returned as-is without touching `rng`.
    pub fn select(&self, mode: PresentationMode, rng: &mut dyn RngCore) -> Vec<EffectKind> {
        match mode.fixed_effects() {
            Some(kinds) => kinds.to_vec(),
            None => self.select_random(rng),
        }
    }

    /// The stochastic policy
    ///
    /// Each round rolls against a shrinking threshold; a pick is removed from
    /// the pool so nothing repeats. The ghost stops the loop the moment it is
    /// picked. Afterwards a coin flip may add the tonal effect.
    pub fn select_random(&self, rng: &mut dyn RngCore) -> Vec<EffectKind> {
        let mut pool = RANDOM_POOL.to_vec();
        let mut selected = Vec::with_capacity(self.config.max_effects + 1);
        let mut threshold = self.config.initial_threshold;

        while selected.len() < self.config.max_effects && !pool.is_empty() {
            let roll = rng.gen_range(0..100);
            if roll as f64 >= threshold {
                break;
            }

            let kind = pool.remove(rng.gen_range(0..pool.len()));
            debug!("Selected effect {} (roll {} < {:.1})", kind, roll, threshold);
            selected.push(kind);

            if kind.is_exclusive_terminal() {
                break;
            }
            threshold *= self.config.threshold_decay;
        }

        if rng.gen_range(0..100) < self.config.tonal_chance {
            debug!("Selected effect {}", TONAL_FINISHER);
            selected.push(TONAL_FINISHER);
        }

        selected
    }
}

impl Default for EffectSelector {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}
