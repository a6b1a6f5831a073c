//! Gallery configuration: initial size, transition timings and RNG seed.
//!
//! Loaded from JSON posted to `/api/gallery/config`. Every field has a
//! default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Upper bound on any configured duration.
const MAX_DURATION_MS: u64 = 10_000;
/// Upper bound on the initial card count.
const MAX_INITIAL_CARDS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Cards generated from the seed set when the gallery starts.
    pub initial_cards: usize,
    /// Delay added per card when revealing a freshly projected grid.
    pub stagger_ms: u64,
    /// Length of the loading transition shown while a card is being added.
    pub loading_ms: u64,
    /// Shake duration before a shuffle is applied.
    pub shake_ms: u64,
    pub flip_ms: u64,
    pub bounce_ms: u64,
    /// Fixed RNG seed. `None` seeds from platform entropy.
    pub seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            initial_cards: 6,
            stagger_ms: 100,
            loading_ms: 1000,
            shake_ms: 500,
            flip_ms: 600,
            bounce_ms: 300,
            seed: None,
        }
    }
}

impl GalleryConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        let config: GalleryConfig =
            serde_json::from_str(json).map_err(|e| GalleryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.initial_cards > MAX_INITIAL_CARDS {
            return Err(GalleryError::InvalidConfig(format!(
                "initial_cards must be at most {}, got {}",
                MAX_INITIAL_CARDS, self.initial_cards
            )));
        }
        for (name, value) in [
            ("stagger_ms", self.stagger_ms),
            ("loading_ms", self.loading_ms),
            ("shake_ms", self.shake_ms),
            ("flip_ms", self.flip_ms),
            ("bounce_ms", self.bounce_ms),
        ] {
            if value > MAX_DURATION_MS {
                return Err(GalleryError::InvalidConfig(format!(
                    "{} must be at most {}ms, got {}",
                    name, MAX_DURATION_MS, value
                )));
            }
        }
        Ok(())
    }
}
