//! Random source for shuffling and random card draws.
//!
//! ChaCha8 stream seeded from platform entropy, or from a fixed seed so that
//! tests and demos can reproduce a sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GalleryError;

#[derive(Clone, Debug)]
pub struct GalleryRng {
    inner: ChaCha8Rng,
}

impl GalleryRng {
    /// Deterministic stream for the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from the platform entropy source (`crypto.getRandomValues` in the browser).
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    ///
    /// # Errors
    /// Returns [`GalleryError::InvalidRange`] when `max < min`.
    pub fn random_in_range(&mut self, min: i64, max: i64) -> Result<i64, GalleryError> {
        if max < min {
            return Err(GalleryError::InvalidRange { min, max });
        }
        Ok(self.inner.gen_range(min..=max))
    }

    /// Uniform index in `[0, upper]`.
    pub fn index_up_to(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }
}

impl Default for GalleryRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
