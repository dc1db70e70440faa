//! Reply Selection
//!
//! Which canned reply a persona sends is delegated to a [`ReplySelector`].
//! The application uses [`RandomSelector`]; tests substitute
//! [`FixedSelector`] to get deterministic conversations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a reply pool
pub trait ReplySelector {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniformly random selection
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seed from the operating system
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence from a fixed seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplySelector for RandomSelector {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the pool)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedSelector(pub usize);

impl ReplySelector for FixedSelector {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
