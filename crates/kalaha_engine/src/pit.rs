//! A single seed container on the board
//!
//! Pits are plain counters; houses and stores are both pits, the board
//! decides which role an index plays.

use crate::error::{KalahaError, KalahaResult};

/// One pit on the board, holding a non-negative number of seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pit {
    seeds: u32,
}

impl Pit {
    /// Create a pit holding the given number of seeds.
    #[inline]
    pub fn new(seeds: u32) -> Self {
        Pit { seeds }
    }

    /// The number of seeds currently in the pit.
    #[inline]
    pub fn seed_count(&self) -> u32 {
        self.seeds
    }

    /// Add a single seed.
    #[inline]
    pub fn add_seed(&mut self) {
        self.seeds += 1;
    }

    /// Add `count` seeds.
    #[inline]
    pub fn add_seeds(&mut self, count: u32) {
        self.seeds += count;
    }

    /// Remove a single seed. Removing from an empty pit is a caller bug.
    pub fn remove_seed(&mut self) -> KalahaResult<()> {
        if self.seeds == 0 {
            return Err(KalahaError::EmptyPit);
        }
        self.seeds -= 1;
        Ok(())
    }

    /// Remove `count` seeds. Underflow is a caller bug.
    pub fn remove_seeds(&mut self, count: u32) -> KalahaResult<()> {
        if self.seeds < count {
            return Err(KalahaError::NotEnoughSeeds {
                requested: count,
                available: self.seeds,
            });
        }
        self.seeds -= count;
        Ok(())
    }

    /// Empty the pit, returning how many seeds were removed.
    #[inline]
    pub fn remove_all(&mut self) -> u32 {
        std::mem::take(&mut self.seeds)
    }

    /// True if the pit holds no seeds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seeds == 0
    }

    /// True if the pit holds at least one seed.
    #[inline]
    pub fn contains_seeds(&self) -> bool {
        self.seeds > 0
    }
}
