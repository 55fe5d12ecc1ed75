//! Board configuration and search depth selection
//!
//! [`BoardConfig`] is the validated sizing of a board. The supported range
//! of houses per player is bounded by the depth table below; boards
//! outside it are rejected at construction instead of failing deep in the
//! search.

use serde::{Deserialize, Serialize};

use crate::error::{KalahaError, KalahaResult};
use crate::types::ComputerStrength;

pub const MIN_HOUSES_PER_PLAYER: usize = 3;
pub const MAX_HOUSES_PER_PLAYER: usize = 7;
pub const DEFAULT_HOUSES_PER_PLAYER: usize = 6;
pub const DEFAULT_SEEDS_PER_HOUSE: u32 = 4;

/// Search depth per strength (rows) and houses per player (columns,
/// starting at [`MIN_HOUSES_PER_PLAYER`]). Wider boards branch more, so
/// the hard depths taper off to keep move times tolerable.
const SEARCH_DEPTH: [[u32; 5]; 3] = [
    [3, 3, 3, 3, 3],
    [6, 6, 6, 6, 5],
    [15, 11, 10, 9, 8],
];

/// Validated board sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    houses_per_player: usize,
    seeds_per_house: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            houses_per_player: DEFAULT_HOUSES_PER_PLAYER,
            seeds_per_house: DEFAULT_SEEDS_PER_HOUSE,
        }
    }
}

impl BoardConfig {
    /// Create a configuration, rejecting house counts outside the
    /// supported range and empty starting houses.
    pub fn new(houses_per_player: usize, seeds_per_house: u32) -> KalahaResult<Self> {
        if !(MIN_HOUSES_PER_PLAYER..=MAX_HOUSES_PER_PLAYER).contains(&houses_per_player) {
            return Err(KalahaError::UnsupportedHouseCount {
                houses: houses_per_player,
            });
        }
        if seeds_per_house == 0 {
            return Err(KalahaError::InvalidSeedCount);
        }
        Ok(BoardConfig {
            houses_per_player,
            seeds_per_house,
        })
    }

    #[inline]
    pub fn houses_per_player(&self) -> usize {
        self.houses_per_player
    }

    #[inline]
    pub fn seeds_per_house(&self) -> u32 {
        self.seeds_per_house
    }
}

/// Search depth for a computer player of the given strength on a board of
/// the given width.
pub fn search_depth(strength: ComputerStrength, houses_per_player: usize) -> KalahaResult<u32> {
    if !(MIN_HOUSES_PER_PLAYER..=MAX_HOUSES_PER_PLAYER).contains(&houses_per_player) {
        return Err(KalahaError::UnsupportedHouseCount {
            houses: houses_per_player,
        });
    }
    Ok(SEARCH_DEPTH[strength as usize][houses_per_player - MIN_HOUSES_PER_PLAYER])
}
