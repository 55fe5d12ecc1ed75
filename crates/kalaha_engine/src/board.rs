//! # The Kalaha Board - Pits, Sowing, Captures
//!
//! ## Overview
//!
//! The board owns every pit of both players as one flat `Vec<Pit>` of
//! length `2 * (houses_per_player + 1)`. The flat layout makes the sowing
//! walk a single modular index loop instead of a case analysis over four
//! pit groups:
//!
//! - indices `[0, houses_per_player)` - houses of [`PlayerId::First`]
//! - index `houses_per_player` - store of [`PlayerId::First`]
//! - indices `[houses_per_player + 1, 2 * houses_per_player + 1)` - houses
//!   of [`PlayerId::Second`]
//! - index `2 * houses_per_player + 1` - store of [`PlayerId::Second`]
//!
//! ## Seed conservation
//!
//! Every operation on the board relocates seeds, it never creates or
//! destroys them: sowing distributes exactly the seeds taken from the
//! source house (skipped pits cost an extra loop step, not a seed),
//! captures and the final collection move seeds into a store. The sum over
//! all pits is therefore invariant across any sequence of operations, a
//! property the tests lean on heavily.
//!
//! ## Recorded moves
//!
//! `sow` and `capture_houses` take a `record` flag. The session passes
//! `true` and receives a [`Move`] for the renderer and the undo log; the
//! search passes `false` and skips the allocation entirely, since it only
//! cares about the resulting counts. [`Board::apply_move`] replays a
//! recorded (usually backward) move; it is the undo/redo path and is never
//! used for original move generation.

use std::fmt;

use crate::error::{KalahaError, KalahaResult};
use crate::moves::{Move, SeedMovement};
use crate::pit::Pit;
use crate::rules::{Rules, SowingDirection};
use crate::types::PlayerId;

/// What a sow did, beyond mutating the board.
#[derive(Debug, Default)]
pub struct SowOutcome {
    /// The recorded move; `None` when recording was not requested.
    pub seed_move: Option<Move>,
    /// The last seed landed in the mover's own store.
    pub last_seed_in_own_store: bool,
    /// The last seed landed in a previously empty house of the mover.
    pub last_seed_in_empty_own_house: bool,
    /// House index (player-relative) of the landing house, only set when
    /// `last_seed_in_empty_own_house` is true.
    pub last_house: Option<usize>,
}

/// The game board: all pits of both players, stores included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    houses_per_player: usize,
    initial_seeds: u32,
    pits: Vec<Pit>,
}

impl Board {
    /// Allocate a board with the given number of houses per player, every
    /// house filled with `initial_seeds`, both stores empty.
    pub fn new(houses_per_player: usize, initial_seeds: u32) -> Self {
        let mut board = Board {
            houses_per_player,
            initial_seeds,
            pits: Vec::new(),
        };
        board.resize(houses_per_player, initial_seeds);
        board
    }

    /// Reallocate all pits; houses get `initial_seeds`, stores get 0.
    pub fn resize(&mut self, houses_per_player: usize, initial_seeds: u32) {
        self.houses_per_player = houses_per_player;
        self.initial_seeds = initial_seeds;
        let total = (houses_per_player + 1) * 2;
        self.pits = (0..total)
            .map(|index| {
                if index == houses_per_player || index == total - 1 {
                    Pit::new(0)
                } else {
                    Pit::new(initial_seeds)
                }
            })
            .collect();
    }

    #[inline]
    pub fn houses_per_player(&self) -> usize {
        self.houses_per_player
    }

    #[inline]
    pub fn initial_seeds(&self) -> u32 {
        self.initial_seeds
    }

    /// Total number of pits, stores included.
    #[inline]
    pub fn total_pits(&self) -> usize {
        self.pits.len()
    }

    fn check_house_index(&self, index: usize) -> KalahaResult<()> {
        if index >= self.houses_per_player {
            return Err(KalahaError::HouseIndexOutOfRange {
                index,
                houses: self.houses_per_player,
            });
        }
        Ok(())
    }

    /// Raw board index of the given player's house.
    pub fn house_index(&self, player: PlayerId, house: usize) -> KalahaResult<usize> {
        self.check_house_index(house)?;
        Ok(house + player.index() * (self.houses_per_player + 1))
    }

    /// Raw board index of the given player's store.
    #[inline]
    pub fn store_index(&self, player: PlayerId) -> usize {
        self.houses_per_player + player.index() * (self.houses_per_player + 1)
    }

    /// Raw board index of the opponent's store.
    #[inline]
    pub fn opponent_store_index(&self, player: PlayerId) -> usize {
        self.store_index(player.opponent())
    }

    /// Raw board index of the house directly opposite the given house.
    pub fn opposite_house_index(&self, player: PlayerId, house: usize) -> KalahaResult<usize> {
        self.check_house_index(house)?;
        Ok(2 * self.houses_per_player - (house + player.index() * (self.houses_per_player + 1)))
    }

    /// The pit at a raw board index.
    pub fn pit(&self, index: usize) -> KalahaResult<&Pit> {
        self.pits.get(index).ok_or(KalahaError::PitIndexOutOfRange {
            index,
            pits: self.pits.len(),
        })
    }

    /// Mutable access to the pit at a raw board index. Exposed so tests
    /// and external persistence can set up positions.
    pub fn pit_mut(&mut self, index: usize) -> KalahaResult<&mut Pit> {
        let pits = self.pits.len();
        self.pits
            .get_mut(index)
            .ok_or(KalahaError::PitIndexOutOfRange { index, pits })
    }

    /// The given player's house.
    pub fn house(&self, player: PlayerId, house: usize) -> KalahaResult<&Pit> {
        let index = self.house_index(player, house)?;
        Ok(&self.pits[index])
    }

    /// The given player's store.
    #[inline]
    pub fn store(&self, player: PlayerId) -> &Pit {
        &self.pits[self.store_index(player)]
    }

    /// True iff the raw index is one of the player's houses (stores are
    /// owned by nobody for the purpose of this check).
    pub fn owns_house(&self, player: PlayerId, index: usize) -> bool {
        let base = player.index() * (self.houses_per_player + 1);
        index >= base && index < base + self.houses_per_player
    }

    /// True if the player has at least one house containing seeds.
    pub fn has_seeds_in_any_house(&self, player: PlayerId) -> bool {
        let base = player.index() * (self.houses_per_player + 1);
        self.pits[base..base + self.houses_per_player]
            .iter()
            .any(Pit::contains_seeds)
    }

    /// True if every house of the player is empty.
    #[inline]
    pub fn has_only_empty_houses(&self, player: PlayerId) -> bool {
        !self.has_seeds_in_any_house(player)
    }

    /// Sum of the seeds in the player's houses (store excluded).
    pub fn seed_sum_of(&self, player: PlayerId) -> u32 {
        let base = player.index() * (self.houses_per_player + 1);
        self.pits[base..base + self.houses_per_player]
            .iter()
            .map(Pit::seed_count)
            .sum()
    }

    /// Sum of the seeds in all pits, stores included.
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().map(Pit::seed_count).sum()
    }

    /// Sow the seeds of the given house: empty it and distribute its seeds
    /// one by one into the following pits, skipping the opponent's store.
    ///
    /// The direction is clockwise if the rules say so outright, or if they
    /// say `CrossKalah` and the house held an odd number of seeds;
    /// counterclockwise otherwise. Every skip of the opponent's store costs
    /// one extra loop step, so exactly the removed number of seeds is
    /// placed.
    ///
    /// With `record` set, the returned outcome carries a [`Move`] with one
    /// seed movement per placement. Sowing an empty house is a no-op that
    /// reports no landing events.
    pub fn sow(
        &mut self,
        player: PlayerId,
        house: usize,
        rules: &Rules,
        record: bool,
    ) -> KalahaResult<SowOutcome> {
        let source = self.house_index(player, house)?;
        let total = self.pits.len();
        let opponent_store = self.opponent_store_index(player);

        let seeds = self.pits[source].remove_all() as usize;
        let clockwise = match rules.direction_of_sowing() {
            SowingDirection::Clockwise => true,
            SowingDirection::CrossKalah => seeds % 2 == 1,
            SowingDirection::Counterclockwise => false,
        };

        let mut outcome = SowOutcome {
            seed_move: record.then(Move::new),
            ..SowOutcome::default()
        };

        // One placement per loop step; a skipped store stretches the loop
        // by one step instead of consuming a seed.
        let mut steps = 0usize;
        let mut extra = 0usize;
        while steps < seeds + extra {
            let target = if clockwise {
                (source + total - (steps + 1) % total) % total
            } else {
                (source + 1 + steps) % total
            };

            if target == opponent_store {
                extra += 1;
            } else {
                self.pits[target].add_seed();
                if let Some(seed_move) = outcome.seed_move.as_mut() {
                    seed_move.push(SeedMovement::new(source, target, 1));
                }
            }
            steps += 1;
        }

        if seeds > 0 {
            let last = if clockwise {
                (source + total - steps % total) % total
            } else {
                (source + steps) % total
            };

            if last == self.store_index(player) {
                outcome.last_seed_in_own_store = true;
            } else if self.pits[last].seed_count() == 1 && self.owns_house(player, last) {
                outcome.last_seed_in_empty_own_house = true;
                // Map the raw index back to a player-relative house index.
                outcome.last_house = Some(last % (self.houses_per_player + 1));
            }
        }

        Ok(outcome)
    }

    /// Capture: move the mover's single seed from `house` (and, when
    /// `capture_opponent_house` is set, the whole opposite house) into the
    /// mover's store, emptying both source pits.
    ///
    /// When recording, the opponent-side movement is recorded before the
    /// own-side movement; replay determinism depends on that order.
    pub fn capture_houses(
        &mut self,
        player: PlayerId,
        house: usize,
        capture_opponent_house: bool,
        record: bool,
    ) -> KalahaResult<Option<Move>> {
        let own = self.house_index(player, house)?;
        let store = self.store_index(player);
        let mut capture_move = record.then(Move::new);

        if capture_opponent_house {
            let opposite = self.opposite_house_index(player, house)?;
            let captured = self.pits[opposite].remove_all();
            self.pits[store].add_seeds(captured);
            if let Some(mv) = capture_move.as_mut() {
                mv.push(SeedMovement::new(opposite, store, captured));
            }
        }

        if let Some(mv) = capture_move.as_mut() {
            mv.push(SeedMovement::new(own, store, 1));
        }
        self.pits[store].add_seeds(1);
        self.pits[own].remove_all();

        Ok(capture_move)
    }

    /// Move all remaining house seeds into their owners' stores, `first`'s
    /// houses before `second`'s, in house-index order. Records one seed
    /// movement per non-empty house.
    pub fn collect_remaining_seeds(&mut self, first: PlayerId, second: PlayerId) -> Move {
        let mut collection = Move::new();
        for player in [first, second] {
            let store = self.store_index(player);
            let base = player.index() * (self.houses_per_player + 1);
            for house in 0..self.houses_per_player {
                let index = base + house;
                let seeds = self.pits[index].remove_all();
                if seeds > 0 {
                    self.pits[store].add_seeds(seeds);
                    collection.push(SeedMovement::new(index, store, seeds));
                }
            }
        }
        collection
    }

    /// Replay a recorded move: for each seed movement in order, remove
    /// `count` seeds from its source pit and add them to its target pit.
    /// This is the undo/redo path.
    pub fn apply_move(&mut self, seed_move: &Move) -> KalahaResult<()> {
        for movement in seed_move.movements() {
            if movement.from >= self.pits.len() || movement.to >= self.pits.len() {
                return Err(KalahaError::PitIndexOutOfRange {
                    index: movement.from.max(movement.to),
                    pits: self.pits.len(),
                });
            }
            self.pits[movement.from].remove_seeds(movement.count)?;
            self.pits[movement.to].add_seeds(movement.count);
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    /// Renders the board with the second player's houses on top (reversed,
    /// as seen across the table) and the stores on the flanks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "      ")?;
        for house in (0..self.houses_per_player).rev() {
            let index = house + self.houses_per_player + 1;
            write!(f, "{:>3}", self.pits[index].seed_count())?;
        }
        writeln!(f)?;
        write!(
            f,
            "{:>3}{}{:>3}",
            self.store(PlayerId::Second).seed_count(),
            " ".repeat(3 * self.houses_per_player + 3),
            self.store(PlayerId::First).seed_count()
        )?;
        writeln!(f)?;
        write!(f, "      ")?;
        for house in 0..self.houses_per_player {
            write!(f, "{:>3}", self.pits[house].seed_count())?;
        }
        Ok(())
    }
}
