//! # Move Search - Depth-Limited Minimax
//!
//! ## Overview
//!
//! The computer opponent picks its house with a plain depth-limited
//! minimax over cloned boards. There is no pruning and no transposition
//! table: the branching factor is the number of houses (at most 7) and the
//! configured depths keep the tree small enough that exhaustive search
//! answers well within interactive time.
//!
//! ## Shape of the tree
//!
//! `maximize` expands the moves of the player the engine picks for,
//! `minimize` those of the opponent. An extra turn keeps the same player
//! to move, so the child recurses into the *same* function; depth still
//! advances, so a chain of extra turns cannot blow the depth bound.
//!
//! ## Scoring
//!
//! All scores are from the maximizing player's perspective: the store
//! difference, plus the house-seed difference at finished positions when
//! the final collection rule is on. At the depth bound only the stores
//! count; seeds still in play are treated as undecided.
//!
//! Equal-scoring root moves are collected and one is drawn uniformly, so
//! the engine does not telegraph a fixed preference between equivalent
//! houses.

use instant::Instant;
use rand::Rng;

use crate::board::Board;
use crate::error::{KalahaError, KalahaResult};
use crate::rules::Rules;
use crate::types::PlayerId;

/// Large enough to dominate any reachable score, small enough that
/// arithmetic around it cannot overflow.
pub const SCORE_INFINITY: i32 = i32::MAX / 2;

/// Store-seed difference from `player`'s perspective.
fn store_difference(board: &Board, player: PlayerId) -> i32 {
    board.store(player).seed_count() as i32
        - board.store(player.opponent()).seed_count() as i32
}

/// Score of a finished position from `player`'s perspective. With the
/// final collection rule on, seeds still sitting in houses are as good as
/// banked.
fn evaluate_terminal(board: &Board, rules: &Rules, player: PlayerId) -> i32 {
    let mut score = store_difference(board, player);
    if rules.collect_seeds_at_end_of_game() {
        score += board.seed_sum_of(player) as i32 - board.seed_sum_of(player.opponent()) as i32;
    }
    score
}

struct Search<'a> {
    rules: &'a Rules,
    max_depth: u32,
    /// Score of each root house, filled by the depth-1 `maximize` level.
    root_scores: Vec<i32>,
}

impl Search<'_> {
    /// Expand one move of `mover` on a clone of `board` and score the
    /// resulting position. Shared by `maximize` and `minimize`; `same`
    /// continues with the same player (extra turn), `other` hands over.
    fn expand(
        &mut self,
        board: &Board,
        mover: PlayerId,
        house: usize,
        depth: u32,
        same: fn(&mut Self, &Board, PlayerId, u32) -> KalahaResult<i32>,
        other: fn(&mut Self, &Board, PlayerId, u32) -> KalahaResult<i32>,
    ) -> KalahaResult<i32> {
        let mut child = board.clone();
        let outcome = child.sow(mover, house, self.rules, false)?;

        if outcome.last_seed_in_own_store && self.rules.play_again_when_last_seed_in_own_store() {
            return same(self, &child, mover, depth + 1);
        }

        if let Some(landing) = outcome.last_house {
            // The capture decision looks at the board as it was before the
            // sow; a seed dropped into the opposite house on the way around
            // does not rescue it from capture.
            let opposite = board.opposite_house_index(mover, landing)?;
            let decision = self.rules.decide_capture(board.pit(opposite)?.seed_count());
            if decision.may_capture {
                child.capture_houses(mover, landing, decision.capture_opponent_house, false)?;
            }
        }

        other(self, &child, mover.opponent(), depth + 1)
    }

    fn maximize(&mut self, board: &Board, mover: PlayerId, depth: u32) -> KalahaResult<i32> {
        if board.has_only_empty_houses(mover) || board.has_only_empty_houses(mover.opponent()) {
            return Ok(evaluate_terminal(board, self.rules, mover));
        }
        if depth == self.max_depth {
            return Ok(store_difference(board, mover));
        }

        let mut best = -SCORE_INFINITY;
        for house in 0..board.houses_per_player() {
            if board.house(mover, house)?.is_empty() {
                continue;
            }
            let score =
                self.expand(board, mover, house, depth, Self::maximize, Self::minimize)?;
            if depth == 1 {
                self.root_scores[house] = score;
            }
            if score >= best {
                best = score;
            }
        }
        Ok(best)
    }

    fn minimize(&mut self, board: &Board, mover: PlayerId, depth: u32) -> KalahaResult<i32> {
        if board.has_only_empty_houses(mover) || board.has_only_empty_houses(mover.opponent()) {
            return Ok(evaluate_terminal(board, self.rules, mover.opponent()));
        }
        if depth == self.max_depth {
            return Ok(store_difference(board, mover.opponent()));
        }

        let mut worst = SCORE_INFINITY;
        for house in 0..board.houses_per_player() {
            if board.house(mover, house)?.is_empty() {
                continue;
            }
            let score =
                self.expand(board, mover, house, depth, Self::minimize, Self::maximize)?;
            if score < worst {
                worst = score;
            }
        }
        Ok(worst)
    }
}

/// Pick the best house for `player`, drawing uniformly among equal-scoring
/// candidates with the thread-local generator.
///
/// Depth counts recursion levels starting at 1 for the root, so
/// `max_depth` must be at least 2 for the root moves to be expanded at
/// all. The tables in [`crate::settings`] start at 3.
pub fn compute_computer_move(
    board: &Board,
    rules: &Rules,
    player: PlayerId,
    max_depth: u32,
) -> KalahaResult<usize> {
    compute_computer_move_with_rng(board, rules, player, max_depth, &mut rand::rng())
}

/// Same as [`compute_computer_move`] with a caller-supplied generator, for
/// reproducible games and tests.
pub fn compute_computer_move_with_rng(
    board: &Board,
    rules: &Rules,
    player: PlayerId,
    max_depth: u32,
    rng: &mut impl Rng,
) -> KalahaResult<usize> {
    let started = Instant::now();
    let mut search = Search {
        rules,
        max_depth,
        root_scores: vec![-SCORE_INFINITY; board.houses_per_player()],
    };
    let best = search.maximize(board, player, 1)?;

    let candidates: Vec<usize> = (0..board.houses_per_player())
        .filter(|&house| {
            search.root_scores[house] == best
                && board
                    .house(player, house)
                    .map(|pit| pit.contains_seeds())
                    .unwrap_or(false)
        })
        .collect();
    if candidates.is_empty() {
        return Err(KalahaError::NoMovePossible { player });
    }

    let choice = candidates[rng.random_range(0..candidates.len())];
    tracing::debug!(
        ?player,
        max_depth,
        best,
        ties = candidates.len(),
        house = choice,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(choice)
}
