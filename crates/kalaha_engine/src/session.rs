//! # Game Session - Turn Orchestration
//!
//! ## Overview
//!
//! [`GameSession`] ties the pieces together: it owns the board, the rule
//! set, the two player slots and the undo log, and drives a game through
//! its lifecycle. A caller (CLI, GUI, network layer) talks to the session
//! exclusively: it asks which houses are selectable, plays one with
//! [`GameSession::play_house`], and renders the returned [`TurnOutcome`].
//!
//! ## One turn, one undo entry
//!
//! `play_house` records the sow in the undo log and merges every follow-up
//! effect of the same turn (a capture, the end-of-game collection) into
//! that entry. [`GameSession::undo_last_turn`] therefore always reverts
//! exactly one full turn and hands the turn back to the player who made
//! it. Undoing out of a finished game reopens it.

use crate::board::Board;
use crate::error::{KalahaError, KalahaResult};
use crate::moves::Move;
use crate::rules::Rules;
use crate::search;
use crate::settings::{self, BoardConfig};
use crate::types::{GameStatus, Player, PlayerId, Side, Species};
use crate::undo::UndoLog;

/// Final standing of a finished game, decided by store counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` means a draw.
    pub winner: Option<PlayerId>,
}

/// Everything one call to [`GameSession::play_house`] did, for rendering.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The sowing itself.
    pub sow: Move,
    /// Capture triggered by the last seed, if any.
    pub capture: Option<Move>,
    /// End-of-game collection of the remaining seeds, if the game just
    /// finished and the rules call for it.
    pub collection: Option<Move>,
    /// The mover gets another turn.
    pub extra_turn: bool,
    /// Set when this turn finished the game.
    pub result: Option<GameResult>,
    /// Who is to move next (the mover again on an extra turn).
    pub next_player: PlayerId,
}

/// Result of undoing one turn.
#[derive(Debug, Clone)]
pub struct UndoOutcome {
    /// The backward move that was applied to the board.
    pub undo_move: Move,
    /// The player whose turn it is again.
    pub player_to_move: PlayerId,
}

/// A running Kalaha game.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    rules: Rules,
    config: BoardConfig,
    players: [Player; 2],
    current: PlayerId,
    first_player: PlayerId,
    status: GameStatus,
    undo: UndoLog,
    may_move_again: bool,
}

impl GameSession {
    /// Create a fresh session: filled board, default player slots (both
    /// human), first player to move.
    pub fn new(config: BoardConfig, rules: Rules) -> Self {
        GameSession {
            board: Board::new(config.houses_per_player(), config.seeds_per_house()),
            rules,
            config,
            players: [
                Player::new(PlayerId::First, Side::South),
                Player::new(PlayerId::Second, Side::North),
            ],
            current: PlayerId::First,
            first_player: PlayerId::First,
            status: GameStatus::StartedNew,
            undo: UndoLog::new(),
            may_move_again: true,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Mutable rule access, for configuration before or between games.
    #[inline]
    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[inline]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    #[inline]
    pub fn has_undo(&self) -> bool {
        self.undo.has_entries()
    }

    /// True while the current player is entitled to pick a house, either
    /// at the start of their turn or after earning an extra turn.
    #[inline]
    pub fn may_move_again(&self) -> bool {
        self.may_move_again
    }

    /// True if the current player may pick this house: it must be one of
    /// their own houses and hold at least one seed.
    pub fn is_selectable_house(&self, house: usize) -> bool {
        self.board
            .house(self.current, house)
            .map(|pit| pit.contains_seeds())
            .unwrap_or(false)
    }

    /// Play one full turn of the current player from the given house:
    /// sow, then capture or finish the game as the rules dictate.
    pub fn play_house(&mut self, house: usize) -> KalahaResult<TurnOutcome> {
        match self.status {
            GameStatus::StartedNew | GameStatus::Continued => self.status = GameStatus::Running,
            GameStatus::Running => {}
            status => return Err(KalahaError::GameNotRunning { status }),
        }
        if !self.is_selectable_house(house) {
            return Err(KalahaError::HouseNotSelectable { house });
        }

        let mover = self.current;
        let outcome = self.board.sow(mover, house, &self.rules, true)?;
        let sow = outcome.seed_move.unwrap_or_default();
        self.undo.push_normal(&sow, mover);

        // An extra turn requires a house left to play it from.
        let extra_turn = self.rules.play_again_when_last_seed_in_own_store()
            && outcome.last_seed_in_own_store
            && self.board.has_seeds_in_any_house(mover);
        self.may_move_again = extra_turn;

        let mut capture = None;
        if !extra_turn {
            if let Some(landing) = outcome.last_house {
                let opposite = self.board.opposite_house_index(mover, landing)?;
                let decision = self
                    .rules
                    .decide_capture(self.board.pit(opposite)?.seed_count());
                if decision.may_capture {
                    let capture_move = self.board.capture_houses(
                        mover,
                        landing,
                        decision.capture_opponent_house,
                        true,
                    )?;
                    if let Some(capture_move) = capture_move {
                        self.undo.push_follow_up(&capture_move, mover)?;
                        capture = Some(capture_move);
                    }
                }
            }
        }

        let mut collection = None;
        let mut result = None;
        if self.board.has_only_empty_houses(PlayerId::First)
            || self.board.has_only_empty_houses(PlayerId::Second)
        {
            self.status = GameStatus::Ended;
            if self.rules.collect_seeds_at_end_of_game() {
                let collection_move = self
                    .board
                    .collect_remaining_seeds(PlayerId::First, PlayerId::Second);
                if !collection_move.is_empty() {
                    self.undo.push_follow_up(&collection_move, mover)?;
                    collection = Some(collection_move);
                }
            }
            result = Some(self.decide_result());
        } else if !extra_turn {
            self.current = mover.opponent();
        }

        tracing::debug!(
            ?mover,
            house,
            extra_turn,
            captured = capture.is_some(),
            finished = result.is_some(),
            "turn played"
        );
        tracing::trace!("board after turn:\n{}", self.board);

        Ok(TurnOutcome {
            sow,
            capture,
            collection,
            extra_turn,
            result,
            next_player: self.current,
        })
    }

    fn decide_result(&self) -> GameResult {
        let first = self.board.store(PlayerId::First).seed_count();
        let second = self.board.store(PlayerId::Second).seed_count();
        GameResult {
            winner: match first.cmp(&second) {
                std::cmp::Ordering::Greater => Some(PlayerId::First),
                std::cmp::Ordering::Less => Some(PlayerId::Second),
                std::cmp::Ordering::Equal => None,
            },
        }
    }

    /// Let the search pick a house for the current player. The player slot
    /// must be configured as a computer; its strength and the board width
    /// select the search depth.
    pub fn select_computer_house(&self) -> KalahaResult<usize> {
        let player = self.player(self.current);
        if player.species() != Species::Computer {
            return Err(KalahaError::NotAComputerPlayer { player: self.current });
        }
        let depth = settings::search_depth(player.strength(), self.config.houses_per_player())?;
        search::compute_computer_move(&self.board, &self.rules, self.current, depth)
    }

    /// Revert the most recent full turn. The reverted player is to move
    /// again; a finished game goes back to running.
    pub fn undo_last_turn(&mut self) -> KalahaResult<UndoOutcome> {
        let (undo_move, player) = self.undo.pop_next()?;
        self.board.apply_move(&undo_move)?;
        self.current = player;
        self.may_move_again = true;
        if self.status == GameStatus::Ended {
            self.status = GameStatus::Running;
        }
        tracing::debug!(?player, "turn undone");
        Ok(UndoOutcome {
            undo_move,
            player_to_move: player,
        })
    }

    /// Pause the game, e.g. before persisting it.
    pub fn interrupt(&mut self) {
        self.status = GameStatus::Interrupted;
    }

    /// Pick an interrupted game back up.
    pub fn resume(&mut self) {
        if self.status == GameStatus::Interrupted {
            self.status = GameStatus::Continued;
        }
    }

    /// Reset board and undo log for a new game with the same players,
    /// rules and configuration.
    pub fn start_new(&mut self) {
        self.board = Board::new(self.config.houses_per_player(), self.config.seeds_per_house());
        self.undo.clear();
        self.current = self.first_player;
        self.may_move_again = true;
        self.status = GameStatus::StartedNew;
    }

    /// Swap who opens the next game. Takes effect on [`Self::start_new`].
    pub fn toggle_first_player(&mut self) {
        self.first_player = self.first_player.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComputerStrength;

    /// Route session tracing into the captured test output. Safe to call
    /// from every test; only the first installation wins.
    fn init_test_logging() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn empty_session(houses: usize) -> GameSession {
        let config = BoardConfig::new(houses, 1).expect("valid config");
        let mut session = GameSession::new(config, Rules::default());
        for house in 0..houses {
            for player in [PlayerId::First, PlayerId::Second] {
                let index = session.board.house_index(player, house).unwrap();
                session.board.pit_mut(index).unwrap().remove_all();
            }
        }
        session
    }

    #[test]
    fn test_extra_turn_keeps_the_mover() {
        init_test_logging();
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        // House 2 with 4 seeds drops the last seed into the own store.
        let outcome = session.play_house(2).expect("legal move");

        assert!(outcome.extra_turn);
        assert_eq!(outcome.next_player, PlayerId::First);
        assert_eq!(session.current_player(), PlayerId::First);
        assert_eq!(session.status(), GameStatus::Running);
        assert!(session.has_undo());
    }

    #[test]
    fn test_plain_turn_hands_over() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        let outcome = session.play_house(0).expect("legal move");

        assert!(!outcome.extra_turn);
        assert!(outcome.capture.is_none());
        assert_eq!(outcome.next_player, PlayerId::Second);
        assert_eq!(session.current_player(), PlayerId::Second);
    }

    #[test]
    fn test_capture_turn() {
        init_test_logging();
        let mut session = empty_session(3);
        session.board.pit_mut(0).unwrap().add_seeds(1);
        session.board.pit_mut(2).unwrap().add_seeds(2);
        session.board.pit_mut(4).unwrap().add_seeds(1);
        session.board.pit_mut(5).unwrap().add_seeds(4); // opposite of house 1
        session.board.pit_mut(6).unwrap().add_seeds(1);

        // The single seed from house 0 lands in the empty house 1 and
        // captures the four seeds opposite.
        let outcome = session.play_house(0).expect("legal move");

        let capture = outcome.capture.expect("capture happened");
        assert_eq!(capture.len(), 2);
        assert_eq!(session.board.store(PlayerId::First).seed_count(), 5);
        assert!(session.board.house(PlayerId::First, 1).unwrap().is_empty());
        assert!(session.board.house(PlayerId::Second, 1).unwrap().is_empty());
        assert_eq!(outcome.next_player, PlayerId::Second);
    }

    #[test]
    fn test_finishing_turn_collects_and_names_the_winner() {
        let mut session = empty_session(3);
        session.board.pit_mut(2).unwrap().add_seeds(1); // last seed of First
        session.board.pit_mut(4).unwrap().add_seeds(2); // Second keeps seeds in play

        let outcome = session.play_house(2).expect("legal move");

        assert_eq!(session.status(), GameStatus::Ended);
        // The last seed went to the store, but an emptied side ends the
        // game before any extra turn.
        assert!(!outcome.extra_turn);
        let collection = outcome.collection.expect("collection rule is on");
        assert_eq!(collection.len(), 1);
        assert_eq!(session.board.store(PlayerId::First).seed_count(), 1);
        assert_eq!(session.board.store(PlayerId::Second).seed_count(), 2);
        assert_eq!(
            outcome.result,
            Some(GameResult {
                winner: Some(PlayerId::Second)
            })
        );
    }

    #[test]
    fn test_draw_when_stores_are_level() {
        let mut session = empty_session(3);
        session.board.pit_mut(2).unwrap().add_seeds(1);
        session.board.pit_mut(7).unwrap().add_seeds(1);

        let outcome = session.play_house(2).expect("legal move");
        assert_eq!(outcome.result, Some(GameResult { winner: None }));
    }

    #[test]
    fn test_undo_restores_the_initial_position() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        let fresh = session.board.clone();

        session.play_house(0).expect("legal move");
        assert_ne!(session.board, fresh);

        let undone = session.undo_last_turn().expect("one entry");
        assert_eq!(session.board, fresh);
        assert_eq!(undone.player_to_move, PlayerId::First);
        assert_eq!(session.current_player(), PlayerId::First);
        assert!(!session.has_undo());
    }

    #[test]
    fn test_undo_reverts_capture_in_the_same_step() {
        let mut session = empty_session(3);
        session.board.pit_mut(0).unwrap().add_seeds(1);
        session.board.pit_mut(2).unwrap().add_seeds(2);
        session.board.pit_mut(5).unwrap().add_seeds(4);
        session.board.pit_mut(6).unwrap().add_seeds(1);
        let before = session.board.clone();

        session.play_house(0).expect("legal move");
        session.undo_last_turn().expect("one entry");
        assert_eq!(session.board, before);
    }

    #[test]
    fn test_undo_reopens_a_finished_game() {
        let mut session = empty_session(3);
        session.board.pit_mut(2).unwrap().add_seeds(1);
        session.board.pit_mut(4).unwrap().add_seeds(2);

        session.play_house(2).expect("legal move");
        assert_eq!(session.status(), GameStatus::Ended);

        session.undo_last_turn().expect("one entry");
        assert_eq!(session.status(), GameStatus::Running);
        assert!(session.board.has_seeds_in_any_house(PlayerId::First));
    }

    #[test]
    fn test_selectability() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        assert!(session.is_selectable_house(0));
        assert!(!session.is_selectable_house(6), "out of range");

        let index = session.board.house_index(PlayerId::First, 3).unwrap();
        session.board.pit_mut(index).unwrap().remove_all();
        assert!(!session.is_selectable_house(3), "empty house");
        assert!(matches!(
            session.play_house(3),
            Err(KalahaError::HouseNotSelectable { house: 3 })
        ));
    }

    #[test]
    fn test_play_on_interrupted_game_fails() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        session.interrupt();
        assert!(matches!(
            session.play_house(0),
            Err(KalahaError::GameNotRunning {
                status: GameStatus::Interrupted
            })
        ));

        session.resume();
        assert_eq!(session.status(), GameStatus::Continued);
        session.play_house(0).expect("resumed game accepts moves");
        assert_eq!(session.status(), GameStatus::Running);
    }

    #[test]
    fn test_computer_selection_needs_a_computer_player() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        assert!(matches!(
            session.select_computer_house(),
            Err(KalahaError::NotAComputerPlayer {
                player: PlayerId::First
            })
        ));

        session
            .player_mut(PlayerId::First)
            .set_species(Species::Computer, ComputerStrength::Easy);
        let house = session.select_computer_house().expect("search finds a move");
        assert!(session.is_selectable_house(house));
    }

    #[test]
    fn test_start_new_resets_board_and_honors_first_player_toggle() {
        let mut session = GameSession::new(BoardConfig::default(), Rules::default());
        session.play_house(0).expect("legal move");
        session.toggle_first_player();

        session.start_new();
        assert_eq!(session.board, Board::new(6, 4));
        assert_eq!(session.status(), GameStatus::StartedNew);
        assert_eq!(session.current_player(), PlayerId::Second);
        assert!(!session.has_undo());
    }
}
