//! Error types for the Kalaha engine
//!
//! Provides custom error types for board operations, the undo log, the
//! search and the game session. All variants signal contract violations or
//! impossible game states: they indicate a caller bug and are never used
//! for ordinary user input (an empty house selected by the user is handled
//! by [`crate::session::GameSession::is_selectable_house`], not an error).

use crate::types::{GameStatus, PlayerId};
use thiserror::Error;

/// Errors that can occur in the Kalaha engine
#[derive(Error, Debug)]
pub enum KalahaError {
    /// House index outside `[0, houses_per_player)`
    #[error("house index {index} out of range (houses per player: {houses})")]
    HouseIndexOutOfRange { index: usize, houses: usize },

    /// Raw pit index outside the board
    #[error("pit index {index} out of range (board has {pits} pits)")]
    PitIndexOutOfRange { index: usize, pits: usize },

    /// Tried to remove a seed from an empty pit
    #[error("cannot remove a seed from an empty pit")]
    EmptyPit,

    /// Tried to remove more seeds than the pit holds
    #[error("cannot remove {requested} seeds from a pit holding {available}")]
    NotEnoughSeeds { requested: u32, available: u32 },

    /// Popped an undo move from an empty log
    #[error("undo log is empty")]
    UndoLogEmpty,

    /// Follow-up move recorded without a matching prior entry
    #[error("follow-up move for {player:?} does not match the last undo entry")]
    FollowUpWithoutPriorMove { player: PlayerId },

    /// A move was requested for a house the current player may not play
    #[error("house {house} is not selectable for the current player")]
    HouseNotSelectable { house: usize },

    /// A move was requested while the session is not accepting moves
    #[error("game is not running (status: {status:?})")]
    GameNotRunning { status: GameStatus },

    /// A computer move was requested for a human player
    #[error("{player:?} is not a computer player")]
    NotAComputerPlayer { player: PlayerId },

    /// The search found no playable house
    #[error("no playable house found for {player:?}")]
    NoMovePossible { player: PlayerId },

    /// Board size outside the supported range
    #[error("unsupported number of houses per player: {houses} (supported: 3-7)")]
    UnsupportedHouseCount { houses: usize },

    /// Initial seed count of zero
    #[error("seeds per house must be at least 1")]
    InvalidSeedCount,
}

/// Result type alias for Kalaha engine operations
pub type KalahaResult<T> = Result<T, KalahaError>;
