//! # Kalaha Engine
//!
//! A rules engine for Kalaha (Mancala) with configurable variants, an
//! invertible move log and a minimax computer opponent.
//!
//! ## Architecture
//!
//! - [`board`] - pit layout, sowing, captures, final collection
//! - [`rules`] - the variant knobs and the capture decision
//! - [`moves`]/[`undo`] - moves as invertible seed-movement lists and the
//!   per-turn undo log
//! - [`search`] - depth-limited minimax for the computer opponent
//! - [`session`] - the orchestration layer callers talk to
//! - [`settings`] - board sizing and the strength/depth table
//!
//! The engine is UI-free: a frontend drives it through
//! [`GameSession`] and renders the [`Move`] lists it gets back.
//!
//! ## Example
//!
//! ```
//! use kalaha_engine::{BoardConfig, GameSession, Rules};
//!
//! let mut session = GameSession::new(BoardConfig::default(), Rules::default());
//! let outcome = session.play_house(2)?;
//! assert!(outcome.extra_turn);
//! # Ok::<(), kalaha_engine::KalahaError>(())
//! ```

pub mod board;
pub mod error;
pub mod moves;
pub mod pit;
pub mod rules;
pub mod search;
pub mod session;
pub mod settings;
pub mod types;
pub mod undo;

pub use board::{Board, SowOutcome};
pub use error::{KalahaError, KalahaResult};
pub use moves::{Move, SeedMovement};
pub use pit::Pit;
pub use rules::{CaptureDecision, CaptureType, Rules, SowingDirection};
pub use search::{compute_computer_move, compute_computer_move_with_rng};
pub use session::{GameResult, GameSession, TurnOutcome, UndoOutcome};
pub use settings::{search_depth, BoardConfig};
pub use types::{ComputerStrength, GameStatus, Player, PlayerId, Side, Species};
pub use undo::UndoLog;
