//! # Kalaha Engine Core Types - Players and Game Status
//!
//! ## Overview
//!
//! This module defines the identity types shared by the board, the search
//! and the game session. The engine knows exactly two players; everything
//! that addresses a player does so through [`PlayerId`], a two-variant enum
//! that doubles as the index into the board's two pit ranges and into the
//! session's two [`Player`] slots.
//!
//! ## Why a two-slot registry instead of a counter?
//!
//! The session owns a `[Player; 2]` array and hands out `PlayerId`s. That
//! makes the "at most two live players" invariant a property of the type
//! system: there is no global instance counter to reset between games and
//! no way to construct a third live slot.
//!
//! ## Persistence surface
//!
//! [`Player`], [`Species`], [`ComputerStrength`] and [`Side`] derive
//! `Serialize`/`Deserialize` so an external persistence layer can snapshot
//! and restore a session's configuration. The engine itself performs no
//! I/O; it only exposes the getters and setters.

use serde::{Deserialize, Serialize};

/// Identity of one of the two players.
///
/// `First` owns board indices `[0, houses_per_player]` (houses plus store),
/// `Second` owns the upper half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    First = 0,
    Second = 1,
}

impl PlayerId {
    /// Index into per-player arrays (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The other player.
    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

/// Whether a player is controlled by a human or by the engine's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Human,
    Computer,
}

/// Playing strength of a computer player. Maps to a search depth via
/// [`crate::settings::search_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputerStrength {
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

/// Board orientation of a player. Used only by external renderers; the
/// engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    South,
    North,
}

/// Lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The game finished; one player has only empty houses.
    Ended,
    /// A fresh game, no move made yet.
    StartedNew,
    /// An interrupted game that has been picked up again.
    Continued,
    /// Moves are being played.
    Running,
    /// The game was abandoned mid-way.
    Interrupted,
}

/// One of the two participants of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    side: Side,
    species: Species,
    strength: ComputerStrength,
    name: String,
}

impl Player {
    /// Create a human player with a default name derived from the id.
    pub fn new(id: PlayerId, side: Side) -> Self {
        Player {
            id,
            side,
            species: Species::Human,
            strength: ComputerStrength::Medium,
            name: format!("Player {}", id.index() + 1),
        }
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Set the species; the strength parameter only matters for computer
    /// players and is kept at its previous value for humans.
    pub fn set_species(&mut self, species: Species, strength: ComputerStrength) {
        self.species = species;
        if species == Species::Computer {
            self.strength = strength;
        }
    }

    #[inline]
    pub fn strength(&self) -> ComputerStrength {
        self.strength
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
