//! Rule configuration
//!
//! [`Rules`] is a plain configuration value passed by reference into the
//! board, the search and the session. There is no process-wide rules
//! singleton: parallel sessions and tests each carry their own instance.
//!
//! The only rule logic that lives here is [`Rules::decide_capture`], the
//! pure decision function for the capture variants.

use serde::{Deserialize, Serialize};

/// Direction seeds are sown in.
///
/// `CrossKalah` is a variant invented by W. Dan Troyka in 2001: a house
/// with an odd number of seeds is sown clockwise, one with an even number
/// counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SowingDirection {
    Counterclockwise,
    Clockwise,
    CrossKalah,
}

/// How a capture move is performed when the last sown seed lands in an
/// empty house of the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureType {
    /// Capture own seed and the opposite house, but only if the opposite
    /// house holds seeds.
    Standard,
    /// Capture only the own seed, regardless of the opposite house.
    Empty,
    /// Never capture.
    Never,
    /// Always capture the own seed; take the opposite house too when it
    /// holds seeds.
    Always,
}

/// Outcome of a capture decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDecision {
    /// The capture move may be executed at all.
    pub may_capture: bool,
    /// The opposite house is captured along with the own seed.
    pub capture_opponent_house: bool,
}

/// The configurable rule set of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    direction_of_sowing: SowingDirection,
    capture_type: CaptureType,
    collect_seeds_at_end_of_game: bool,
    play_again_when_last_seed_in_own_store: bool,
    pie_rule_enabled: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            direction_of_sowing: SowingDirection::Counterclockwise,
            capture_type: CaptureType::Standard,
            collect_seeds_at_end_of_game: true,
            play_again_when_last_seed_in_own_store: true,
            pie_rule_enabled: false,
        }
    }
}

impl Rules {
    /// Reset every rule to its default.
    pub fn set_defaults(&mut self) {
        *self = Rules::default();
    }

    #[inline]
    pub fn direction_of_sowing(&self) -> SowingDirection {
        self.direction_of_sowing
    }

    pub fn set_direction_of_sowing(&mut self, direction: SowingDirection) {
        self.direction_of_sowing = direction;
    }

    #[inline]
    pub fn capture_type(&self) -> CaptureType {
        self.capture_type
    }

    pub fn set_capture_type(&mut self, capture_type: CaptureType) {
        self.capture_type = capture_type;
    }

    /// Whether the seeds left in the houses move to their owner's store
    /// when the game ends.
    #[inline]
    pub fn collect_seeds_at_end_of_game(&self) -> bool {
        self.collect_seeds_at_end_of_game
    }

    pub fn set_collect_seeds_at_end_of_game(&mut self, enabled: bool) {
        self.collect_seeds_at_end_of_game = enabled;
    }

    /// Whether a player moves again when their last seed lands in their
    /// own store.
    #[inline]
    pub fn play_again_when_last_seed_in_own_store(&self) -> bool {
        self.play_again_when_last_seed_in_own_store
    }

    pub fn set_play_again_when_last_seed_in_own_store(&mut self, enabled: bool) {
        self.play_again_when_last_seed_in_own_store = enabled;
    }

    /// The pie rule is stored and serialized for external collaborators;
    /// the engine itself does not act on it.
    #[inline]
    pub fn pie_rule_enabled(&self) -> bool {
        self.pie_rule_enabled
    }

    pub fn set_pie_rule_enabled(&mut self, enabled: bool) {
        self.pie_rule_enabled = enabled;
    }

    /// Decide whether a capture may happen, given the seed count of the
    /// opponent's house opposite the landing house.
    pub fn decide_capture(&self, opponent_house_count: u32) -> CaptureDecision {
        match self.capture_type {
            CaptureType::Standard => CaptureDecision {
                may_capture: opponent_house_count > 0,
                capture_opponent_house: opponent_house_count > 0,
            },
            CaptureType::Empty => CaptureDecision {
                may_capture: true,
                capture_opponent_house: false,
            },
            CaptureType::Never => CaptureDecision {
                may_capture: false,
                capture_opponent_house: false,
            },
            CaptureType::Always => CaptureDecision {
                may_capture: true,
                capture_opponent_house: opponent_house_count > 0,
            },
        }
    }
}
