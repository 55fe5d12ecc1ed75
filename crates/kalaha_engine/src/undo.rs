//! Undo log
//!
//! The log keeps one entry per logical turn: the backward move that
//! reverts it, paired with the player who was to move before the turn.
//! Follow-up effects of a sow (a capture, the end-of-game collection) are
//! merged into the sow's entry, so a single pop always reverts one full
//! turn, never half of one.

use crate::error::{KalahaError, KalahaResult};
use crate::moves::Move;
use crate::types::PlayerId;

/// Stack of undoable turns, newest on top.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: Vec<(Move, PlayerId)>,
}

impl UndoLog {
    pub fn new() -> Self {
        UndoLog::default()
    }

    /// Record a turn: the forward move is inverted and pushed together
    /// with the player who made it.
    pub fn push_normal(&mut self, forward: &Move, player: PlayerId) {
        self.entries.push((forward.backward(), player));
    }

    /// Merge a follow-up move (capture or final collection) into the top
    /// entry. The follow-up's inverse is prepended, so that popping the
    /// entry reverts the follow-up before the sow it belongs to.
    ///
    /// Fails if the log is empty or the top entry belongs to a different
    /// player; either means the caller recorded the turn out of order.
    pub fn push_follow_up(&mut self, forward: &Move, player: PlayerId) -> KalahaResult<()> {
        match self.entries.last_mut() {
            Some((backward, owner)) if *owner == player => {
                backward.merge_front(forward.backward());
                Ok(())
            }
            Some(_) | None => Err(KalahaError::FollowUpWithoutPriorMove { player }),
        }
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the newest entry: the backward move and the player whose turn
    /// it reverts to.
    pub fn pop_next(&mut self) -> KalahaResult<(Move, PlayerId)> {
        self.entries.pop().ok_or(KalahaError::UndoLogEmpty)
    }

    /// Drop all entries, e.g. when a new game starts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::SeedMovement;

    fn sample_move(movements: &[(usize, usize, u32)]) -> Move {
        let mut mv = Move::new();
        for &(from, to, count) in movements {
            mv.push(SeedMovement::new(from, to, count));
        }
        mv
    }

    #[test]
    fn test_push_and_pop_inverts_the_move() {
        let mut log = UndoLog::new();
        let forward = sample_move(&[(2, 3, 1), (2, 4, 1)]);
        log.push_normal(&forward, PlayerId::First);

        let (backward, player) = log.pop_next().expect("one entry");
        assert_eq!(player, PlayerId::First);
        assert_eq!(backward, forward.backward());
        assert!(!log.has_entries());
    }

    #[test]
    fn test_follow_up_merges_into_single_entry() {
        let mut log = UndoLog::new();
        let sow = sample_move(&[(0, 1, 1), (0, 2, 1)]);
        let capture = sample_move(&[(11, 6, 4), (2, 6, 1)]);

        log.push_normal(&sow, PlayerId::First);
        log.push_follow_up(&capture, PlayerId::First).expect("top entry matches");
        assert_eq!(log.len(), 1, "follow-up must not create a second entry");

        let (backward, _) = log.pop_next().unwrap();
        // Capture is undone first, then the sow, each in reverse order.
        assert_eq!(
            backward.movements(),
            &[
                SeedMovement::new(6, 2, 1),
                SeedMovement::new(6, 11, 4),
                SeedMovement::new(2, 0, 1),
                SeedMovement::new(1, 0, 1),
            ]
        );
    }

    #[test]
    fn test_follow_up_on_empty_log_fails() {
        let mut log = UndoLog::new();
        let err = log
            .push_follow_up(&sample_move(&[(0, 6, 1)]), PlayerId::First)
            .unwrap_err();
        assert!(matches!(
            err,
            KalahaError::FollowUpWithoutPriorMove {
                player: PlayerId::First
            }
        ));
    }

    #[test]
    fn test_follow_up_for_wrong_player_fails() {
        let mut log = UndoLog::new();
        log.push_normal(&sample_move(&[(0, 1, 1)]), PlayerId::First);
        assert!(log
            .push_follow_up(&sample_move(&[(7, 13, 1)]), PlayerId::Second)
            .is_err());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_pop_from_empty_log_fails() {
        let mut log = UndoLog::new();
        assert!(matches!(log.pop_next(), Err(KalahaError::UndoLogEmpty)));
    }

    #[test]
    fn test_clear() {
        let mut log = UndoLog::new();
        log.push_normal(&sample_move(&[(0, 1, 1)]), PlayerId::First);
        log.push_normal(&sample_move(&[(7, 8, 1)]), PlayerId::Second);
        log.clear();
        assert!(log.is_empty());
    }
}
