//! Moves as ordered lists of seed movements
//!
//! Board operations describe their effect as a [`Move`]: an ordered list of
//! atomic [`SeedMovement`]s. External renderers animate these; the undo log
//! inverts them. Two invariants make both uses work:
//!
//! - replaying a move's seed movements in order against the board state the
//!   move was produced on reproduces exactly the mutation that produced it;
//! - applying the [`Move::backward`] move from the resulting state restores
//!   the prior state.

use std::fmt;

/// An atomic transfer of seeds from one pit to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedMovement {
    /// Raw board index the seeds come from.
    pub from: usize,
    /// Raw board index the seeds go to.
    pub to: usize,
    /// Number of seeds moved.
    pub count: u32,
}

impl SeedMovement {
    #[inline]
    pub fn new(from: usize, to: usize, count: u32) -> Self {
        SeedMovement { from, to, count }
    }

    /// The same transfer in the opposite direction.
    #[inline]
    pub fn reversed(&self) -> SeedMovement {
        SeedMovement {
            from: self.to,
            to: self.from,
            count: self.count,
        }
    }
}

impl fmt::Display for SeedMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {}: {} seed{}",
            self.from,
            self.to,
            self.count,
            if self.count == 1 { "" } else { "s" }
        )
    }
}

/// One logical player action (a sow, a capture, or a final collection)
/// described as an ordered list of seed movements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Move {
    movements: Vec<SeedMovement>,
}

impl Move {
    pub fn new() -> Self {
        Move::default()
    }

    /// Append a seed movement at the end of the list.
    pub fn push(&mut self, movement: SeedMovement) {
        self.movements.push(movement);
    }

    pub fn movements(&self) -> &[SeedMovement] {
        &self.movements
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// The inverse move: every seed movement reversed, list order reversed.
    ///
    /// Applying `self` and then `self.backward()` leaves every pit at its
    /// original seed count.
    pub fn backward(&self) -> Move {
        Move {
            movements: self
                .movements
                .iter()
                .rev()
                .map(SeedMovement::reversed)
                .collect(),
        }
    }

    /// Prepend the movements of `other`, preserving their order.
    ///
    /// Used by the undo log to merge a follow-up move (capture, final
    /// collection) into the entry of the sow that triggered it, so that one
    /// undo step reverts one full logical turn.
    pub fn merge_front(&mut self, other: Move) {
        let mut combined = other.movements;
        combined.append(&mut self.movements);
        self.movements = combined;
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Move:")?;
        for movement in &self.movements {
            writeln!(f, "  {movement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_reverses_order_and_direction() {
        let mut mv = Move::new();
        mv.push(SeedMovement::new(2, 3, 1));
        mv.push(SeedMovement::new(2, 4, 1));
        mv.push(SeedMovement::new(11, 6, 5));

        let back = mv.backward();
        assert_eq!(
            back.movements(),
            &[
                SeedMovement::new(6, 11, 5),
                SeedMovement::new(4, 2, 1),
                SeedMovement::new(3, 2, 1),
            ]
        );
    }

    #[test]
    fn test_backward_of_backward_is_identity() {
        let mut mv = Move::new();
        mv.push(SeedMovement::new(0, 1, 2));
        mv.push(SeedMovement::new(1, 2, 3));
        assert_eq!(mv.backward().backward(), mv);
    }

    #[test]
    fn test_merge_front_preserves_both_orders() {
        let mut sow_back = Move::new();
        sow_back.push(SeedMovement::new(3, 2, 1));
        sow_back.push(SeedMovement::new(4, 2, 1));

        let mut capture_back = Move::new();
        capture_back.push(SeedMovement::new(6, 3, 1));
        capture_back.push(SeedMovement::new(6, 11, 4));

        sow_back.merge_front(capture_back);
        assert_eq!(
            sow_back.movements(),
            &[
                SeedMovement::new(6, 3, 1),
                SeedMovement::new(6, 11, 4),
                SeedMovement::new(3, 2, 1),
                SeedMovement::new(4, 2, 1),
            ],
            "follow-up movements must come first, each list keeping its order"
        );
    }

    #[test]
    fn test_empty_move() {
        let mv = Move::new();
        assert!(mv.is_empty());
        assert_eq!(mv.len(), 0);
        assert!(mv.backward().is_empty());
    }
}
