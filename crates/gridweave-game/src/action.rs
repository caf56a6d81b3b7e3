use derive_more::{Display, IsVariant};
use gridweave_core::{Direction, Position};

/// One player input, the whole vocabulary a session consumes.
///
/// The external driver owns the translation from raw input events (keys,
/// pointer) into actions. Sessions ignore actions they have no use for and
/// report that nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor, extend a path, or slide - per the session's rules.
    Move(Direction),
    /// The primary select: activate the cursor cell.
    Select,
    /// The secondary, pointer-driven select: jump the cursor to a cell and
    /// activate it in one step.
    Click(Position),
    /// Undo the most recent state change.
    Undo,
}

/// The win/loss signal queried by the driver after each step.
///
/// Once a session reports `Solved` or `OutOfSteps` the value latches: no
/// further action can change it, and steps become no-ops. The driver decides
/// what the transition means (level advance, life loss, retry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, IsVariant)]
pub enum Outcome {
    /// The puzzle is still being played.
    #[default]
    #[display("in progress")]
    InProgress,
    /// The win condition holds.
    #[display("solved")]
    Solved,
    /// The step budget ran out before the win condition held.
    #[display("out of steps")]
    OutOfSteps,
}

impl Outcome {
    /// Returns `true` once the session has ended, win or lose.
    #[must_use]
    pub fn is_over(self) -> bool {
        !self.is_in_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_terminal_states() {
        assert!(!Outcome::InProgress.is_over());
        assert!(Outcome::Solved.is_over());
        assert!(Outcome::OutOfSteps.is_over());
    }
}
