use gridweave_core::{CycleBoard, Direction, Position};
use gridweave_generator::GeneratedCyclePuzzle;
use log::debug;

use crate::{Action, Outcome};

/// An interactive color-cycle session.
///
/// Wraps a generated board with a cursor and an unbounded undo history.
/// Selecting (or clicking) a cell applies one click through the propagation
/// engine; the session is solved when every cell carries the target label.
///
/// # Examples
///
/// ```
/// use gridweave_game::{Action, CycleSession};
/// use gridweave_generator::CycleGenerator;
///
/// let mut session = CycleSession::new(CycleGenerator::for_level(0).generate());
/// assert!(session.outcome().is_in_progress());
/// let changed = session.step(Action::Select);
/// assert!(changed);
/// ```
#[derive(Debug, Clone)]
pub struct CycleSession {
    board: CycleBoard,
    target: u8,
    cursor: Position,
    history: Vec<CycleBoard>,
    outcome: Outcome,
}

impl CycleSession {
    /// Creates a session from a generated puzzle, with the cursor centered.
    #[must_use]
    pub fn new(puzzle: GeneratedCyclePuzzle) -> Self {
        let GeneratedCyclePuzzle { board, target, .. } = puzzle;
        let cursor = Position::new(board.grid().width() / 2, board.grid().height() / 2);
        Self {
            board,
            target,
            cursor,
            history: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Processes one action; returns whether any state changed.
    pub fn step(&mut self, action: Action) -> bool {
        if self.outcome.is_over() {
            return false;
        }
        match action {
            Action::Move(direction) => self.move_cursor(direction),
            Action::Select => self.activate(self.cursor),
            Action::Click(pos) => {
                if self.board.grid().contains(pos) {
                    self.cursor = pos;
                    self.activate(pos)
                } else {
                    false
                }
            }
            Action::Undo => self.undo(),
        }
    }

    /// Clamped cursor movement; never wraps or leaves the board.
    fn move_cursor(&mut self, direction: Direction) -> bool {
        match self.board.grid().neighbor(self.cursor, direction) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    fn activate(&mut self, pos: Position) -> bool {
        self.history.push(self.board.clone());
        self.board = self.board.apply_click(pos);
        if self.board.is_uniform(self.target) {
            debug!("cycle board solved after {} clicks", self.history.len());
            self.outcome = Outcome::Solved;
        }
        true
    }

    /// Restores the board to before the last click. Undo never re-triggers
    /// the win check.
    fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.board = previous;
                true
            }
            None => false,
        }
    }

    /// Returns the current board for rendering.
    #[must_use]
    pub fn board(&self) -> &CycleBoard {
        &self.board
    }

    /// Returns the target palette index.
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the number of clicks applied so far.
    #[must_use]
    pub fn clicks(&self) -> usize {
        self.history.len()
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}
