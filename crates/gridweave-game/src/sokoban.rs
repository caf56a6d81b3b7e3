use std::collections::HashSet;

use gridweave_core::{Direction, Position};
use gridweave_generator::SokobanPuzzle;
use log::debug;

use crate::{Action, Outcome};

/// Undo record: player position, block layout, and remaining budget.
type PushSnapshot = (Position, Vec<Position>, u32);

/// An interactive block-push session.
///
/// Walking into a block pushes it one cell, provided the cell beyond is open.
/// The session is solved when every target cell carries a block.
///
/// Each level grants three lives against the step budget: running the budget
/// dry costs a life and restores the level to its initial layout; losing the
/// last life ends the session with [`Outcome::OutOfSteps`].
#[derive(Debug, Clone)]
pub struct SokobanSession {
    width: u8,
    height: u8,
    walls: HashSet<Position>,
    blocks: Vec<Position>,
    targets: Vec<Position>,
    player: Position,
    initial_player: Position,
    initial_blocks: Vec<Position>,
    steps_left: u32,
    max_steps: u32,
    lives: u8,
    history: Vec<PushSnapshot>,
    outcome: Outcome,
}

impl SokobanSession {
    /// Number of lives granted per level.
    pub const LIVES: u8 = 3;

    /// Creates a session from a generated puzzle.
    #[must_use]
    pub fn new(puzzle: SokobanPuzzle) -> Self {
        let SokobanPuzzle {
            width,
            height,
            walls,
            blocks,
            targets,
            start,
            max_steps,
            ..
        } = puzzle;
        Self {
            width,
            height,
            walls,
            initial_blocks: blocks.clone(),
            blocks,
            targets,
            player: start,
            initial_player: start,
            steps_left: max_steps,
            max_steps,
            lives: Self::LIVES,
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
            Action::Move(direction) => self.walk(direction),
            Action::Undo => match self.history.pop() {
                Some((player, blocks, steps_left)) => {
                    self.player = player;
                    self.blocks = blocks;
                    self.steps_left = steps_left;
                    true
                }
                None => false,
            },
            Action::Select | Action::Click(_) => false,
        }
    }

    fn walk(&mut self, direction: Direction) -> bool {
        let Some(next) = self.step_cell(self.player, direction) else {
            return false;
        };
        let snapshot = (self.player, self.blocks.clone(), self.steps_left);

        if let Some(block_index) = self.block_at(next) {
            // Push: the cell beyond must be open floor.
            let Some(beyond) = self.step_cell(next, direction) else {
                return false;
            };
            if self.block_at(beyond).is_some() {
                return false;
            }
            self.blocks[block_index] = beyond;
        }
        self.player = next;
        self.history.push(snapshot);

        if self.is_won() {
            debug!("all targets covered");
            self.outcome = Outcome::Solved;
            return true;
        }
        self.tick_budget();
        true
    }

    /// Returns the in-bounds, non-wall cell one step from `from`.
    fn step_cell(&self, from: Position, direction: Direction) -> Option<Position> {
        from.step(direction)
            .filter(|pos| pos.x() < self.width && pos.y() < self.height)
            .filter(|pos| !self.walls.contains(pos))
    }

    fn block_at(&self, pos: Position) -> Option<usize> {
        self.blocks.iter().position(|&block| block == pos)
    }

    fn is_won(&self) -> bool {
        !self.targets.is_empty()
            && self
                .targets
                .iter()
                .all(|target| self.block_at(*target).is_some())
    }

    /// Burns one step; an empty budget costs a life and resets the level.
    fn tick_budget(&mut self) {
        self.steps_left = self.steps_left.saturating_sub(1);
        if self.steps_left > 0 {
            return;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.outcome = Outcome::OutOfSteps;
            return;
        }
        debug!("step budget spent; {} lives remain", self.lives);
        self.player = self.initial_player;
        self.blocks = self.initial_blocks.clone();
        self.steps_left = self.max_steps;
        self.history.clear();
    }

    /// Returns the wall set for rendering.
    #[must_use]
    pub fn walls(&self) -> &HashSet<Position> {
        &self.walls
    }

    /// Returns the current block positions.
    #[must_use]
    pub fn blocks(&self) -> &[Position] {
        &self.blocks
    }

    /// Returns the target cells.
    #[must_use]
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// Returns the player position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns the remaining step budget for the current life.
    #[must_use]
    pub const fn steps_left(&self) -> u32 {
        self.steps_left
    }

    /// Returns the remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u8 {
        self.lives
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}
