use std::collections::HashSet;

use gridweave_core::Position;
use gridweave_generator::MirrorPuzzle;
use gridweave_solver::{JointState, mirror_step};
use log::debug;

use crate::{Action, Outcome};

/// An interactive mirror-walk session.
///
/// Every directional input moves the main agent in that direction and the
/// mirror agent in the opposite direction. An agent whose destination is a
/// wall or off the board is pinned - it stays put while the other still
/// moves; the turn always advances. The session is solved when both agents
/// stand on the target simultaneously.
#[derive(Debug, Clone)]
pub struct MirrorSession {
    width: u8,
    height: u8,
    walls: HashSet<Position>,
    agents: JointState,
    target: Position,
    history: Vec<JointState>,
    outcome: Outcome,
}

impl MirrorSession {
    /// Creates a session from a library puzzle.
    #[must_use]
    pub fn new(puzzle: MirrorPuzzle) -> Self {
        let MirrorPuzzle {
            width,
            height,
            walls,
            start,
            target,
        } = puzzle;
        Self {
            width,
            height,
            walls,
            agents: start,
            target,
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
            Action::Move(direction) => {
                let next = mirror_step(self.width, self.height, &self.walls, self.agents, direction);
                if next == self.agents {
                    // Both agents pinned at once; nothing changed.
                    return false;
                }
                self.history.push(self.agents);
                self.agents = next;
                if self.agents.converged(self.target) {
                    debug!("mirror agents converged on {}", self.target);
                    self.outcome = Outcome::Solved;
                }
                true
            }
            Action::Undo => match self.history.pop() {
                Some(previous) => {
                    self.agents = previous;
                    true
                }
                None => false,
            },
            Action::Select | Action::Click(_) => false,
        }
    }

    /// Returns the wall set for rendering.
    #[must_use]
    pub fn walls(&self) -> &HashSet<Position> {
        &self.walls
    }

    /// Returns the current joint agent state.
    #[must_use]
    pub const fn agents(&self) -> JointState {
        self.agents
    }

    /// Returns the target cell.
    #[must_use]
    pub const fn target(&self) -> Position {
        self.target
    }

    /// Returns the board width in cells.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the board height in cells.
    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}
