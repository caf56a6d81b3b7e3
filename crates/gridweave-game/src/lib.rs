//! Interactive game sessions for Gridweave puzzles.
//!
//! Each puzzle family has a session type wrapping a generated instance with
//! the state an external game-loop driver needs: a cursor, undo history, a
//! step budget where the puzzle has one, and a win/loss [`Outcome`].
//!
//! Sessions share one contract:
//!
//! - [`Action`] is the whole input vocabulary. The driver translates raw
//!   input events into actions and calls `step(action)`, which returns
//!   whether any state changed. Invalid moves (off the board, into a wall,
//!   re-entering a path) are silent no-ops, never errors.
//! - After each step the driver queries [`Outcome`]; once a session leaves
//!   `InProgress` it latches and further actions are ignored. Level
//!   advancement, lives, and scorekeeping belong to the driver.
//! - Rendering reads the session's snapshot accessors (board, cursor,
//!   overlay state); color-to-pixel mapping is entirely the renderer's
//!   concern.
//!
//! Sessions own their instance exclusively and are purely synchronous;
//! discarding a session is the whole cleanup story.

pub use self::{
    action::*, cycle::*, maze::*, mirror::*, path::*, sokoban::*,
};

mod action;
mod cycle;
mod maze;
mod mirror;
mod path;
mod sokoban;
