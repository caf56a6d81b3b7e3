//! Core data structures for the Gridweave puzzle engine.
//!
//! This crate provides the board model shared by every puzzle family:
//!
//! - [`Position`] and [`Direction`] - board coordinates and the four
//!   orthogonal movement directions
//! - [`Grid`] - a rectangular, row-major board of cell labels, generic over
//!   the label type
//! - [`CycleBoard`] - the color-cycle puzzle board, including the
//!   click-propagation rule (clicking a cell advances it and its four
//!   orthogonal neighbors one step through the color cycle)
//! - [`Tile`] and [`TeleportMap`] - the cell alphabet and teleporter pairing
//!   used by the maze-family puzzles
//!
//! Boards are plain values: they implement structural equality and hashing so
//! that search routines can use whole board states as search nodes, and the
//! click-propagation engine returns a *new* board rather than mutating its
//! input, so a rejected generation candidate can be discarded without
//! corrupting other attempts.
//!
//! # Examples
//!
//! ```
//! use gridweave_core::{CycleBoard, Position};
//!
//! // A solved 3x3 two-color board, then one click in the middle.
//! let solved = CycleBoard::uniform(3, 3, 2, 1);
//! let clicked = solved.apply_click(Position::new(1, 1));
//!
//! assert!(solved.is_uniform(1)); // the input board is untouched
//! assert!(!clicked.is_uniform(1));
//! ```

pub use self::{cycle::*, grid::*, position::*, tile::*};

mod cycle;
mod grid;
mod position;
mod tile;
