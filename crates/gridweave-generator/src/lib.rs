//! Procedural puzzle generation for Gridweave.
//!
//! Every generator in this crate follows the same discipline: build a
//! candidate instance, prove it solvable, and only then hand it out. The
//! proof differs per puzzle family:
//!
//! - [`CycleGenerator`] scrambles a solved board with a
//!   [`ScrambleStrategy`], constructs the undo solution, and replays it
//!   through the verifier; small boards additionally get an exhaustive
//!   search for a shorter solution.
//! - [`GemMazeGenerator`] and [`SlideGenerator`] only place gems on cells the
//!   walk or slide reachability oracle reports reachable from the start.
//! - [`TeleportMazeGenerator`] regenerates the whole layout until the exit is
//!   reachable through walls and teleporters.
//! - [`MirrorGenerator`] serves hand-authored puzzles from
//!   [`mirror_library`], each validated once by the joint-state BFS.
//! - [`path_level`] serves the hand-authored path-connection layouts, bounds-
//!   and consistency-checked on the same validation path.
//! - [`SokobanGenerator`] places each block with a verified clear straight
//!   push path to its target.
//!
//! Retry loops are bounded. When a budget is exhausted the generator logs a
//! warning and degrades to a deterministic, trivially solvable fallback
//! instead of failing; generation therefore always terminates and never
//! returns an unsolvable instance.
//!
//! All randomness flows from a [`PuzzleSeed`], so any generated instance can
//! be reproduced from its seed.

pub use self::{
    cycle::*, level::*, maze::*, mirror::*, path::*, scramble::*, seed::*, sokoban::*,
};

mod cycle;
mod level;
mod maze;
mod mirror;
mod path;
mod scramble;
mod seed;
mod sokoban;
