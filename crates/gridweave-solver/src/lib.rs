//! BFS reachability oracles and solution verification for Gridweave puzzles.
//!
//! Every puzzle family relies on one of a small set of breadth-first searches,
//! differing only in the edge-expansion rule:
//!
//! - [`walk_reachable`] / [`walk_can_reach`] - free walking between orthogonal
//!   non-wall neighbors
//! - [`slide_reachable`] - ice sliding: one move consumes a whole line until a
//!   wall or the boundary, and everything swept over counts as visited
//! - [`teleport_can_reach`] - walking where arriving on a teleporter cell
//!   substitutes arrival at its paired cell
//! - [`mirror_can_converge`] - joint two-agent search over [`JointState`]
//!   nodes, with the pinning rule for blocked agents
//! - [`path_connected`] - connectivity of one color's drawn path in the
//!   path-connection puzzle
//!
//! Generators call these oracles to prove that every game-critical placement
//! (gem, exit, target) is reachable before an instance is accepted; game
//! sessions call them to answer win-condition queries.
//!
//! For the color-cycle puzzle, [`verify_solution`] replays a candidate
//! solution through the click-propagation engine, and [`shortest_solution`]
//! runs a bounded-depth exhaustive search over the full configuration space
//! of small boards.

pub use self::{cycle::*, mirror::*, reachability::*};

mod cycle;
mod mirror;
mod reachability;
