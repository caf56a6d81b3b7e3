use std::collections::{HashSet, VecDeque};

use gridweave_core::{Direction, Grid, Position, TeleportMap, Tile};
use tinyvec::ArrayVec;

/// Collects the in-bounds, non-wall orthogonal neighbors of `pos`.
fn open_neighbors(grid: &Grid<Tile>, pos: Position) -> ArrayVec<[Position; 4]> {
    let mut out = ArrayVec::new();
    for dir in Direction::ALL {
        if let Some(next) = grid.neighbor(pos, dir)
            && !grid[next].blocks()
        {
            out.push(next);
        }
    }
    out
}

/// Returns every cell reachable from `start` by free walking.
///
/// Edges connect orthogonal in-bounds neighbors that are not walls. The start
/// cell is always included.
#[must_use]
pub fn walk_reachable(grid: &Grid<Tile>, start: Position) -> HashSet<Position> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in open_neighbors(grid, pos) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Returns `true` if `target` is reachable from `start` by free walking.
#[must_use]
pub fn walk_can_reach(grid: &Grid<Tile>, start: Position, target: Position) -> bool {
    walk_reachable(grid, start).contains(&target)
}

/// The cells reachable under the ice-slide movement rule.
///
/// A slide consumes the whole line: the mover keeps stepping in the chosen
/// direction until a wall or the boundary stops it. `rests` holds the cells a
/// slide can end on; `swept` additionally holds every cell passed through
/// mid-slide. A gem is collectible exactly when its cell is in `swept`.
#[derive(Debug, Clone, Default)]
pub struct SlideReach {
    /// Cells a slide can come to rest on (including the start).
    pub rests: HashSet<Position>,
    /// Every cell any reachable slide passes through or rests on.
    pub swept: HashSet<Position>,
}

/// Computes slide reachability from `start`.
///
/// BFS over rest positions; each expansion simulates a full slide in one of
/// the four directions and records the swept line.
#[must_use]
pub fn slide_reachable(grid: &Grid<Tile>, start: Position) -> SlideReach {
    let mut reach = SlideReach {
        rests: HashSet::from([start]),
        swept: HashSet::from([start]),
    };
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for dir in Direction::ALL {
            let mut cur = pos;
            while let Some(next) = grid.neighbor(cur, dir) {
                if grid[next].blocks() {
                    break;
                }
                reach.swept.insert(next);
                cur = next;
            }
            if reach.rests.insert(cur) {
                queue.push_back(cur);
            }
        }
    }
    reach
}

/// Returns `true` if `target` is reachable from `start` by walking through a
/// maze with teleporters.
///
/// Identical to the walk oracle except that arriving on a cell of the
/// teleport map substitutes the paired cell as the effective arrival; both
/// the pre- and post-warp cells are marked visited.
#[must_use]
pub fn teleport_can_reach(
    grid: &Grid<Tile>,
    teleports: &TeleportMap,
    start: Position,
    target: Position,
) -> bool {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if pos == target {
            return true;
        }
        for next in open_neighbors(grid, pos) {
            let arrival = teleports.warp(next).unwrap_or(next);
            if visited.insert(arrival) {
                queue.push_back(arrival);
            }
            // The stepped-on cell itself is spent even when warped away from.
            visited.insert(next);
        }
    }
    false
}

/// Returns `true` if `start` and `end` are connected by a walk confined to
/// `cells`.
///
/// Used by the path-connection win check: each color's two endpoints must be
/// connected through that color's own occupied cells. `start` and `end` are
/// treated as members of the set.
#[must_use]
pub fn path_connected(cells: &HashSet<Position>, start: Position, end: Position) -> bool {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if pos == end {
            return true;
        }
        for dir in Direction::ALL {
            let Some(next) = pos.step(dir) else { continue };
            if (cells.contains(&next) || next == end) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}
