use std::collections::{HashSet, VecDeque};

use gridweave_core::{CycleBoard, Position};

/// Upper bound on `cells * palette` for which the exhaustive solver is worth
/// running. Above this, the configuration space is too large to search and
/// the reverse-scramble solution is kept as-is.
pub const EXHAUSTIVE_STATE_BOUND: usize = 32;

/// Maximum search depth (clicks) for [`shortest_solution`].
pub const EXHAUSTIVE_DEPTH: usize = 8;

/// Replays `solution` against `board` and reports whether it reaches the
/// uniform `target` configuration.
///
/// Every constructed solution must pass through here before an instance is
/// accepted; a reverse-scramble solution is never trusted without replay.
///
/// # Examples
///
/// ```
/// use gridweave_core::{CycleBoard, Position};
/// use gridweave_solver::verify_solution;
///
/// let scrambled = CycleBoard::uniform(3, 3, 2, 1).apply_click(Position::new(1, 1));
/// // For a two-color cycle, one repeat click undoes the scramble click.
/// assert!(verify_solution(&scrambled, &[Position::new(1, 1)], 1));
/// assert!(!verify_solution(&scrambled, &[], 1));
/// ```
#[must_use]
pub fn verify_solution(board: &CycleBoard, solution: &[Position], target: u8) -> bool {
    let mut replay = board.clone();
    for &click in solution {
        replay = replay.apply_click(click);
    }
    replay.is_uniform(target)
}

/// Returns `true` if `board` is small enough for [`shortest_solution`].
#[must_use]
pub fn fits_exhaustive_search(board: &CycleBoard) -> bool {
    board.grid().cell_count() * usize::from(board.palette()) <= EXHAUSTIVE_STATE_BOUND
}

/// Searches the full configuration space for a shortest solution of at most
/// `max_depth` clicks.
///
/// Plain breadth-first search over whole board states, so the first solution
/// found is a shortest one. States at `max_depth` are not expanded further;
/// the search returns `None` rather than growing without bound when no
/// solution exists within the depth limit.
///
/// Only sensible for boards where [`fits_exhaustive_search`] holds; callers
/// replace their constructed solution when the returned one is strictly
/// shorter.
#[must_use]
pub fn shortest_solution(
    board: &CycleBoard,
    target: u8,
    max_depth: usize,
) -> Option<Vec<Position>> {
    if board.is_uniform(target) {
        return Some(Vec::new());
    }

    let mut visited = HashSet::from([board.clone()]);
    let mut queue = VecDeque::from([(board.clone(), Vec::new())]);

    while let Some((state, clicks)) = queue.pop_front() {
        if clicks.len() >= max_depth {
            continue;
        }
        for pos in state.grid().positions() {
            let next = state.apply_click(pos);
            let mut next_clicks = clicks.clone();
            next_clicks.push(pos);
            if next.is_uniform(target) {
                return Some(next_clicks);
            }
            if visited.insert(next.clone()) {
                queue.push_back((next, next_clicks));
            }
        }
    }
    None
}
