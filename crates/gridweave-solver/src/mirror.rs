use std::collections::{HashSet, VecDeque};

use gridweave_core::{Direction, Position};

/// Joint search node for the two-agent mirror puzzle.
///
/// Holds the positions of the main agent and its mirrored partner. This is a
/// plain value with structural equality and hashing, used only inside the
/// joint BFS; it is not a persistent game entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointState {
    /// Position of the agent that follows the input direction.
    pub main: Position,
    /// Position of the agent that moves opposite to the input.
    pub mirror: Position,
}

impl JointState {
    /// Creates a joint state from the two agent positions.
    #[must_use]
    #[inline]
    pub const fn new(main: Position, mirror: Position) -> Self {
        Self { main, mirror }
    }

    /// Returns `true` if both agents stand on `target`.
    #[must_use]
    #[inline]
    pub fn converged(self, target: Position) -> bool {
        self.main == target && self.mirror == target
    }
}

/// Moves one agent by one step, applying the pinning rule.
///
/// A destination off the board or inside a wall leaves the agent where it is;
/// the turn still advances.
fn pinned_step(
    width: u8,
    height: u8,
    walls: &HashSet<Position>,
    pos: Position,
    direction: Direction,
) -> Position {
    match pos.step(direction) {
        Some(next) if next.x() < width && next.y() < height && !walls.contains(&next) => next,
        _ => pos,
    }
}

/// Advances a joint state by one input: the main agent moves in `direction`,
/// the mirror agent in the opposite direction, each independently pinned by
/// walls and the boundary.
#[must_use]
pub fn mirror_step(
    width: u8,
    height: u8,
    walls: &HashSet<Position>,
    state: JointState,
    direction: Direction,
) -> JointState {
    JointState {
        main: pinned_step(width, height, walls, state.main, direction),
        mirror: pinned_step(width, height, walls, state.mirror, direction.opposite()),
    }
}

/// Returns `true` if some input sequence brings both agents of `start` onto
/// `target` simultaneously.
///
/// Breadth-first search over joint states. The state space is at most
/// `(width * height)^2` nodes, so the search always terminates.
#[must_use]
pub fn mirror_can_converge(
    width: u8,
    height: u8,
    walls: &HashSet<Position>,
    start: JointState,
    target: Position,
) -> bool {
    if start.converged(target) {
        return true;
    }
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(state) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = mirror_step(width, height, walls, state, dir);
            if visited.insert(next) {
                if next.converged(target) {
                    return true;
                }
                queue.push_back(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls(cells: &[(u8, u8)]) -> HashSet<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_pin_rule_moves_only_free_agent() {
        // The main agent sits against the top edge: moving up pins it while
        // the mirror agent (moving down) still advances.
        let state = JointState::new(Position::new(3, 0), Position::new(3, 4));
        let next = mirror_step(8, 8, &HashSet::new(), state, Direction::Up);
        assert_eq!(next.main, Position::new(3, 0));
        assert_eq!(next.mirror, Position::new(3, 5));
    }

    #[test]
    fn test_pin_rule_against_wall() {
        let walls = walls(&[(2, 1)]);
        let state = JointState::new(Position::new(2, 2), Position::new(5, 5));
        let next = mirror_step(8, 8, &walls, state, Direction::Up);
        // Main is pinned by the wall above it; mirror moves down freely.
        assert_eq!(next.main, Position::new(2, 2));
        assert_eq!(next.mirror, Position::new(5, 6));
    }

    #[test]
    fn test_symmetric_start_converges() {
        // Agents symmetric about the target converge by walking straight in.
        let start = JointState::new(Position::new(3, 0), Position::new(3, 6));
        assert!(mirror_can_converge(
            8,
            8,
            &HashSet::new(),
            start,
            Position::new(3, 3)
        ));
    }

    #[test]
    fn test_boundary_pinning_enables_convergence() {
        // An asymmetric pair can still converge by pinning one agent against
        // the board edge until the offset closes.
        let start = JointState::new(Position::new(1, 1), Position::new(4, 4));
        assert!(mirror_can_converge(
            8,
            8,
            &HashSet::new(),
            start,
            Position::new(3, 3)
        ));
    }

    #[test]
    fn test_guided_channel_converges() {
        // Walls forming two vertical channels guide both agents straight
        // onto the target: down, down, down.
        let walls = walls(&[
            (2, 1),
            (4, 1),
            (2, 2),
            (4, 2),
            (2, 4),
            (4, 4),
            (2, 5),
            (4, 5),
        ]);
        let start = JointState::new(Position::new(3, 0), Position::new(3, 6));
        assert!(mirror_can_converge(8, 8, &walls, start, Position::new(3, 3)));
    }

    #[test]
    fn test_sealed_target_is_unreachable() {
        let walls = walls(&[(2, 3), (4, 3), (3, 2), (3, 4)]);
        let start = JointState::new(Position::new(0, 0), Position::new(7, 7));
        assert!(!mirror_can_converge(8, 8, &walls, start, Position::new(3, 3)));
    }
}
