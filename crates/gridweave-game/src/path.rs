use std::collections::HashSet;

use gridweave_core::{Direction, Grid, Position};
use gridweave_generator::PathPuzzle;
use gridweave_solver::path_connected;
use log::debug;

use crate::{Action, Outcome};

/// An interactive path-connection session.
///
/// Per color the session is either idle or drawing. Selecting an endpoint
/// starts drawing that color from scratch; directional input extends the
/// path cell by cell. Extending back onto the path's second-to-last cell is
/// an implicit undo; reaching the color's other endpoint completes it and
/// drops back to idle. A declared bridge cell is the one place two colors'
/// paths may coincide.
///
/// The win check is two-part and both parts are required: every cell of the
/// board must be covered by an endpoint or some path, and each color's two
/// endpoints must be connected by a walk confined to that color's own
/// occupied cells. Coverage alone is not enough - undo and clear can leave a
/// color's cells on the board without an end-to-end connection.
///
/// Every action consumes one step of the puzzle's budget, wasted inputs
/// included; when the budget runs out the outcome flips to
/// [`Outcome::OutOfSteps`].
#[derive(Debug, Clone)]
pub struct PathSession {
    puzzle: PathPuzzle,
    /// Cell ownership: 0 is empty, `c` is the color id occupying the cell.
    /// Bridge cells keep their first owner even while a second color's path
    /// crosses them.
    occupancy: Grid<u8>,
    /// Per color (index `c - 1`), the ordered cells drawn so far.
    paths: Vec<Vec<Position>>,
    selected: Option<u8>,
    cursor: Position,
    steps_taken: u32,
    outcome: Outcome,
}

impl PathSession {
    /// Creates a session; the cursor starts on color 1's first endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the puzzle reports no colors, which [`PathPuzzle`]
    /// validation rules out.
    #[must_use]
    pub fn new(puzzle: PathPuzzle) -> Self {
        let mut occupancy = Grid::new(puzzle.width(), puzzle.height(), 0);
        for color in puzzle.colors() {
            let (a, b) = puzzle.endpoints(color).expect("color ids are dense");
            occupancy[a] = color;
            occupancy[b] = color;
        }
        let cursor = puzzle.endpoints(1).expect("validated puzzle has colors").0;
        let paths = vec![Vec::new(); usize::from(puzzle.color_count())];
        Self {
            puzzle,
            occupancy,
            paths,
            selected: None,
            cursor,
            steps_taken: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Processes one action; returns whether any state changed.
    ///
    /// Every call consumes budget, changed or not: a rejected move is a
    /// wasted input, not an error.
    pub fn step(&mut self, action: Action) -> bool {
        if self.outcome.is_over() {
            return false;
        }
        self.steps_taken += 1;
        let changed = match action {
            Action::Move(direction) => match self.selected {
                Some(color) => self.extend(color, direction),
                None => self.move_cursor(direction),
            },
            Action::Select => self.handle_select(),
            Action::Undo => self.handle_undo(),
            Action::Click(_) => false,
        };
        if self.is_won() {
            debug!("path board covered and all colors connected");
            self.outcome = Outcome::Solved;
        } else if self.steps_taken >= self.puzzle.max_steps() {
            self.outcome = Outcome::OutOfSteps;
        }
        changed
    }

    fn move_cursor(&mut self, direction: Direction) -> bool {
        match self.occupancy.neighbor(self.cursor, direction) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    /// Select with no color active starts drawing at an endpoint (clearing
    /// any previous path of that color); select while drawing deselects and
    /// leaves the partial path on the board.
    fn handle_select(&mut self) -> bool {
        if self.selected.is_some() {
            self.selected = None;
            return true;
        }
        let Some(color) = self.puzzle.endpoint_color_at(self.cursor) else {
            return false;
        };
        self.clear_path(color);
        self.paths[usize::from(color) - 1].push(self.cursor);
        self.selected = Some(color);
        true
    }

    fn handle_undo(&mut self) -> bool {
        let Some(color) = self.selected else {
            return false;
        };
        if self.path(color).len() <= 1 {
            return false;
        }
        self.undo_last_cell(color);
        if let Some(&tail) = self.path(color).last() {
            self.cursor = tail;
        }
        true
    }

    /// One cell of path growth, with all of the extension rules.
    fn extend(&mut self, color: u8, direction: Direction) -> bool {
        let Some(target) = self.occupancy.neighbor(self.cursor, direction) else {
            return false;
        };
        let path = self.path(color);
        if path.is_empty() {
            return false;
        }

        // Stepping back onto the second-to-last cell is an implicit undo.
        if path.len() >= 2 && target == path[path.len() - 2] {
            self.undo_last_cell(color);
            self.cursor = target;
            return true;
        }

        // A path never re-enters itself.
        if path.contains(&target) {
            return false;
        }

        let (a, b) = self
            .puzzle
            .endpoints(color)
            .expect("selected color is valid");
        let other_end = if path[0] == a { b } else { a };

        // Reaching the far endpoint completes the color.
        if target == other_end {
            self.paths[usize::from(color) - 1].push(target);
            self.cursor = target;
            self.selected = None;
            return true;
        }

        // Claim an empty cell.
        if self.occupancy[target] == 0 {
            self.occupancy[target] = color;
            self.paths[usize::from(color) - 1].push(target);
            self.cursor = target;
            return true;
        }

        // Cross a bridge another color occupies, without claiming the cell.
        if self.puzzle.is_bridge(target) && self.occupancy[target] != color {
            self.paths[usize::from(color) - 1].push(target);
            self.cursor = target;
            return true;
        }

        false
    }

    /// Pops the last drawn cell of `color`, restoring the cell to whichever
    /// other color still passes through it, or to empty. Endpoint cells keep
    /// their color.
    fn undo_last_cell(&mut self, color: u8) {
        let Some(removed) = self.paths[usize::from(color) - 1].pop() else {
            return;
        };
        let (a, b) = self
            .puzzle
            .endpoints(color)
            .expect("selected color is valid");
        if removed == a || removed == b {
            return;
        }
        if self.occupancy[removed] == color {
            let other = self.other_occupant(removed, color);
            self.occupancy[removed] = other;
        }
    }

    /// Releases every non-endpoint cell of `color` back to empty or to the
    /// other color crossing it, and forgets the path.
    fn clear_path(&mut self, color: u8) {
        let (a, b) = self
            .puzzle
            .endpoints(color)
            .expect("selected color is valid");
        let old_path = std::mem::take(&mut self.paths[usize::from(color) - 1]);
        for pos in old_path {
            if pos == a || pos == b {
                continue;
            }
            if self.occupancy[pos] == color {
                let other = self.other_occupant(pos, color);
                self.occupancy[pos] = other;
            }
        }
    }

    /// Returns the color (other than `exclude`) whose path passes through
    /// `pos`, or 0. Only bridge cells can have one.
    fn other_occupant(&self, pos: Position, exclude: u8) -> u8 {
        self.puzzle
            .colors()
            .find(|&color| color != exclude && self.path(color).contains(&pos))
            .unwrap_or(0)
    }

    fn is_won(&self) -> bool {
        // Part one: full board coverage by endpoints and drawn paths.
        let mut covered: HashSet<Position> = HashSet::new();
        for color in self.puzzle.colors() {
            let (a, b) = self.puzzle.endpoints(color).expect("color ids are dense");
            covered.insert(a);
            covered.insert(b);
            covered.extend(self.path(color).iter().copied());
        }
        if covered.len() < self.occupancy.cell_count() {
            return false;
        }

        // Part two: each color's endpoints connected through its own cells.
        for color in self.puzzle.colors() {
            let (a, b) = self.puzzle.endpoints(color).expect("color ids are dense");
            let mut cells: HashSet<Position> = self.path(color).iter().copied().collect();
            cells.insert(a);
            cells.insert(b);
            if !path_connected(&cells, a, b) {
                return false;
            }
        }
        true
    }

    fn path(&self, color: u8) -> &[Position] {
        &self.paths[usize::from(color) - 1]
    }

    /// Returns the puzzle definition (endpoints, bridges, budget).
    #[must_use]
    pub fn puzzle(&self) -> &PathPuzzle {
        &self.puzzle
    }

    /// Returns the occupancy grid for rendering: 0 for empty, otherwise the
    /// owning color id.
    #[must_use]
    pub fn occupancy(&self) -> &Grid<u8> {
        &self.occupancy
    }

    /// Returns the drawn path of `color`, oldest cell first.
    #[must_use]
    pub fn drawn_path(&self, color: u8) -> &[Position] {
        self.path(color)
    }

    /// Returns the color currently being drawn, if any.
    #[must_use]
    pub const fn selected_color(&self) -> Option<u8> {
        self.selected
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns how many steps of the budget remain.
    #[must_use]
    pub fn steps_remaining(&self) -> u32 {
        self.puzzle.max_steps().saturating_sub(self.steps_taken)
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    /// A 3x3 board with a single color from corner to corner.
    fn single_color() -> PathPuzzle {
        PathPuzzle::new(3, 3, vec![(pos(0, 0), pos(2, 2))], [], 100).expect("valid layout")
    }

    /// Two colors on a 3x3 board with a bridge in the center.
    fn bridged() -> PathPuzzle {
        PathPuzzle::new(
            3,
            3,
            vec![(pos(0, 1), pos(2, 1)), (pos(1, 0), pos(1, 2))],
            [pos(1, 1)],
            100,
        )
        .expect("valid layout")
    }

    fn select_at(session: &mut PathSession, target: Position) {
        // Walk the idle cursor to the endpoint, then select.
        while session.cursor().x() < target.x() {
            session.step(Action::Move(Direction::Right));
        }
        while session.cursor().x() > target.x() {
            session.step(Action::Move(Direction::Left));
        }
        while session.cursor().y() < target.y() {
            session.step(Action::Move(Direction::Down));
        }
        while session.cursor().y() > target.y() {
            session.step(Action::Move(Direction::Up));
        }
        assert!(session.step(Action::Select), "no endpoint at {target}");
    }

    #[test]
    fn test_completing_without_coverage_is_not_a_win() {
        // Right, right, down, down completes color 1, but five covered
        // cells out of nine is not a win.
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ] {
            assert!(session.step(Action::Move(direction)));
        }
        assert_eq!(session.selected_color(), None, "color 1 should complete");
        assert_eq!(session.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_snake_path_covers_board_and_wins() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ] {
            assert!(session.step(Action::Move(direction)));
        }
        assert_eq!(session.outcome(), Outcome::Solved);
    }

    #[test]
    fn test_extend_rejects_own_path_and_walls_off_board() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        assert!(!session.step(Action::Move(Direction::Up)), "off the board");
        assert!(session.step(Action::Move(Direction::Right)));
        assert!(session.step(Action::Move(Direction::Down)));
        assert!(session.step(Action::Move(Direction::Left)));
        // The path now hooks around to (0, 1); stepping up would re-enter
        // the start endpoint, which is part of the path and not the
        // second-to-last cell, so it is rejected.
        assert!(!session.step(Action::Move(Direction::Up)));
    }

    #[test]
    fn test_implicit_undo_by_stepping_back() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        assert!(session.step(Action::Move(Direction::Right)));
        assert_eq!(session.occupancy()[pos(1, 0)], 1);
        // Stepping back onto the start endpoint pops (1, 0).
        assert!(session.step(Action::Move(Direction::Left)));
        assert_eq!(session.cursor(), pos(0, 0));
        assert_eq!(session.occupancy()[pos(1, 0)], 0);
        assert_eq!(session.drawn_path(1), &[pos(0, 0)]);
    }

    #[test]
    fn test_undo_inverts_extend_sequence() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        let occupancy_before = session.occupancy().clone();
        let path_before = session.drawn_path(1).to_vec();

        let extends = [Direction::Right, Direction::Down, Direction::Left];
        for direction in extends {
            assert!(session.step(Action::Move(direction)));
        }
        for _ in extends {
            assert!(session.step(Action::Undo));
        }

        assert_eq!(session.occupancy(), &occupancy_before);
        assert_eq!(session.drawn_path(1), path_before);
        assert_eq!(session.cursor(), pos(0, 0));
    }

    #[test]
    fn test_select_toggles_and_clear_releases_cells() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        assert!(session.step(Action::Move(Direction::Right)));
        // Deselect mid-draw: the partial path stays on the board.
        assert!(session.step(Action::Select));
        assert_eq!(session.selected_color(), None);
        assert_eq!(session.occupancy()[pos(1, 0)], 1);
        // Walk back to the endpoint; re-selecting clears the old path.
        assert!(session.step(Action::Move(Direction::Left)));
        assert!(session.step(Action::Select));
        assert_eq!(session.occupancy()[pos(1, 0)], 0);
        assert_eq!(session.drawn_path(1), &[pos(0, 0)]);
    }

    #[test]
    fn test_bridge_carries_two_colors() {
        let mut session = PathSession::new(bridged());
        // Color 1 crosses the center bridge left to right.
        select_at(&mut session, pos(0, 1));
        assert!(session.step(Action::Move(Direction::Right)));
        assert!(session.step(Action::Move(Direction::Right)));
        assert_eq!(session.selected_color(), None);
        assert_eq!(session.occupancy()[pos(1, 1)], 1);

        // Color 2 crosses the same bridge top to bottom.
        select_at(&mut session, pos(1, 0));
        assert!(session.step(Action::Move(Direction::Down)));
        assert!(session.step(Action::Move(Direction::Down)));
        assert_eq!(session.selected_color(), None);
        // The bridge still belongs to color 1; color 2 only passes through.
        assert_eq!(session.occupancy()[pos(1, 1)], 1);
        assert!(session.drawn_path(2).contains(&pos(1, 1)));
    }

    #[test]
    fn test_bridge_undo_restores_other_occupant() {
        let mut session = PathSession::new(bridged());
        select_at(&mut session, pos(0, 1));
        assert!(session.step(Action::Move(Direction::Right)));
        // Park color 1 mid-draw; its claim on the bridge cell remains.
        assert!(session.step(Action::Select));
        select_at(&mut session, pos(1, 0));
        assert!(session.step(Action::Move(Direction::Down)));
        // Color 2 undoes its bridge crossing; color 1 keeps the cell.
        assert!(session.step(Action::Undo));
        assert_eq!(session.occupancy()[pos(1, 1)], 1);
        assert!(!session.drawn_path(2).contains(&pos(1, 1)));
    }

    #[test]
    fn test_non_bridge_collision_is_rejected() {
        let mut session = PathSession::new(bridged());
        select_at(&mut session, pos(0, 1));
        assert!(session.step(Action::Move(Direction::Up)));
        assert_eq!(session.occupancy()[pos(0, 0)], 1);
        assert!(session.step(Action::Select)); // deselect

        // Color 2 may not enter (0, 0): occupied, not a bridge.
        select_at(&mut session, pos(1, 0));
        assert!(!session.step(Action::Move(Direction::Left)));
    }

    #[test]
    fn test_step_budget_exhaustion() {
        let puzzle =
            PathPuzzle::new(3, 3, vec![(pos(0, 0), pos(2, 2))], [], 3).expect("valid layout");
        let mut session = PathSession::new(puzzle);
        // Wasted inputs still consume budget.
        session.step(Action::Move(Direction::Up));
        session.step(Action::Move(Direction::Up));
        session.step(Action::Move(Direction::Up));
        assert_eq!(session.outcome(), Outcome::OutOfSteps);
        assert!(!session.step(Action::Select));
    }

    #[test]
    fn test_win_latches_after_coverage() {
        let mut session = PathSession::new(single_color());
        assert!(session.step(Action::Select));
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ] {
            session.step(Action::Move(direction));
        }
        assert_eq!(session.outcome(), Outcome::Solved);
        assert!(!session.step(Action::Select));
        assert_eq!(session.outcome(), Outcome::Solved);
    }
}
