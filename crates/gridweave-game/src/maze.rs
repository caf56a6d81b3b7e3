use gridweave_core::{Direction, Grid, Position, TeleportMap, Tile};
use gridweave_generator::{GemMazePuzzle, SlidePuzzle, TeleportMazePuzzle};
use log::debug;

use crate::{Action, Outcome};

/// Undo record shared by the maze sessions: the board (gems may have been
/// collected), the cursor, and the remaining gem count.
type MazeSnapshot = (Grid<Tile>, Position, usize);

/// An interactive walking gem maze.
///
/// The player walks one cell per move, blocked by walls; walking onto a gem
/// collects it. The session is solved when no gems remain.
#[derive(Debug, Clone)]
pub struct WalkSession {
    grid: Grid<Tile>,
    cursor: Position,
    gems_left: usize,
    history: Vec<MazeSnapshot>,
    outcome: Outcome,
}

impl WalkSession {
    /// Creates a session from a generated maze.
    #[must_use]
    pub fn new(puzzle: GemMazePuzzle) -> Self {
        let GemMazePuzzle {
            grid, start, gems, ..
        } = puzzle;
        Self {
            grid,
            cursor: start,
            gems_left: gems.len(),
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
            Action::Undo => pop_snapshot(
                &mut self.history,
                &mut self.grid,
                &mut self.cursor,
                &mut self.gems_left,
            ),
            Action::Select | Action::Click(_) => false,
        }
    }

    fn walk(&mut self, direction: Direction) -> bool {
        let Some(next) = self.grid.neighbor(self.cursor, direction) else {
            return false;
        };
        if self.grid[next].blocks() {
            return false;
        }
        self.history
            .push((self.grid.clone(), self.cursor, self.gems_left));
        self.cursor = next;
        if self.grid[next].is_gem() {
            self.grid[next] = Tile::Floor;
            self.gems_left -= 1;
            if self.gems_left == 0 {
                debug!("gem maze cleared");
                self.outcome = Outcome::Solved;
            }
        }
        true
    }

    /// Returns the current board for rendering.
    #[must_use]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns how many gems are still on the board.
    #[must_use]
    pub const fn gems_left(&self) -> usize {
        self.gems_left
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// An interactive ice-slide session.
///
/// One move slides the cursor until a wall or the boundary stops it,
/// collecting every gem passed over (including the resting cell).
#[derive(Debug, Clone)]
pub struct SlideSession {
    grid: Grid<Tile>,
    cursor: Position,
    gems_left: usize,
    history: Vec<MazeSnapshot>,
    outcome: Outcome,
}

impl SlideSession {
    /// Creates a session from a generated board.
    #[must_use]
    pub fn new(puzzle: SlidePuzzle) -> Self {
        let SlidePuzzle {
            grid, start, gems, ..
        } = puzzle;
        Self {
            grid,
            cursor: start,
            gems_left: gems.len(),
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
            Action::Move(direction) => self.slide(direction),
            Action::Undo => pop_snapshot(
                &mut self.history,
                &mut self.grid,
                &mut self.cursor,
                &mut self.gems_left,
            ),
            Action::Select | Action::Click(_) => false,
        }
    }

    fn slide(&mut self, direction: Direction) -> bool {
        let snapshot = (self.grid.clone(), self.cursor, self.gems_left);
        let mut moved = false;
        loop {
            let Some(next) = self.grid.neighbor(self.cursor, direction) else {
                break;
            };
            if self.grid[next].blocks() {
                break;
            }
            if self.grid[next].is_gem() {
                self.grid[next] = Tile::Floor;
                self.gems_left -= 1;
            }
            self.cursor = next;
            moved = true;
        }
        if !moved {
            return false;
        }
        self.history.push(snapshot);
        if self.gems_left == 0 {
            debug!("slide board cleared");
            self.outcome = Outcome::Solved;
        }
        true
    }

    /// Returns the current board for rendering.
    #[must_use]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns how many gems are still on the board.
    #[must_use]
    pub const fn gems_left(&self) -> usize {
        self.gems_left
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// An interactive teleport maze.
///
/// The player walks one cell per move; arriving on a portal warps to its
/// paired cell. The session is solved on reaching the exit.
#[derive(Debug, Clone)]
pub struct TeleportSession {
    grid: Grid<Tile>,
    teleports: TeleportMap,
    cursor: Position,
    exit: Position,
    history: Vec<Position>,
    outcome: Outcome,
}

impl TeleportSession {
    /// Creates a session from a generated maze.
    #[must_use]
    pub fn new(puzzle: TeleportMazePuzzle) -> Self {
        let TeleportMazePuzzle {
            grid,
            teleports,
            start,
            exit,
            ..
        } = puzzle;
        Self {
            grid,
            teleports,
            cursor: start,
            exit,
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
                Some(previous) => {
                    self.cursor = previous;
                    true
                }
                None => false,
            },
            Action::Select | Action::Click(_) => false,
        }
    }

    fn walk(&mut self, direction: Direction) -> bool {
        let Some(next) = self.grid.neighbor(self.cursor, direction) else {
            return false;
        };
        if self.grid[next].blocks() {
            return false;
        }
        self.history.push(self.cursor);
        // Arriving on a teleporter substitutes the paired cell.
        self.cursor = self.teleports.warp(next).unwrap_or(next);
        if self.cursor == self.exit {
            debug!("teleport maze exit reached");
            self.outcome = Outcome::Solved;
        }
        true
    }

    /// Returns the board for rendering.
    #[must_use]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Returns the teleporter pairing.
    #[must_use]
    pub fn teleports(&self) -> &TeleportMap {
        &self.teleports
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the exit cell.
    #[must_use]
    pub const fn exit(&self) -> Position {
        self.exit
    }

    /// Returns the win/loss signal.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

fn pop_snapshot(
    history: &mut Vec<MazeSnapshot>,
    grid: &mut Grid<Tile>,
    cursor: &mut Position,
    gems_left: &mut usize,
) -> bool {
    match history.pop() {
        Some((previous_grid, previous_cursor, previous_gems)) => {
            *grid = previous_grid;
            *cursor = previous_cursor;
            *gems_left = previous_gems;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use gridweave_generator::PuzzleSeed;

    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid<Tile> {
        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (rows[0].len() as u8, rows.len() as u8);
        let mut grid = Grid::new(width, height, Tile::Floor);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                #[expect(clippy::cast_possible_truncation)]
                let pos = Position::new(x as u8, y as u8);
                grid[pos] = match ch {
                    '#' => Tile::Wall,
                    'g' => Tile::Gem,
                    'e' => Tile::Exit,
                    _ => Tile::Floor,
                };
            }
        }
        grid
    }

    fn seed() -> PuzzleSeed {
        PuzzleSeed::from_bytes([0; 32])
    }

    #[test]
    fn test_walk_collects_gems_and_wins() {
        let grid = grid_from_rows(&[
            ".g", //
            ".g",
        ]);
        let mut session = WalkSession::new(GemMazePuzzle {
            grid,
            start: Position::new(0, 0),
            gems: vec![Position::new(1, 0), Position::new(1, 1)],
            seed: seed(),
        });
        assert!(session.step(Action::Move(Direction::Right)));
        assert_eq!(session.gems_left(), 1);
        assert!(session.step(Action::Move(Direction::Down)));
        assert_eq!(session.outcome(), Outcome::Solved);
    }

    #[test]
    fn test_walk_rejects_walls_and_edges() {
        let grid = grid_from_rows(&[
            ".#", //
            "..",
        ]);
        let mut session = WalkSession::new(GemMazePuzzle {
            grid,
            start: Position::new(0, 0),
            gems: vec![],
            seed: seed(),
        });
        assert!(!session.step(Action::Move(Direction::Right)));
        assert!(!session.step(Action::Move(Direction::Up)));
        assert_eq!(session.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_walk_undo_restores_gem() {
        let grid = grid_from_rows(&["g.g", "..."]);
        let mut session = WalkSession::new(GemMazePuzzle {
            grid,
            start: Position::new(1, 0),
            gems: vec![Position::new(0, 0), Position::new(2, 0)],
            seed: seed(),
        });
        assert!(session.step(Action::Move(Direction::Left)));
        assert_eq!(session.gems_left(), 1);
        assert!(session.step(Action::Undo));
        assert_eq!(session.gems_left(), 2);
        assert_eq!(session.cursor(), Position::new(1, 0));
        assert_eq!(session.grid()[Position::new(0, 0)], Tile::Gem);
    }

    #[test]
    fn test_walk_win_latches() {
        let grid = grid_from_rows(&["g.", ".."]);
        let mut session = WalkSession::new(GemMazePuzzle {
            grid,
            start: Position::new(1, 0),
            gems: vec![Position::new(0, 0)],
            seed: seed(),
        });
        assert!(session.step(Action::Move(Direction::Left)));
        assert_eq!(session.outcome(), Outcome::Solved);
        // Solved latches; undo after the win is ignored.
        assert!(!session.step(Action::Undo));
        assert_eq!(session.outcome(), Outcome::Solved);
    }

    #[test]
    fn test_slide_runs_to_wall_and_sweeps_gems() {
        let grid = grid_from_rows(&[
            ".g.#.", //
            ".....",
        ]);
        let mut session = SlideSession::new(SlidePuzzle {
            grid,
            start: Position::new(0, 0),
            gems: vec![Position::new(1, 0)],
            seed: seed(),
        });
        assert!(session.step(Action::Move(Direction::Right)));
        // Slid over the gem and stopped against the wall.
        assert_eq!(session.cursor(), Position::new(2, 0));
        assert_eq!(session.outcome(), Outcome::Solved);
    }

    #[test]
    fn test_slide_pinned_is_noop() {
        let grid = grid_from_rows(&[
            ".#", //
            "..",
        ]);
        let mut session = SlideSession::new(SlidePuzzle {
            grid,
            start: Position::new(0, 0),
            gems: vec![],
            seed: seed(),
        });
        assert!(!session.step(Action::Move(Direction::Right)));
        assert!(!session.step(Action::Move(Direction::Up)));
    }

    #[test]
    fn test_teleport_warps_and_wins_at_exit() {
        let grid = {
            let mut grid = grid_from_rows(&[
                "..#.", //
                "..#.", //
                "..#.", //
                "..#e",
            ]);
            grid[Position::new(1, 0)] = Tile::Portal(0);
            grid[Position::new(3, 0)] = Tile::Portal(0);
            grid
        };
        let mut teleports = TeleportMap::new();
        teleports.link(Position::new(1, 0), Position::new(3, 0));
        let mut session = TeleportSession::new(TeleportMazePuzzle {
            grid,
            teleports,
            start: Position::new(0, 0),
            exit: Position::new(3, 3),
            seed: seed(),
        });

        assert!(session.step(Action::Move(Direction::Right)));
        // Warped across the wall column.
        assert_eq!(session.cursor(), Position::new(3, 0));
        assert!(session.step(Action::Move(Direction::Down)));
        assert!(session.step(Action::Move(Direction::Down)));
        assert!(session.step(Action::Move(Direction::Down)));
        assert_eq!(session.outcome(), Outcome::Solved);
    }

    #[test]
    fn test_teleport_undo_returns_before_warp() {
        let mut teleports = TeleportMap::new();
        teleports.link(Position::new(1, 0), Position::new(3, 3));
        let mut session = TeleportSession::new(TeleportMazePuzzle {
            grid: grid_from_rows(&["....", "....", "....", "...e"]),
            teleports,
            start: Position::new(0, 0),
            exit: Position::new(2, 2),
            seed: seed(),
        });
        assert!(session.step(Action::Move(Direction::Right)));
        assert_eq!(session.cursor(), Position::new(3, 3));
        assert!(session.step(Action::Undo));
        assert_eq!(session.cursor(), Position::new(0, 0));
    }
}
