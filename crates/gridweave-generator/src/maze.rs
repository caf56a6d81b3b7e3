use gridweave_core::{Grid, Position, TeleportMap, Tile};
use gridweave_solver::{slide_reachable, teleport_can_reach, walk_reachable};
use log::{debug, warn};
use rand::{Rng, RngExt as _};
use rand_pcg::Pcg64;

use crate::PuzzleSeed;

/// Layout attempt budget for the teleport maze.
pub const TELEPORT_MAZE_ATTEMPTS: usize = 50;

fn random_position<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8) -> Position {
    Position::new(rng.random_range(0..width), rng.random_range(0..height))
}

/// Tries to place one wall bar of `length` cells starting at `origin`.
///
/// The bar is clipped to the board; it is placed only if at least two of its
/// cells survive clipping and every surviving cell is free floor distinct
/// from `start`.
fn try_place_bar(
    grid: &mut Grid<Tile>,
    start: Position,
    origin: Position,
    horizontal: bool,
    length: u8,
) -> bool {
    let mut cells = Vec::with_capacity(usize::from(length));
    for i in 0..length {
        let cell = if horizontal {
            origin.offset(i8::try_from(i).unwrap_or(i8::MAX), 0)
        } else {
            origin.offset(0, i8::try_from(i).unwrap_or(i8::MAX))
        };
        if let Some(cell) = cell
            && grid.contains(cell)
        {
            cells.push(cell);
        }
    }
    if cells.len() < 2 {
        return false;
    }
    if cells
        .iter()
        .any(|&cell| cell == start || grid[cell] != Tile::Floor)
    {
        return false;
    }
    for cell in cells {
        grid[cell] = Tile::Wall;
    }
    true
}

/// Shuffles a reachable-cell set into a deterministic candidate order.
///
/// Hash-set iteration order is unstable, so candidates are sorted before the
/// seeded shuffle; otherwise the same seed could place gems differently
/// between runs.
fn shuffled_candidates<R: Rng + ?Sized>(
    rng: &mut R,
    cells: impl IntoIterator<Item = Position>,
) -> Vec<Position> {
    use rand::seq::SliceRandom as _;
    let mut candidates: Vec<Position> = cells.into_iter().collect();
    candidates.sort_unstable();
    candidates.shuffle(rng);
    candidates
}

/// A generated walking maze with collectible gems.
///
/// Every gem is proven walk-reachable from `start` before the instance is
/// handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemMazePuzzle {
    /// The maze board: floor, walls, and gem tiles.
    pub grid: Grid<Tile>,
    /// The player start cell.
    pub start: Position,
    /// All gem positions, also present in `grid`.
    pub gems: Vec<Position>,
    /// The seed this instance was generated from.
    pub seed: PuzzleSeed,
}

/// Generator for the walking gem maze.
///
/// Wall bars carve the board into corridors without sealing regions off, and
/// gems are drawn only from the walk-reachable set, so the placement check
/// can never fail; there is no retry loop here.
#[derive(Debug, Clone, Copy)]
pub struct GemMazeGenerator {
    width: u8,
    height: u8,
}

impl GemMazeGenerator {
    /// Creates a generator for a `width` x `height` board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 4; the wall bars need interior
    /// room.
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width >= 4 && height >= 4, "gem maze needs a 4x4 board");
        Self { width, height }
    }

    /// Generates an instance from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GemMazePuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates an instance reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GemMazePuzzle {
        let mut rng = seed.rng("gem-maze");
        let mut grid = Grid::new(self.width, self.height, Tile::Floor);
        let start = Position::new(0, 0);

        for horizontal in [true, false] {
            let bars = rng.random_range(3..=5);
            for _ in 0..bars {
                for _attempt in 0..50 {
                    let length = rng.random_range(2..=3);
                    let origin = if horizontal {
                        Position::new(
                            rng.random_range(1..=self.width - 3),
                            rng.random_range(1..=self.height - 2),
                        )
                    } else {
                        Position::new(
                            rng.random_range(1..=self.width - 2),
                            rng.random_range(1..=self.height - 3),
                        )
                    };
                    if try_place_bar(&mut grid, start, origin, horizontal, length) {
                        break;
                    }
                }
            }
        }

        let reachable = walk_reachable(&grid, start);
        let candidates = shuffled_candidates(
            &mut rng,
            reachable
                .into_iter()
                .filter(|&pos| pos != start && grid[pos] == Tile::Floor),
        );
        let wanted = rng.random_range(4..=6);
        let gems: Vec<Position> = candidates.into_iter().take(wanted).collect();
        for &gem in &gems {
            grid[gem] = Tile::Gem;
        }

        GemMazePuzzle {
            grid,
            start,
            gems,
            seed,
        }
    }
}

/// A generated ice-slide board with collectible gems.
///
/// Every gem lies on a cell some reachable slide sweeps over, so it is
/// collectible under the slide-until-blocked movement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePuzzle {
    /// The board: floor, wall pillars, and gem tiles.
    pub grid: Grid<Tile>,
    /// The player start cell.
    pub start: Position,
    /// All gem positions, also present in `grid`.
    pub gems: Vec<Position>,
    /// The seed this instance was generated from.
    pub seed: PuzzleSeed,
}

/// Generator for the ice-slide puzzle.
///
/// Wall pillars on a loose lattice guarantee stopping points across the
/// board; gems are drawn from the swept-cell set of the slide oracle.
#[derive(Debug, Clone, Copy)]
pub struct SlideGenerator {
    width: u8,
    height: u8,
}

impl SlideGenerator {
    /// Creates a generator for a `width` x `height` board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 4.
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width >= 4 && height >= 4, "slide board needs a 4x4 board");
        Self { width, height }
    }

    /// Generates an instance from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> SlidePuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates an instance reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> SlidePuzzle {
        let mut rng = seed.rng("ice-slide");
        let mut grid = Grid::new(self.width, self.height, Tile::Floor);
        let start = Position::new(0, 0);

        // Pillars on a loose lattice so slides have stopping points
        // everywhere on the board.
        for y in (2..self.height - 1).step_by(3) {
            for x in (2..self.width - 1).step_by(3) {
                if rng.random_bool(0.7) {
                    grid[Position::new(x, y)] = Tile::Wall;
                }
            }
        }

        let extra = rng.random_range(2..=4);
        for _ in 0..extra {
            for _attempt in 0..50 {
                let pos = Position::new(
                    rng.random_range(1..=self.width - 2),
                    rng.random_range(1..=self.height - 2),
                );
                if pos != start && grid[pos] == Tile::Floor {
                    grid[pos] = Tile::Wall;
                    break;
                }
            }
        }

        // Gems never block a slide, so the swept set is fixed once the walls
        // are down; placing a gem anywhere in it keeps it collectible.
        let reach = slide_reachable(&grid, start);
        let candidates = shuffled_candidates(
            &mut rng,
            reach
                .swept
                .into_iter()
                .filter(|&pos| pos != start && grid[pos] == Tile::Floor),
        );
        let gems: Vec<Position> = candidates.into_iter().take(3).collect();
        for &gem in &gems {
            grid[gem] = Tile::Gem;
        }

        SlidePuzzle {
            grid,
            start,
            gems,
            seed,
        }
    }
}

/// A generated teleport maze.
///
/// The exit is proven reachable from `start` under walking plus teleporting
/// before the instance is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportMazePuzzle {
    /// The maze board: floor, walls, portal tiles, and the exit.
    pub grid: Grid<Tile>,
    /// The portal pairing; entering either cell of a pair warps to the other.
    pub teleports: TeleportMap,
    /// The player start cell.
    pub start: Position,
    /// The terminal cell.
    pub exit: Position,
    /// The seed this instance was generated from.
    pub seed: PuzzleSeed,
}

/// Generator for the teleport maze.
///
/// Builds whole candidate layouts (wall bars, exit, two portal pairs) and
/// keeps the first one whose exit the teleport-walk oracle reports reachable.
/// After [`TELEPORT_MAZE_ATTEMPTS`] rejected layouts it degrades to a
/// trivially solvable open board.
#[derive(Debug, Clone, Copy)]
pub struct TeleportMazeGenerator {
    width: u8,
    height: u8,
}

impl TeleportMazeGenerator {
    /// Creates a generator for a `width` x `height` board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 4.
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width >= 4 && height >= 4, "teleport maze needs a 4x4 board");
        Self { width, height }
    }

    /// Generates an instance from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> TeleportMazePuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates an instance reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> TeleportMazePuzzle {
        let mut rng = seed.rng("teleport-maze");
        for attempt in 0..TELEPORT_MAZE_ATTEMPTS {
            let candidate = self.layout(&mut rng, seed);
            if teleport_can_reach(
                &candidate.grid,
                &candidate.teleports,
                candidate.start,
                candidate.exit,
            ) {
                debug!("teleport maze accepted on attempt {attempt}");
                return candidate;
            }
        }
        warn!(
            "teleport maze exhausted {TELEPORT_MAZE_ATTEMPTS} attempts; \
             serving an open fallback board"
        );
        self.fallback(seed)
    }

    /// Builds one unverified candidate layout.
    fn layout(&self, rng: &mut Pcg64, seed: PuzzleSeed) -> TeleportMazePuzzle {
        let mut grid = Grid::new(self.width, self.height, Tile::Floor);
        let start = Position::new(0, 0);

        let h_bars = rng.random_range(2..=4);
        for _ in 0..h_bars {
            for _attempt in 0..50 {
                let origin = Position::new(
                    rng.random_range(0..=self.width - 2),
                    rng.random_range(1..=self.height - 2),
                );
                let length = rng.random_range(2..=4);
                if try_place_bar(&mut grid, start, origin, true, length) {
                    break;
                }
            }
        }
        let v_bars = rng.random_range(2..=3);
        for _ in 0..v_bars {
            for _attempt in 0..50 {
                let origin = Position::new(
                    rng.random_range(1..=self.width - 2),
                    rng.random_range(0..=self.height - 2),
                );
                let length = rng.random_range(2..=4);
                if try_place_bar(&mut grid, start, origin, false, length) {
                    break;
                }
            }
        }

        // Exit somewhere in the far quadrant; if the quadrant is packed with
        // walls, claim the far corner outright.
        let mut exit = Position::new(self.width - 1, self.height - 1);
        for _attempt in 0..100 {
            let candidate = Position::new(
                rng.random_range(self.width / 2..self.width),
                rng.random_range(self.height / 2..self.height),
            );
            if candidate != start && grid[candidate] == Tile::Floor {
                exit = candidate;
                break;
            }
        }
        grid[exit] = Tile::Exit;

        let mut teleports = TeleportMap::new();
        for pair_id in 0..2_u8 {
            let mut pair = Vec::with_capacity(2);
            for _ in 0..2 {
                for _attempt in 0..100 {
                    let pos = random_position(rng, self.width, self.height);
                    if pos != start && grid[pos] == Tile::Floor && !pair.contains(&pos) {
                        pair.push(pos);
                        break;
                    }
                }
            }
            if let [a, b] = pair[..] {
                grid[a] = Tile::Portal(pair_id);
                grid[b] = Tile::Portal(pair_id);
                teleports.link(a, b);
            }
        }

        TeleportMazePuzzle {
            grid,
            teleports,
            start,
            exit,
            seed,
        }
    }

    /// The exhaustion fallback: an open board with the exit in the far
    /// corner, solvable by walking.
    fn fallback(&self, seed: PuzzleSeed) -> TeleportMazePuzzle {
        let mut grid = Grid::new(self.width, self.height, Tile::Floor);
        let exit = Position::new(self.width - 1, self.height - 1);
        grid[exit] = Tile::Exit;
        TeleportMazePuzzle {
            grid,
            teleports: TeleportMap::new(),
            start: Position::new(0, 0),
            exit,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use gridweave_solver::walk_can_reach;

    use super::*;

    fn seeds() -> impl Iterator<Item = PuzzleSeed> {
        (0_u8..8).map(|byte| PuzzleSeed::from_bytes([byte; 32]))
    }

    #[test]
    fn test_gem_maze_gems_are_walk_reachable() {
        let generator = GemMazeGenerator::new(8, 8);
        for seed in seeds() {
            let puzzle = generator.generate_with_seed(seed);
            assert!(!puzzle.gems.is_empty());
            for &gem in &puzzle.gems {
                assert_eq!(puzzle.grid[gem], Tile::Gem);
                assert!(
                    walk_can_reach(&puzzle.grid, puzzle.start, gem),
                    "gem at {gem} unreachable (seed {seed})"
                );
            }
        }
    }

    #[test]
    fn test_gem_maze_start_is_clear() {
        let generator = GemMazeGenerator::new(8, 8);
        for seed in seeds() {
            let puzzle = generator.generate_with_seed(seed);
            assert_eq!(puzzle.grid[puzzle.start], Tile::Floor);
        }
    }

    #[test]
    fn test_slide_gems_are_sweepable() {
        let generator = SlideGenerator::new(8, 8);
        for seed in seeds() {
            let puzzle = generator.generate_with_seed(seed);
            assert!(!puzzle.gems.is_empty());
            // Recompute reachability on the finished board: gems do not
            // block slides, so they must still be swept.
            let reach = slide_reachable(&puzzle.grid, puzzle.start);
            for &gem in &puzzle.gems {
                assert!(
                    reach.swept.contains(&gem),
                    "gem at {gem} not collectible (seed {seed})"
                );
            }
        }
    }

    #[test]
    fn test_teleport_exit_is_reachable() {
        let generator = TeleportMazeGenerator::new(8, 8);
        for seed in seeds() {
            let puzzle = generator.generate_with_seed(seed);
            assert_eq!(puzzle.grid[puzzle.exit], Tile::Exit);
            assert!(teleport_can_reach(
                &puzzle.grid,
                &puzzle.teleports,
                puzzle.start,
                puzzle.exit
            ));
        }
    }

    #[test]
    fn test_teleport_portal_tiles_match_map() {
        let generator = TeleportMazeGenerator::new(8, 8);
        for seed in seeds() {
            let puzzle = generator.generate_with_seed(seed);
            for (a, b) in puzzle.teleports.iter() {
                assert!(matches!(puzzle.grid[a], Tile::Portal(_)));
                assert!(matches!(puzzle.grid[b], Tile::Portal(_)));
                assert_eq!(puzzle.teleports.warp(a), Some(b));
            }
        }
    }

    #[test]
    fn test_teleport_fallback_is_solvable() {
        let generator = TeleportMazeGenerator::new(8, 8);
        let fallback = generator.fallback(PuzzleSeed::from_bytes([0; 32]));
        assert!(walk_can_reach(&fallback.grid, fallback.start, fallback.exit));
    }

    #[test]
    fn test_same_seed_reproduces_maze() {
        let generator = GemMazeGenerator::new(8, 8);
        let seed = PuzzleSeed::from_bytes([31; 32]);
        assert_eq!(
            generator.generate_with_seed(seed),
            generator.generate_with_seed(seed)
        );
    }
}
