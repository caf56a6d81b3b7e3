use gridweave_core::{CycleBoard, Position};
use gridweave_solver::{
    EXHAUSTIVE_DEPTH, fits_exhaustive_search, shortest_solution, verify_solution,
};
use log::{debug, warn};
use rand::{Rng as _, RngExt as _};
use rand_pcg::Pcg64;

use crate::{
    CYCLE_LEVELS, CYCLE_TARGET, CycleLevel, PuzzleSeed, ScrambleStrategy, scramble_click_range,
};

/// Attempt budget for one generation call.
pub const MAX_GENERATION_ATTEMPTS: usize = 500;

/// A generated color-cycle puzzle instance.
///
/// `solution`, applied in order through the click-propagation engine, returns
/// `board` to the uniform `target` configuration; every instance is verified
/// by replay before it leaves the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCyclePuzzle {
    /// The scrambled board handed to the player.
    pub board: CycleBoard,
    /// A verified click sequence solving `board`.
    pub solution: Vec<Position>,
    /// The palette index every cell must reach.
    pub target: u8,
    /// The seed this instance was generated from.
    pub seed: PuzzleSeed,
}

/// Generator for color-cycle puzzles.
///
/// Each attempt scrambles a solved board with a strategy-selected click
/// sequence, constructs the undo solution (each scramble click reversed and
/// repeated `palette - 1` times), and replays it through the verifier.
/// Attempts that scramble back to the solved state or fail verification are
/// discarded and retried; after [`MAX_GENERATION_ATTEMPTS`] the generator
/// degrades to a deterministic single-click fallback that is solvable by
/// construction. Generation therefore always terminates and never errors.
///
/// # Examples
///
/// ```
/// use gridweave_generator::CycleGenerator;
/// use gridweave_solver::verify_solution;
///
/// let generator = CycleGenerator::for_level(0);
/// let puzzle = generator.generate();
///
/// assert!(!puzzle.board.is_uniform(puzzle.target));
/// assert!(verify_solution(&puzzle.board, &puzzle.solution, puzzle.target));
/// ```
#[derive(Debug, Clone)]
pub struct CycleGenerator {
    level: CycleLevel,
    target: u8,
    level_index: usize,
}

impl CycleGenerator {
    /// Creates a generator for one of the built-in [`CYCLE_LEVELS`].
    ///
    /// # Panics
    ///
    /// Panics if `level_index` is out of range.
    #[must_use]
    pub fn for_level(level_index: usize) -> Self {
        Self::new(CYCLE_LEVELS[level_index], CYCLE_TARGET, level_index)
    }

    /// Creates a generator with explicit parameters.
    ///
    /// `level_index` selects the scramble-count range and the strategy tier.
    ///
    /// # Panics
    ///
    /// Panics if the board dimensions are zero, `palette < 2`, or `target` is
    /// outside the palette.
    #[must_use]
    pub fn new(level: CycleLevel, target: u8, level_index: usize) -> Self {
        // Validates the parameters eagerly rather than on first attempt.
        let _ = CycleBoard::uniform(level.width, level.height, level.palette, target);
        Self {
            level,
            target,
            level_index,
        }
    }

    /// Generates an instance from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedCyclePuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates an instance reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GeneratedCyclePuzzle {
        let mut rng = seed.rng(&format!("cycle-{}", self.level_index));
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            if let Some(puzzle) = self.attempt(&mut rng, seed) {
                debug!(
                    "cycle level {} accepted on attempt {attempt} ({} solution clicks)",
                    self.level_index,
                    puzzle.solution.len()
                );
                return puzzle;
            }
        }
        warn!(
            "cycle level {} exhausted {MAX_GENERATION_ATTEMPTS} attempts; \
             serving the single-click fallback below the requested difficulty",
            self.level_index
        );
        self.fallback(seed)
    }

    /// One scramble-verify transaction: returns an accepted instance or
    /// `None` to try again.
    fn attempt(&self, rng: &mut Pcg64, seed: PuzzleSeed) -> Option<GeneratedCyclePuzzle> {
        let CycleLevel {
            width,
            height,
            palette,
        } = self.level;
        let count = rng.random_range(scramble_click_range(self.level_index));
        let strategy = ScrambleStrategy::for_level(rng, self.level_index);
        let raw_clicks = strategy.positions(rng, width, height, count);

        // Apply the scramble, dropping immediate repeats: clicking the same
        // cell twice in a row cancels out on a two-color cycle.
        let mut board = CycleBoard::uniform(width, height, palette, self.target);
        let mut clicks = Vec::with_capacity(raw_clicks.len());
        let mut prev = None;
        for pos in raw_clicks {
            if Some(pos) == prev {
                continue;
            }
            board = board.apply_click(pos);
            clicks.push(pos);
            prev = Some(pos);
        }

        if board.is_uniform(self.target) {
            return None;
        }

        // Undoing one scramble click takes palette - 1 repeats; undo the last
        // scramble click first.
        let repeats = usize::from(self.level.palette) - 1;
        let mut solution = Vec::with_capacity(clicks.len() * repeats);
        for &pos in clicks.iter().rev() {
            for _ in 0..repeats {
                solution.push(pos);
            }
        }

        // Symmetry of scramble and undo is not proof; replay it.
        if !verify_solution(&board, &solution, self.target) {
            return None;
        }

        if fits_exhaustive_search(&board)
            && let Some(short) = shortest_solution(&board, self.target, EXHAUSTIVE_DEPTH)
            && short.len() < solution.len()
        {
            solution = short;
        }

        Some(GeneratedCyclePuzzle {
            board,
            solution,
            target: self.target,
            seed,
        })
    }

    /// The deterministic exhaustion fallback: a single scrambled cell with
    /// the single-cell undo solution.
    fn fallback(&self, seed: PuzzleSeed) -> GeneratedCyclePuzzle {
        let CycleLevel {
            width,
            height,
            palette,
        } = self.level;
        let center = Position::new(width / 2, height / 2);
        let board = CycleBoard::uniform(width, height, palette, self.target).apply_click(center);
        let solution = vec![center; usize::from(palette) - 1];
        GeneratedCyclePuzzle {
            board,
            solution,
            target: self.target,
            seed,
        }
    }
}
