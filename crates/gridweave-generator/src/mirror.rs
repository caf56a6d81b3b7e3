use std::{collections::HashSet, sync::OnceLock};

use gridweave_core::Position;
use gridweave_solver::{JointState, mirror_can_converge};
use rand::{Rng as _, RngExt as _};

use crate::PuzzleSeed;

/// A mirror-walk puzzle: two agents, one target, and the walls that make
/// convergence possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPuzzle {
    /// Board width in cells.
    pub width: u8,
    /// Board height in cells.
    pub height: u8,
    /// Wall cells; agents are pinned against them.
    pub walls: HashSet<Position>,
    /// Starting joint state of the two agents.
    pub start: JointState,
    /// The single cell both agents must occupy simultaneously.
    pub target: Position,
}

/// One hand-authored puzzle record.
///
/// Asymmetric start pairs require walls: an agent pinned against a wall
/// stays put while its partner keeps moving, which is the only way to close
/// the gap between the two agents.
struct AuthoredMirror {
    main: (u8, u8),
    mirror: (u8, u8),
    target: (u8, u8),
    walls: &'static [(u8, u8)],
}

const BOARD: u8 = 8;

const AUTHORED: [AuthoredMirror; 5] = [
    // Tutorial: starts symmetric about the target, walls form a guiding
    // channel. Solution: down, down, down.
    AuthoredMirror {
        main: (3, 0),
        mirror: (3, 6),
        target: (3, 3),
        walls: &[
            (2, 1),
            (4, 1),
            (2, 2),
            (4, 2),
            (2, 4),
            (4, 4),
            (2, 5),
            (4, 5),
        ],
    },
    // Symmetric arena, four moves.
    AuthoredMirror {
        main: (1, 1),
        mirror: (5, 5),
        target: (3, 3),
        walls: &[
            (0, 0),
            (2, 0),
            (0, 2),
            (3, 1),
            (3, 5),
            (6, 6),
            (4, 6),
            (6, 4),
            (0, 4),
            (6, 2),
        ],
    },
    // Asymmetric; dense maze with many pinning surfaces.
    AuthoredMirror {
        main: (2, 1),
        mirror: (6, 5),
        target: (4, 2),
        walls: &[
            (0, 0),
            (5, 0),
            (0, 4),
            (3, 1),
            (6, 2),
            (3, 3),
            (4, 4),
            (5, 4),
            (0, 6),
            (3, 6),
            (5, 6),
            (6, 6),
            (0, 7),
            (6, 7),
        ],
    },
    // Asymmetric; the mirror agent is pinned twice on the right flank.
    AuthoredMirror {
        main: (1, 1),
        mirror: (5, 5),
        target: (4, 3),
        walls: &[
            (0, 0),
            (1, 0),
            (3, 1),
            (4, 1),
            (4, 4),
            (6, 2),
            (7, 2),
            (6, 3),
            (6, 4),
            (7, 4),
            (1, 6),
            (2, 6),
            (0, 7),
        ],
    },
    // The fortress: heavily walled, eight moves.
    AuthoredMirror {
        main: (2, 0),
        mirror: (6, 5),
        target: (2, 4),
        walls: &[
            (1, 1),
            (1, 6),
            (1, 7),
            (3, 3),
            (3, 4),
            (4, 0),
            (4, 3),
            (5, 1),
            (5, 4),
            (5, 7),
            (6, 0),
            (6, 2),
            (6, 4),
            (6, 6),
            (7, 5),
            (7, 7),
        ],
    },
];

static LIBRARY: OnceLock<Vec<MirrorPuzzle>> = OnceLock::new();

/// Returns the hand-authored mirror puzzle library.
///
/// On first access every record is validated by the joint-state BFS, keeping
/// authored and procedural content on one verification path.
///
/// # Panics
///
/// Panics if any authored puzzle fails its solvability check. That is a
/// data-authoring defect, not a runtime condition; construction must stop
/// rather than serve a provably unsolvable instance.
#[must_use]
pub fn mirror_library() -> &'static [MirrorPuzzle] {
    LIBRARY.get_or_init(|| {
        AUTHORED
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let puzzle = MirrorPuzzle {
                    width: BOARD,
                    height: BOARD,
                    walls: record
                        .walls
                        .iter()
                        .map(|&(x, y)| Position::new(x, y))
                        .collect(),
                    start: JointState::new(
                        Position::new(record.main.0, record.main.1),
                        Position::new(record.mirror.0, record.mirror.1),
                    ),
                    target: Position::new(record.target.0, record.target.1),
                };
                assert!(
                    mirror_can_converge(
                        puzzle.width,
                        puzzle.height,
                        &puzzle.walls,
                        puzzle.start,
                        puzzle.target,
                    ),
                    "authored mirror puzzle {index} failed its solvability check"
                );
                puzzle
            })
            .collect()
    })
}

/// Generator for the mirror-walk puzzle.
///
/// Serves a random puzzle from the validated [`mirror_library`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorGenerator;

impl MirrorGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks a puzzle with a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> MirrorPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Picks a puzzle reproducibly from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if the authored library fails validation; see
    /// [`mirror_library`].
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> MirrorPuzzle {
        let library = mirror_library();
        let mut rng = seed.rng("mirror");
        library[rng.random_range(0..library.len())].clone()
    }
}
