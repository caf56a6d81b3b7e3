use std::collections::HashSet;

use derive_more::{Display, Error};
use gridweave_core::Position;

/// A path-connection puzzle: per-color endpoint pairs, bridge cells, and a
/// step budget.
///
/// Color ids are 1-based; id `c` owns the endpoint pair at index `c - 1`.
/// Construction validates the layout, so every `PathPuzzle` in circulation is
/// structurally sound: endpoints on the board and mutually distinct, bridges
/// on the board and never on an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPuzzle {
    width: u8,
    height: u8,
    endpoints: Vec<(Position, Position)>,
    bridges: HashSet<Position>,
    max_steps: u32,
}

/// Validation error for a path-connection layout.
///
/// For the built-in levels any of these is a data-authoring defect and
/// surfaces as a panic in [`path_level`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PathAuthoringError {
    /// The layout declares no colors at all.
    #[display("path puzzle defines no colors")]
    NoColors,
    /// An endpoint lies outside the board.
    #[display("endpoint {endpoint} of color {color} lies off the board")]
    EndpointOutOfBounds {
        /// The color owning the endpoint.
        color: u8,
        /// The offending cell.
        endpoint: Position,
    },
    /// A color's two endpoints share one cell.
    #[display("color {color} uses the same cell for both endpoints")]
    DegeneratePair {
        /// The offending color.
        color: u8,
    },
    /// Two endpoint declarations collide on one cell.
    #[display("cell {cell} serves as an endpoint twice")]
    DuplicateEndpoint {
        /// The shared cell.
        cell: Position,
    },
    /// A bridge lies outside the board.
    #[display("bridge {cell} lies off the board")]
    BridgeOutOfBounds {
        /// The offending cell.
        cell: Position,
    },
    /// A bridge coincides with an endpoint.
    #[display("bridge {cell} coincides with an endpoint")]
    BridgeOnEndpoint {
        /// The shared cell.
        cell: Position,
    },
}

impl PathPuzzle {
    /// Creates a validated puzzle.
    ///
    /// `endpoints[i]` is the endpoint pair of color `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathAuthoringError`] describing the first defect found.
    pub fn new(
        width: u8,
        height: u8,
        endpoints: Vec<(Position, Position)>,
        bridges: impl IntoIterator<Item = Position>,
        max_steps: u32,
    ) -> Result<Self, PathAuthoringError> {
        if endpoints.is_empty() {
            return Err(PathAuthoringError::NoColors);
        }
        let in_bounds = |pos: Position| pos.x() < width && pos.y() < height;

        let mut seen = HashSet::new();
        for (index, &(a, b)) in endpoints.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation)]
            let color = (index + 1) as u8;
            for endpoint in [a, b] {
                if !in_bounds(endpoint) {
                    return Err(PathAuthoringError::EndpointOutOfBounds { color, endpoint });
                }
            }
            if a == b {
                return Err(PathAuthoringError::DegeneratePair { color });
            }
            for endpoint in [a, b] {
                if !seen.insert(endpoint) {
                    return Err(PathAuthoringError::DuplicateEndpoint { cell: endpoint });
                }
            }
        }

        let bridges: HashSet<Position> = bridges.into_iter().collect();
        for &cell in &bridges {
            if !in_bounds(cell) {
                return Err(PathAuthoringError::BridgeOutOfBounds { cell });
            }
            if seen.contains(&cell) {
                return Err(PathAuthoringError::BridgeOnEndpoint { cell });
            }
        }

        Ok(Self {
            width,
            height,
            endpoints,
            bridges,
            max_steps,
        })
    }

    /// Returns the board width in cells.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the board height in cells.
    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the number of colors.
    #[must_use]
    pub fn color_count(&self) -> u8 {
        #[expect(clippy::cast_possible_truncation)]
        let count = self.endpoints.len() as u8;
        count
    }

    /// Returns an iterator over all color ids, `1..=color_count`.
    pub fn colors(&self) -> impl Iterator<Item = u8> + use<> {
        1..=self.color_count()
    }

    /// Returns the endpoint pair of `color`, or `None` for an unknown color.
    #[must_use]
    pub fn endpoints(&self, color: u8) -> Option<(Position, Position)> {
        if color == 0 {
            return None;
        }
        self.endpoints.get(usize::from(color) - 1).copied()
    }

    /// Returns the color whose endpoint sits at `pos`, if any.
    #[must_use]
    pub fn endpoint_color_at(&self, pos: Position) -> Option<u8> {
        self.colors().find(|&color| {
            self.endpoints(color)
                .is_some_and(|(a, b)| pos == a || pos == b)
        })
    }

    /// Returns `true` if `pos` is a declared bridge cell.
    #[must_use]
    pub fn is_bridge(&self, pos: Position) -> bool {
        self.bridges.contains(&pos)
    }

    /// Returns the bridge cells.
    #[must_use]
    pub fn bridges(&self) -> &HashSet<Position> {
        &self.bridges
    }

    /// Returns the step budget for this layout.
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

struct AuthoredPath {
    width: u8,
    height: u8,
    max_steps: u32,
    endpoints: &'static [((u8, u8), (u8, u8))],
    bridges: &'static [(u8, u8)],
}

/// Number of built-in path-connection levels.
pub const PATH_LEVEL_COUNT: usize = 6;

const AUTHORED: [AuthoredPath; PATH_LEVEL_COUNT] = [
    AuthoredPath {
        width: 8,
        height: 8,
        max_steps: 150,
        endpoints: &[
            ((6, 6), (0, 4)),
            ((0, 3), (2, 0)),
            ((3, 0), (5, 3)),
            ((5, 4), (3, 4)),
            ((3, 5), (2, 1)),
        ],
        bridges: &[],
    },
    AuthoredPath {
        width: 16,
        height: 16,
        max_steps: 400,
        endpoints: &[
            ((2, 13), (15, 14)),
            ((14, 14), (14, 12)),
            ((14, 11), (13, 11)),
            ((13, 12), (8, 12)),
            ((9, 12), (10, 3)),
            ((9, 3), (4, 8)),
        ],
        bridges: &[],
    },
    // Block layout: 2-column bands; the bridge sits where two bands border.
    AuthoredPath {
        width: 8,
        height: 8,
        max_steps: 300,
        endpoints: &[
            ((0, 0), (1, 3)),
            ((0, 4), (1, 7)),
            ((2, 0), (3, 2)),
            ((2, 3), (3, 7)),
            ((4, 0), (5, 3)),
            ((4, 4), (5, 7)),
            ((6, 0), (7, 7)),
        ],
        bridges: &[(3, 3)],
    },
    // Four horizontal bands split into halves.
    AuthoredPath {
        width: 16,
        height: 16,
        max_steps: 600,
        endpoints: &[
            ((0, 0), (7, 3)),
            ((8, 0), (15, 3)),
            ((0, 4), (7, 7)),
            ((8, 4), (15, 7)),
            ((0, 8), (7, 11)),
            ((8, 8), (15, 11)),
            ((0, 12), (7, 15)),
            ((8, 12), (15, 15)),
        ],
        bridges: &[(7, 4), (8, 11)],
    },
    // Nine horizontal bands.
    AuthoredPath {
        width: 32,
        height: 32,
        max_steps: 1600,
        endpoints: &[
            ((0, 0), (31, 3)),
            ((0, 4), (31, 6)),
            ((0, 7), (31, 10)),
            ((0, 11), (31, 13)),
            ((0, 14), (31, 17)),
            ((0, 18), (31, 20)),
            ((0, 21), (31, 23)),
            ((0, 24), (31, 27)),
            ((0, 28), (31, 31)),
        ],
        bridges: &[(15, 6), (16, 21)],
    },
    // Ten bands of three rows each; the last color takes five.
    AuthoredPath {
        width: 32,
        height: 32,
        max_steps: 1600,
        endpoints: &[
            ((0, 0), (31, 2)),
            ((0, 3), (31, 5)),
            ((0, 6), (31, 8)),
            ((0, 9), (31, 11)),
            ((0, 12), (31, 14)),
            ((0, 15), (31, 17)),
            ((0, 18), (31, 20)),
            ((0, 21), (31, 23)),
            ((0, 24), (31, 26)),
            ((0, 27), (31, 31)),
        ],
        bridges: &[(10, 3), (21, 3), (10, 20), (21, 20)],
    },
];

/// Builds the built-in path-connection level at `index`.
///
/// # Panics
///
/// Panics if `index` is out of range, or if the authored layout fails
/// validation - a data-authoring defect that must stop construction.
#[must_use]
pub fn path_level(index: usize) -> PathPuzzle {
    let record = &AUTHORED[index];
    let endpoints = record
        .endpoints
        .iter()
        .map(|&((ax, ay), (bx, by))| (Position::new(ax, ay), Position::new(bx, by)))
        .collect();
    let bridges = record
        .bridges
        .iter()
        .map(|&(x, y)| Position::new(x, y));
    PathPuzzle::new(
        record.width,
        record.height,
        endpoints,
        bridges,
        record.max_steps,
    )
    .unwrap_or_else(|err| panic!("authored path level {index} is invalid: {err}"))
}
