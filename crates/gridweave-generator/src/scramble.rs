use std::collections::HashSet;

use derive_more::Display;
use gridweave_core::Position;
use rand::{Rng, RngExt as _, seq::SliceRandom as _};

/// Levels below this index scramble with [`ScrambleStrategy::Random`] only;
/// levels at or above it draw one advanced strategy per generation attempt.
pub const ADVANCED_TIER: usize = 2;

/// A spatial scramble strategy.
///
/// Each strategy produces an ordered sequence of click positions with a
/// distinct spatial bias. Strategies are stateless and only ever *scramble* a
/// known-solved board; they carry no solving logic. The sequence may come out
/// shorter than `count` when the strategy's cell pool runs dry, and it may
/// contain consecutive duplicates - the retry controller filters those while
/// applying clicks.
///
/// # Examples
///
/// ```
/// use gridweave_generator::{PuzzleSeed, ScrambleStrategy};
///
/// let mut rng = PuzzleSeed::random().rng("docs");
/// let clicks = ScrambleStrategy::Checkerboard.positions(&mut rng, 8, 8, 10);
/// assert!(clicks.len() <= 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScrambleStrategy {
    /// Uniform random positions, rejecting an immediate repeat.
    #[display("random")]
    Random,
    /// Whole rows or whole columns in random order.
    #[display("stripes")]
    Stripes,
    /// Cells drawn from the diagonals (constant `row - col`).
    #[display("diagonal")]
    Diagonal,
    /// Concentric rings, outermost first, shuffled within each ring.
    #[display("ring")]
    Ring,
    /// Clustered blobs around random centers.
    #[display("cluster")]
    Cluster,
    /// One parity class of the checkerboard.
    #[display("checkerboard")]
    Checkerboard,
    /// The middle row and middle column.
    #[display("cross")]
    Cross,
}

impl ScrambleStrategy {
    /// The advanced strategies eligible at or above [`ADVANCED_TIER`].
    pub const ADVANCED: [Self; 6] = [
        Self::Stripes,
        Self::Diagonal,
        Self::Ring,
        Self::Cluster,
        Self::Checkerboard,
        Self::Cross,
    ];

    /// Picks the strategy for one generation attempt of `level_index`.
    #[must_use]
    pub fn for_level<R: Rng + ?Sized>(rng: &mut R, level_index: usize) -> Self {
        if level_index < ADVANCED_TIER {
            Self::Random
        } else {
            Self::ADVANCED[rng.random_range(0..Self::ADVANCED.len())]
        }
    }

    /// Produces the click sequence for a `width` x `height` board.
    #[must_use]
    pub fn positions<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        width: u8,
        height: u8,
        count: usize,
    ) -> Vec<Position> {
        match self {
            Self::Random => random(rng, width, height, count),
            Self::Stripes => stripes(rng, width, height, count),
            Self::Diagonal => diagonal(rng, width, height, count),
            Self::Ring => ring(rng, width, height, count),
            Self::Cluster => cluster(rng, width, height, count),
            Self::Checkerboard => checkerboard(rng, width, height, count),
            Self::Cross => cross(rng, width, height, count),
        }
    }
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8) -> Position {
    Position::new(rng.random_range(0..width), rng.random_range(0..height))
}

fn random<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    let mut clicks = Vec::with_capacity(count);
    let mut prev = None;
    for _ in 0..count * 3 {
        if clicks.len() >= count {
            break;
        }
        let pos = random_position(rng, width, height);
        if Some(pos) == prev {
            continue;
        }
        clicks.push(pos);
        prev = Some(pos);
    }
    clicks
}

fn stripes<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    let mut clicks = Vec::with_capacity(count);
    if rng.random_bool(0.5) {
        let mut rows: Vec<u8> = (0..height).collect();
        rows.shuffle(rng);
        'rows: for y in rows {
            let mut cols: Vec<u8> = (0..width).collect();
            cols.shuffle(rng);
            for x in cols {
                if clicks.len() >= count {
                    break 'rows;
                }
                clicks.push(Position::new(x, y));
            }
        }
    } else {
        let mut cols: Vec<u8> = (0..width).collect();
        cols.shuffle(rng);
        'cols: for x in cols {
            let mut rows: Vec<u8> = (0..height).collect();
            rows.shuffle(rng);
            for y in rows {
                if clicks.len() >= count {
                    break 'cols;
                }
                clicks.push(Position::new(x, y));
            }
        }
    }
    clicks
}

fn diagonal<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    let mut cells = Vec::new();
    for d in -(i16::from(height) - 1)..i16::from(width) {
        for y in 0..height {
            let x = i16::from(y) + d;
            if (0..i16::from(width)).contains(&x) {
                #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                cells.push(Position::new(x as u8, y));
            }
        }
    }
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}

fn ring<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    let mut cells = Vec::new();
    for layer in 0..=width.max(height) / 2 {
        let mut ring: Vec<Position> = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let dist = y.min(x).min(height - 1 - y).min(width - 1 - x);
                if dist == layer {
                    ring.push(Position::new(x, y));
                }
            }
        }
        ring.shuffle(rng);
        cells.extend(ring);
    }
    cells.truncate(count);
    cells
}

fn cluster<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    const OFFSETS: [(i8, i8); 9] = [
        (0, 0),
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (1, 1),
        (-1, 1),
        (1, -1),
    ];
    let centers = rng.random_range(2..=(count / 2).max(2));
    let mut clicks = Vec::with_capacity(count);
    let mut used = HashSet::new();
    'centers: for _ in 0..centers {
        let center = random_position(rng, width, height);
        for (dx, dy) in OFFSETS {
            if clicks.len() >= count {
                break 'centers;
            }
            if let Some(pos) = center.offset(dx, dy)
                && pos.x() < width
                && pos.y() < height
                && used.insert(pos)
            {
                clicks.push(pos);
            }
        }
    }
    // If the clusters overlapped too much, pad with random cells.
    while clicks.len() < count {
        clicks.push(random_position(rng, width, height));
    }
    clicks
}

fn checkerboard<R: Rng + ?Sized>(
    rng: &mut R,
    width: u8,
    height: u8,
    count: usize,
) -> Vec<Position> {
    let parity = rng.random_range(0..2_u16);
    let mut cells: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .filter(|pos| (u16::from(pos.x()) + u16::from(pos.y())) % 2 == parity)
        .collect();
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}

fn cross<R: Rng + ?Sized>(rng: &mut R, width: u8, height: u8, count: usize) -> Vec<Position> {
    let mid_x = width / 2;
    let mid_y = height / 2;
    let mut cells: Vec<Position> = (0..width).map(|x| Position::new(x, mid_y)).collect();
    // Vertical bar, skipping the already-counted center.
    cells.extend((0..height).filter(|&y| y != mid_y).map(|y| Position::new(mid_x, y)));
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(42)
    }

    fn assert_in_bounds(clicks: &[Position], width: u8, height: u8) {
        for pos in clicks {
            assert!(pos.x() < width && pos.y() < height, "{pos} out of bounds");
        }
    }

    #[test]
    fn test_every_strategy_stays_in_bounds() {
        let strategies = [
            ScrambleStrategy::Random,
            ScrambleStrategy::Stripes,
            ScrambleStrategy::Diagonal,
            ScrambleStrategy::Ring,
            ScrambleStrategy::Cluster,
            ScrambleStrategy::Checkerboard,
            ScrambleStrategy::Cross,
        ];
        let mut rng = rng();
        for strategy in strategies {
            for (width, height) in [(3, 3), (5, 7), (8, 8)] {
                let clicks = strategy.positions(&mut rng, width, height, 12);
                assert_in_bounds(&clicks, width, height);
            }
        }
    }

    #[test]
    fn test_random_rejects_immediate_repeats() {
        let mut rng = rng();
        for _ in 0..20 {
            let clicks = ScrambleStrategy::Random.positions(&mut rng, 2, 2, 8);
            for pair in clicks.windows(2) {
                assert_ne!(pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_stripes_fills_whole_lines_first() {
        let mut rng = rng();
        let clicks = ScrambleStrategy::Stripes.positions(&mut rng, 4, 4, 4);
        assert_eq!(clicks.len(), 4);
        // The first four clicks all come from one row or one column.
        let same_row = clicks.iter().all(|p| p.y() == clicks[0].y());
        let same_col = clicks.iter().all(|p| p.x() == clicks[0].x());
        assert!(same_row || same_col);
    }

    #[test]
    fn test_ring_emits_outermost_first() {
        let mut rng = rng();
        let clicks = ScrambleStrategy::Ring.positions(&mut rng, 5, 5, 16);
        // Ring 0 of a 5x5 board has 16 cells; all emitted clicks border an edge.
        assert_eq!(clicks.len(), 16);
        for pos in &clicks {
            assert!(pos.x() == 0 || pos.x() == 4 || pos.y() == 0 || pos.y() == 4);
        }
    }

    #[test]
    fn test_checkerboard_is_single_parity() {
        let mut rng = rng();
        let clicks = ScrambleStrategy::Checkerboard.positions(&mut rng, 6, 6, 10);
        let parity = (clicks[0].x() + clicks[0].y()) % 2;
        for pos in &clicks {
            assert_eq!((pos.x() + pos.y()) % 2, parity);
        }
    }

    #[test]
    fn test_cross_covers_middle_lines_only() {
        let mut rng = rng();
        let clicks = ScrambleStrategy::Cross.positions(&mut rng, 5, 5, 9);
        assert_eq!(clicks.len(), 9);
        for pos in &clicks {
            assert!(pos.x() == 2 || pos.y() == 2);
        }
        // Center appears exactly once.
        let centers = clicks
            .iter()
            .filter(|&&p| p == Position::new(2, 2))
            .count();
        assert_eq!(centers, 1);
    }

    #[test]
    fn test_cluster_pads_to_count() {
        let mut rng = rng();
        let clicks = ScrambleStrategy::Cluster.positions(&mut rng, 8, 8, 10);
        assert_eq!(clicks.len(), 10);
        assert_in_bounds(&clicks, 8, 8);
    }

    #[test]
    fn test_tier_selection() {
        let mut rng = rng();
        assert_eq!(
            ScrambleStrategy::for_level(&mut rng, 0),
            ScrambleStrategy::Random
        );
        assert_eq!(
            ScrambleStrategy::for_level(&mut rng, 1),
            ScrambleStrategy::Random
        );
        for _ in 0..16 {
            let strategy = ScrambleStrategy::for_level(&mut rng, 4);
            assert!(ScrambleStrategy::ADVANCED.contains(&strategy));
        }
    }
}
