use std::collections::HashSet;

use gridweave_core::{Direction, Position};
use log::debug;
use rand::{Rng as _, RngExt as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

use crate::PuzzleSeed;

/// A generated block-push puzzle.
///
/// The player pushes blocks one cell at a time; the puzzle is solved when
/// every target cell carries a block. Each block is placed with a verified
/// clear straight push path onto its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SokobanPuzzle {
    /// Board width in cells.
    pub width: u8,
    /// Board height in cells.
    pub height: u8,
    /// Wall cells.
    pub walls: HashSet<Position>,
    /// Initial block positions.
    pub blocks: Vec<Position>,
    /// Target cells; the win condition is every target covered by a block.
    pub targets: Vec<Position>,
    /// The player start cell.
    pub start: Position,
    /// Step budget per life.
    pub max_steps: u32,
    /// The seed this instance was generated from.
    pub seed: PuzzleSeed,
}

/// Generator for the block-push puzzle.
///
/// Scatters border and interior walls, then places each target/block pair so
/// that the block has a straight, wall-free push lane onto its target. A
/// pair that cannot be lane-placed falls back to a free interior cell.
#[derive(Debug, Clone, Copy)]
pub struct SokobanGenerator {
    width: u8,
    height: u8,
    pairs: usize,
    max_steps: u32,
}

impl SokobanGenerator {
    /// Creates a generator for a `width` x `height` board with two
    /// block/target pairs and a step budget of `max_steps`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 7; lane placement needs interior
    /// room around the targets.
    #[must_use]
    pub fn new(width: u8, height: u8, max_steps: u32) -> Self {
        assert!(width >= 7 && height >= 7, "block push needs a 7x7 board");
        Self {
            width,
            height,
            pairs: 2,
            max_steps,
        }
    }

    /// Generates an instance from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> SokobanPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates an instance reproducibly from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> SokobanPuzzle {
        let mut rng = seed.rng("block-push");
        let mut walls = HashSet::new();
        let start = Position::new(1, 1);

        // Broken border: each edge cell is a wall with probability 0.4,
        // leaving gaps for an open feel.
        for x in 0..self.width {
            for y in [0, self.height - 1] {
                if rng.random_bool(0.4) {
                    walls.insert(Position::new(x, y));
                }
            }
        }
        for y in 0..self.height {
            for x in [0, self.width - 1] {
                if rng.random_bool(0.4) {
                    walls.insert(Position::new(x, y));
                }
            }
        }

        let interior = rng.random_range(6..=10);
        for _ in 0..interior {
            for _attempt in 0..50 {
                let pos = Position::new(
                    rng.random_range(1..=self.width - 2),
                    rng.random_range(1..=self.height - 2),
                );
                if pos != start && !walls.contains(&pos) {
                    walls.insert(pos);
                    break;
                }
            }
        }
        walls.remove(&start);

        let mut used: HashSet<Position> = walls.clone();
        used.insert(start);

        let mut blocks = Vec::with_capacity(self.pairs);
        let mut targets = Vec::with_capacity(self.pairs);
        for _pair in 0..self.pairs {
            let Some(target) = self.place_target(&mut rng, &mut used) else {
                continue;
            };
            let block = self
                .place_block_with_lane(&mut rng, &walls, &mut used, target)
                .or_else(|| self.place_block_anywhere(&mut rng, &mut used));
            if let Some(block) = block {
                targets.push(target);
                blocks.push(block);
            } else {
                debug!("dropping block/target pair: no free cell for the block");
                used.remove(&target);
            }
        }

        SokobanPuzzle {
            width: self.width,
            height: self.height,
            walls,
            blocks,
            targets,
            start,
            max_steps: self.max_steps,
            seed,
        }
    }

    fn place_target(&self, rng: &mut Pcg64, used: &mut HashSet<Position>) -> Option<Position> {
        for _attempt in 0..200 {
            let pos = Position::new(
                rng.random_range(2..=self.width - 3),
                rng.random_range(2..=self.height - 3),
            );
            if !used.contains(&pos) {
                used.insert(pos);
                return Some(pos);
            }
        }
        None
    }

    /// Places a block 2-4 cells from `target` along one axis, requiring
    /// every lane cell strictly between them to be wall-free so the block
    /// can be pushed straight home.
    fn place_block_with_lane(
        &self,
        rng: &mut Pcg64,
        walls: &HashSet<Position>,
        used: &mut HashSet<Position>,
        target: Position,
    ) -> Option<Position> {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        for dir in directions {
            let (dx, dy) = dir.delta();
            let distance = rng.random_range(2..=4_i8);
            let Some(block) = target.offset(dx * distance, dy * distance) else {
                continue;
            };
            if block.x() >= self.width || block.y() >= self.height || used.contains(&block) {
                continue;
            }
            let lane_clear = (1..distance).all(|step| {
                target
                    .offset(dx * step, dy * step)
                    .is_some_and(|cell| !walls.contains(&cell))
            });
            if lane_clear {
                used.insert(block);
                return Some(block);
            }
        }
        None
    }

    fn place_block_anywhere(
        &self,
        rng: &mut Pcg64,
        used: &mut HashSet<Position>,
    ) -> Option<Position> {
        for _attempt in 0..100 {
            let pos = Position::new(
                rng.random_range(1..=self.width - 2),
                rng.random_range(1..=self.height - 2),
            );
            if !used.contains(&pos) {
                used.insert(pos);
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placements_do_not_collide() {
        let generator = SokobanGenerator::new(10, 10, 100);
        for byte in 0..8 {
            let puzzle = generator.generate_with_seed(PuzzleSeed::from_bytes([byte; 32]));
            assert_eq!(puzzle.blocks.len(), puzzle.targets.len());
            let mut seen = HashSet::new();
            for &pos in puzzle.blocks.iter().chain(&puzzle.targets) {
                assert!(!puzzle.walls.contains(&pos), "{pos} placed on a wall");
                assert_ne!(pos, puzzle.start);
                assert!(seen.insert(pos), "{pos} placed twice");
            }
        }
    }

    #[test]
    fn test_start_is_open() {
        let generator = SokobanGenerator::new(10, 10, 100);
        for byte in 0..8 {
            let puzzle = generator.generate_with_seed(PuzzleSeed::from_bytes([byte; 32]));
            assert!(!puzzle.walls.contains(&puzzle.start));
        }
    }

    #[test]
    fn test_same_seed_reproduces_instance() {
        let generator = SokobanGenerator::new(10, 10, 100);
        let seed = PuzzleSeed::from_bytes([77; 32]);
        assert_eq!(
            generator.generate_with_seed(seed),
            generator.generate_with_seed(seed)
        );
    }
}
