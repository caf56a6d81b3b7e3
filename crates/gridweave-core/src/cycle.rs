use std::fmt;

use crate::{Direction, Grid, Position};

/// Board for the color-cycle puzzle.
///
/// Every cell holds a palette index in `0..palette`. Clicking a cell advances
/// it and its four orthogonal in-bounds neighbors one step through the cycle;
/// the puzzle is solved when every cell carries the target label.
///
/// [`apply_click`](Self::apply_click) is pure: it returns a new board and
/// never mutates the receiver, so generation can freely discard rejected
/// candidates and search routines can fan out from one state.
///
/// # Examples
///
/// ```
/// use gridweave_core::{CycleBoard, Position};
///
/// let board = CycleBoard::uniform(3, 3, 2, 1);
/// let clicked = board.apply_click(Position::new(0, 0));
///
/// // The clicked corner and its two in-bounds neighbors flipped to 0.
/// assert_eq!(clicked.grid()[Position::new(0, 0)], 0);
/// assert_eq!(clicked.grid()[Position::new(1, 0)], 0);
/// assert_eq!(clicked.grid()[Position::new(0, 1)], 0);
/// assert_eq!(clicked.grid()[Position::new(1, 1)], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleBoard {
    grid: Grid<u8>,
    palette: u8,
}

impl CycleBoard {
    /// Creates a board with every cell set to `label`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, if `palette < 2`, or if `label`
    /// is not a member of the palette.
    #[must_use]
    pub fn uniform(width: u8, height: u8, palette: u8, label: u8) -> Self {
        assert!(palette >= 2, "a color cycle needs at least two colors");
        assert!(label < palette, "label {label} outside palette 0..{palette}");
        Self {
            grid: Grid::new(width, height, label),
            palette,
        }
    }

    /// Returns the underlying label grid.
    #[must_use]
    #[inline]
    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    /// Returns the number of colors in the cycle.
    #[must_use]
    #[inline]
    pub const fn palette(&self) -> u8 {
        self.palette
    }

    /// Returns `true` if every cell carries `label`.
    #[must_use]
    pub fn is_uniform(&self, label: u8) -> bool {
        self.grid.iter().all(|(_, &cell)| cell == label)
    }

    /// Applies one click at `pos` and returns the resulting board.
    ///
    /// The clicked cell and its four orthogonal neighbors each advance one
    /// step through the color cycle. Out-of-bounds cells (including an
    /// off-board `pos`) are skipped; the call always succeeds.
    #[must_use]
    pub fn apply_click(&self, pos: Position) -> Self {
        let mut next = self.clone();
        next.advance(pos);
        for dir in Direction::ALL {
            if let Some(step) = pos.step(dir) {
                next.advance(step);
            }
        }
        next
    }

    /// Advances a single in-bounds cell one step through the cycle.
    ///
    /// A label outside the palette is treated as palette index 0 before
    /// advancing.
    fn advance(&mut self, pos: Position) {
        if !self.grid.contains(pos) {
            return;
        }
        let current = self.grid[pos];
        let index = if current < self.palette { current } else { 0 };
        self.grid[pos] = (index + 1) % self.palette;
    }
}

impl fmt::Display for CycleBoard {
    /// Formats the board as one row of palette indices per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                write!(f, "{}", self.grid[Position::new(x, y)])?;
            }
            if y + 1 < self.grid.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
