use derive_more::Display;

use crate::Position;

/// Cell alphabet for the maze-family puzzles.
///
/// A maze board is a [`Grid<Tile>`](crate::Grid); walls block movement, gems
/// are collected on contact, the exit is the terminal cell of the teleport
/// maze, and portal cells warp the mover to their paired cell (the pairing
/// itself lives in a [`TeleportMap`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Tile {
    /// Open floor.
    #[default]
    #[display("floor")]
    Floor,
    /// Immovable blocked cell.
    #[display("wall")]
    Wall,
    /// Collectible; disappears on contact.
    #[display("gem")]
    Gem,
    /// Terminal cell of the teleport maze.
    #[display("exit")]
    Exit,
    /// One half of a teleporter pair, tagged with the pair id.
    #[display("portal {_0}")]
    Portal(u8),
}

impl Tile {
    /// Returns `true` for cells that block movement.
    #[must_use]
    #[inline]
    pub const fn blocks(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Returns `true` for gem cells.
    #[must_use]
    #[inline]
    pub const fn is_gem(self) -> bool {
        matches!(self, Self::Gem)
    }
}

/// A symmetric teleporter pairing.
///
/// Stepping onto either cell of a pair substitutes arrival at the other cell.
/// Pairs are few (two or three per board), so lookup is a linear scan.
///
/// # Examples
///
/// ```
/// use gridweave_core::{Position, TeleportMap};
///
/// let mut map = TeleportMap::new();
/// map.link(Position::new(0, 0), Position::new(5, 5));
///
/// assert_eq!(map.warp(Position::new(5, 5)), Some(Position::new(0, 0)));
/// assert_eq!(map.warp(Position::new(1, 1)), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeleportMap {
    pairs: Vec<(Position, Position)>,
}

impl TeleportMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Links `a` and `b` as a teleporter pair.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or if either cell already belongs to a pair.
    pub fn link(&mut self, a: Position, b: Position) {
        assert!(a != b, "cannot pair {a} with itself");
        assert!(
            self.warp(a).is_none() && self.warp(b).is_none(),
            "cell already belongs to a teleporter pair"
        );
        self.pairs.push((a, b));
    }

    /// Returns the paired destination of `pos`, or `None` if `pos` is not a
    /// teleporter cell.
    #[must_use]
    pub fn warp(&self, pos: Position) -> Option<Position> {
        self.pairs.iter().find_map(|&(a, b)| {
            if pos == a {
                Some(b)
            } else if pos == b {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns an iterator over the pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.pairs.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warp_is_symmetric() {
        let mut map = TeleportMap::new();
        map.link(Position::new(1, 2), Position::new(6, 3));
        map.link(Position::new(0, 7), Position::new(7, 0));

        assert_eq!(map.warp(Position::new(1, 2)), Some(Position::new(6, 3)));
        assert_eq!(map.warp(Position::new(6, 3)), Some(Position::new(1, 2)));
        assert_eq!(map.warp(Position::new(7, 0)), Some(Position::new(0, 7)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    #[should_panic(expected = "already belongs")]
    fn test_link_rejects_reuse() {
        let mut map = TeleportMap::new();
        map.link(Position::new(1, 1), Position::new(2, 2));
        map.link(Position::new(2, 2), Position::new(3, 3));
    }
}
