//! Movement direction vectors.

use crate::Square;

/// One of the sixteen movement vectors: the eight queen-line directions and
/// the eight knight offsets.
///
/// Directions are stateless unit vectors; scanners step a square repeatedly
/// (lines) or once (everything else) along them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl Direction {
    /// All sixteen directions.
    pub const ALL: [Direction; 16] = [
        Direction::North,
        Direction::NorthNorthEast,
        Direction::NorthEast,
        Direction::EastNorthEast,
        Direction::East,
        Direction::EastSouthEast,
        Direction::SouthEast,
        Direction::SouthSouthEast,
        Direction::South,
        Direction::SouthSouthWest,
        Direction::SouthWest,
        Direction::WestSouthWest,
        Direction::West,
        Direction::WestNorthWest,
        Direction::NorthWest,
        Direction::NorthNorthWest,
    ];

    /// The eight queen-line directions.
    pub const LINES: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four straight (rook) directions.
    pub const STRAIGHTS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The four diagonal (bishop) directions.
    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// The eight knight offsets.
    pub const KNIGHT_JUMPS: [Direction; 8] = [
        Direction::NorthNorthEast,
        Direction::EastNorthEast,
        Direction::EastSouthEast,
        Direction::SouthSouthEast,
        Direction::SouthSouthWest,
        Direction::WestSouthWest,
        Direction::WestNorthWest,
        Direction::NorthNorthWest,
    ];

    /// Returns the x component of the vector.
    #[inline]
    pub const fn dx(self) -> i8 {
        match self {
            Direction::North => 0,
            Direction::NorthNorthEast => 1,
            Direction::NorthEast => 1,
            Direction::EastNorthEast => 2,
            Direction::East => 1,
            Direction::EastSouthEast => 2,
            Direction::SouthEast => 1,
            Direction::SouthSouthEast => 1,
            Direction::South => 0,
            Direction::SouthSouthWest => -1,
            Direction::SouthWest => -1,
            Direction::WestSouthWest => -2,
            Direction::West => -1,
            Direction::WestNorthWest => -2,
            Direction::NorthWest => -1,
            Direction::NorthNorthWest => -1,
        }
    }

    /// Returns the y component of the vector.
    #[inline]
    pub const fn dy(self) -> i8 {
        match self {
            Direction::North => 1,
            Direction::NorthNorthEast => 2,
            Direction::NorthEast => 1,
            Direction::EastNorthEast => 1,
            Direction::East => 0,
            Direction::EastSouthEast => -1,
            Direction::SouthEast => -1,
            Direction::SouthSouthEast => -2,
            Direction::South => -1,
            Direction::SouthSouthWest => -2,
            Direction::SouthWest => -1,
            Direction::WestSouthWest => -1,
            Direction::West => 0,
            Direction::WestNorthWest => 1,
            Direction::NorthWest => 1,
            Direction::NorthNorthWest => 2,
        }
    }

    /// Returns the direction whose 1-7x multiple matches the given delta,
    /// if any.
    pub fn of_delta(dx: i8, dy: i8) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.fits(dx, dy))
    }

    /// Returns the direction that eventually leads from one square to
    /// another, if any.
    pub fn between(from: Square, to: Square) -> Option<Self> {
        Self::of_delta(to.x() - from.x(), to.y() - from.y())
    }

    fn fits(self, dx: i8, dy: i8) -> bool {
        (1..8).any(|i| self.dx() * i == dx && self.dy() * i == dy)
    }
}
