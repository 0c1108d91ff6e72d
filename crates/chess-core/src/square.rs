//! Board square representation.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Direction;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase character used in square codes.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Returns the uppercase character used in piece identity codes.
    #[inline]
    pub const fn to_initial(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed in rank-file order: a1 = 0, b1 = 1, ..., h8 = 63.
/// A square's stable human-readable code ("e4") is the key used whenever
/// squares are referenced in persisted move records.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from signed coordinates, or `None` outside the board.
    #[inline]
    pub const fn from_coords(x: i8, y: i8) -> Option<Self> {
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            Some(Square((y * 8 + x) as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from its code (e.g., "e4").
    pub const fn from_code(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % 8) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / 8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the x coordinate (file index) as a signed value.
    #[inline]
    pub const fn x(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// Returns the y coordinate (rank index) as a signed value.
    #[inline]
    pub const fn y(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// Returns the code for this square.
    pub fn code(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns the neighboring square in the given direction, or `None` at
    /// the board edge.
    #[inline]
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        self.toward(direction, 1)
    }

    /// Returns the square reached by stepping `distance` times in the given
    /// direction, or `None` outside the board.
    #[inline]
    pub const fn toward(self, direction: Direction, distance: i8) -> Option<Self> {
        Self::from_coords(
            self.x() + distance * direction.dx(),
            self.y() + distance * direction.dy(),
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}{})", self.file(), self.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Square::from_code(&code)
            .ok_or_else(|| D::Error::custom(format!("invalid square code: {:?}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_from_code() {
        assert_eq!(Square::from_code("a1"), Square::from_index(0));
        assert_eq!(Square::from_code("e4"), Some(Square::new(File::E, Rank::R4)));
        assert_eq!(Square::from_code("h8"), Square::from_index(63));
        assert_eq!(Square::from_code("i1"), None);
        assert_eq!(Square::from_code("a9"), None);
        assert_eq!(Square::from_code(""), None);
    }

    #[test]
    fn square_from_coords_bounds() {
        assert_eq!(Square::from_coords(0, 0), Square::from_code("a1"));
        assert_eq!(Square::from_coords(7, 7), Square::from_code("h8"));
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
    }

    #[test]
    fn square_neighbor() {
        let e4 = Square::from_code("e4").unwrap();
        assert_eq!(e4.neighbor(Direction::North), Square::from_code("e5"));
        assert_eq!(e4.neighbor(Direction::SouthWest), Square::from_code("d3"));
        assert_eq!(e4.toward(Direction::East, 3), Square::from_code("h4"));

        let a1 = Square::from_code("a1").unwrap();
        assert_eq!(a1.neighbor(Direction::West), None);
        assert_eq!(a1.neighbor(Direction::South), None);
    }

    #[test]
    fn square_serde_as_code() {
        let e4 = Square::from_code("e4").unwrap();
        let json = serde_json::to_string(&e4).unwrap();
        assert_eq!(json, "\"e4\"");
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e4);
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }

    proptest! {
        #[test]
        fn code_round_trips(index in 0u8..64) {
            let square = Square::from_index(index).unwrap();
            prop_assert_eq!(Square::from_code(&square.code()), Some(square));
        }
    }
}
