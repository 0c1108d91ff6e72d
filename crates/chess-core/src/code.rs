//! Durable piece identity codes.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{Color, File, PieceKind};

/// Errors that can occur when parsing identity codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("piece code must be 3 characters, got {0:?}")]
    BadLength(String),

    #[error("invalid color initial {0:?}")]
    BadColor(char),

    #[error("invalid piece initial {0:?}")]
    BadKind(char),

    #[error("invalid file initial {0:?}")]
    BadFile(char),
}

/// The durable identity code of a piece: owner initial, original-type
/// initial, and origin-file letter, e.g. `"WPE"` for white's e-pawn.
///
/// The code never changes once a piece is created: it survives moves and
/// even promotion (a promoted pawn keeps its pawn code). Identity codes,
/// not transient references, are the key used by move records, history,
/// and persisted games.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    color: Color,
    kind: PieceKind,
    file: File,
}

impl PieceId {
    /// Creates an identity code from owner, original type, and origin file.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, file: File) -> Self {
        PieceId { color, kind, file }
    }

    /// Returns the owning side.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Returns the type the piece was created as (not its current type
    /// after promotion).
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Returns the origin file letter.
    #[inline]
    pub const fn file(self) -> File {
        self.file
    }
}

impl FromStr for PieceId {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(CodeError::BadLength(s.to_string()));
        }
        let color = Color::from_initial(chars[0]).ok_or(CodeError::BadColor(chars[0]))?;
        let kind = PieceKind::from_initial(chars[1]).ok_or(CodeError::BadKind(chars[1]))?;
        let file = File::from_char(chars[2]).ok_or(CodeError::BadFile(chars[2]))?;
        Ok(PieceId::new(color, kind, file))
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.color.initial(),
            self.kind.initial(),
            self.file.to_initial()
        )
    }
}

impl fmt::Debug for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceId({})", self)
    }
}

impl Serialize for PieceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PieceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_format() {
        let id = PieceId::new(Color::White, PieceKind::Pawn, File::E);
        assert_eq!(id.to_string(), "WPE");
        let id = PieceId::new(Color::Black, PieceKind::Knight, File::G);
        assert_eq!(id.to_string(), "BNG");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "WP".parse::<PieceId>(),
            Err(CodeError::BadLength("WP".to_string()))
        );
        assert_eq!("XPE".parse::<PieceId>(), Err(CodeError::BadColor('X')));
        assert_eq!("WXE".parse::<PieceId>(), Err(CodeError::BadKind('X')));
        assert_eq!("WPZ".parse::<PieceId>(), Err(CodeError::BadFile('Z')));
    }

    #[test]
    fn serde_as_code() {
        let id = PieceId::new(Color::Black, PieceKind::Rook, File::A);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"BRA\"");
        let back: PieceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<PieceId>("\"???\"").is_err());
    }

    proptest! {
        #[test]
        fn codes_round_trip(
            color_index in 0usize..2,
            kind_index in 0usize..6,
            file_index in 0usize..8,
        ) {
            let id = PieceId::new(
                Color::ALL[color_index],
                PieceKind::ALL[kind_index],
                File::ALL[file_index],
            );
            prop_assert_eq!(id.to_string().parse::<PieceId>(), Ok(id));
        }
    }
}
