//! Piece type representation.

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Knight,
    Bishop,
    Pawn,
}

impl PieceKind {
    /// All piece types in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Pawn,
    ];

    /// The four types a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ];

    /// Returns the initial used in piece identity codes.
    ///
    /// The knight uses 'N' so that codes stay unambiguous against the king.
    #[inline]
    pub const fn initial(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Pawn => 'P',
        }
    }

    /// Parses a code initial back into a piece type.
    #[inline]
    pub const fn from_initial(c: char) -> Option<Self> {
        match c {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_initial(kind.initial()), Some(kind));
        }
        assert_eq!(PieceKind::from_initial('x'), None);
    }

    #[test]
    fn promotions_exclude_king_and_pawn() {
        assert!(!PieceKind::PROMOTIONS.contains(&PieceKind::King));
        assert!(!PieceKind::PROMOTIONS.contains(&PieceKind::Pawn));
        assert_eq!(PieceKind::PROMOTIONS[0], PieceKind::Queen);
    }
}
