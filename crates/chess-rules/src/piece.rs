//! The runtime piece aggregate.

use chess_core::{Color, Direction, PieceId, PieceKind, Square};

use crate::scanner::{Behavior, Scanner};

/// Index of a piece in the board's piece arena.
///
/// Arena slots are never reused: a captured piece stays in its slot,
/// flagged dead, so references recorded during a turn stay valid.
pub(crate) type PieceRef = usize;

/// A piece on the board (or in a graveyard).
///
/// A piece owns one scanner per direction it can move in. Scanner sets are
/// fixed per piece type, except that the expirable ones (a pawn's double
/// step, a king's castling) are removed forever the first time the
/// relevant piece moves or dies — their absence *is* the eligibility flag.
#[derive(Debug, Clone)]
pub(crate) struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub alive: bool,
    pub scanners: Vec<Scanner>,
    /// When the own king is in check (or this piece is pinned), the set of
    /// squares this piece may still move to. Recomputed every turn.
    pub forced_targets: Option<Vec<Square>>,
    /// True for exactly one opposing turn after this pawn double-stepped.
    pub allows_en_passant: bool,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            id,
            kind,
            color,
            square,
            alive: true,
            scanners: scanners_for(kind, color),
            forced_targets: None,
            allows_en_passant: false,
        }
    }

    /// Discards all per-turn scan state.
    pub(crate) fn clean(&mut self) {
        self.forced_targets = None;
        for scanner in &mut self.scanners {
            scanner.clean();
        }
    }

    /// Narrows this piece's allowed destinations to the given zone.
    ///
    /// A second restriction in the same turn intersects with the first: a
    /// piece pinned while its king is in check must satisfy both.
    pub(crate) fn restrict(&mut self, zone: &[Square]) {
        match &mut self.forced_targets {
            None => self.forced_targets = Some(zone.to_vec()),
            Some(targets) => targets.retain(|square| zone.contains(square)),
        }
    }

    /// Removes the pawn's initial double-step ability.
    pub(crate) fn expire_double_move(&mut self) {
        self.scanners
            .retain(|scanner| scanner.behavior != Behavior::DoubleMove);
    }

    /// Removes both castling abilities (the king has moved).
    pub(crate) fn expire_castling(&mut self) {
        self.scanners
            .retain(|scanner| scanner.behavior != Behavior::Castling);
    }

    /// Removes the castling ability toward one side (that rook has moved
    /// or died).
    pub(crate) fn expire_castling_toward(&mut self, direction: Direction) {
        self.scanners.retain(|scanner| {
            scanner.behavior != Behavior::Castling || scanner.direction != direction
        });
    }
}

/// Builds the scanner set a piece type starts with.
///
/// Castling scanners are not part of the king's base set; they are wired
/// at game setup, once the rooks exist.
fn scanners_for(kind: PieceKind, color: Color) -> Vec<Scanner> {
    match kind {
        PieceKind::King => Direction::LINES
            .into_iter()
            .map(|d| Scanner::new(d, Behavior::ShortSensitive))
            .collect(),
        PieceKind::Queen => Direction::LINES
            .into_iter()
            .map(|d| Scanner::new(d, Behavior::Line))
            .collect(),
        PieceKind::Rook => Direction::STRAIGHTS
            .into_iter()
            .map(|d| Scanner::new(d, Behavior::Line))
            .collect(),
        PieceKind::Bishop => Direction::DIAGONALS
            .into_iter()
            .map(|d| Scanner::new(d, Behavior::Line))
            .collect(),
        PieceKind::Knight => Direction::KNIGHT_JUMPS
            .into_iter()
            .map(|d| Scanner::new(d, Behavior::Short))
            .collect(),
        PieceKind::Pawn => {
            let (forward, east_attack, west_attack) = match color {
                Color::White => (
                    Direction::North,
                    Direction::NorthEast,
                    Direction::NorthWest,
                ),
                Color::Black => (
                    Direction::South,
                    Direction::SouthEast,
                    Direction::SouthWest,
                ),
            };
            vec![
                Scanner::new(forward, Behavior::DoubleMove),
                Scanner::new(forward, Behavior::PawnInoffensive),
                Scanner::new(east_attack, Behavior::PawnOffensive),
                Scanner::new(west_attack, Behavior::PawnOffensive),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::File;

    fn pawn() -> Piece {
        Piece::new(
            PieceId::new(Color::White, PieceKind::Pawn, File::E),
            PieceKind::Pawn,
            Color::White,
            Square::from_code("e2").unwrap(),
        )
    }

    #[test]
    fn scanner_counts_per_kind() {
        let square = Square::from_code("e4").unwrap();
        let count = |kind| {
            Piece::new(
                PieceId::new(Color::White, kind, File::E),
                kind,
                Color::White,
                square,
            )
            .scanners
            .len()
        };
        assert_eq!(count(PieceKind::King), 8);
        assert_eq!(count(PieceKind::Queen), 8);
        assert_eq!(count(PieceKind::Rook), 4);
        assert_eq!(count(PieceKind::Bishop), 4);
        assert_eq!(count(PieceKind::Knight), 8);
        assert_eq!(count(PieceKind::Pawn), 4);
    }

    #[test]
    fn restriction_intersects() {
        let mut piece = pawn();
        let e3 = Square::from_code("e3").unwrap();
        let e4 = Square::from_code("e4").unwrap();
        let d3 = Square::from_code("d3").unwrap();

        piece.restrict(&[e3, e4]);
        piece.restrict(&[e4, d3]);
        assert_eq!(piece.forced_targets, Some(vec![e4]));

        piece.restrict(&[d3]);
        assert_eq!(piece.forced_targets, Some(vec![]));
    }

    #[test]
    fn double_move_expires() {
        let mut piece = pawn();
        assert!(piece
            .scanners
            .iter()
            .any(|s| s.behavior == Behavior::DoubleMove));
        piece.expire_double_move();
        assert!(!piece
            .scanners
            .iter()
            .any(|s| s.behavior == Behavior::DoubleMove));
        assert_eq!(piece.scanners.len(), 3);
    }
}
