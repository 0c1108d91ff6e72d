//! Per-side aggregates: roster, graveyard, and side-level queries.

use chess_core::Color;

use crate::board::Board;
use crate::piece::PieceRef;
use crate::possibility::MoveRef;

/// One side's piece bookkeeping.
///
/// The roster holds the living pieces in creation order; captured pieces
/// move to the graveyard and never return (a promoted pawn also ends
/// there, replaced by its promotion piece in the roster).
#[derive(Debug, Clone, Default)]
pub(crate) struct Side {
    pub roster: Vec<PieceRef>,
    pub graveyard: Vec<PieceRef>,
    pub king: Option<PieceRef>,
}

impl Board {
    /// Is this side's king currently attacked?
    pub(crate) fn in_check(&self, color: Color) -> bool {
        match self.sides[color.index()].king {
            Some(king) => self.threat_at(self.pieces[king].square, color) > 0,
            None => false,
        }
    }

    /// Does this side have any legal move at all? Empty means the game is
    /// over: checkmate if the king is attacked, stalemate otherwise.
    pub(crate) fn has_legal_move(&self, color: Color) -> bool {
        self.sides[color.index()]
            .roster
            .iter()
            .any(|&piece| !self.legal_moves_of(piece).is_empty())
    }

    /// The side's aggregated legal-move union, in roster order.
    pub(crate) fn legal_moves_for_side(&self, color: Color) -> Vec<MoveRef> {
        self.sides[color.index()]
            .roster
            .iter()
            .flat_map(|&piece| self.legal_moves_of(piece))
            .collect()
    }

    /// One piece's legal candidates, in scanner order.
    pub(crate) fn legal_moves_of(&self, piece: PieceRef) -> Vec<MoveRef> {
        self.pieces[piece]
            .scanners
            .iter()
            .flat_map(|scanner| scanner.moves.iter().copied())
            .filter(|&m| self.moves[m].quality.legal())
            .collect()
    }

    /// Finds the executable candidate matching a submission, if the piece
    /// belongs to the given side and the move is currently legal.
    pub(crate) fn executable_move(
        &self,
        color: Color,
        piece: chess_core::PieceId,
        target: chess_core::Square,
    ) -> Option<MoveRef> {
        if piece.color() != color {
            return None;
        }
        let piece = self.find_piece(piece)?;
        self.legal_moves_of(piece)
            .into_iter()
            .find(|&m| self.moves[m].target == target)
    }
}
