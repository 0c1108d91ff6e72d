//! Serializable move records.
//!
//! An executed move is captured as a minimal replayable record. Records are
//! self-contained: they reference pieces and squares only by their stable
//! codes, so replaying a log from the initial setup reconstructs board
//! state regardless of any transient engine state.

use serde::{Deserialize, Serialize};

use crate::{PieceId, PieceKind, Square};

/// The special-move payload of a [`MoveRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A plain move or capture.
    Simple,
    /// A pawn move onto the final rank; the pawn is replaced by the chosen
    /// type. The choice is part of the record so that replay never has to
    /// consult the promotion provider again.
    Promotion { into: PieceKind },
    /// An en passant capture. The victim is not the occupant of the
    /// destination square, so it must be named explicitly.
    EnPassant { victim: PieceId },
    /// Castling. The rook is co-moved to its own destination.
    Castling { rook: PieceId, rook_target: Square },
}

/// A single executed move: which piece went where, plus the special-move
/// payload where one applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub target: Square,
    pub kind: RecordKind,
}

impl MoveRecord {
    /// Creates a plain move record.
    pub fn simple(piece: PieceId, target: Square) -> Self {
        MoveRecord {
            piece,
            target,
            kind: RecordKind::Simple,
        }
    }

    /// Returns the short display label for this move ("We4", "O-O").
    pub fn label(&self) -> String {
        match self.kind {
            RecordKind::Castling { .. } => "O-O".to_string(),
            _ => format!("{}{}", self.piece.color().initial(), self.target),
        }
    }
}

/// One completed round: white's move and black's reply.
///
/// History stores rounds instead of loose moves so the sequence of the two
/// sides can never get out of step; an unfinished round lives in a pending
/// slot until the reply completes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub index: u32,
    pub white: MoveRecord,
    pub black: MoveRecord,
}

impl Round {
    /// Creates a round from both sides' moves.
    pub fn new(index: u32, white: MoveRecord, black: MoveRecord) -> Self {
        Round {
            index,
            white,
            black,
        }
    }

    /// Returns the display label for this round ("3. We4 - Bd5").
    pub fn label(&self) -> String {
        format!(
            "{}. {} - {}",
            self.index + 1,
            self.white.label(),
            self.black.label()
        )
    }
}
