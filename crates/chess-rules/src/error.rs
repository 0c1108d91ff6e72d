//! Error types for move submission and history replay.

use chess_core::{CodeError, PieceId, Square};
use thiserror::Error;

/// Errors returned when a mover submits a move.
///
/// An illegal submission is expected traffic at the mover boundary: it is
/// rejected with no state change and the mover is solicited again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The move is not in the current legal set of the active side.
    #[error("illegal move: {piece} to {target}")]
    IllegalMove { piece: PieceId, target: Square },

    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,

    /// A submitted piece code could not be parsed.
    #[error("invalid piece code: {0}")]
    InvalidPieceCode(#[from] CodeError),

    /// A submitted square code could not be parsed.
    #[error("invalid square code {0:?}")]
    InvalidSquareCode(String),
}

/// Errors surfaced when a persisted move log cannot be replayed.
///
/// These indicate corrupted data: the affected game session is aborted
/// rather than left on an inconsistent board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A record references a piece code that cannot be resolved.
    #[error("move record references unknown piece {0}")]
    UnknownPiece(PieceId),

    /// A record resolved, but applying it would be structurally impossible.
    #[error("move record cannot be applied: {0}")]
    Corrupt(String),
}
