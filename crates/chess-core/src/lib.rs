//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Color`] for the two sides
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Direction`] for the sixteen movement vectors
//! - [`PieceKind`] and [`PieceId`] for piece types and durable identity codes
//! - [`MoveRecord`] and [`Round`] for the serializable move log
//!
//! Everything here is a plain value: board state, move generation, and game
//! orchestration live in the `chess-rules` crate. Identity codes (`"e4"`,
//! `"WPE"`) are the only cross-reference keys used in persisted data.

mod code;
mod color;
mod direction;
mod piece;
mod record;
mod square;

pub use code::{CodeError, PieceId};
pub use color::Color;
pub use direction::Direction;
pub use piece::PieceKind;
pub use record::{MoveRecord, RecordKind, Round};
pub use square::{File, Rank, Square};
