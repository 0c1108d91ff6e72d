//! The mover boundary: how external collaborators drive a game.
//!
//! A [`Mover`] is consulted once per turn, after legality resolution has
//! finished, and is expected to eventually submit exactly one currently
//! legal move — or stay idle. A [`PromotionChoice`] is consulted
//! synchronously whenever a pawn reaches the final rank.

use chess_core::{PieceId, PieceKind, Square};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game::Game;

/// A move submission: which piece to which square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub piece: PieceId,
    pub target: Square,
}

/// Supplies the replacement type when a pawn reaches the final rank.
pub trait PromotionChoice {
    /// Returns exactly one of the four offered types.
    fn choose_promotion(&mut self, options: &[PieceKind; 4]) -> PieceKind;
}

/// Always promotes to the first offered type — the queen.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferQueen;

impl PromotionChoice for PreferQueen {
    fn choose_promotion(&mut self, options: &[PieceKind; 4]) -> PieceKind {
        options[0]
    }
}

/// A side's operator: chooses one move per turn.
pub trait Mover {
    /// Called when it is this mover's turn. `None` means the mover stays
    /// idle and the session stops advancing.
    fn take_turn(&mut self, game: &Game) -> Option<MoveChoice>;

    /// Promotion choice for moves submitted by this mover. Defaults to
    /// the first offered type (the queen).
    fn choose_promotion(&mut self, options: &[PieceKind; 4]) -> PieceKind {
        options[0]
    }
}

/// An automated mover drawing uniformly from the side's aggregated
/// legal-move union.
///
/// Drawing from the union, rather than picking a piece first, keeps the
/// choice well-defined even when some pieces have no legal move.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    /// A mover seeded from system entropy.
    pub fn new() -> Self {
        RandomMover {
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic mover for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Mover for RandomMover {
    fn take_turn(&mut self, game: &Game) -> Option<MoveChoice> {
        let moves = game.legal_moves();
        moves.choose(&mut self.rng).map(|m| MoveChoice {
            piece: m.piece,
            target: m.to,
        })
    }

    fn choose_promotion(&mut self, options: &[PieceKind; 4]) -> PieceKind {
        options.choose(&mut self.rng).copied().unwrap_or(options[0])
    }
}
