//! Candidate moves and their resolved legality state.

use chess_core::Square;

use crate::piece::PieceRef;

/// Index of a candidate move in the per-turn move pool.
pub(crate) type MoveRef = usize;

/// The resolved quality of a candidate move.
///
/// A quality jointly encodes two orthogonal facts: whether the move is
/// legal to execute now, and whether it threatens its destination square
/// (counts as a danger source for king safety).
///
/// | Quality     | legal | dangerous |
/// |-------------|-------|-----------|
/// | Movement    | yes   | yes       |
/// | Attack      | yes   | yes       |
/// | Cover       | no    | yes       |
/// | Blocked     | no    | no        |
/// | Inoffensive | yes   | no        |
/// | Threat      | no    | yes       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quality {
    /// A move to an empty square.
    Movement,
    /// A capture of an opposing piece.
    Attack,
    /// The destination holds a piece of the same side: illegal to land,
    /// but the square is still defended.
    Cover,
    /// Illegal and harmless (an obstacle between, or a suppressed capture).
    Blocked,
    /// Legal but never a capture (a pawn's forward step).
    Inoffensive,
    /// Illegal but still threatening (a pawn's diagonal onto an empty
    /// square, or a restricted move that keeps covering its target).
    Threat,
}

impl Quality {
    /// May this candidate be executed right now?
    #[inline]
    pub(crate) const fn legal(self) -> bool {
        matches!(self, Quality::Movement | Quality::Attack | Quality::Inoffensive)
    }

    /// Does this candidate count as a danger source for its target square?
    #[inline]
    pub(crate) const fn dangerous(self) -> bool {
        matches!(
            self,
            Quality::Movement | Quality::Attack | Quality::Cover | Quality::Threat
        )
    }
}

/// Special-move payload of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    Normal,
    /// The captured pawn stands beside the destination square, not on it.
    EnPassant { victim: PieceRef },
    /// The rook is co-moved to its own destination.
    Castling { rook: PieceRef, rook_target: Square },
}

/// A candidate (piece, destination) pair produced by a scanner.
///
/// Every possibility is registered on its destination cell's incoming list
/// for the duration of the turn, so danger queries per square only walk
/// the moves actually targeting it.
#[derive(Debug, Clone)]
pub(crate) struct MovePossibility {
    pub piece: PieceRef,
    pub target: Square,
    /// The piece this move touches: the destination occupant, or the
    /// en passant victim beside it.
    pub contact: Option<PieceRef>,
    pub quality: Quality,
    pub variant: Variant,
}

impl MovePossibility {
    /// Marks the candidate illegal while preserving its danger
    /// contribution. Only contact resolution produces the harmless
    /// `Blocked` state; a restricted piece still covers its targets.
    pub(crate) fn block(&mut self) {
        self.quality = match self.quality {
            Quality::Movement => Quality::Threat,
            Quality::Attack => Quality::Cover,
            Quality::Inoffensive => Quality::Blocked,
            quality => quality,
        };
    }

    /// Forbids capturing: a contact candidate becomes `Blocked`, a free
    /// one merely loses its threat. Used for the pawn's forward steps.
    pub(crate) fn suppress_attack(&mut self) {
        self.quality = if self.contact.is_some() {
            Quality::Blocked
        } else {
            match self.quality {
                Quality::Blocked => Quality::Blocked,
                _ => Quality::Inoffensive,
            }
        };
    }

    /// Requires capturing: a free candidate becomes a bare `Threat`.
    /// Downgrade only — a candidate already `Blocked` stays blocked.
    /// Used for the pawn's diagonal attacks.
    pub(crate) fn force_attack(&mut self, hostile_contact: Option<bool>) {
        if self.quality == Quality::Blocked {
            return;
        }
        self.quality = match hostile_contact {
            None => Quality::Threat,
            Some(true) => Quality::Attack,
            Some(false) => Quality::Cover,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn possibility(quality: Quality, contact: Option<PieceRef>) -> MovePossibility {
        MovePossibility {
            piece: 0,
            target: Square::from_code("e4").unwrap(),
            contact,
            quality,
            variant: Variant::Normal,
        }
    }

    #[test]
    fn quality_table() {
        assert!(Quality::Movement.legal() && Quality::Movement.dangerous());
        assert!(Quality::Attack.legal() && Quality::Attack.dangerous());
        assert!(!Quality::Cover.legal() && Quality::Cover.dangerous());
        assert!(!Quality::Blocked.legal() && !Quality::Blocked.dangerous());
        assert!(Quality::Inoffensive.legal() && !Quality::Inoffensive.dangerous());
        assert!(!Quality::Threat.legal() && Quality::Threat.dangerous());
    }

    #[test]
    fn block_preserves_danger() {
        let mut m = possibility(Quality::Movement, None);
        m.block();
        assert_eq!(m.quality, Quality::Threat);

        let mut m = possibility(Quality::Attack, Some(1));
        m.block();
        assert_eq!(m.quality, Quality::Cover);

        let mut m = possibility(Quality::Inoffensive, None);
        m.block();
        assert_eq!(m.quality, Quality::Blocked);

        let mut m = possibility(Quality::Blocked, None);
        m.block();
        assert_eq!(m.quality, Quality::Blocked);
    }

    #[test]
    fn suppress_attack_disarms() {
        let mut m = possibility(Quality::Attack, Some(1));
        m.suppress_attack();
        assert_eq!(m.quality, Quality::Blocked);

        let mut m = possibility(Quality::Movement, None);
        m.suppress_attack();
        assert_eq!(m.quality, Quality::Inoffensive);
    }

    #[test]
    fn force_attack_never_resurrects() {
        let mut m = possibility(Quality::Movement, None);
        m.force_attack(None);
        assert_eq!(m.quality, Quality::Threat);

        let mut m = possibility(Quality::Blocked, Some(1));
        m.force_attack(Some(true));
        assert_eq!(m.quality, Quality::Blocked);

        let mut m = possibility(Quality::Movement, Some(1));
        m.force_attack(Some(true));
        assert_eq!(m.quality, Quality::Attack);
    }
}
