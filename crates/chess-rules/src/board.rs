//! The coordinate space and the mutable board state.
//!
//! All 64 cells are created once and live for the whole game; their
//! occupant and incoming-move data are cleared and rebuilt every turn.
//! Pieces live in an arena so that candidate moves, scanners, and cells
//! can reference each other by index; indices never escape the crate —
//! the public API speaks identity codes and square codes only.

use chess_core::{Color, Direction, File, MoveRecord, PieceId, PieceKind, RecordKind, Square};

use crate::error::ReplayError;
use crate::piece::{Piece, PieceRef};
use crate::player::Side;
use crate::possibility::{MovePossibility, MoveRef, Variant};

/// One square's per-turn state.
#[derive(Debug, Clone, Default)]
pub(crate) struct Cell {
    pub occupant: Option<PieceRef>,
    /// Candidate moves currently targeting this square. Danger queries walk
    /// this list instead of every piece on the board.
    pub incoming: Vec<MoveRef>,
}

/// A move resolved to arena references, ready to execute.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedMove {
    pub piece: PieceRef,
    pub target: Square,
    pub action: Action,
}

/// What executing a resolved move entails beyond relocating the piece.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    Simple,
    Promote(PieceKind),
    EnPassant { victim: PieceRef },
    Castling { rook: PieceRef, rook_target: Square },
}

/// The board: cells, piece arena, per-turn move pool, and both sides.
#[derive(Debug, Clone)]
pub(crate) struct Board {
    pub cells: [Cell; 64],
    pub pieces: Vec<Piece>,
    pub moves: Vec<MovePossibility>,
    pub sides: [Side; 2],
}

impl Board {
    /// Builds the standard starting formation for both sides and wires the
    /// kings' castling scanners.
    pub(crate) fn standard() -> Self {
        let mut board = Board {
            cells: std::array::from_fn(|_| Cell::default()),
            pieces: Vec::with_capacity(32),
            moves: Vec::new(),
            sides: [Side::default(), Side::default()],
        };

        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for color in Color::ALL {
            for (file, kind) in File::ALL.into_iter().zip(BACK_ROW) {
                board.spawn(color, kind, file, Square::new(file, color.back_rank()));
            }
            for file in File::ALL {
                board.spawn(
                    color,
                    PieceKind::Pawn,
                    file,
                    Square::new(file, color.pawn_rank()),
                );
            }
            board.wire_castling(color);
        }
        board
    }

    /// Adds a piece to the arena and its side's roster.
    fn spawn(&mut self, color: Color, kind: PieceKind, file: File, square: Square) -> PieceRef {
        let id = PieceId::new(color, kind, file);
        let piece = self.pieces.len();
        self.pieces.push(Piece::new(id, kind, color, square));
        self.sides[color.index()].roster.push(piece);
        if kind == PieceKind::King {
            assert!(
                self.sides[color.index()].king.is_none(),
                "more than one {} king",
                color
            );
            self.sides[color.index()].king = Some(piece);
        }
        assert!(
            self.cells[square.index()].occupant.is_none(),
            "square {} spawned twice",
            square
        );
        self.cells[square.index()].occupant = Some(piece);
        piece
    }

    /// Gives the king its two castling scanners. Their lifetime models
    /// eligibility: each expires forever once the king or the linked rook
    /// first moves or dies.
    fn wire_castling(&mut self, color: Color) {
        use crate::scanner::{Behavior, Scanner};
        let king = self.sides[color.index()]
            .king
            .expect("castling wired before the king exists");
        self.pieces[king]
            .scanners
            .push(Scanner::new(Direction::East, Behavior::Castling));
        self.pieces[king]
            .scanners
            .push(Scanner::new(Direction::West, Behavior::Castling));
    }

    /// Clears all per-turn cell data and the move pool.
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.occupant = None;
            cell.incoming.clear();
        }
        self.moves.clear();
    }

    pub(crate) fn piece_at(&self, square: Square) -> Option<PieceRef> {
        self.cells[square.index()].occupant
    }

    /// Looks a living piece up by its identity code.
    pub(crate) fn find_piece(&self, id: PieceId) -> Option<PieceRef> {
        self.sides[id.color().index()]
            .roster
            .iter()
            .copied()
            .find(|&piece| self.pieces[piece].id == id)
    }

    /// Accumulated danger on a square for a prospective occupant of the
    /// given color: the number of dangerous opposing candidates currently
    /// targeting it.
    pub(crate) fn threat_at(&self, square: Square, color: Color) -> u32 {
        self.cells[square.index()]
            .incoming
            .iter()
            .filter(|&&m| {
                self.moves[m].quality.dangerous() && self.pieces[self.moves[m].piece].color != color
            })
            .count() as u32
    }

    /// Resolves an executable candidate into a move and its replayable
    /// record, consulting the promotion provider when a pawn reaches the
    /// final rank.
    pub(crate) fn resolve_possibility(
        &self,
        m: MoveRef,
        promotion: &mut dyn crate::mover::PromotionChoice,
    ) -> (ResolvedMove, MoveRecord) {
        let mv = &self.moves[m];
        let piece = &self.pieces[mv.piece];
        let (action, kind) = match mv.variant {
            Variant::Normal => {
                if piece.kind == PieceKind::Pawn
                    && mv.target.rank() == piece.color.promotion_rank()
                {
                    let mut into = promotion.choose_promotion(&PieceKind::PROMOTIONS);
                    if !PieceKind::PROMOTIONS.contains(&into) {
                        into = PieceKind::Queen;
                    }
                    (Action::Promote(into), RecordKind::Promotion { into })
                } else {
                    (Action::Simple, RecordKind::Simple)
                }
            }
            Variant::EnPassant { victim } => (
                Action::EnPassant { victim },
                RecordKind::EnPassant {
                    victim: self.pieces[victim].id,
                },
            ),
            Variant::Castling { rook, rook_target } => (
                Action::Castling { rook, rook_target },
                RecordKind::Castling {
                    rook: self.pieces[rook].id,
                    rook_target,
                },
            ),
        };
        let resolved = ResolvedMove {
            piece: mv.piece,
            target: mv.target,
            action,
        };
        let record = MoveRecord {
            piece: piece.id,
            target: mv.target,
            kind,
        };
        (resolved, record)
    }

    /// Resolves a persisted record against the current board. Unresolvable
    /// or structurally impossible records surface as [`ReplayError`];
    /// nothing is mutated on failure.
    pub(crate) fn resolve_record(&self, record: &MoveRecord) -> Result<ResolvedMove, ReplayError> {
        let piece = self
            .find_piece(record.piece)
            .ok_or(ReplayError::UnknownPiece(record.piece))?;

        if let Some(occupant) = self.piece_at(record.target) {
            if occupant != piece {
                if self.pieces[occupant].color == record.piece.color() {
                    return Err(ReplayError::Corrupt(format!(
                        "{} would capture its own {}",
                        record.piece, self.pieces[occupant].id
                    )));
                }
                if self.pieces[occupant].kind == PieceKind::King {
                    return Err(ReplayError::Corrupt(format!(
                        "{} would capture a king",
                        record.piece
                    )));
                }
            }
        }

        let promotion_rank = record.piece.color().promotion_rank();
        let action = match record.kind {
            RecordKind::Simple => {
                if self.pieces[piece].kind == PieceKind::Pawn
                    && record.target.rank() == promotion_rank
                {
                    return Err(ReplayError::Corrupt(format!(
                        "{} reaches the final rank without a promotion choice",
                        record.piece
                    )));
                }
                Action::Simple
            }
            RecordKind::Promotion { into } => {
                if self.pieces[piece].kind != PieceKind::Pawn {
                    return Err(ReplayError::Corrupt(format!(
                        "promotion recorded for non-pawn {}",
                        record.piece
                    )));
                }
                if record.target.rank() != promotion_rank {
                    return Err(ReplayError::Corrupt(format!(
                        "{} promotes away from the final rank",
                        record.piece
                    )));
                }
                Action::Promote(into)
            }
            RecordKind::EnPassant { victim } => {
                let victim = self
                    .find_piece(victim)
                    .ok_or(ReplayError::UnknownPiece(victim))?;
                Action::EnPassant { victim }
            }
            RecordKind::Castling { rook, rook_target } => {
                let rook = self
                    .find_piece(rook)
                    .ok_or(ReplayError::UnknownPiece(rook))?;
                Action::Castling { rook, rook_target }
            }
        };

        Ok(ResolvedMove {
            piece,
            target: record.target,
            action,
        })
    }

    /// Executes a resolved move, maintaining occupancy eagerly so that
    /// records can be applied back to back during replay.
    pub(crate) fn apply(&mut self, resolved: ResolvedMove) {
        // The en passant window closes after every half-move; it reopens
        // below only for a fresh double step.
        for piece in &mut self.pieces {
            piece.allows_en_passant = false;
        }

        match resolved.action {
            Action::Simple => self.move_piece(resolved.piece, resolved.target),
            Action::Promote(into) => {
                self.move_piece(resolved.piece, resolved.target);
                self.promote(resolved.piece, into);
            }
            Action::EnPassant { victim } => {
                self.kill(victim);
                self.move_piece(resolved.piece, resolved.target);
            }
            Action::Castling { rook, rook_target } => {
                self.move_piece(resolved.piece, resolved.target);
                self.move_piece(rook, rook_target);
            }
        }
    }

    fn move_piece(&mut self, piece: PieceRef, target: Square) {
        if let Some(occupant) = self.cells[target.index()].occupant {
            if occupant != piece {
                self.kill(occupant);
            }
        }
        let from = self.pieces[piece].square;
        if self.cells[from.index()].occupant == Some(piece) {
            self.cells[from.index()].occupant = None;
        }
        self.pieces[piece].square = target;
        self.cells[target.index()].occupant = Some(piece);
        self.after_move(piece, from, target);
    }

    /// Per-kind consequences of a completed relocation.
    fn after_move(&mut self, piece: PieceRef, from: Square, target: Square) {
        match self.pieces[piece].kind {
            PieceKind::Pawn => {
                if (target.y() - from.y()).abs() == 2 {
                    self.pieces[piece].allows_en_passant = true;
                }
                self.pieces[piece].expire_double_move();
            }
            PieceKind::King => self.pieces[piece].expire_castling(),
            _ => {}
        }
        if self.pieces[piece].id.kind() == PieceKind::Rook {
            self.expire_castling_link(self.pieces[piece].color, self.pieces[piece].id.file());
        }
    }

    /// Removes a piece from play: off the board, out of the roster, into
    /// the graveyard.
    fn kill(&mut self, piece: PieceRef) {
        debug_assert!(self.pieces[piece].alive, "piece died twice");
        let square = self.pieces[piece].square;
        if self.cells[square.index()].occupant == Some(piece) {
            self.cells[square.index()].occupant = None;
        }
        self.pieces[piece].alive = false;
        let color = self.pieces[piece].color;
        let side = &mut self.sides[color.index()];
        side.roster.retain(|&p| p != piece);
        side.graveyard.push(piece);
        if self.pieces[piece].id.kind() == PieceKind::Rook {
            self.expire_castling_link(color, self.pieces[piece].id.file());
        }
    }

    /// A rook of the original formation moved or died: its king's castling
    /// ability toward that side expires.
    fn expire_castling_link(&mut self, color: Color, file: File) {
        let direction = match file {
            File::A => Direction::West,
            File::H => Direction::East,
            _ => return,
        };
        if let Some(king) = self.sides[color.index()].king {
            self.pieces[king].expire_castling_toward(direction);
        }
    }

    /// Replaces a pawn that reached the final rank. The pawn is destroyed
    /// and the replacement piece takes its square and its identity code.
    fn promote(&mut self, pawn: PieceRef, into: PieceKind) {
        let id = self.pieces[pawn].id;
        let color = self.pieces[pawn].color;
        let square = self.pieces[pawn].square;
        debug_assert_eq!(square.rank(), color.promotion_rank());

        self.kill(pawn);
        let replacement = self.pieces.len();
        self.pieces.push(Piece::new(id, into, color, square));
        self.sides[color.index()].roster.push(replacement);
        self.cells[square.index()].occupant = Some(replacement);
    }

    /// The file of the rook a castling scanner cooperates with.
    pub(crate) fn castling_rook_file(direction: Direction) -> File {
        match direction {
            Direction::East => File::H,
            Direction::West => File::A,
            _ => unreachable!("castling scans only east or west"),
        }
    }

    /// The rook's home square for a castling direction.
    pub(crate) fn castling_rook_home(direction: Direction, color: Color) -> Square {
        Square::new(Self::castling_rook_file(direction), color.back_rank())
    }
}
