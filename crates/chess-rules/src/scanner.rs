//! Move scanners: per-direction candidate generation and the legality
//! fixpoint.
//!
//! Each piece owns one scanner per direction it can move in, configured
//! with a [`Behavior`]. A behavior bundles three strategies — how to scan,
//! how to modify the fresh candidates, and how to re-validate them once
//! the whole board has scanned. The set is closed and fixed; dispatch is
//! a plain `match`.
//!
//! | Behavior        | scanning             | modification    | validation        |
//! |-----------------|----------------------|-----------------|-------------------|
//! | Line            | walk the ray         | —               | —                 |
//! | Short           | single step          | —               | —                 |
//! | ShortSensitive  | single step          | prevent danger  | re-check danger   |
//! | PawnInoffensive | single step forward  | suppress attack | —                 |
//! | PawnOffensive   | diagonal + en passant| force attack    | rank-uncover check|
//! | DoubleMove      | two steps if empty   | suppress attack | —                 |
//! | Castling        | two-square king jump | prevent danger  | full eligibility  |

use chess_core::{Direction, PieceKind, Square};

use crate::board::Board;
use crate::piece::PieceRef;
use crate::possibility::{MovePossibility, MoveRef, Quality, Variant};

/// The closed set of scanning behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    /// Walk the ray until blocked or off the board. Rook, bishop, queen.
    Line,
    /// A single step. Knight jumps.
    Short,
    /// A single step that refuses dangerous destinations. King steps.
    ShortSensitive,
    /// A single non-capturing step forward. Pawn advance.
    PawnInoffensive,
    /// A single capturing-only diagonal step, plus the en passant
    /// candidate. Pawn attacks.
    PawnOffensive,
    /// Two steps forward if both squares are free. Pawn's first move.
    DoubleMove,
    /// A two-square jump toward a rook. King castling.
    Castling,
}

impl Behavior {
    /// Whether candidates of this behavior can ever capture along their
    /// ray — only those scans count as check or pin sources. The pawn's
    /// forward and double steps never attack anything.
    pub(crate) const fn detects_check(self) -> bool {
        matches!(
            self,
            Behavior::Line | Behavior::Short | Behavior::ShortSensitive | Behavior::PawnOffensive
        )
    }
}

/// One piece's movement ability in one direction.
#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    pub direction: Direction,
    pub behavior: Behavior,
    /// Candidates produced this turn, in ray order.
    pub moves: Vec<MoveRef>,
    /// Pieces found along the ray this turn, in ray order.
    pub contacts: Vec<PieceRef>,
}

impl Scanner {
    pub(crate) fn new(direction: Direction, behavior: Behavior) -> Self {
        Scanner {
            direction,
            behavior,
            moves: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Discards the previous turn's results.
    pub(crate) fn clean(&mut self) {
        self.moves.clear();
        self.contacts.clear();
    }
}

impl Board {
    /// Pass 1: discard every cached candidate, contact, and incoming-move
    /// registration, then re-seat each living piece on its square.
    pub(crate) fn clean(&mut self) {
        self.reset();
        for piece in 0..self.pieces.len() {
            if !self.pieces[piece].alive {
                continue;
            }
            self.pieces[piece].clean();
            let square = self.pieces[piece].square;
            debug_assert!(
                self.cells[square.index()].occupant.is_none(),
                "two pieces share {}",
                square
            );
            self.cells[square.index()].occupant = Some(piece);
        }
    }

    /// Pass 2: every scanner of every living piece of both sides computes
    /// its candidates against the current board. Checks and pins found
    /// along the way restrict the affected pieces' forced targets.
    pub(crate) fn scan(&mut self) {
        for piece in 0..self.pieces.len() {
            if !self.pieces[piece].alive {
                continue;
            }
            for scanner in 0..self.pieces[piece].scanners.len() {
                self.scan_scanner(piece, scanner);
                self.modify_scanner(piece, scanner);
            }
        }
    }

    /// Pass 3: re-validate until no candidate changes. Each pass can only
    /// remove legal candidates, never add them, so the loop terminates.
    pub(crate) fn validate(&mut self) {
        let mut legal = self.count_legal();
        loop {
            let mut changed = false;
            for piece in 0..self.pieces.len() {
                if self.pieces[piece].alive && self.validate_piece(piece) {
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            let now = self.count_legal();
            debug_assert!(now < legal, "validation must strictly shrink the legal set");
            legal = now;
        }
    }

    fn count_legal(&self) -> usize {
        self.moves.iter().filter(|m| m.quality.legal()).count()
    }

    fn scan_scanner(&mut self, piece: PieceRef, scanner: usize) {
        match self.pieces[piece].scanners[scanner].behavior {
            Behavior::Line => self.scan_line(piece, scanner),
            Behavior::Short | Behavior::ShortSensitive | Behavior::PawnInoffensive => {
                self.scan_short(piece, scanner)
            }
            Behavior::PawnOffensive => self.scan_pawn_attack(piece, scanner),
            Behavior::DoubleMove => self.scan_double_move(piece, scanner),
            Behavior::Castling => self.scan_castling(piece, scanner),
        }
    }

    fn scan_line(&mut self, piece: PieceRef, scanner: usize) {
        let direction = self.pieces[piece].scanners[scanner].direction;
        let mut pointer = self.pieces[piece].square.neighbor(direction);
        while let Some(square) = pointer {
            self.create_move(piece, scanner, square, Variant::Normal);
            self.scan_contact(piece, scanner, square);
            pointer = square.neighbor(direction);
        }
        self.scan_check(piece, scanner);
    }

    fn scan_short(&mut self, piece: PieceRef, scanner: usize) {
        let direction = self.pieces[piece].scanners[scanner].direction;
        if let Some(square) = self.pieces[piece].square.neighbor(direction) {
            self.create_move(piece, scanner, square, Variant::Normal);
            self.scan_contact(piece, scanner, square);
        }
        self.scan_check(piece, scanner);
    }

    fn scan_pawn_attack(&mut self, piece: PieceRef, scanner: usize) {
        let direction = self.pieces[piece].scanners[scanner].direction;
        if let Some(square) = self.pieces[piece].square.neighbor(direction) {
            self.create_move(piece, scanner, square, Variant::Normal);
            self.create_en_passant(piece, scanner, square);
            self.scan_contact(piece, scanner, square);
        }
        self.scan_check(piece, scanner);
    }

    fn scan_double_move(&mut self, piece: PieceRef, scanner: usize) {
        let direction = self.pieces[piece].scanners[scanner].direction;
        if let Some(first) = self.pieces[piece].square.neighbor(direction) {
            if self.cells[first.index()].occupant.is_none() {
                if let Some(second) = first.neighbor(direction) {
                    self.create_move(piece, scanner, second, Variant::Normal);
                }
            }
        }
    }

    fn scan_castling(&mut self, piece: PieceRef, scanner: usize) {
        let direction = self.pieces[piece].scanners[scanner].direction;
        let king_square = self.pieces[piece].square;
        let color = self.pieces[piece].color;
        let (Some(target), Some(rook_target)) = (
            king_square.toward(direction, 2),
            king_square.neighbor(direction),
        ) else {
            return;
        };
        let rook_id = chess_core::PieceId::new(
            color,
            PieceKind::Rook,
            Board::castling_rook_file(direction),
        );
        let Some(rook) = self.find_piece(rook_id) else {
            return;
        };
        let contact = self.cells[target.index()].occupant;
        self.push_move(
            piece,
            scanner,
            target,
            contact,
            Variant::Castling { rook, rook_target },
        );
    }

    /// Creates a candidate toward the destination, resolving its quality
    /// from the destination occupant and from the obstacles the scanner
    /// has already recorded.
    fn create_move(&mut self, piece: PieceRef, scanner: usize, target: Square, variant: Variant) {
        let contact = self.cells[target.index()].occupant;
        self.push_move(piece, scanner, target, contact, variant);
    }

    fn push_move(
        &mut self,
        piece: PieceRef,
        scanner: usize,
        target: Square,
        contact: Option<PieceRef>,
        variant: Variant,
    ) -> MoveRef {
        let color = self.pieces[piece].color;
        let mut quality = match contact {
            None => Quality::Movement,
            Some(c) if self.pieces[c].color == color => Quality::Cover,
            Some(_) => Quality::Attack,
        };
        if self.scanner_blocked(piece, scanner) {
            quality = Quality::Blocked;
        }
        let m = self.moves.len();
        self.moves.push(MovePossibility {
            piece,
            target,
            contact,
            quality,
            variant,
        });
        self.cells[target.index()].incoming.push(m);
        self.pieces[piece].scanners[scanner].moves.push(m);
        m
    }

    /// Registers the en passant candidate next to a pawn-attack target:
    /// the contacted piece is the pawn beside the destination, not the
    /// destination occupant. Blocked unless that pawn double-stepped on
    /// the immediately preceding opposing turn.
    fn create_en_passant(&mut self, piece: PieceRef, scanner: usize, target: Square) {
        let pawn_square = self.pieces[piece].square;
        let Some(sideways) = Direction::of_delta(target.x() - pawn_square.x(), 0) else {
            return;
        };
        let Some(victim_square) = pawn_square.neighbor(sideways) else {
            return;
        };
        let Some(victim) = self.cells[victim_square.index()].occupant else {
            return;
        };
        if self.pieces[victim].kind != PieceKind::Pawn
            || self.pieces[victim].color == self.pieces[piece].color
        {
            return;
        }
        let m = self.push_move(
            piece,
            scanner,
            target,
            Some(victim),
            Variant::EnPassant { victim },
        );
        if !self.pieces[victim].allows_en_passant {
            self.moves[m].quality = Quality::Blocked;
        }
    }

    /// Records the occupant of a scanned square as a contact.
    fn scan_contact(&mut self, piece: PieceRef, scanner: usize, square: Square) {
        if let Some(occupant) = self.cells[square.index()].occupant {
            self.pieces[piece].scanners[scanner].contacts.push(occupant);
        }
    }

    /// An obstacle already sits on this ray — unless the only contact so
    /// far is the opposing king, which the ray passes through for danger
    /// purposes (a checked king may not retreat along the checking line).
    fn scanner_blocked(&self, piece: PieceRef, scanner: usize) -> bool {
        let contacts = &self.pieces[piece].scanners[scanner].contacts;
        let opposing_king = self.sides[self.pieces[piece].color.opposite().index()].king;
        contacts.len() > 1 || (contacts.len() == 1 && Some(contacts[0]) != opposing_king)
    }

    /// Check and pin detection after a scan.
    ///
    /// First contact is the opposing king: this ray is a check — every
    /// opposing piece except the king is restricted to capturing the
    /// attacker or landing between attacker and king. Second contact is
    /// the opposing king behind one opposing piece: that piece is pinned
    /// to the ray.
    fn scan_check(&mut self, piece: PieceRef, scanner: usize) {
        if !self.pieces[piece].scanners[scanner].behavior.detects_check() {
            return;
        }
        let color = self.pieces[piece].color;
        let Some(king) = self.sides[color.opposite().index()].king else {
            return;
        };
        let first = self.pieces[piece].scanners[scanner].contacts.first().copied();
        let second = self.pieces[piece].scanners[scanner].contacts.get(1).copied();

        if first == Some(king) {
            let zone = self.line_zone(piece, scanner, 0);
            let roster = self.sides[color.opposite().index()].roster.clone();
            for defender in roster {
                if self.pieces[defender].kind != PieceKind::King {
                    self.pieces[defender].restrict(&zone);
                }
            }
        } else if second == Some(king) {
            let defender = self.pieces[piece].scanners[scanner].contacts[0];
            if self.pieces[defender].color != color {
                let zone = self.line_zone(piece, scanner, 1);
                self.pieces[defender].restrict(&zone);
            }
        }
    }

    /// The squares opposing pieces may still enter to neutralize this
    /// ray: the scanning piece's own square, plus squares along the ray
    /// until `max_contacts` occupied squares have been passed.
    fn line_zone(&self, piece: PieceRef, scanner: usize, max_contacts: u32) -> Vec<Square> {
        let direction = self.pieces[piece].scanners[scanner].direction;
        let mut zone = Vec::new();
        let mut contacts = 0;
        let mut coord = self.pieces[piece].square;
        loop {
            zone.push(coord);
            match coord.neighbor(direction) {
                None => break,
                Some(next) => {
                    if self.cells[next.index()].occupant.is_some() {
                        contacts += 1;
                    }
                    if contacts > max_contacts {
                        break;
                    }
                    coord = next;
                }
            }
        }
        zone
    }

    /// Per-behavior modification of the freshly scanned candidates.
    fn modify_scanner(&mut self, piece: PieceRef, scanner: usize) {
        let behavior = self.pieces[piece].scanners[scanner].behavior;
        let moves = self.pieces[piece].scanners[scanner].moves.clone();
        match behavior {
            Behavior::ShortSensitive | Behavior::Castling => {
                for m in moves {
                    self.prevent_danger(m);
                }
            }
            Behavior::PawnInoffensive | Behavior::DoubleMove => {
                for m in moves {
                    self.moves[m].suppress_attack();
                }
            }
            Behavior::PawnOffensive => {
                let color = self.pieces[piece].color;
                for m in moves {
                    let hostile = self.moves[m]
                        .contact
                        .map(|contact| self.pieces[contact].color != color);
                    self.moves[m].force_attack(hostile);
                }
            }
            Behavior::Line | Behavior::Short => {}
        }
    }

    /// Blocks a still-legal candidate whose destination has accumulated
    /// danger. Reports whether anything changed.
    fn prevent_danger(&mut self, m: MoveRef) -> bool {
        if !self.moves[m].quality.legal() {
            return false;
        }
        let color = self.pieces[self.moves[m].piece].color;
        if self.threat_at(self.moves[m].target, color) > 0 {
            self.moves[m].block();
            return true;
        }
        false
    }

    /// One validation round for one piece: behavior-specific re-checks,
    /// then the forced-target filter.
    fn validate_piece(&mut self, piece: PieceRef) -> bool {
        let mut changed = false;
        for scanner in 0..self.pieces[piece].scanners.len() {
            let validated = match self.pieces[piece].scanners[scanner].behavior {
                Behavior::ShortSensitive => self.validate_sensitive(piece, scanner),
                Behavior::Castling => self.validate_castling(piece, scanner),
                Behavior::PawnOffensive => self.validate_pawn_attack(piece, scanner),
                _ => false,
            };
            changed |= validated;
        }
        changed |= self.filter_moves(piece);
        changed
    }

    /// The king's steps re-check danger: scanning after the king's own
    /// turn may have registered new threats.
    fn validate_sensitive(&mut self, piece: PieceRef, scanner: usize) -> bool {
        let moves = self.pieces[piece].scanners[scanner].moves.clone();
        let mut changed = false;
        for m in moves {
            changed |= self.prevent_danger(m);
        }
        changed
    }

    /// Full castling eligibility: the linked rook alive on its home
    /// square, every square strictly between king and rook empty, and
    /// none of the king's origin, passed, and landing squares attacked.
    fn validate_castling(&mut self, piece: PieceRef, scanner: usize) -> bool {
        let Some(&m) = self.pieces[piece].scanners[scanner].moves.first() else {
            return false;
        };
        if !self.moves[m].quality.legal() {
            return false;
        }
        let Variant::Castling { rook, .. } = self.moves[m].variant else {
            return false;
        };
        let direction = self.pieces[piece].scanners[scanner].direction;
        let color = self.pieces[piece].color;
        let king_square = self.pieces[piece].square;
        let rook_home = Board::castling_rook_home(direction, color);

        let mut allowed =
            self.pieces[rook].alive && self.pieces[rook].square == rook_home;

        if allowed {
            let mut pointer = king_square.neighbor(direction);
            while let Some(square) = pointer {
                if square == rook_home {
                    break;
                }
                if self.cells[square.index()].occupant.is_some() {
                    allowed = false;
                    break;
                }
                pointer = square.neighbor(direction);
            }
        }

        if allowed {
            for step in 0..3 {
                let threatened = king_square
                    .toward(direction, step)
                    .is_some_and(|square| self.threat_at(square, color) > 0);
                if threatened {
                    allowed = false;
                    break;
                }
            }
        }

        if allowed {
            false
        } else {
            self.moves[m].block();
            true
        }
    }

    /// Blocks an otherwise-legal en passant capture that would uncover a
    /// rank attack on the mover's own king. Removing both pawns from a
    /// shared rank is the one self-check the pin scan cannot see, because
    /// the victim masks the ray while it still stands.
    fn validate_pawn_attack(&mut self, piece: PieceRef, scanner: usize) -> bool {
        let moves = self.pieces[piece].scanners[scanner].moves.clone();
        let mut changed = false;
        for m in moves {
            let Variant::EnPassant { victim } = self.moves[m].variant else {
                continue;
            };
            if !self.moves[m].quality.legal() {
                continue;
            }
            if self.en_passant_uncovers_king(piece, victim) {
                self.moves[m].block();
                changed = true;
            }
        }
        changed
    }

    fn en_passant_uncovers_king(&self, pawn: PieceRef, victim: PieceRef) -> bool {
        let color = self.pieces[pawn].color;
        let Some(king) = self.sides[color.index()].king else {
            return false;
        };
        let king_square = self.pieces[king].square;
        let pawn_square = self.pieces[pawn].square;
        let victim_square = self.pieces[victim].square;
        if king_square.rank() != pawn_square.rank() {
            return false;
        }
        let direction = if pawn_square.x() > king_square.x() {
            Direction::East
        } else {
            Direction::West
        };
        let mut pointer = king_square.neighbor(direction);
        while let Some(square) = pointer {
            if square != pawn_square && square != victim_square {
                if let Some(occupant) = self.cells[square.index()].occupant {
                    return self.pieces[occupant].color != color
                        && matches!(
                            self.pieces[occupant].kind,
                            PieceKind::Rook | PieceKind::Queen
                        );
                }
            }
            pointer = square.neighbor(direction);
        }
        false
    }

    /// Applies and consumes the forced-target restriction: every
    /// otherwise-legal candidate landing outside the set is blocked. The
    /// king is exempt (its scanners self-filter through danger), and so is
    /// an en passant capture whose victim stands inside the set — taking
    /// the checking pawn resolves the check even though the landing square
    /// differs.
    fn filter_moves(&mut self, piece: PieceRef) -> bool {
        if self.pieces[piece].kind == PieceKind::King {
            return false;
        }
        let Some(zone) = self.pieces[piece].forced_targets.take() else {
            return false;
        };
        let mut changed = false;
        let moves: Vec<MoveRef> = self.pieces[piece]
            .scanners
            .iter()
            .flat_map(|scanner| scanner.moves.iter().copied())
            .collect();
        for m in moves {
            if !self.moves[m].quality.legal() {
                continue;
            }
            let allowed = zone.contains(&self.moves[m].target)
                || match self.moves[m].variant {
                    Variant::EnPassant { victim } => {
                        zone.contains(&self.pieces[victim].square)
                    }
                    _ => false,
                };
            if !allowed {
                self.moves[m].block();
                changed = true;
            }
        }
        changed
    }
}
