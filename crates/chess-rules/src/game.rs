//! Game orchestration: the turn protocol, move submission, and replay.

use chess_core::{Color, MoveRecord, PieceId, PieceKind, Round, Square};

use crate::board::Board;
use crate::error::{MoveError, ReplayError};
use crate::history::History;
use crate::mover::{PreferQueen, PromotionChoice};
use crate::possibility::{MoveRef, Variant};

/// The result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// The side to move has no legal move but is not in check.
    Stalemate,
}

impl GameResult {
    /// The human-readable result string handed to the game-over
    /// notification.
    pub fn message(&self) -> String {
        match self {
            GameResult::WhiteWins => "White wins by checkmate.".to_string(),
            GameResult::BlackWins => "Black wins by checkmate.".to_string(),
            GameResult::Stalemate => "Draw by stalemate.".to_string(),
        }
    }
}

/// A legal move of the current position, described by stable codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    /// The piece this move would capture (for en passant, the pawn beside
    /// the destination).
    pub capture: Option<PieceId>,
    /// True when executing this move triggers promotion.
    pub promotes: bool,
    pub en_passant: bool,
    pub castles: bool,
}

/// A piece as visible through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

/// A chess game: board state, turn protocol, and replayable history.
///
/// After every executed move the whole position is re-resolved: all cached
/// candidates are discarded, every piece re-scans its rays, and validation
/// repeats until the legal set is stable. Only then is the next mover
/// consulted — or the game declared over when the active side has no
/// legal move left.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Color,
    history: History,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a new game from the standard formation, white to move.
    pub fn new() -> Self {
        let mut game = Game {
            board: Board::standard(),
            active: Color::White,
            history: History::default(),
            result: None,
        };
        game.refresh();
        game
    }

    /// Reconstructs a game by replaying a persisted log from the initial
    /// setup. The side to move is derived from the log length.
    pub fn replay(rounds: Vec<Round>, pending: Option<MoveRecord>) -> Result<Self, ReplayError> {
        let history = History::from_log(rounds, pending);
        let records = history.applied_records();
        let (board, active) = Self::rebuild(&records)?;
        let mut game = Game {
            board,
            active,
            history,
            result: None,
        };
        game.refresh();
        Ok(game)
    }

    /// Rewinds the game so that only the first `round_count` completed
    /// rounds remain applied. The full log stays visible for navigation
    /// until a new move is recorded.
    pub fn rewind_to(&mut self, round_count: usize) -> Result<(), ReplayError> {
        let mut history = self.history.clone();
        history.rewind(round_count);
        let records = history.applied_records();
        let (board, active) = Self::rebuild(&records)?;
        self.history = history;
        self.board = board;
        self.active = active;
        self.refresh();
        Ok(())
    }

    fn rebuild(records: &[MoveRecord]) -> Result<(Board, Color), ReplayError> {
        let mut board = Board::standard();
        for record in records {
            let resolved = board.resolve_record(record)?;
            board.apply(resolved);
        }
        let active = if records.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        Ok((board, active))
    }

    /// The side currently allowed to move.
    pub fn active_side(&self) -> Color {
        self.active
    }

    /// Is the given side's king currently attacked?
    pub fn in_check(&self, color: Color) -> bool {
        self.board.in_check(color)
    }

    /// The result, once no legal move remains for the active side.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// True once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// The human-readable result string, once the game has ended.
    pub fn result_message(&self) -> Option<String> {
        self.result.map(|result| result.message())
    }

    /// The move log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// All legal moves of the active side, in roster order.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.board
            .legal_moves_for_side(self.active)
            .into_iter()
            .map(|m| self.view_move(m))
            .collect()
    }

    /// The legal moves of one piece (either side's).
    pub fn legal_moves_for(&self, piece: PieceId) -> Vec<LegalMove> {
        match self.board.find_piece(piece) {
            Some(piece) => self
                .board
                .legal_moves_of(piece)
                .into_iter()
                .map(|m| self.view_move(m))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The piece standing on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<PieceView> {
        self.board.piece_at(square).map(|piece| self.view_piece(piece))
    }

    /// The living pieces of one side, in creation order.
    pub fn roster(&self, color: Color) -> Vec<PieceView> {
        self.board.sides[color.index()]
            .roster
            .iter()
            .map(|&piece| self.view_piece(piece))
            .collect()
    }

    /// The captured (and promoted-away) pieces of one side.
    pub fn graveyard(&self, color: Color) -> Vec<PieceId> {
        self.board.sides[color.index()]
            .graveyard
            .iter()
            .map(|&piece| self.board.pieces[piece].id)
            .collect()
    }

    /// Submits a move for the active side, promoting to a queen when a
    /// pawn reaches the final rank.
    pub fn make_move(&mut self, piece: PieceId, target: Square) -> Result<(), MoveError> {
        self.make_move_with(piece, target, &mut PreferQueen)
    }

    /// Submits a move for the active side, consulting the given provider
    /// when the move triggers promotion.
    ///
    /// An illegal submission is rejected with no state change; the caller
    /// is expected to solicit the mover again.
    pub fn make_move_with(
        &mut self,
        piece: PieceId,
        target: Square,
        promotion: &mut dyn PromotionChoice,
    ) -> Result<(), MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        let m = self
            .board
            .executable_move(self.active, piece, target)
            .ok_or(MoveError::IllegalMove { piece, target })?;

        let (resolved, record) = self.board.resolve_possibility(m, promotion);
        self.board.apply(resolved);
        self.history.expand(record);
        self.active = self.active.opposite();
        self.refresh();
        Ok(())
    }

    /// Submits a move given as raw codes ("WPE", "e4").
    pub fn make_move_codes(&mut self, piece: &str, target: &str) -> Result<(), MoveError> {
        let piece: PieceId = piece.parse()?;
        let target = Square::from_code(target)
            .ok_or_else(|| MoveError::InvalidSquareCode(target.to_string()))?;
        self.make_move(piece, target)
    }

    /// Re-resolves legality for the whole board and detects termination:
    /// clean, scan, validate to fixpoint, then check whether the active
    /// side can still move.
    fn refresh(&mut self) {
        self.board.clean();
        self.board.scan();
        self.board.validate();
        self.result = if self.board.has_legal_move(self.active) {
            None
        } else if self.board.in_check(self.active) {
            Some(match self.active {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            })
        } else {
            Some(GameResult::Stalemate)
        };
    }

    fn view_move(&self, m: MoveRef) -> LegalMove {
        let mv = &self.board.moves[m];
        let piece = &self.board.pieces[mv.piece];
        LegalMove {
            piece: piece.id,
            kind: piece.kind,
            from: piece.square,
            to: mv.target,
            capture: mv
                .contact
                .filter(|&contact| self.board.pieces[contact].color != piece.color)
                .map(|contact| self.board.pieces[contact].id),
            promotes: piece.kind == PieceKind::Pawn
                && mv.target.rank() == piece.color.promotion_rank(),
            en_passant: matches!(mv.variant, Variant::EnPassant { .. }),
            castles: matches!(mv.variant, Variant::Castling { .. }),
        }
    }

    fn view_piece(&self, piece: crate::piece::PieceRef) -> PieceView {
        let piece = &self.board.pieces[piece];
        PieceView {
            id: piece.id,
            kind: piece.kind,
            color: piece.color,
            square: piece.square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(code: &str) -> Square {
        Square::from_code(code).unwrap()
    }

    fn id(code: &str) -> PieceId {
        code.parse().unwrap()
    }

    #[test]
    fn new_game_has_twenty_moves() {
        let game = Game::new();
        assert_eq!(game.active_side(), Color::White);
        assert_eq!(game.legal_moves().len(), 20);
        assert!(!game.in_check(Color::White));
        assert!(!game.is_game_over());
    }

    #[test]
    fn opening_move_passes_the_turn() {
        let mut game = Game::new();
        game.make_move(id("WPE"), sq("e4")).unwrap();
        assert_eq!(game.active_side(), Color::Black);
        assert_eq!(game.legal_moves().len(), 20);
        let pawn = game.piece_at(sq("e4")).unwrap();
        assert_eq!(pawn.id, id("WPE"));
        assert_eq!(pawn.kind, PieceKind::Pawn);
    }

    #[test]
    fn illegal_submission_changes_nothing() {
        let mut game = Game::new();
        let before = game.legal_moves();

        // three squares forward
        let result = game.make_move(id("WPE"), sq("e5"));
        assert_eq!(
            result,
            Err(MoveError::IllegalMove {
                piece: id("WPE"),
                target: sq("e5")
            })
        );
        // not this side's piece
        assert!(game.make_move(id("BPE"), sq("e5")).is_err());

        assert_eq!(game.active_side(), Color::White);
        assert_eq!(game.legal_moves(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let mut game = Game::new();
        assert!(matches!(
            game.make_move_codes("??", "e4"),
            Err(MoveError::InvalidPieceCode(_))
        ));
        assert!(matches!(
            game.make_move_codes("WPE", "e9"),
            Err(MoveError::InvalidSquareCode(_))
        ));
    }

    #[test]
    fn queen_check_restricts_replies() {
        let mut game = Game::new();
        game.make_move_codes("WPE", "e4").unwrap();
        game.make_move_codes("BPE", "e5").unwrap();
        game.make_move_codes("WQD", "h5").unwrap();
        game.make_move_codes("BNB", "c6").unwrap();
        // sacrifices the queen with check
        game.make_move_codes("WQD", "f7").unwrap();

        assert!(game.in_check(Color::Black));
        assert!(!game.is_game_over());
        let replies = game.legal_moves();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].piece, id("BKE"));
        assert_eq!(replies[0].to, sq("f7"));
        assert_eq!(replies[0].capture, Some(id("WQD")));

        game.make_move_codes("BKE", "f7").unwrap();
        assert!(!game.in_check(Color::Black));
        assert!(game.graveyard(Color::White).contains(&id("WQD")));
    }

    #[test]
    fn captures_reach_the_graveyard() {
        let mut game = Game::new();
        game.make_move_codes("WPE", "e4").unwrap();
        game.make_move_codes("BPD", "d5").unwrap();
        game.make_move_codes("WPE", "d5").unwrap();
        assert_eq!(game.graveyard(Color::Black), vec![id("BPD")]);
        assert_eq!(game.roster(Color::Black).len(), 15);
        assert_eq!(game.piece_at(sq("d5")).unwrap().id, id("WPE"));
    }

    #[test]
    fn game_over_rejects_further_moves() {
        let mut game = Game::new();
        game.make_move_codes("WPF", "f3").unwrap();
        game.make_move_codes("BPE", "e5").unwrap();
        game.make_move_codes("WPG", "g4").unwrap();
        game.make_move_codes("BQD", "h4").unwrap();
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(
            game.make_move_codes("WPA", "a3"),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn result_messages() {
        assert_eq!(GameResult::WhiteWins.message(), "White wins by checkmate.");
        assert_eq!(GameResult::Stalemate.message(), "Draw by stalemate.");
    }
}
