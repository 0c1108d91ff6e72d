//! Drives a game between two movers.

use chess_core::{Color, PieceKind};

use crate::error::MoveError;
use crate::game::{Game, GameResult};
use crate::mover::{Mover, PromotionChoice};

/// Adapts a mover into the promotion provider for its own submissions.
struct PromoteVia<'a>(&'a mut dyn Mover);

impl PromotionChoice for PromoteVia<'_> {
    fn choose_promotion(&mut self, options: &[PieceKind; 4]) -> PieceKind {
        self.0.choose_promotion(options)
    }
}

/// Pairs a [`Game`] with the two movers operating its sides and drives
/// the turn loop.
///
/// After each turn's legality resolution, the active side's mover is
/// consulted. Illegal submissions are rejected and the mover is asked
/// again; a mover returning `None` leaves the session where it stands.
/// Once no legal move remains, the game-over notification fires exactly
/// once with the human-readable result string.
pub struct Session {
    game: Game,
    white: Box<dyn Mover>,
    black: Box<dyn Mover>,
    on_game_over: Option<Box<dyn FnMut(&str)>>,
    announced: bool,
}

impl Session {
    /// Creates a session over a fresh game.
    pub fn new(white: Box<dyn Mover>, black: Box<dyn Mover>) -> Self {
        Self::over(Game::new(), white, black)
    }

    /// Creates a session over an existing game (e.g. a replayed one).
    pub fn over(game: Game, white: Box<dyn Mover>, black: Box<dyn Mover>) -> Self {
        Session {
            game,
            white,
            black,
            on_game_over: None,
            announced: false,
        }
    }

    /// Installs the game-over notification.
    pub fn with_game_over(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_game_over = Some(Box::new(callback));
        self
    }

    /// The game being driven.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays one turn. Returns false once the game is over or the active
    /// mover stays idle.
    pub fn advance(&mut self) -> bool {
        if self.game.is_game_over() {
            self.announce();
            return false;
        }
        let mover = match self.game.active_side() {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        loop {
            let Some(choice) = mover.take_turn(&self.game) else {
                return false;
            };
            match self.game.make_move_with(
                choice.piece,
                choice.target,
                &mut PromoteVia(mover.as_mut()),
            ) {
                Ok(()) => break,
                Err(MoveError::IllegalMove { .. }) => continue,
                Err(_) => return false,
            }
        }
        if self.game.is_game_over() {
            self.announce();
            return false;
        }
        true
    }

    /// Plays until the game ends or a mover stays idle; returns the
    /// result if one was reached.
    pub fn run(&mut self) -> Option<GameResult> {
        while self.advance() {}
        self.game.result()
    }

    fn announce(&mut self) {
        if self.announced {
            return;
        }
        self.announced = true;
        if let Some(callback) = &mut self.on_game_over {
            if let Some(message) = self.game.result_message() {
                callback(&message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::{MoveChoice, RandomMover};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Plays a fixed script, then stays idle.
    struct Scripted {
        moves: Vec<(&'static str, &'static str)>,
        next: usize,
    }

    impl Scripted {
        fn new(moves: Vec<(&'static str, &'static str)>) -> Self {
            Scripted { moves, next: 0 }
        }
    }

    impl Mover for Scripted {
        fn take_turn(&mut self, _game: &Game) -> Option<MoveChoice> {
            let (piece, target) = self.moves.get(self.next).copied()?;
            self.next += 1;
            Some(MoveChoice {
                piece: piece.parse().unwrap(),
                target: chess_core::Square::from_code(target).unwrap(),
            })
        }
    }

    #[test]
    fn scripted_fools_mate_fires_the_notification() {
        let white = Scripted::new(vec![("WPF", "f3"), ("WPG", "g4")]);
        let black = Scripted::new(vec![("BPE", "e5"), ("BQD", "h4")]);
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);

        let mut session = Session::over(Game::new(), Box::new(white), Box::new(black))
            .with_game_over(move |message| sink.borrow_mut().push(message.to_string()));

        let result = session.run();
        assert_eq!(result, Some(GameResult::BlackWins));
        assert_eq!(messages.borrow().as_slice(), ["Black wins by checkmate."]);
    }

    #[test]
    fn idle_mover_stops_the_session() {
        let mut session = Session::over(
            Game::new(),
            Box::new(Scripted::new(vec![("WPE", "e4")])),
            Box::new(Scripted::new(vec![])),
        );
        assert!(session.advance());
        assert!(!session.advance());
        assert!(!session.game().is_game_over());
        assert_eq!(session.game().active_side(), Color::Black);
    }

    #[test]
    fn random_game_terminates_or_stays_legal() {
        let mut session = Session::over(
            Game::new(),
            Box::new(RandomMover::seeded(1)),
            Box::new(RandomMover::seeded(2)),
        );
        for _ in 0..120 {
            if !session.advance() {
                break;
            }
        }
        // either the game ended, or it is still in a consistent live state
        let game = session.game();
        if let Some(result) = game.result() {
            match result {
                GameResult::WhiteWins => assert!(game.in_check(Color::Black)),
                GameResult::BlackWins => assert!(game.in_check(Color::White)),
                GameResult::Stalemate => {
                    assert!(!game.in_check(game.active_side()));
                }
            }
        } else {
            assert!(!game.legal_moves().is_empty());
        }
    }
}
