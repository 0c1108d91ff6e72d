//! Replay determinism and the save/load round trip through the store.

use chess_core::{Color, MoveRecord, PieceKind, Round, Square};
use chess_rules::{Game, ReplayError};
use chess_store::{GameStore, SavedGame};

fn sq(code: &str) -> Square {
    Square::from_code(code).unwrap()
}

fn play(game: &mut Game, moves: &[(&str, &str)]) {
    for (piece, target) in moves {
        game.make_move_codes(piece, target)
            .unwrap_or_else(|error| panic!("{} to {} rejected: {}", piece, target, error));
    }
}

/// A short game touching every record kind: double steps, an en passant
/// capture, castling, and an ordinary capture.
fn eventful_game() -> Game {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("WPE", "e4"),
            ("BPA", "a6"),
            ("WPE", "e5"),
            ("BPD", "d5"),
            ("WPE", "d6"), // en passant
            ("BQD", "d6"), // recaptures the pawn
            ("WNG", "f3"),
            ("BPE", "e5"),
            ("WBF", "e2"),
            ("BBF", "e7"),
            ("WKE", "g1"), // castles
            ("BQD", "d7"),
        ],
    );
    game
}

fn snapshot(game: &Game) -> Vec<String> {
    let mut state: Vec<String> = Vec::new();
    for color in Color::ALL {
        for piece in game.roster(color) {
            state.push(format!("{}:{}:{}", piece.id, piece.kind, piece.square));
        }
        for id in game.graveyard(color) {
            state.push(format!("dead:{}", id));
        }
    }
    state
}

#[test]
fn replay_reproduces_the_position_and_legal_set() {
    let original = eventful_game();
    let rounds = original.history().rounds().to_vec();
    let pending = original.history().pending().cloned();

    let replayed = Game::replay(rounds, pending).unwrap();
    assert_eq!(snapshot(&replayed), snapshot(&original));
    assert_eq!(replayed.active_side(), original.active_side());
    assert_eq!(replayed.legal_moves(), original.legal_moves());
}

#[test]
fn replay_is_idempotent() {
    let original = eventful_game();
    let rounds = original.history().rounds().to_vec();
    let pending = original.history().pending().cloned();

    let once = Game::replay(rounds.clone(), pending.clone()).unwrap();
    let twice = Game::replay(rounds, pending).unwrap();
    assert_eq!(snapshot(&once), snapshot(&twice));
    assert_eq!(once.legal_moves(), twice.legal_moves());
}

#[test]
fn replay_restores_a_pending_half_move() {
    let mut game = Game::new();
    play(&mut game, &[("WPE", "e4"), ("BPE", "e5"), ("WNG", "f3")]);
    assert!(game.history().pending().is_some());

    let replayed = Game::replay(
        game.history().rounds().to_vec(),
        game.history().pending().cloned(),
    )
    .unwrap();
    assert_eq!(replayed.active_side(), Color::Black);
    assert_eq!(replayed.piece_at(sq("f3")).unwrap().kind, PieceKind::Knight);
}

#[test]
fn replay_preserves_the_en_passant_window() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("WPE", "e4"),
            ("BPA", "a6"),
            ("WPE", "e5"),
            ("BPD", "d5"),
        ],
    );
    // the capture is available live, so it must be available after a
    // reload of the very same log
    assert!(game
        .legal_moves_for("WPE".parse().unwrap())
        .iter()
        .any(|m| m.en_passant));

    let replayed = Game::replay(
        game.history().rounds().to_vec(),
        game.history().pending().cloned(),
    )
    .unwrap();
    assert!(replayed
        .legal_moves_for("WPE".parse().unwrap())
        .iter()
        .any(|m| m.en_passant));
    assert_eq!(replayed.legal_moves(), game.legal_moves());
}

#[test]
fn store_round_trip_preserves_the_legal_set() {
    let original = eventful_game();
    let dir = tempfile::tempdir().unwrap();
    let store = GameStore::new(dir.path());

    let name = store.generate_name().unwrap();
    let saved = SavedGame::new(
        name.clone(),
        original.history().rounds().to_vec(),
        original.history().pending().cloned(),
    );
    store.save(&saved).unwrap();

    let loaded = store.load(&name).unwrap();
    assert_eq!(loaded.side_to_move(), original.active_side());

    let restored = Game::replay(loaded.rounds, loaded.pending).unwrap();
    assert_eq!(snapshot(&restored), snapshot(&original));
    assert_eq!(restored.legal_moves(), original.legal_moves());
}

#[test]
fn rewind_navigates_and_new_moves_truncate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("WPE", "e4"),
            ("BPE", "e5"),
            ("WNG", "f3"),
            ("BNB", "c6"),
            ("WBF", "c4"),
            ("BBF", "c5"),
        ],
    );
    assert_eq!(game.history().len(), 3);

    game.rewind_to(1).unwrap();
    assert_eq!(game.history().cursor(), 1);
    // the log is still fully visible for navigation
    assert_eq!(game.history().len(), 3);
    // but the board is back after round one
    assert!(game.piece_at(sq("f3")).is_none());
    assert_eq!(game.piece_at(sq("e4")).unwrap().kind, PieceKind::Pawn);
    assert_eq!(game.active_side(), Color::White);

    // a different continuation overwrites the undone future
    game.make_move_codes("WPD", "d4").unwrap();
    game.make_move_codes("BPE", "d4").unwrap();
    assert_eq!(game.history().len(), 2);
    assert_eq!(
        game.history().round_label(1).unwrap(),
        "2. Wd4 - Bd4"
    );
}

#[test]
fn corrupt_records_abort_the_replay() {
    let unknown = Round::new(
        0,
        MoveRecord::simple("WPE".parse().unwrap(), sq("e4")),
        MoveRecord::simple("BQA".parse().unwrap(), sq("a5")),
    );
    assert_eq!(
        Game::replay(vec![unknown], None).unwrap_err(),
        ReplayError::UnknownPiece("BQA".parse().unwrap())
    );

    // a record that moves a piece onto its own side is data corruption
    let own_capture = Round::new(
        0,
        MoveRecord::simple("WQD".parse().unwrap(), sq("d2")),
        MoveRecord::simple("BPE".parse().unwrap(), sq("e5")),
    );
    assert!(matches!(
        Game::replay(vec![own_capture], None).unwrap_err(),
        ReplayError::Corrupt(_)
    ));
}
