//! Tests for the canonical timeline: push/pop round trips, repetition
//! counting across irreversible boundaries, draw claims and terminal
//! detection.

use match_core::{HistoryViewer, TrackedBoard};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, Outcome, Position, Role};

/// Plays a sequence of SAN moves onto the board.
fn play(board: &mut TrackedBoard, sans: &[&str]) {
    for s in sans {
        let san: SanPlus = s.parse().expect("valid SAN");
        let mv = san.san.to_move(board.position()).expect("legal move");
        board.push(mv).expect("push succeeds");
    }
}

fn position_from_fen(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .expect("valid FEN")
        .into_position(CastlingMode::Standard)
        .expect("legal position")
}

// =============================================================================
// Push / pop round trips
// =============================================================================

#[test]
fn push_then_pop_restores_prior_board() {
    let mut board = TrackedBoard::new();
    let key_before = board.key();
    let fen_before = board.fen();
    let moves_before = board.legal_moves().len();

    play(&mut board, &["e4"]);
    assert_eq!(board.history_len(), 1);

    let frame = board.pop().expect("one move to pop");
    assert_eq!(frame.san, "e4");
    assert_eq!(board.history_len(), 0);
    assert_eq!(board.key(), key_before);
    assert_eq!(board.fen(), fen_before);
    assert_eq!(board.legal_moves().len(), moves_before);
}

#[test]
fn round_trip_holds_over_longer_sequences() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);

    let key_before = board.key();
    let fen_before = board.fen();

    play(&mut board, &["Ba4", "Nf6"]);
    board.pop().unwrap();
    board.pop().unwrap();

    assert_eq!(board.key(), key_before);
    assert_eq!(board.fen(), fen_before);
    assert_eq!(board.history_len(), 6);
}

#[test]
fn pop_on_empty_history_returns_none() {
    let mut board = TrackedBoard::new();
    assert!(board.pop().is_none());
}

// =============================================================================
// Repetition counting
// =============================================================================

#[test]
fn reversible_moves_accumulate_repetitions() {
    let mut board = TrackedBoard::new();
    assert_eq!(board.repetitions(), 1, "start position is seeded");

    // Knights out and back: the start position recurs.
    play(&mut board, &["Nc3", "Nc6", "Nb1", "Nb8"]);
    assert_eq!(board.repetitions(), 2);
}

#[test]
fn irreversible_move_clears_counts() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["Nc3", "Nc6", "Nb1", "Nb8"]);
    assert_eq!(board.repetitions(), 2);

    // A pawn push makes every earlier position unreachable.
    play(&mut board, &["e4"]);
    assert_eq!(board.repetitions(), 1);
}

#[test]
fn retracting_past_a_clear_does_not_resurrect_counts() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["Nc3", "Nc6", "Nb1", "Nb8", "e4"]);

    board.pop().unwrap();
    // The clear performed by e4 stays cleared; the start key reads zero.
    assert_eq!(board.repetitions(), 0);
    assert!(!board.can_claim_threefold());
}

#[test]
fn knights_shuttle_allows_threefold_claim() {
    let mut board = TrackedBoard::new();
    play(
        &mut board,
        &[
            "Nc3", "Nc6", "Nb1", "Nb8", "Nc3", "Nc6", "Nb1", "Nb8", "Nc3", "Nc6",
        ],
    );

    assert!(board.can_claim_threefold());
    assert_eq!(board.outcome(true), Some(Outcome::Draw));
    assert_eq!(board.outcome(false), None, "nobody claimed yet");
}

#[test]
fn lookahead_sees_claim_one_ply_before_the_repetition() {
    let mut board = TrackedBoard::new();
    // The start position has occurred twice (seed + after the first
    // shuttle); Black to move can force the third occurrence with Nb8,
    // so the claim is already available before that move is committed.
    play(
        &mut board,
        &["Nc3", "Nc6", "Nb1", "Nb8", "Nc3", "Nc6", "Nb1"],
    );

    assert_eq!(board.repetitions(), 2);
    assert!(board.can_claim_threefold());
}

#[test]
fn no_claim_in_a_fresh_game() {
    let board = TrackedBoard::new();
    assert!(!board.can_claim_threefold());
    assert!(!board.can_claim_fifty_moves());
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn fifty_move_claim_at_100_halfmoves() {
    let board =
        TrackedBoard::from_position(position_from_fen("8/8/8/4k3/8/4K3/8/8 w - - 100 60"));
    assert!(board.can_claim_fifty_moves());
    assert_eq!(board.outcome(true), Some(Outcome::Draw));
}

#[test]
fn no_fifty_move_claim_at_99_halfmoves() {
    let board =
        TrackedBoard::from_position(position_from_fen("8/8/8/4k3/8/4K3/8/8 w - - 99 60"));
    assert!(!board.can_claim_fifty_moves());
}

// =============================================================================
// Terminal positions
// =============================================================================

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["f3", "e6", "g4", "Qh4#"]);

    assert!(board.position().is_checkmate());
    assert_eq!(
        board.outcome(false),
        Some(Outcome::Decisive {
            winner: Color::Black
        })
    );
}

#[test]
fn capture_frames_record_the_captured_piece() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "d5", "exd5"]);

    let frame = board.frames().last().unwrap();
    let captured = frame.captured.expect("exd5 captures");
    assert_eq!(captured.role, Role::Pawn);
    assert_eq!(captured.color, Color::Black);
}

#[test]
fn en_passant_capture_is_recorded() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "a6", "e5", "d5", "exd6"]);

    let frame = board.frames().last().unwrap();
    assert!(frame.mv.is_en_passant());
    let captured = frame.captured.expect("en passant captures a pawn");
    assert_eq!(captured.role, Role::Pawn);
    assert_eq!(captured.color, Color::Black);
}

// =============================================================================
// History viewer
// =============================================================================

#[test]
fn viewer_replays_past_positions_without_touching_the_timeline() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "e5", "Nf3", "Nc6"]);
    let live_fen = board.fen();

    let mut viewer = HistoryViewer::new();
    viewer.set_ply(2, &board);
    assert_eq!(viewer.ply(), 2);
    assert_eq!(viewer.board(&board).history_len(), 2);
    assert_ne!(viewer.board(&board).fen(), live_fen);

    // The canonical timeline is untouched.
    assert_eq!(board.history_len(), 4);
    assert_eq!(board.fen(), live_fen);
}

#[test]
fn end_of_history_normalizes_to_live() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "e5"]);

    let mut viewer = HistoryViewer::new();
    viewer.set_ply(2, &board);
    assert!(viewer.is_live());

    viewer.set_ply(1, &board);
    assert!(!viewer.is_live());
    viewer.step_forward(&board);
    assert!(viewer.is_live(), "stepping onto the end snaps back to live");
}

#[test]
fn returning_to_ply_zero_always_yields_the_live_board() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["d4", "d5", "c4", "e6", "Nc3"]);
    let live_fen = board.fen();

    let mut viewer = HistoryViewer::new();
    for ply in [3, 1, 4, 2] {
        viewer.set_ply(ply, &board);
    }
    viewer.set_ply(0, &board);

    assert!(viewer.is_live());
    assert_eq!(viewer.board(&board).fen(), live_fen);
}

#[test]
fn stepping_back_pops_the_existing_copy_incrementally() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "e5", "Nf3", "Nc6", "Bb5"]);

    let mut viewer = HistoryViewer::new();
    viewer.set_ply(4, &board);
    viewer.step_back(&board);
    viewer.step_back(&board);
    assert_eq!(viewer.ply(), 2);

    // Matches a full replay to the same ply.
    let mut fresh = HistoryViewer::new();
    fresh.set_ply(2, &board);
    assert_eq!(
        viewer.board(&board).fen(),
        fresh.board(&board).fen()
    );
}

#[test]
fn step_back_from_live_shows_the_position_before_the_last_move() {
    let mut board = TrackedBoard::new();
    play(&mut board, &["e4", "e5", "Nf3"]);

    let mut viewer = HistoryViewer::new();
    viewer.step_back(&board);
    assert_eq!(viewer.ply(), 2);

    // The earliest reachable view is the position after the first move.
    viewer.step_back(&board);
    viewer.step_back(&board);
    viewer.step_back(&board);
    assert_eq!(viewer.ply(), 1);
}
