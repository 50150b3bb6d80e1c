use super::*;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Square};

fn position(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .expect("valid FEN")
        .into_position(CastlingMode::Standard)
        .expect("legal position")
}

#[test]
fn depth_zero_evaluates_without_a_move() {
    let pos = Chess::default();
    let (score, mv) = minimax(&pos, 0, i32::MIN, i32::MAX);
    assert_eq!(mv, None);
    assert_eq!(score, 0);
}

#[test]
fn finished_position_evaluates_without_a_move() {
    let pos = position("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    let (_, mv) = minimax(&pos, 3, i32::MIN, i32::MAX);
    assert_eq!(mv, None);
}

#[test]
fn white_grabs_the_hanging_queen() {
    let pos = position("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let (score, mv) = minimax(&pos, 2, i32::MIN, i32::MAX);
    let mv = mv.expect("moves exist");
    assert_eq!(mv.to(), Square::D5);
    assert!(score > 0);
}

#[test]
fn black_minimizes_and_grabs_the_white_queen() {
    let pos = position("4k3/8/8/4p3/3Q4/8/8/4K3 b - - 0 1");
    let (score, mv) = minimax(&pos, 2, i32::MIN, i32::MAX);
    let mv = mv.expect("moves exist");
    assert_eq!(mv.to(), Square::D4);
    assert!(score < 0);
}

#[test]
fn deeper_search_still_returns_a_legal_move_from_the_start() {
    let pos = Chess::default();
    let (_, mv) = minimax(&pos, 3, i32::MIN, i32::MAX);
    let mv = mv.expect("moves exist");
    assert!(pos.is_legal(&mv));
}
