//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The evaluation is anchored to White (positive is good for White), so
//! the search keeps the explicit min/max form: it maximizes when White
//! is to move and minimizes otherwise, rather than negamax over a
//! side-relative score.

use shakmaty::{Chess, Color, Move, Position};

use crate::eval::evaluate;

/// Searches `depth` plies and returns the best score with the move that
/// achieves it. At depth 0 (or in a finished position) the score is the
/// static evaluation and no move is returned.
pub fn minimax(position: &Chess, depth: u8, mut alpha: i32, mut beta: i32) -> (i32, Option<Move>) {
    if depth == 0 || position.is_game_over() {
        return (evaluate(position), None);
    }

    let maximizing = position.turn() == Color::White;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in position.legal_moves() {
        let mut child = position.clone();
        child.play_unchecked(&mv);
        let (score, _) = minimax(&child, depth - 1, alpha, beta);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }

        if beta <= alpha {
            break;
        }
    }

    (best_score, best_move)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
