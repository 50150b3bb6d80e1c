//! Bot strategies for the match.
//!
//! A closed set of move-choice policies over a `shakmaty` position:
//! uniform-random, greedy-capture and fixed-depth minimax. All three
//! take a board and return an optional move (none when no legal move
//! exists); none keep state across calls.

use rand::seq::SliceRandom;
use rand::thread_rng;
use shakmaty::{Chess, Move, Position};

pub mod eval;
pub mod search;

pub use eval::{capture_value, evaluate};
pub use search::minimax;


/// Default minimax depth in plies.
pub const DEFAULT_DEPTH: u8 = 2;

/// A move-choice policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Pick uniformly among all legal moves.
    Random,
    /// Prefer the most valuable capture; otherwise play randomly.
    Greedy,
    /// Alpha-beta minimax to a fixed depth.
    Minimax { depth: u8 },
}

impl Strategy {
    /// Chooses a move for the side to move, or `None` when no legal
    /// move exists.
    pub fn choose_move(&self, position: &Chess) -> Option<Move> {
        match self {
            Strategy::Random => random_move(position),
            Strategy::Greedy => greedy_move(position),
            Strategy::Minimax { depth } => {
                let (_, best) = minimax(position, *depth, i32::MIN, i32::MAX);
                // Depth 0 (or no result) falls back to a random legal
                // move rather than passing.
                best.or_else(|| random_move(position))
            }
        }
    }

    /// Stable identifier used by the settings file.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Minimax { .. } => "minimax",
        }
    }

    /// Inverse of [`Strategy::name`].
    pub fn from_name(name: &str, depth: u8) -> Option<Strategy> {
        match name {
            "random" => Some(Strategy::Random),
            "greedy" => Some(Strategy::Greedy),
            "minimax" => Some(Strategy::Minimax { depth }),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Random => write!(f, "Random"),
            Strategy::Greedy => write!(f, "Greedy"),
            Strategy::Minimax { depth } => write!(f, "Minimax (depth {depth})"),
        }
    }
}

fn random_move(position: &Chess) -> Option<Move> {
    position.legal_moves().choose(&mut thread_rng()).cloned()
}

/// Ranks capturing moves by the value of the captured piece and picks
/// uniformly among the maximal ones; with no capture available, plays
/// uniformly among all legal moves.
fn greedy_move(position: &Chess) -> Option<Move> {
    let moves = position.legal_moves();

    let mut best_value = -1;
    let mut best_captures: Vec<Move> = Vec::new();
    for mv in &moves {
        let Some(role) = mv.capture() else {
            continue;
        };
        let value = capture_value(role);
        if value > best_value {
            best_value = value;
            best_captures.clear();
            best_captures.push(mv.clone());
        } else if value == best_value {
            best_captures.push(mv.clone());
        }
    }

    if !best_captures.is_empty() {
        return best_captures.choose(&mut thread_rng()).cloned();
    }
    moves.choose(&mut thread_rng()).cloned()
}
