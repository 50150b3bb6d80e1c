//! The canonical match timeline: live position, move history, repetition
//! counts and terminal-state queries.
//!
//! `shakmaty::Chess` applies moves by consuming the position, so there is
//! no unmake. The timeline keeps one frame per applied move holding the
//! position *before* that move, which makes `pop` a cheap frame restore
//! and lets the history viewer replay any earlier position.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, Color, EnPassantMode, Move, MoveList, Outcome, Piece, Position, Role};
use tracing::debug;

use crate::error::{MatchError, MatchResult};
use crate::repetition::Transpositions;

/// One applied half-move: the position it was played from plus what it did.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position before the move was applied
    pub prior: Chess,
    /// The move itself
    pub mv: Move,
    /// SAN of the move, generated against `prior`
    pub san: String,
    /// Piece removed from the board by this move, if any
    pub captured: Option<Piece>,
}

/// Live board plus the full frame stack and incremental repetition counts.
#[derive(Debug, Clone)]
pub struct TrackedBoard {
    position: Chess,
    frames: Vec<Frame>,
    transpositions: Transpositions,
}

impl Default for TrackedBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackedBoard {
    /// Starting position, with its key already counted once.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Timeline rooted at an arbitrary position (e.g. loaded from FEN),
    /// with its key already counted once.
    pub fn from_position(position: Chess) -> Self {
        let mut transpositions = Transpositions::new();
        transpositions.count(repetition_key(&position));
        Self {
            position,
            frames: Vec::new(),
            transpositions,
        }
    }

    /// The live position.
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of half-moves played so far.
    pub fn history_len(&self) -> usize {
        self.frames.len()
    }

    /// Applied frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// SAN of every applied move, oldest first.
    pub fn sans(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.san.as_str())
    }

    /// From/to squares of the most recent move, for highlighting.
    pub fn last_move(&self) -> Option<&Move> {
        self.frames.last().map(|f| &f.mv)
    }

    /// Repetition key of the live position.
    pub fn key(&self) -> Zobrist64 {
        repetition_key(&self.position)
    }

    /// FEN of the live position.
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Legal moves of the live position.
    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    /// Applies a legal move to the live position, records its frame and
    /// updates the repetition counts. Returns the new frame.
    pub fn push(&mut self, mv: Move) -> MatchResult<&Frame> {
        if !self.position.is_legal(&mv) {
            return Err(MatchError::IllegalMove {
                from: mv.from().map(|s| s.to_string()).unwrap_or_default(),
                to: mv.to().to_string(),
            });
        }

        let prior = self.position.clone();
        let san = SanPlus::from_move(prior.clone(), &mv).to_string();
        let captured = mv.capture().map(|role| Piece {
            color: !prior.turn(),
            role,
        });
        let irreversible = is_irreversible(&prior, &mv);

        self.position.play_unchecked(&mv);

        if irreversible {
            // Every position from before this move is now unreachable.
            self.transpositions.clear();
        }
        self.transpositions.count(self.key());

        debug!(san = %san, ply = self.frames.len() + 1, irreversible, "pushed move");
        self.frames.push(Frame {
            prior,
            mv,
            san,
            captured,
        });
        Ok(self.frames.last().expect("frame just pushed"))
    }

    /// Retracts the most recent half-move, restoring the prior position
    /// and decrementing the count of the position being left. Returns the
    /// popped frame, or `None` when no moves have been played.
    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        self.transpositions.uncount(self.key());
        self.position = frame.prior.clone();
        debug!(san = %frame.san, ply = self.frames.len(), "popped move");
        Some(frame)
    }

    /// Occurrences of the live position's key.
    pub fn repetitions(&self) -> u32 {
        self.transpositions.occurrences(self.key())
    }

    /// Whether the side to move can claim a draw by threefold repetition:
    /// either the live position has already occurred three times, or some
    /// legal move reaches a position that has occurred twice (so the
    /// claim accompanies the move that completes the third occurrence).
    pub fn can_claim_threefold(&self) -> bool {
        if self.repetitions() >= 3 {
            return true;
        }

        for mv in self.legal_moves() {
            let mut probe = self.position.clone();
            probe.play_unchecked(&mv);
            if self.transpositions.occurrences(repetition_key(&probe)) >= 2 {
                return true;
            }
        }

        false
    }

    /// Whether the fifty-move rule allows a draw claim.
    pub fn can_claim_fifty_moves(&self) -> bool {
        self.position.halfmoves() >= 100
    }

    /// Terminal result of the live position. Checkmate, stalemate and
    /// insufficient material end the game on their own; repetition and
    /// fifty-move draws only count when `claim_draw` is set.
    pub fn outcome(&self, claim_draw: bool) -> Option<Outcome> {
        if let Some(outcome) = self.position.outcome() {
            return Some(outcome);
        }
        if claim_draw && (self.can_claim_threefold() || self.can_claim_fifty_moves()) {
            return Some(Outcome::Draw);
        }
        None
    }
}

/// Repetition key of a position: Zobrist hash with en passant folded in
/// only when a legal en passant capture exists, per the FIDE repetition
/// rule.
pub fn repetition_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

/// Whether a move permanently changes the set of reachable positions:
/// captures and pawn moves, leaving a position with a legal en passant
/// capture, or any change to castling rights.
fn is_irreversible(position: &Chess, mv: &Move) -> bool {
    if mv.is_capture() || mv.role() == Role::Pawn {
        return true;
    }
    if position.ep_square(EnPassantMode::Legal).is_some() {
        return true;
    }
    let rights_before = position.castles().castling_rights();
    let mut after = position.clone();
    after.play_unchecked(mv);
    after.castles().castling_rights() != rights_before
}

/// Human-readable announcement for a terminal result.
pub fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Decisive {
            winner: Color::White,
        } => "Checkmate! White wins.".to_owned(),
        Outcome::Decisive {
            winner: Color::Black,
        } => "Checkmate! Black wins.".to_owned(),
        Outcome::Draw => "Draw.".to_owned(),
    }
}
