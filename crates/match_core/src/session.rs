//! The match session: boundary API between the presentation layer and
//! the timeline.
//!
//! Owns the canonical board, the history cursor, the pending square
//! selection and the observer registry. All mutations of the timeline
//! (human move, bot move, takeback) go through here and are serialized
//! by the caller's update loop.

use shakmaty::{Chess, Color, Move, Outcome, Position, Rank, Role, Square};
use tracing::warn;

use crate::board::{describe_outcome, TrackedBoard};
use crate::error::{MatchError, MatchResult};
use crate::events::{EventBus, MatchEvent};
use crate::viewer::HistoryViewer;

/// What a square click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAction {
    /// A piece of the side to move was selected as the pending origin.
    Selected,
    /// A move was applied to the timeline.
    Moved { game_over: bool },
    /// The click changed nothing (empty square, game over, reviewing
    /// history).
    Ignored,
}

#[derive(Debug)]
pub struct MatchSession {
    board: TrackedBoard,
    viewer: HistoryViewer,
    selected: Option<Square>,
    bot_enabled: bool,
    game_over: bool,
    events: EventBus,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MatchSession {
    pub fn new(bot_enabled: bool) -> Self {
        Self::from_board(TrackedBoard::new(), bot_enabled)
    }

    /// Session over an existing timeline (e.g. a position loaded from
    /// FEN).
    pub fn from_board(board: TrackedBoard, bot_enabled: bool) -> Self {
        Self {
            board,
            viewer: HistoryViewer::new(),
            selected: None,
            bot_enabled,
            game_over: false,
            events: EventBus::new(),
        }
    }

    /// Registers an observer for match events.
    pub fn subscribe(&mut self) -> std::sync::mpsc::Receiver<MatchEvent> {
        self.events.subscribe()
    }

    /// Starts a fresh game. The caller must cancel any pending bot action
    /// first.
    pub fn reset(&mut self) {
        self.board = TrackedBoard::new();
        self.viewer = HistoryViewer::new();
        self.selected = None;
        self.game_over = false;
        self.events.status("New game. White to move.");
    }

    pub fn board(&self) -> &TrackedBoard {
        &self.board
    }

    pub fn viewer(&self) -> &HistoryViewer {
        &self.viewer
    }

    /// The position under the history cursor (the live one at ply 0).
    pub fn viewed_position(&self) -> &Chess {
        self.viewer.position(&self.board)
    }

    /// The board under the history cursor, for highlights and FEN export.
    pub fn viewed_board(&self) -> &TrackedBoard {
        self.viewer.board(&self.board)
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal destination squares from the selected origin.
    pub fn legal_targets(&self) -> Vec<Square> {
        let Some(from) = self.selected else {
            return Vec::new();
        };
        self.board
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(from))
            .map(click_target)
            .collect()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn bot_enabled(&self) -> bool {
        self.bot_enabled
    }

    /// Enables or disables bot scheduling for the black side. Switchable
    /// between moves; "disabled" means two-human hot-seat.
    pub fn set_bot_enabled(&mut self, enabled: bool) {
        self.bot_enabled = enabled;
    }

    /// Handles a click on `square`: selects an origin, applies a pending
    /// move, or rejects the input. Promotions are completed as queen.
    pub fn select_square(&mut self, square: Square) -> MatchResult<SquareAction> {
        if self.game_over {
            return Ok(SquareAction::Ignored);
        }
        if !self.viewer.is_live() {
            self.events
                .status("Reviewing history. Return to the live position to move.");
            return Ok(SquareAction::Ignored);
        }

        let Some(from) = self.selected else {
            return Ok(self.try_select(square));
        };

        if let Some(mv) = self.find_move(from, square) {
            let (_, game_over) = self.apply_to_timeline(mv);
            return Ok(SquareAction::Moved { game_over });
        }

        // Clicking another of your own pieces re-selects it.
        if self.is_own_piece(square) {
            return Ok(self.try_select(square));
        }

        self.selected = None;
        let err = MatchError::IllegalMove {
            from: from.to_string(),
            to: square.to_string(),
        };
        self.events.status(err.to_string());
        Err(err)
    }

    /// Clears any pending origin selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Retracts the most recent move(s). With a bot configured and the
    /// bot's reply already on the board, both the reply and the human's
    /// preceding move come off; if the bot action was still pending only
    /// the human's move comes off, and the caller cancels that pending
    /// action once this returns `Ok`. Returns how many plies were
    /// retracted.
    pub fn request_takeback(&mut self, bot_was_pending: bool) -> MatchResult<usize> {
        if self.game_over {
            return self.reject_takeback("the game is over");
        }
        if !self.viewer.is_live() {
            return self.reject_takeback("reviewing history");
        }
        if self.board.history_len() == 0 {
            return self.reject_takeback("no moves to take back");
        }

        let plies = if bot_was_pending {
            1
        } else if self.bot_enabled
            && self.board.position().turn() == Color::White
            && self.board.history_len() >= 2
        {
            2
        } else {
            1
        };

        for _ in 0..plies {
            let frame = self.board.pop().expect("history length checked above");
            self.events.emit(MatchEvent::TookBack {
                mv: frame.mv,
                captured: frame.captured,
            });
        }

        self.selected = None;
        self.events.status(if plies == 2 {
            "Took back the last full move."
        } else {
            "Took back the last move."
        });
        Ok(plies)
    }

    fn reject_takeback(&mut self, reason: &'static str) -> MatchResult<usize> {
        let err = MatchError::InvalidTakeback { reason };
        warn!(%reason, "takeback rejected");
        self.events.status(err.to_string());
        Err(err)
    }

    /// Claims a draw by threefold repetition or the fifty-move rule.
    pub fn request_draw_claim(&mut self) -> MatchResult<Outcome> {
        if !self.game_over && (self.board.can_claim_threefold() || self.board.can_claim_fifty_moves())
        {
            self.game_over = true;
            self.events.status("Draw claimed. The game is drawn.");
            return Ok(Outcome::Draw);
        }

        let err = MatchError::DrawClaimRejected;
        warn!("draw claim rejected");
        self.events.status(err.to_string());
        Err(err)
    }

    /// Moves the history cursor. Ply 0 (or the end of history) reads
    /// live; any pending selection is dropped when navigating away.
    pub fn set_history_ply(&mut self, ply: usize) {
        self.selected = None;
        self.viewer.set_ply(ply, &self.board);
    }

    /// Steps the cursor one ply toward the start of the game.
    pub fn history_back(&mut self) {
        self.selected = None;
        self.viewer.step_back(&self.board);
    }

    /// Steps the cursor one ply toward the live position.
    pub fn history_forward(&mut self) {
        self.viewer.step_forward(&self.board);
    }

    /// Delivers the bot's chosen move. Snaps the viewer back to live
    /// first (the bot only ever moves on the live position), completes
    /// back-rank pawn moves as queen promotions and validates legality.
    /// An illegal bot move leaves the board untouched.
    pub fn apply_bot_move(&mut self, mv: Move) -> MatchResult<()> {
        if self.game_over {
            return Ok(());
        }

        if !self.viewer.is_live() {
            self.viewer.snap_to_live();
            self.events
                .status("Returned to the live position for the bot's move.");
        }

        let mv = coerce_promotion(mv);
        if !self.board.position().is_legal(&mv) {
            let err = MatchError::BotIllegalMove { mv: mv.to_string() };
            warn!(mv = %mv, "bot move no longer legal; board untouched");
            self.events.status(err.to_string());
            return Err(err);
        }

        let (san, game_over) = self.apply_to_timeline(mv);
        if !game_over {
            self.events.status(format!("Bot played {san}."));
        }
        Ok(())
    }

    fn try_select(&mut self, square: Square) -> SquareAction {
        if self.is_own_piece(square) {
            self.selected = Some(square);
            self.events.status(format!("Selected {square}."));
            SquareAction::Selected
        } else {
            self.events.status("Select your own piece.");
            SquareAction::Ignored
        }
    }

    fn is_own_piece(&self, square: Square) -> bool {
        self.board
            .position()
            .board()
            .piece_at(square)
            .is_some_and(|p| p.color == self.board.position().turn())
    }

    /// Finds the legal move matching a from/to click, defaulting
    /// promotions to queen.
    fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.board
            .legal_moves()
            .iter()
            .find(|&m| {
                m.from() == Some(from)
                    && click_target(m) == to
                    && (m.promotion().is_none() || m.promotion() == Some(Role::Queen))
            })
            .cloned()
    }

    /// Pushes a validated move, updates the game-over flag and emits the
    /// move or capture notification. Returns the frame's SAN and whether
    /// the game ended.
    fn apply_to_timeline(&mut self, mv: Move) -> (String, bool) {
        let frame = self
            .board
            .push(mv)
            .expect("move validated against the live board");
        let mv = frame.mv.clone();
        let san = frame.san.clone();
        let captured = frame.captured;

        let outcome = self.board.outcome(false);
        let game_over = outcome.is_some();
        self.game_over = game_over;
        self.selected = None;

        let event = match captured {
            Some(captured) => MatchEvent::CaptureApplied {
                mv,
                san: san.clone(),
                captured,
                game_over,
            },
            None => MatchEvent::MoveApplied {
                mv,
                san: san.clone(),
                game_over,
            },
        };
        self.events.emit(event);

        if let Some(outcome) = outcome {
            self.events.status(describe_outcome(outcome));
        }
        (san, game_over)
    }
}

/// The square a user clicks to play a move. Castling is encoded
/// king-takes-rook internally, but users click the king's destination
/// file (g or c).
fn click_target(mv: &Move) -> Square {
    match mv {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                shakmaty::File::G
            } else {
                shakmaty::File::C
            };
            Square::from_coords(file, king.rank())
        }
        _ => mv.to(),
    }
}

/// Completes a bot pawn move that reaches the back rank as a queen
/// promotion. Underpromotion is not supported.
fn coerce_promotion(mv: Move) -> Move {
    match mv {
        Move::Normal {
            role: Role::Pawn,
            from,
            to,
            capture,
            promotion: None,
        } if to.rank() == Rank::Eighth || to.rank() == Rank::First => Move::Normal {
            role: Role::Pawn,
            from,
            to,
            capture,
            promotion: Some(Role::Queen),
        },
        _ => mv,
    }
}
