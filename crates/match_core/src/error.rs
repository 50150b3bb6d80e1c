//! Error types for match operations
//!
//! Every variant is recoverable: the match keeps running and the caller
//! surfaces the message to the user.

/// Errors raised by the match boundary API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The attempted move is not legal on the live board.
    #[error("Invalid move: {from} to {to}.")]
    IllegalMove { from: String, to: String },

    /// Takeback requested with nothing to retract, after the game has
    /// ended, or while reviewing history.
    #[error("Cannot take back: {reason}.")]
    InvalidTakeback { reason: &'static str },

    /// The bot produced a move that is no longer legal on the live board.
    #[error("Bot attempted illegal move {mv}.")]
    BotIllegalMove { mv: String },

    /// Draw claimed while neither threefold repetition nor the fifty-move
    /// rule applies.
    #[error("Draw claim rejected: no claimable draw here.")]
    DrawClaimRejected,
}

/// Result type alias for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
