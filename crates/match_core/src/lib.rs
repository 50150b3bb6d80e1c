//! Match state and move-navigation engine.
//!
//! Owns the authoritative game timeline for a human-vs-bot match:
//! - the canonical move history with takeback, including the composite
//!   "retract both halves of a full move" case,
//! - a ply-cursor history viewer that replays past positions without
//!   touching the live board,
//! - incremental transposition counting for threefold-repetition claims,
//! - the boundary API the presentation layer and the bot scheduler talk
//!   to.
//!
//! Chess legality itself comes from `shakmaty`; this crate never
//! reimplements the rules.

pub mod board;
pub mod error;
pub mod events;
pub mod repetition;
pub mod session;
pub mod viewer;

pub use board::{describe_outcome, repetition_key, Frame, TrackedBoard};
pub use error::{MatchError, MatchResult};
pub use events::{EventBus, MatchEvent};
pub use repetition::Transpositions;
pub use session::{MatchSession, SquareAction};
pub use viewer::{HistoryViewer, ViewedBoard};
