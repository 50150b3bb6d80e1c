//! Typed notifications fanned out to loosely-coupled observers (the
//! moves list, the material tracker, the status line).
//!
//! Events are delivered synchronously, in emission order, over plain
//! `std::sync::mpsc` channels. Observers that have hung up are dropped
//! from the registry on the next emission.

use std::sync::mpsc::{channel, Receiver, Sender};

use shakmaty::{Move, Piece};

/// A notification from the match core.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A non-capturing move was applied to the timeline.
    MoveApplied {
        mv: Move,
        san: String,
        game_over: bool,
    },
    /// A capturing move was applied to the timeline.
    CaptureApplied {
        mv: Move,
        san: String,
        captured: Piece,
        game_over: bool,
    },
    /// A half-move was retracted from the timeline.
    TookBack {
        mv: Move,
        captured: Option<Piece>,
    },
    /// A user-facing status message: turn info, warnings, game-over
    /// announcements, bot diagnostics.
    Status { text: String },
}

/// Registry of observer channels.
#[derive(Debug, Default)]
pub struct EventBus {
    observers: Vec<Sender<MatchEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<MatchEvent> {
        let (tx, rx) = channel();
        self.observers.push(tx);
        rx
    }

    /// Delivers `event` to every live observer, pruning the ones that
    /// have disconnected.
    pub fn emit(&mut self, event: MatchEvent) {
        self.observers
            .retain(|observer| observer.send(event.clone()).is_ok());
    }

    pub fn status(&mut self, text: impl Into<String>) {
        self.emit(MatchEvent::Status { text: text.into() });
    }
}
