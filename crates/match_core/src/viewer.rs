//! Ply-cursor review of past positions.
//!
//! Ply 0 means "live". Ply `k >= 1` means "position after the k-th
//! half-move"; the end of history normalizes back to 0. Historical
//! positions live on a private copy of the timeline that is only ever
//! popped, never pushed into, so reviewing can never corrupt the
//! canonical board.

use shakmaty::Chess;

use crate::board::TrackedBoard;

/// Which board a render should read from.
#[derive(Debug, Clone)]
pub enum ViewedBoard {
    /// Read the canonical live board.
    Live,
    /// Read a private copy popped down to the cursor's ply.
    Historical(TrackedBoard),
}

/// Cursor over the canonical history.
#[derive(Debug, Clone)]
pub struct HistoryViewer {
    ply: usize,
    view: ViewedBoard,
}

impl Default for HistoryViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryViewer {
    pub fn new() -> Self {
        Self {
            ply: 0,
            view: ViewedBoard::Live,
        }
    }

    /// Current cursor position; 0 is live.
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn is_live(&self) -> bool {
        self.ply == 0
    }

    /// Drops any private copy and returns to the live board.
    pub fn snap_to_live(&mut self) {
        self.ply = 0;
        self.view = ViewedBoard::Live;
    }

    /// Moves the cursor to `ply`. The end of history (and anything past
    /// it) reads as live. A private copy already at or past the target is
    /// popped down incrementally; otherwise a fresh copy of the live
    /// timeline is taken and popped down to the target.
    pub fn set_ply(&mut self, ply: usize, live: &TrackedBoard) {
        let len = live.history_len();
        if ply == 0 || ply >= len {
            self.snap_to_live();
            return;
        }

        let reusable = matches!(
            &self.view,
            ViewedBoard::Historical(board) if board.history_len() >= ply
        );
        if !reusable {
            self.view = ViewedBoard::Historical(live.clone());
        }

        if let ViewedBoard::Historical(scratch) = &mut self.view {
            while scratch.history_len() > ply {
                scratch.pop();
            }
        }
        self.ply = ply;
    }

    /// Steps one ply toward the start of the game. From live this lands
    /// on the position before the last move; the earliest reachable view
    /// is the position after the first move.
    pub fn step_back(&mut self, live: &TrackedBoard) {
        let len = live.history_len();
        if len < 2 {
            return;
        }
        let current = if self.ply == 0 { len } else { self.ply };
        self.set_ply(current.saturating_sub(1).max(1), live);
    }

    /// Steps one ply toward the live position. No-op while live.
    pub fn step_forward(&mut self, live: &TrackedBoard) {
        if self.ply != 0 {
            self.set_ply(self.ply + 1, live);
        }
    }

    /// The position under the cursor.
    pub fn position<'a>(&'a self, live: &'a TrackedBoard) -> &'a Chess {
        match &self.view {
            ViewedBoard::Live => live.position(),
            ViewedBoard::Historical(board) => board.position(),
        }
    }

    /// The board under the cursor, for rendering last-move highlights and
    /// FEN export of the viewed position.
    pub fn board<'a>(&'a self, live: &'a TrackedBoard) -> &'a TrackedBoard {
        match &self.view {
            ViewedBoard::Live => live,
            ViewedBoard::Historical(board) => board,
        }
    }
}
