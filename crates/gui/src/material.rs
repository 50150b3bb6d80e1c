//! Captured-material tracker, fed by match events.
//!
//! Keeps the list of pieces each side has captured plus the running
//! material balance in pawn units, positive for White. Takebacks undo
//! exactly one capture.

use bot_engine::capture_value;
use match_core::MatchEvent;
use shakmaty::{Color, Role};

use crate::styles::piece_char;

#[derive(Debug, Default)]
pub struct MaterialTracker {
    /// Black pieces White has captured
    taken_by_white: Vec<Role>,
    /// White pieces Black has captured
    taken_by_black: Vec<Role>,
    /// Pawn-unit balance, positive for White
    advantage: i32,
}

impl MaterialTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advantage(&self) -> i32 {
        self.advantage
    }

    /// Updates the tally from a capture or takeback event; all other
    /// events are ignored.
    pub fn apply(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::CaptureApplied { captured, .. } => {
                self.record(captured.color, captured.role, false);
            }
            MatchEvent::TookBack {
                captured: Some(captured),
                ..
            } => {
                self.record(captured.color, captured.role, true);
            }
            _ => {}
        }
    }

    fn record(&mut self, color: Color, role: Role, took_back: bool) {
        let value = capture_value(role);
        let (pile, sign) = match color {
            // A black piece was captured: it goes on White's pile.
            Color::Black => (&mut self.taken_by_white, 1),
            Color::White => (&mut self.taken_by_black, -1),
        };

        if took_back {
            if let Some(idx) = pile.iter().position(|&r| r == role) {
                pile.remove(idx);
            }
            self.advantage -= sign * value;
        } else {
            pile.push(role);
            self.advantage += sign * value;
        }
    }

    /// Glyph row of the pieces a side has captured, most valuable first.
    pub fn captured_glyphs(&self, by: Color) -> String {
        let (pile, victim_color) = match by {
            Color::White => (&self.taken_by_white, Color::Black),
            Color::Black => (&self.taken_by_black, Color::White),
        };
        let mut sorted = pile.clone();
        sorted.sort_by_key(|&r| std::cmp::Reverse(capture_value(r)));
        sorted
            .iter()
            .map(|&r| piece_char(victim_color, r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Move, Piece, Square};

    fn capture_event(color: Color, role: Role) -> MatchEvent {
        MatchEvent::CaptureApplied {
            mv: Move::Normal {
                role: Role::Queen,
                from: Square::D1,
                to: Square::D8,
                capture: Some(role),
                promotion: None,
            },
            san: "Qxd8".to_owned(),
            captured: Piece { color, role },
            game_over: false,
        }
    }

    #[test]
    fn captures_move_the_balance() {
        let mut tracker = MaterialTracker::new();
        tracker.apply(&capture_event(Color::Black, Role::Queen));
        assert_eq!(tracker.advantage(), 9);

        tracker.apply(&capture_event(Color::White, Role::Knight));
        assert_eq!(tracker.advantage(), 6);
    }

    #[test]
    fn takeback_undoes_one_capture() {
        let mut tracker = MaterialTracker::new();
        tracker.apply(&capture_event(Color::Black, Role::Rook));
        tracker.apply(&MatchEvent::TookBack {
            mv: Move::Normal {
                role: Role::Queen,
                from: Square::D1,
                to: Square::D8,
                capture: Some(Role::Rook),
                promotion: None,
            },
            captured: Some(Piece {
                color: Color::Black,
                role: Role::Rook,
            }),
        });
        assert_eq!(tracker.advantage(), 0);
        assert!(tracker.captured_glyphs(Color::White).is_empty());
    }
}
