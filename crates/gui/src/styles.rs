//! Styling constants, dimensions and piece glyphs

use iced::Color;
use shakmaty::{Color as Side, Role};

// Board colors
pub const LIGHT_SQUARE: Color = Color::from_rgb(0.94, 0.85, 0.71); // Wheat
pub const DARK_SQUARE: Color = Color::from_rgb(0.71, 0.53, 0.39); // Sienna
pub const SELECTED_SQUARE: Color = Color::from_rgb(0.68, 0.85, 0.37); // Yellow-green
pub const LAST_MOVE_SQUARE: Color = Color::from_rgba(0.9, 0.9, 0.0, 0.4); // Yellow overlay
pub const CHECK_SQUARE: Color = Color::from_rgba(0.9, 0.2, 0.2, 0.5); // Red overlay

// Board border: dimmed blue while reviewing history
pub const LIVE_BORDER: Color = Color::from_rgb(0.3, 0.3, 0.3);
pub const REVIEW_BORDER: Color = Color::from_rgb(0.55, 0.55, 0.75);

// Dimensions
pub const SQUARE_SIZE: f32 = 70.0;
pub const PANEL_WIDTH: f32 = 340.0;

/// Unicode glyph for a piece.
pub fn piece_char(color: Side, role: Role) -> char {
    match (color, role) {
        (Side::White, Role::King) => '♔',
        (Side::White, Role::Queen) => '♕',
        (Side::White, Role::Rook) => '♖',
        (Side::White, Role::Bishop) => '♗',
        (Side::White, Role::Knight) => '♘',
        (Side::White, Role::Pawn) => '♙',
        (Side::Black, Role::King) => '♚',
        (Side::Black, Role::Queen) => '♛',
        (Side::Black, Role::Rook) => '♜',
        (Side::Black, Role::Bishop) => '♝',
        (Side::Black, Role::Knight) => '♞',
        (Side::Black, Role::Pawn) => '♟',
    }
}
