//! Chess board widget rendering

use iced::widget::{button, column, container, row, text};
use iced::{Color, Element, Length};
use match_core::MatchSession;
use shakmaty::{File, Position, Rank, Square};

use crate::styles::{self, SQUARE_SIZE};

/// Message type for board interactions
#[derive(Debug, Clone)]
pub enum BoardMessage {
    SquareClicked(Square),
}

/// Renders the board the history cursor points at.
pub struct BoardView<'a> {
    session: &'a MatchSession,
    flipped: bool,
    legal_targets: Vec<Square>,
}

impl<'a> BoardView<'a> {
    pub fn new(session: &'a MatchSession, flipped: bool) -> Self {
        let legal_targets = if session.viewer().is_live() {
            session.legal_targets()
        } else {
            Vec::new()
        };
        Self {
            session,
            flipped,
            legal_targets,
        }
    }

    /// Create the board view element
    pub fn view(&self) -> Element<'a, BoardMessage> {
        let mut board_column = column![].spacing(0);

        for rank in 0..8u32 {
            let display_rank = if self.flipped { rank } else { 7 - rank };
            let mut rank_row = row![].spacing(0);

            for file in 0..8u32 {
                let display_file = if self.flipped { 7 - file } else { file };
                let square =
                    Square::from_coords(File::new(display_file), Rank::new(display_rank));
                rank_row = rank_row.push(self.render_square(square));
            }

            board_column = board_column.push(rank_row);
        }

        let reviewing = !self.session.viewer().is_live();
        container(board_column)
            .style(move |_theme| container::Style {
                border: iced::Border {
                    color: if reviewing {
                        styles::REVIEW_BORDER
                    } else {
                        styles::LIVE_BORDER
                    },
                    width: if reviewing { 4.0 } else { 2.0 },
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Render a single square
    fn render_square(&self, square: Square) -> Element<'a, BoardMessage> {
        let position = self.session.viewed_position();
        let board = self.session.viewed_board();

        let is_light = (usize::from(square.file()) + usize::from(square.rank())) % 2 == 1;
        let mut bg_color = if is_light {
            styles::LIGHT_SQUARE
        } else {
            styles::DARK_SQUARE
        };

        // Highlight selected square (live board only)
        if self.session.selected() == Some(square) {
            bg_color = styles::SELECTED_SQUARE;
        }

        // Highlight the checked king
        if position.is_check() {
            if let Some(king) = position.board().king_of(position.turn()) {
                if square == king {
                    bg_color = blend_colors(bg_color, styles::CHECK_SQUARE);
                }
            }
        }

        // Highlight last move of the viewed position
        if let Some(last) = board.last_move() {
            if last.from() == Some(square) || last.to() == square {
                bg_color = blend_colors(bg_color, styles::LAST_MOVE_SQUARE);
            }
        }

        let piece_text = position
            .board()
            .piece_at(square)
            .map(|p| styles::piece_char(p.color, p.role));

        // Legal move indicator
        let is_legal_target = self.legal_targets.contains(&square);

        let content: Element<'a, BoardMessage> = if let Some(ch) = piece_text {
            text(ch.to_string()).size(SQUARE_SIZE * 0.75).center().into()
        } else if is_legal_target {
            // Show dot for legal moves
            text("●")
                .size(SQUARE_SIZE * 0.3)
                .color(Color::from_rgba(0.0, 0.0, 0.0, 0.3))
                .center()
                .into()
        } else {
            text("").into()
        };

        button(
            container(content)
                .width(SQUARE_SIZE)
                .height(SQUARE_SIZE)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(SQUARE_SIZE)
        .height(SQUARE_SIZE)
        .style(move |_theme, status| {
            let hover_overlay = match status {
                button::Status::Hovered => 0.1,
                button::Status::Pressed => 0.2,
                _ => 0.0,
            };
            button::Style {
                background: Some(iced::Background::Color(if hover_overlay > 0.0 {
                    blend_colors(bg_color, Color::from_rgba(1.0, 1.0, 1.0, hover_overlay))
                } else {
                    bg_color
                })),
                border: iced::Border::default(),
                text_color: Color::BLACK,
                ..Default::default()
            }
        })
        .on_press(BoardMessage::SquareClicked(square))
        .into()
    }
}

/// Blend two colors together
fn blend_colors(base: Color, overlay: Color) -> Color {
    let alpha = overlay.a;
    Color::from_rgb(
        base.r * (1.0 - alpha) + overlay.r * alpha,
        base.g * (1.0 - alpha) + overlay.g * alpha,
        base.b * (1.0 - alpha) + overlay.b * alpha,
    )
}
