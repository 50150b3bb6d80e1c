//! Main application state and logic: the iced update loop and the bot
//! scheduler.
//!
//! All timeline mutations (human move, bot move, takeback) run on the
//! update loop, so they are serialized. The bot thinks on a blocking
//! worker against a clone of the live position taken at scheduling
//! time; the live board is never shared with the worker. At most one
//! bot action is ever in flight, held as an abortable task handle.

use std::time::Duration;

use iced::keyboard::{self, key};
use iced::widget::{
    button, column, container, horizontal_rule, pick_list, row, scrollable, text, vertical_space,
};
use iced::{Element, Length, Subscription, Task, Theme};
use match_core::{MatchEvent, MatchSession, SquareAction};
use shakmaty::{Color, Move, Position};
use tracing::debug;

use crate::board::{BoardMessage, BoardView};
use crate::material::MaterialTracker;
use crate::settings::Settings;
use crate::styles::PANEL_WIDTH;

/// Bot opponent selection; None means two-human hot-seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotChoice {
    None,
    Random,
    Greedy,
    Minimax,
}

impl BotChoice {
    const ALL: [BotChoice; 4] = [
        BotChoice::None,
        BotChoice::Random,
        BotChoice::Greedy,
        BotChoice::Minimax,
    ];

    fn name(self) -> &'static str {
        match self {
            BotChoice::None => "none",
            BotChoice::Random => "random",
            BotChoice::Greedy => "greedy",
            BotChoice::Minimax => "minimax",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "random" => BotChoice::Random,
            "greedy" => BotChoice::Greedy,
            "minimax" => BotChoice::Minimax,
            _ => BotChoice::None,
        }
    }
}

impl std::fmt::Display for BotChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotChoice::None => write!(f, "No bot (hot-seat)"),
            BotChoice::Random => write!(f, "Random"),
            BotChoice::Greedy => write!(f, "Greedy"),
            BotChoice::Minimax => write!(f, "Minimax"),
        }
    }
}

/// Main application state
pub struct MatchApp {
    session: MatchSession,
    events: std::sync::mpsc::Receiver<MatchEvent>,
    material: MaterialTracker,
    status: String,
    settings: Settings,
    /// The at-most-one pending bot action. Creating a new one aborts
    /// the old one first; dropping the handle aborts the task.
    bot_handle: Option<iced::task::Handle>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Board interaction
    Board(BoardMessage),

    // Game controls
    NewGame,
    FlipBoard,
    Takeback,
    ClaimDraw,
    CopyFen,
    BotChanged(BotChoice),
    DepthChanged(u8),

    // History navigation
    HistoryPly(usize),
    HistoryBack,
    HistoryForward,
    HistoryLive,
    HistoryOldest,
    ClearSelection,

    // Bot scheduler
    BotMoveReady(Option<Move>),
}

impl MatchApp {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let mut session = MatchSession::new(settings.strategy().is_some());
        let events = session.subscribe();
        (
            Self {
                session,
                events,
                material: MaterialTracker::new(),
                status: "New game. White to move.".to_owned(),
                settings,
                bot_handle: None,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(handle_key)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Board(BoardMessage::SquareClicked(square)) => {
                let action = self.session.select_square(square);
                self.drain_events();
                if let Ok(SquareAction::Moved { game_over: false }) = action {
                    return self.maybe_schedule_bot_move();
                }
                Task::none()
            }

            Message::NewGame => {
                self.abort_bot();
                self.session.reset();
                self.material.reset();
                self.drain_events();
                Task::none()
            }

            Message::FlipBoard => {
                self.settings.flip_board = !self.settings.flip_board;
                self.settings.save();
                Task::none()
            }

            Message::Takeback => {
                // A rejected takeback must leave any pending bot action
                // untouched, so the handle is only aborted on success.
                let was_pending = self.bot_handle.is_some();
                if self.session.request_takeback(was_pending).is_ok() {
                    self.abort_bot();
                }
                self.drain_events();
                Task::none()
            }

            Message::ClaimDraw => {
                if self.session.request_draw_claim().is_ok() {
                    self.abort_bot();
                }
                self.drain_events();
                Task::none()
            }

            Message::CopyFen => {
                let fen = self.session.viewed_board().fen();
                self.status = "FEN copied to clipboard.".to_owned();
                iced::clipboard::write(fen)
            }

            Message::BotChanged(choice) => {
                self.settings.bot = choice.name().to_owned();
                self.settings.save();
                let enabled = self.settings.strategy().is_some();
                self.session.set_bot_enabled(enabled);
                if !enabled {
                    self.abort_bot();
                    return Task::none();
                }
                self.maybe_schedule_bot_move()
            }

            Message::DepthChanged(depth) => {
                self.settings.depth = depth;
                self.settings.save();
                Task::none()
            }

            Message::HistoryPly(ply) => {
                self.session.set_history_ply(ply);
                self.drain_events();
                Task::none()
            }

            Message::HistoryBack => {
                self.session.history_back();
                Task::none()
            }

            Message::HistoryForward => {
                self.session.history_forward();
                Task::none()
            }

            Message::HistoryLive => {
                self.session.set_history_ply(0);
                Task::none()
            }

            Message::HistoryOldest => {
                self.session.set_history_ply(1);
                Task::none()
            }

            Message::ClearSelection => {
                self.session.clear_selection();
                Task::none()
            }

            Message::BotMoveReady(mv) => {
                self.bot_handle = None;
                match mv {
                    Some(mv) => {
                        let _ = self.session.apply_bot_move(mv);
                    }
                    None => debug!("bot found no move"),
                }
                self.drain_events();
                Task::none()
            }
        }
    }

    /// Schedules the bot's reply if a bot is configured and it is the
    /// bot's turn on a live, unfinished game.
    fn maybe_schedule_bot_move(&mut self) -> Task<Message> {
        if self.session.game_over()
            || self.session.board().position().turn() != Color::Black
        {
            return Task::none();
        }
        self.schedule_bot_move()
    }

    /// Builds the delayed, cancellable bot action: sleep for the
    /// configured delay, then run the search on a blocking worker
    /// against a clone of the live position.
    fn schedule_bot_move(&mut self) -> Task<Message> {
        let Some(strategy) = self.settings.strategy() else {
            return Task::none();
        };
        if self.session.game_over() {
            return Task::none();
        }

        // Enforce the single-flight invariant before creating a handle.
        self.abort_bot();

        let position = self.session.board().position().clone();
        let delay = Duration::from_millis(self.settings.delay_ms);
        debug!(%strategy, ?delay, "scheduling bot move");

        let (task, handle) = Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                tokio::task::spawn_blocking(move || strategy.choose_move(&position))
                    .await
                    .ok()
                    .flatten()
            },
            Message::BotMoveReady,
        )
        .abortable();

        self.bot_handle = Some(handle.abort_on_drop());
        task
    }

    /// Cancels any pending bot action; returns whether one was pending.
    fn abort_bot(&mut self) -> bool {
        match self.bot_handle.take() {
            Some(handle) => {
                handle.abort();
                debug!("cancelled pending bot move");
                true
            }
            None => false,
        }
    }

    /// Applies queued match events to the status line and the material
    /// tracker.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let MatchEvent::Status { text } = &event {
                self.status = text.clone();
            }
            self.material.apply(&event);
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let board = BoardView::new(&self.session, self.settings.flip_board)
            .view()
            .map(Message::Board);

        row![
            board,
            container(self.control_panel())
                .width(PANEL_WIDTH)
                .height(Length::Fill)
                .padding(15),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }

    /// Render the control panel
    fn control_panel(&self) -> Element<'_, Message> {
        let new_game_btn = button(text("New Game"))
            .on_press(Message::NewGame)
            .style(button::primary)
            .width(Length::Fill);

        let flip_btn = button(text("Flip Board"))
            .on_press(Message::FlipBoard)
            .style(button::secondary)
            .width(Length::Fill);

        let takeback_btn = button(text("Takeback"))
            .on_press(Message::Takeback)
            .style(button::secondary)
            .width(Length::Fill);

        let draw_btn = button(text("Claim Draw"))
            .on_press(Message::ClaimDraw)
            .style(button::secondary)
            .width(Length::Fill);

        let fen_btn = button(text("Copy FEN"))
            .on_press(Message::CopyFen)
            .style(button::secondary)
            .width(Length::Fill);

        let bot_picker = pick_list(
            BotChoice::ALL,
            Some(BotChoice::from_name(&self.settings.bot)),
            Message::BotChanged,
        )
        .width(Length::Fill);

        let depth_picker = pick_list(
            [1u8, 2, 3, 4],
            Some(self.settings.depth),
            Message::DepthChanged,
        )
        .width(Length::Fill);

        let turn = if self.session.game_over() {
            String::new()
        } else if self.session.board().position().turn() == Color::White {
            "White to move".to_owned()
        } else {
            "Black to move".to_owned()
        };

        let advantage = self.material.advantage();
        let material_line = |side: Color, label: &str| {
            let glyphs = self.material.captured_glyphs(side);
            let lead = match side {
                Color::White if advantage > 0 => format!(" +{advantage}"),
                Color::Black if advantage < 0 => format!(" +{}", -advantage),
                _ => String::new(),
            };
            text(format!("{label}: {glyphs}{lead}")).size(14)
        };

        column![
            new_game_btn,
            flip_btn,
            takeback_btn,
            draw_btn,
            fen_btn,
            vertical_space().height(15),
            text("Opponent").size(14),
            bot_picker,
            vertical_space().height(5),
            text("Minimax depth").size(14),
            depth_picker,
            vertical_space().height(15),
            horizontal_rule(1),
            vertical_space().height(5),
            text(turn).size(16),
            text(&self.status).size(14),
            vertical_space().height(10),
            material_line(Color::White, "White"),
            material_line(Color::Black, "Black"),
            vertical_space().height(10),
            horizontal_rule(1),
            vertical_space().height(5),
            text("Moves").size(16),
            self.moves_panel(),
        ]
        .spacing(5)
        .into()
    }

    /// Numbered SAN pairs; each ply is clickable and jumps the history
    /// cursor to the position after it.
    fn moves_panel(&self) -> Element<'_, Message> {
        let sans: Vec<String> = self.session.board().sans().map(str::to_owned).collect();
        let total = sans.len();
        let viewed = self.session.viewer().ply();

        let mut moves_list = column![].spacing(2);
        for (i, chunk) in sans.chunks(2).enumerate() {
            let mut entry = row![text(format!("{:>2}.", i + 1)).size(13)].spacing(4);
            for (j, san) in chunk.iter().enumerate() {
                let ply = 2 * i + j + 1;
                let is_current = ply == viewed || (viewed == 0 && ply == total);
                entry = entry.push(
                    button(text(san.clone()).size(13))
                        .padding(2)
                        .style(if is_current {
                            button::primary
                        } else {
                            button::text
                        })
                        .on_press(Message::HistoryPly(ply)),
                );
            }
            moves_list = moves_list.push(entry);
        }

        let live_hint: Element<'_, Message> = if viewed != 0 {
            button(text("Back to live (Home)").size(13))
                .style(button::secondary)
                .on_press(Message::HistoryLive)
                .into()
        } else {
            text("").into()
        };

        column![
            scrollable(moves_list).height(Length::Fill),
            live_hint,
        ]
        .spacing(5)
        .height(Length::Fill)
        .into()
    }
}


/// Keyboard history navigation: arrows step the ply cursor, Home
/// returns to live, End jumps to the first recorded position, Escape
/// clears the selection.
fn handle_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key.as_ref() {
        keyboard::Key::Named(key::Named::ArrowLeft) => Some(Message::HistoryBack),
        keyboard::Key::Named(key::Named::ArrowRight) => Some(Message::HistoryForward),
        keyboard::Key::Named(key::Named::Home) => Some(Message::HistoryLive),
        keyboard::Key::Named(key::Named::End) => Some(Message::HistoryOldest),
        keyboard::Key::Named(key::Named::Escape) => Some(Message::ClearSelection),
        _ => None,
    }
}
