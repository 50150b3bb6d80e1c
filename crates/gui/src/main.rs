//! BotMatch GUI application
//!
//! Play against a shallow bot (random, greedy or minimax), review past
//! positions with the ply cursor, take moves back and claim repetition
//! or fifty-move draws.

mod app;
mod board;
mod material;
mod settings;
mod styles;

use app::MatchApp;
use iced::application;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    application("BotMatch", MatchApp::update, MatchApp::view)
        .subscription(MatchApp::subscription)
        .theme(MatchApp::theme)
        .window_size((1100.0, 780.0))
        .run_with(MatchApp::new)
}
