//! Persisted user preferences.
//!
//! Stored as JSON under the platform config directory. Loading falls
//! back to defaults on any error; save failures are logged and ignored
//! so a read-only home directory never interrupts play.

use std::fs;
use std::path::PathBuf;

use bot_engine::Strategy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bot strategy name ("none", "random", "greedy", "minimax")
    pub bot: String,
    /// Minimax depth in plies
    pub depth: u8,
    /// Delay before the bot starts thinking, in milliseconds
    pub delay_ms: u64,
    /// Render the board from Black's side
    pub flip_board: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: "minimax".to_owned(),
            depth: bot_engine::DEFAULT_DEPTH,
            delay_ms: 700,
            flip_board: false,
        }
    }
}

impl Settings {
    /// The configured strategy; `None` means hot-seat (no bot).
    pub fn strategy(&self) -> Option<Strategy> {
        if self.bot == "none" {
            return None;
        }
        Strategy::from_name(&self.bot, self.depth)
    }

    pub fn load() -> Self {
        let path = settings_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    info!(?path, "loaded settings");
                    settings
                }
                Err(e) => {
                    warn!(?path, error = %e, "failed to parse settings; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let path = settings_path();
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!(?dir, error = %e, "failed to create settings directory");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!(?path, error = %e, "failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize settings"),
        }
    }
}

/// `settings.json` in the user's configuration directory, falling back
/// to the working directory when no config dir is available.
fn settings_path() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "botmatch", "BotMatch") {
        dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}
