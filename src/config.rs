//! Game configuration (file locations, tick rate, key bindings). Loaded from
//! `config.ron` in the working directory at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::input::KeyBindings;

pub const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Where the save action writes and the load button reads.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(default = "default_leaderboard_path")]
    pub leaderboard_path: PathBuf,
    /// Milliseconds between simulation ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default)]
    pub bindings: KeyBindings,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("savefile.txt")
}
fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("leaderboard.txt")
}
fn default_tick_ms() -> u64 {
    TICK_MS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            leaderboard_path: default_leaderboard_path(),
            tick_ms: default_tick_ms(),
            bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read config at {:?}: {}, using defaults", path, e),
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialise config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}
