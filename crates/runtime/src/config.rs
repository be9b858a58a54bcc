//! Runtime configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::GameConfig;

/// Everything a [`Session`](crate::Session) needs besides its collaborators.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub save_dir: PathBuf,
    pub save_file_name: String,
    pub message_capacity: usize,
    pub game_seed: u64,
}

impl RuntimeConfig {
    pub const DEFAULT_SAVE_FILE_NAME: &'static str = "save.json";
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 64;
    pub const DEFAULT_GAME_SEED: u64 = 0x5eed;

    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// - `SAVE_DATA_DIR` / `SAVE_FILE_NAME`
    /// - `MESSAGE_CAPACITY`
    /// - `GAME_SEED`
    /// - `BASE_TURN_INTERVAL_MS`
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the environment on top of an existing configuration.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = read_env::<PathBuf>("SAVE_DATA_DIR") {
            self.save_dir = dir;
        }
        if let Some(name) = read_env::<String>("SAVE_FILE_NAME").filter(|name| !name.is_empty()) {
            self.save_file_name = name;
        }
        if let Some(capacity) = read_env::<usize>("MESSAGE_CAPACITY") {
            self.message_capacity = capacity.max(1);
        }
        if let Some(seed) = read_env::<u64>("GAME_SEED") {
            self.game_seed = seed;
        }
        if let Some(millis) = read_env::<u64>("BASE_TURN_INTERVAL_MS") {
            self.game.base_turn_interval = Duration::from_millis(millis);
        }
        self
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_dir.join(&self.save_file_name)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            save_dir: default_save_dir(),
            save_file_name: Self::DEFAULT_SAVE_FILE_NAME.to_string(),
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
            game_seed: Self::DEFAULT_GAME_SEED,
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/dungeon-crawler` on Linux.
fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon-crawler")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
