//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use runtime::RuntimeConfig;

/// Configuration of one scripted run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Content directory; the built-in catalog is used when unset.
    pub data_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub session_id: String,
    /// Player turns to play before stopping.
    pub turns: usize,
    /// Save every this many player turns.
    pub save_every: usize,
    /// Resume the stored game instead of starting a new one.
    pub resume: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - everything [`RuntimeConfig::from_env`] reads
    /// - `CLI_DATA_DIR`, `CLI_LOG_DIR`, `CLI_SESSION_ID`
    /// - `CLI_TURNS`, `CLI_SAVE_EVERY`, `CLI_RESUME`
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            data_dir: read_env::<PathBuf>("CLI_DATA_DIR"),
            log_dir: read_env::<PathBuf>("CLI_LOG_DIR").unwrap_or_else(default_log_dir),
            session_id: read_env::<String>("CLI_SESSION_ID").unwrap_or_else(timestamp_session),
            turns: read_env::<usize>("CLI_TURNS").unwrap_or(300),
            save_every: read_env::<usize>("CLI_SAVE_EVERY").unwrap_or(50).max(1),
            resume: read_env::<bool>("CLI_RESUME").unwrap_or(false),
        }
    }
}

fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon-crawler")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon-crawler/logs"))
}

fn timestamp_session() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{secs}")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
