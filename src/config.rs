//! Runtime configuration from environment variables.

use std::path::PathBuf;

use crate::types::DifficultyId;

pub const ENV_DATA_DIR: &str = "MEMORY_MATCH_DATA_DIR";
pub const ENV_DIFFICULTY: &str = "MEMORY_MATCH_DIFFICULTY";
pub const ENV_LOG_PATH: &str = "MEMORY_MATCH_LOG_PATH";
pub const ENV_LOG: &str = "MEMORY_MATCH_LOG";

const DEFAULT_DATA_DIR: &str = ".memory-match";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "memory-match.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the leaderboard (and by default the log) lives.
    pub data_dir: PathBuf,
    /// Tier of the first round.
    pub difficulty: DifficultyId,
    pub log_path: PathBuf,
    /// `env_logger` filter string.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
            difficulty: DifficultyId::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    ///
    /// Empty or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let data_dir = var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let difficulty = var(ENV_DIFFICULTY)
            .and_then(|s| DifficultyId::from_str(&s))
            .unwrap_or_default();

        let log_path = var(ENV_LOG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));

        let log_filter = var(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            data_dir,
            difficulty,
            log_path,
            log_filter,
        }
    }
}
