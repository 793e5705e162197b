//! Runtime configuration read from the environment.

use std::path::PathBuf;

/// Default `EnvFilter` directive when `TETRIS_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed; `None` means derive one from the clock at startup.
    pub seed: Option<u32>,
    pub skip_intro: bool,
    /// Log file. Logging is off without one since stdout is the game screen.
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            skip_intro: false,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup.
    ///
    /// Blank values count as unset; a malformed seed falls back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("TETRIS_SEED").and_then(|s| s.parse().ok());

        let skip_intro = get("TETRIS_SKIP_INTRO")
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let log_path = get("TETRIS_LOG_PATH").map(PathBuf::from);

        let log_filter = get("TETRIS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            seed,
            skip_intro,
            log_path,
            log_filter,
        }
    }

    /// The configured seed, or one derived from `now_nanos`.
    pub fn seed_or(&self, now_nanos: u128) -> u32 {
        self.seed.unwrap_or_else(|| {
            // Fold the high bits in so seeds differ across runs a second apart.
            (now_nanos as u32) ^ ((now_nanos >> 32) as u32)
        })
    }
}
