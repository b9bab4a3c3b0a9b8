//! Runtime configuration, loaded from a RON file with environment overrides.

use crate::api::DEFAULT_BASE_URL;
use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/game.ron";
pub const CONFIG_PATH_ENV: &str = "POKEMON_CARD_GAME_CONFIG";
pub const BASE_URL_ENV: &str = "POKEAPI_BASE_URL";
pub const DWELL_ENV: &str = "POKEMON_CARD_GAME_DWELL_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// How many names to pull from the roster before dealing.
    pub roster_limit: u32,
    pub page_size: u32,
    pub rules: MatchRules,
}

/// Rules of a single match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub deck_size: usize,
    pub rounds: u32,
    pub dwell_ms: u64,
    pub damage_scale: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            roster_limit: 1000,
            page_size: DEFAULT_PAGE_SIZE,
            rules: MatchRules::default(),
        }
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            deck_size: 6,
            rounds: 6,
            dwell_ms: 2000,
            damage_scale: 50.0,
        }
    }
}

impl MatchRules {
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

impl GameConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn from_ron_str(content: &str, path: &str) -> ConfigResult<Self> {
        ron::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content, &path.display().to_string())
    }

    /// Loads the config file named by `POKEMON_CARD_GAME_CONFIG` (or the
    /// default path if it exists), then applies environment overrides.
    pub fn load() -> ConfigResult<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let mut config = match explicit.as_deref() {
            Some(path) => Self::load_from_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup. Split out from `load` so tests
    /// don't have to touch the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(DWELL_ENV) {
            self.rules.dwell_ms = value.parse().map_err(|_| ConfigError::InvalidOverride {
                name: DWELL_ENV,
                value,
            })?;
        }
        Ok(())
    }
}
