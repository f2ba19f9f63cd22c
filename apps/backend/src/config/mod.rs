//! Process configuration read from `EUCHRE_*` environment variables.

use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TARGET_SCORE: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Points a team needs to win a game.
    pub target_score: u16,
    /// Fixes the rules engine's suggestion RNG when set.
    pub engine_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            target_score: DEFAULT_TARGET_SCORE,
            engine_seed: None,
        }
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{key} has an invalid value: {raw:?}"))),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let target_score = parsed(&lookup, "EUCHRE_TARGET_SCORE")?.unwrap_or(defaults.target_score);
        if target_score == 0 {
            return Err(AppError::config(
                "EUCHRE_TARGET_SCORE must be positive".to_string(),
            ));
        }
        Ok(Self {
            host: lookup("EUCHRE_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "EUCHRE_PORT")?.unwrap_or(defaults.port),
            target_score,
            engine_seed: parsed(&lookup, "EUCHRE_ENGINE_SEED")?,
        })
    }
}
