use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::game::{DAILY_DATE_FORMAT, MAX_GUESSES};

/// Launch day of the daily challenge (game #1)
pub const DEFAULT_EPOCH: &str = "2025-03-01";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub bind_addr: String,
    /// Processed trade data (JSON array of raw country records)
    pub data_path: PathBuf,
    pub max_guesses: usize,
    pub epoch: NaiveDate,
    pub jwt_secret: String,
    pub session_expiration_days: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            data_path: PathBuf::from("data/trade_data.json"),
            max_guesses: MAX_GUESSES,
            epoch: parse_date(DEFAULT_EPOCH).unwrap_or(NaiveDate::MIN),
            jwt_secret: "your-secret-key-change-in-production".to_string(),
            session_expiration_days: 1,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_guesses = match lookup("MAX_GUESSES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("MAX_GUESSES must be a positive integer, got '{raw}'"))?,
            None => defaults.max_guesses,
        };

        let epoch = match lookup("GAME_EPOCH") {
            Some(raw) => parse_date(&raw)
                .with_context(|| format!("GAME_EPOCH must be a YYYY-MM-DD date, got '{raw}'"))?,
            None => defaults.epoch,
        };

        let session_expiration_days = match lookup("SESSION_EXPIRATION_DAYS") {
            Some(raw) => raw.trim().parse::<i64>().with_context(|| {
                format!("SESSION_EXPIRATION_DAYS must be an integer, got '{raw}'")
            })?,
            None => defaults.session_expiration_days,
        };

        let config = Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_path: lookup("TRADLE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            max_guesses,
            epoch,
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            session_expiration_days,
        };

        config.log_settings();
        Ok(config)
    }

    fn log_settings(&self) {
        info!(
            bind_addr = %self.bind_addr,
            data_path = %self.data_path.display(),
            max_guesses = self.max_guesses,
            epoch = %self.epoch,
            session_expiration_days = self.session_expiration_days,
            "Loaded game configuration"
        );
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DAILY_DATE_FORMAT).ok()
}
