use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::game::{ExportShare, GameStatus, GuessOutcome};

/// JWT claims structure identifying a game session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub session_id: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// Everyone plays the same target today
    #[default]
    Daily,
    /// Random target, started from the "new game" button
    Casual,
}

/// Request payload for starting a game
#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub mode: GameMode,
}

/// Response for game creation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NewGameResponse {
    pub session_id: String, // The JWT token
    pub mode: GameMode,
    pub date: Option<NaiveDate>,
    pub game_number: Option<u32>,
    pub max_guesses: usize,
    pub exports: Vec<ExportShare>,
    pub message: String,
}

/// Request payload for submitting a guess
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GuessResponse {
    #[serde(flatten)]
    pub outcome: GuessOutcome,
    pub status: GameStatus,
    pub game_over: bool,
    pub guesses_made: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Snapshot of a session for page reloads
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GameStateResponse {
    pub mode: GameMode,
    pub date: Option<NaiveDate>,
    pub game_number: Option<u32>,
    pub status: GameStatus,
    pub max_guesses: usize,
    pub guesses_made: Vec<String>,
    pub guesses_remaining: usize,
    pub exports: Vec<ExportShare>,
    /// Only revealed once the game is over
    pub target_country: Option<String>,
}
