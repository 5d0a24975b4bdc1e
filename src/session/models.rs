use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::GameMode;
use crate::game::GameSession;

/// Stored game session, keyed by the id carried in the session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionModel {
    pub id: String, // UUID v4 as string
    pub mode: GameMode,
    pub game: GameSession,
    pub date: Option<NaiveDate>,     // Set for daily games only
    pub game_number: Option<u32>,    // Set for daily games only
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl SessionModel {
    /// Creates a new session model with generated ID and timestamps
    pub fn new(mode: GameMode, game: GameSession, expiration_days: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            mode,
            game,
            date: None,
            game_number: None,
            created_at: now,
            expires_at: now + chrono::Duration::days(expiration_days),
            last_accessed: now,
        }
    }

    /// Tags the session with the daily challenge it belongs to
    pub fn for_daily(mut self, date: NaiveDate, game_number: u32) -> Self {
        self.date = Some(date);
        self.game_number = Some(game_number);
        self
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameSession {
        GameSession::new("Germany".to_string(), 6)
    }

    #[test]
    fn test_new_session_model() {
        let session = SessionModel::new(GameMode::Casual, game(), 7);

        assert!(!session.id.is_empty());
        assert_eq!(session.mode, GameMode::Casual);
        assert_eq!(session.date, None);
        assert!(session.expires_at > session.created_at);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_for_daily_sets_schedule_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let session = SessionModel::new(GameMode::Daily, game(), 1).for_daily(date, 2);

        assert_eq!(session.date, Some(date));
        assert_eq!(session.game_number, Some(2));
    }

    #[test]
    fn test_session_expiration() {
        let mut session = SessionModel::new(GameMode::Daily, game(), 1);
        session.expires_at = Utc::now() - chrono::Duration::hours(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_touch_updates_last_accessed() {
        let mut session = SessionModel::new(GameMode::Daily, game(), 1);
        let before = session.last_accessed;
        std::thread::sleep(std::time::Duration::from_millis(2));
        session.touch();
        assert!(session.last_accessed > before);
    }
}
