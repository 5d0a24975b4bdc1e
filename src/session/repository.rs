use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::SessionModel;
use crate::game::GameSession;
use crate::shared::AppError;

/// Result of attempting to record a new game state
#[derive(Debug, Clone)]
pub enum RecordGuessResult {
    /// The new state was stored, returns updated session data
    Success(SessionModel),
    /// Another request changed the game first
    Conflict,
    /// Session does not exist
    SessionNotFound,
}

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepository {
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError>;
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError>;
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError>;
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError>;

    /// Atomically replaces the game state if it still equals `expected`
    async fn try_record_guess(
        &self,
        session_id: &str,
        expected: &GameSession,
        updated: GameSession,
    ) -> Result<RecordGuessResult, AppError>;
}

/// In-memory implementation of SessionRepository
///
/// Sessions live for the lifetime of the process and are lost on restart.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionModel>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated sessions
    pub fn with_sessions(sessions: Vec<SessionModel>) -> Self {
        let session_map = sessions
            .into_iter()
            .map(|session| (session.id.clone(), session))
            .collect();

        Self {
            sessions: RwLock::new(session_map),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(session_id = %session.id, mode = %session.mode, "Creating session in memory");

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            warn!(session_id = %session.id, "Session already exists in memory");
            return Err(AppError::Conflict("Session already exists".to_string()));
        }
        sessions.insert(session.id.clone(), session.clone());

        debug!(session_id = %session.id, "Session created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError> {
        let session = self.sessions.read().await.get(session_id).cloned();

        match &session {
            Some(_) => debug!(session_id = %session_id, "Session found in memory"),
            None => debug!(session_id = %session_id, "Session not found in memory"),
        }

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_id).is_none() {
            warn!(session_id = %session_id, "Session not found for deletion in memory");
            return Err(AppError::NotFound("Session not found".to_string()));
        }

        debug!(session_id = %session_id, "Session deleted successfully from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let initial_count = sessions.len();

        sessions.retain(|_, session| session.expires_at > now);

        let removed_count = initial_count - sessions.len();
        debug!(
            expired_sessions_removed = removed_count,
            "Expired sessions cleaned up from memory"
        );
        Ok(removed_count as u64)
    }

    #[instrument(skip(self, expected, updated))]
    async fn try_record_guess(
        &self,
        session_id: &str,
        expected: &GameSession,
        updated: GameSession,
    ) -> Result<RecordGuessResult, AppError> {
        let mut sessions = self.sessions.write().await;

        let session = match sessions.get_mut(session_id) {
            Some(session) => session,
            None => {
                debug!(session_id = %session_id, "Session not found");
                return Ok(RecordGuessResult::SessionNotFound);
            }
        };

        if session.game != *expected {
            warn!(
                session_id = %session_id,
                stored_guesses = session.game.guesses_made().len(),
                expected_guesses = expected.guesses_made().len(),
                "Game changed since it was read"
            );
            return Ok(RecordGuessResult::Conflict);
        }

        session.game = updated;
        session.touch();

        info!(
            session_id = %session_id,
            guesses_made = session.game.guesses_made().len(),
            status = %session.game.status(),
            "Recorded guess"
        );

        Ok(RecordGuessResult::Success(session.clone()))
    }
}
