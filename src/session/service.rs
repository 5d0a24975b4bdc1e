use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    clock::{GameClock, UtcClock},
    models::SessionModel,
    repository::{RecordGuessResult, SessionRepository},
    token::SessionTokens,
    types::{GameMode, GameStateResponse, GuessResponse, NewGameResponse, SessionClaims},
};
use crate::{config::GameConfig, game::GameService, shared::AppError};

/// Service for handling game session business logic
pub struct SessionService {
    game_service: Arc<GameService>,
    tokens: SessionTokens,
    repository: Arc<dyn SessionRepository + Send + Sync>,
    clock: Arc<dyn GameClock>,
}

impl SessionService {
    pub fn new(
        game_service: Arc<GameService>,
        repository: Arc<dyn SessionRepository + Send + Sync>,
        config: &GameConfig,
    ) -> Self {
        Self {
            game_service,
            tokens: SessionTokens::new(&config.jwt_secret, config.session_expiration_days),
            repository,
            clock: Arc::new(UtcClock),
        }
    }

    /// Replaces the date source used for daily games
    pub fn with_clock(mut self, clock: Arc<dyn GameClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Starts a game, stores it and hands back a token identifying it
    #[instrument(skip(self))]
    pub async fn start_game(&self, mode: GameMode) -> Result<NewGameResponse, AppError> {
        let expiration_days = self.tokens.lifetime_days();
        let today = self.today();

        let session = match mode {
            GameMode::Daily => {
                let daily = self.game_service.start_daily(today)?;
                SessionModel::new(mode, daily.session, expiration_days)
                    .for_daily(daily.date, daily.game_number)
            }
            GameMode::Casual => {
                SessionModel::new(mode, self.game_service.start_casual(), expiration_days)
            }
        };

        let exports = self.game_service.target_exports(&session.game)?;
        self.repository.create_session(&session).await?;
        let token = self.tokens.issue(&session.id)?;

        let message = match session.game_number {
            Some(number) => format!("Tradle #{number}: guess the country from its exports"),
            None => "Guess the country from its exports".to_string(),
        };

        info!(
            session_id = %session.id,
            game_number = ?session.game_number,
            "Game session created"
        );

        Ok(NewGameResponse {
            session_id: token,
            mode,
            date: session.date,
            game_number: session.game_number,
            max_guesses: session.game.max_guesses(),
            exports,
            message,
        })
    }

    /// Validates a session token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub async fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = self.tokens.verify(token)?;

        match self.repository.get_session(&claims.session_id).await? {
            Some(session) if session.is_expired() => {
                warn!(session_id = %claims.session_id, "Session has expired");
                Err(AppError::Unauthorized("Session has expired".to_string()))
            }
            Some(_) => Ok(claims),
            None => {
                warn!(
                    session_id = %claims.session_id,
                    "Session not found - may have been revoked"
                );
                Err(AppError::NotFound(
                    "Session not found or has been revoked".to_string(),
                ))
            }
        }
    }

    /// Current state of a game, revealing the target only once it is over
    #[instrument(skip(self))]
    pub async fn get_game(&self, session_id: &str) -> Result<GameStateResponse, AppError> {
        let session = self.load_session(session_id).await?;
        let game = &session.game;

        Ok(GameStateResponse {
            mode: session.mode,
            date: session.date,
            game_number: session.game_number,
            status: game.status(),
            max_guesses: game.max_guesses(),
            guesses_made: game.guesses_made().to_vec(),
            guesses_remaining: game.guesses_remaining(),
            exports: self.game_service.target_exports(game)?,
            target_country: game
                .is_over()
                .then(|| game.target_country().to_string()),
        })
    }

    /// Scores a guess and records the new game state
    #[instrument(skip(self))]
    pub async fn submit_guess(
        &self,
        session_id: &str,
        raw_input: &str,
    ) -> Result<GuessResponse, AppError> {
        let session = self.load_session(session_id).await?;
        let result = self.game_service.submit_guess(&session.game, raw_input)?;

        let stored = match self
            .repository
            .try_record_guess(session_id, &session.game, result.session)
            .await?
        {
            RecordGuessResult::Success(stored) => stored,
            RecordGuessResult::Conflict => {
                return Err(AppError::Conflict(
                    "Another guess was recorded first. Please retry.".to_string(),
                ))
            }
            RecordGuessResult::SessionNotFound => {
                return Err(AppError::NotFound("Session not found".to_string()))
            }
        };

        let game = &stored.game;
        Ok(GuessResponse {
            message: result.outcome.message(game.max_guesses()),
            status: game.status(),
            game_over: game.is_over(),
            guesses_made: game.guesses_made().to_vec(),
            outcome: result.outcome,
        })
    }

    /// Revokes a session by removing it from the repository
    #[instrument(skip(self))]
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), AppError> {
        self.repository.delete_session(session_id).await?;
        info!(session_id = %session_id, "Session revoked successfully");
        Ok(())
    }

    /// Drops the game a returning player was holding before starting a new one.
    /// Tokens that no longer point at a live session are ignored.
    #[instrument(skip(self, token))]
    pub async fn end_previous_game(&self, token: &str) {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Previous game token is unusable, nothing to end");
                return;
            }
        };

        if let Err(e) = self.revoke_session(&claims.session_id).await {
            debug!(session_id = %claims.session_id, error = %e, "Previous game already gone");
        }
    }

    #[instrument(skip(self))]
    pub async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let removed_count = self.repository.cleanup_expired_sessions().await?;

        info!(
            removed_sessions = removed_count,
            "Expired sessions cleanup completed"
        );
        Ok(removed_count)
    }

    async fn load_session(&self, session_id: &str) -> Result<SessionModel, AppError> {
        self.repository
            .get_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
    }
}
