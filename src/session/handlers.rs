use axum::{body::Bytes, extract::State, http::HeaderMap, Extension, Json};
use tracing::{info, instrument, warn};

use super::middleware::bearer_token;

use super::types::{
    GameStateResponse, GuessRequest, GuessResponse, NewGameRequest, NewGameResponse,
    SessionClaims,
};
use crate::shared::{AppError, AppState};

/// GET /api/countries
///
/// Sorted country names for guess autocomplete
#[instrument(name = "list_countries", skip(state))]
pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.game_service.countries().to_vec())
}

/// Reads the optional `{"mode": ...}` body; no body at all means a daily game
fn parse_new_game(body: &[u8]) -> Result<NewGameRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewGameRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Unreadable new game request");
        AppError::BadRequest(format!("Invalid game request: {e}"))
    })
}

/// HTTP handler for starting a new game
///
/// POST /api/session
/// Returns a JWT token as session_id plus the export clue. A bearer token
/// from an earlier game ends that game first.
#[instrument(name = "create_game", skip_all)]
pub async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<NewGameResponse>, AppError> {
    let request = parse_new_game(&body)?;

    if let Ok(Some(previous)) = bearer_token(&headers) {
        state.session_service.end_previous_game(previous).await;
    }

    let response = state.session_service.start_game(request.mode).await?;

    info!(
        mode = %response.mode,
        game_number = ?response.game_number,
        "Game created"
    );

    Ok(Json(response))
}

/// POST /api/guess
#[instrument(name = "submit_guess", skip(state, claims, request), fields(session_id = %claims.session_id))]
pub async fn submit_guess(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessResponse>, AppError> {
    let response = state
        .session_service
        .submit_guess(&claims.session_id, &request.guess)
        .await?;

    Ok(Json(response))
}

/// GET /api/game
#[instrument(name = "get_game", skip(state, claims), fields(session_id = %claims.session_id))]
pub async fn get_game(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<GameStateResponse>, AppError> {
    let response = state.session_service.get_game(&claims.session_id).await?;
    Ok(Json(response))
}
