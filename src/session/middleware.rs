use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::shared::{AppError, AppState};

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// `Ok(None)` means no header was sent; a header in any other shape is an error.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(Some)
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

/// Guards the game routes: the bearer token must name a live session, whose
/// claims are then handed to handlers as `Extension<SessionClaims>`.
#[instrument(skip_all, fields(uri = %req.uri()))]
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer_token(req.headers()) {
        Ok(Some(token)) => token,
        Ok(None) => {
            warn!("Game request without a session token");
            return Err(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ));
        }
        Err(e) => {
            warn!("Authorization header is not a bearer token");
            return Err(e);
        }
    };

    let claims = state
        .session_service
        .validate_session(token)
        .await
        .inspect_err(|e| warn!(error = %e, "Session token refused"))?;

    debug!(session_id = %claims.session_id, "Session token accepted for request");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
