use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session;
use crate::shared::AppState;

/// Builds the HTTP router; game routes require a Bearer session token
pub fn router(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/api/guess", post(session::submit_guess))
        .route("/api/game", get(session::get_game))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::jwt_auth,
        ));

    Router::new()
        .route("/api/countries", get(session::list_countries))
        .route("/api/session", post(session::create_game))
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
