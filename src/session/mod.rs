// Public API - what other modules can use
pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use clock::{FixedClock, GameClock, UtcClock};
pub use handlers::{create_game, get_game, list_countries, submit_guess};
pub use middleware::jwt_auth;
pub use types::{
    GameMode, GameStateResponse, GuessRequest, GuessResponse, NewGameRequest, NewGameResponse,
    SessionClaims,
};

// Internal modules
mod cleanup_task;
pub mod clock;
mod handlers;
mod middleware;
pub mod models;
pub mod repository;
pub mod service;
mod token;
mod types;
