// Library crate for the Tradle game server
// This file exposes the public API for the binary and integration tests

pub mod catalog;
pub mod config;
pub mod game;
pub mod routes;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use catalog::{load_records, Catalog, CatalogError, CountryRecord, RawCountryRecord};
pub use config::GameConfig;
pub use game::{GameError, GameService, GameSession, GameStatus, GuessOutcome};
pub use routes::router;
pub use session::{repository::InMemorySessionRepository, service::SessionService};
pub use shared::{AppError, AppState};
