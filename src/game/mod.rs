// Public API
pub use self::core::{GameError, GameSession, GameStatus, GuessOutcome, GuessResult, MAX_GUESSES};
pub use daily::{daily_target, game_number, ScheduleError, DAILY_DATE_FORMAT};
pub use resolver::{resolve, similarity_ratio, FUZZY_MATCH_CUTOFF};
pub use scoring::{
    score, CompassDirection, ExportSimilarity, Feedback, GdpDirection, SimilarityBand,
};
pub use service::{DailyGame, ExportShare, GameService};

// Internal modules
mod core;
mod daily;
mod resolver;
pub mod scoring;
mod service;
