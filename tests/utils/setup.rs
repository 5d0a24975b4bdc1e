#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;

use tradle::{
    catalog::sample_records, session::FixedClock, AppState, Catalog, GameConfig, GameService,
    InMemorySessionRepository, SessionService,
};

/// Daily puzzle #2; the sample catalog's target that day is Brazil
pub fn puzzle_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
}

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repository: Arc<InMemorySessionRepository>,
}

pub struct TestAppBuilder {
    catalog: Option<Catalog>,
    config: GameConfig,
    today: NaiveDate,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            config: GameConfig {
                jwt_secret: "integration-test-secret".to_string(),
                ..GameConfig::default()
            },
            today: puzzle_day(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_max_guesses(mut self, max_guesses: usize) -> Self {
        self.config.max_guesses = max_guesses;
        self
    }

    pub fn build(self) -> TestApp {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Catalog::build(sample_records()).unwrap());
        let game_service = Arc::new(GameService::new(Arc::new(catalog), &self.config));
        let repository = Arc::new(InMemorySessionRepository::new());
        let session_service = Arc::new(
            SessionService::new(game_service.clone(), repository.clone(), &self.config)
                .with_clock(Arc::new(FixedClock(self.today))),
        );

        let state = AppState::new(game_service, session_service);

        TestApp {
            router: tradle::router(state.clone()),
            state,
            repository,
        }
    }
}
