use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    core::{GameError, GameSession, GuessResult},
    daily::{daily_target, game_number, ScheduleError},
};
use crate::{
    catalog::{Catalog, ExportEntry},
    config::GameConfig,
};

/// A freshly started daily challenge
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGame {
    pub date: NaiveDate,
    pub game_number: u32,
    pub session: GameSession,
}

/// Export line shown to the player as the puzzle clue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportShare {
    pub commodity: String,
    pub share: f64,
}

impl From<&ExportEntry> for ExportShare {
    fn from(entry: &ExportEntry) -> Self {
        Self {
            commodity: entry.commodity.clone(),
            share: entry.share,
        }
    }
}

/// Game operations over the shared, read-only catalog
pub struct GameService {
    catalog: Arc<Catalog>,
    max_guesses: usize,
    epoch: NaiveDate,
}

impl GameService {
    pub fn new(catalog: Arc<Catalog>, config: &GameConfig) -> Self {
        Self {
            catalog,
            max_guesses: config.max_guesses,
            epoch: config.epoch,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    /// Country names for autocomplete
    pub fn countries(&self) -> &[String] {
        self.catalog.list()
    }

    /// Starts the shared daily challenge for `today` (UTC)
    #[instrument(skip(self))]
    pub fn start_daily(&self, today: NaiveDate) -> Result<DailyGame, ScheduleError> {
        let game_number = game_number(today, self.epoch)?;
        let target = daily_target(today, &self.catalog);

        info!(game_number, "Started daily game");

        Ok(DailyGame {
            date: today,
            game_number,
            session: GameSession::new(target.to_string(), self.max_guesses),
        })
    }

    /// Starts an unranked game on a random target
    pub fn start_casual(&self) -> GameSession {
        self.start_casual_with(&mut rand::rng())
    }

    /// Same as [`GameService::start_casual`], drawing from the given generator
    pub fn start_casual_with<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSession {
        let names = self.catalog.list();
        let target = &names[rng.random_range(0..names.len())];

        info!("Started casual game");
        GameSession::new(target.clone(), self.max_guesses)
    }

    /// Resolves and scores a guess against the session's target
    #[instrument(skip(self, session), fields(guesses_made = session.guesses_made().len()))]
    pub fn submit_guess(
        &self,
        session: &GameSession,
        raw_input: &str,
    ) -> Result<GuessResult, GameError> {
        match session.submit_guess(raw_input, &self.catalog) {
            Ok(result) => {
                info!(
                    status = %result.session.status(),
                    guesses_remaining = result.session.guesses_remaining(),
                    "Guess accepted"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "Guess rejected");
                Err(e)
            }
        }
    }

    /// The target's export profile, largest share first
    pub fn target_exports(&self, session: &GameSession) -> Result<Vec<ExportShare>, GameError> {
        let target = self
            .catalog
            .get(session.target_country())
            .ok_or_else(|| GameError::TargetNotInCatalog(session.target_country().to_string()))?;

        Ok(target.exports.iter().map(ExportShare::from).collect())
    }
}
