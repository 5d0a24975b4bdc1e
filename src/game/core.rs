// A GameSession is one player's attempt at one target country. It is a plain
// value: submitting a guess returns a new session and never touches the old one,
// so a failed guess leaves the caller's state exactly as it was.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::{
    resolver::resolve,
    scoring::{score, Feedback},
};
use crate::catalog::Catalog;

/// Guess budget when nothing else is configured
pub const MAX_GUESSES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("'{0}' is not in our database. Try another country.")]
    UnknownCountry(String),
    #[error("You've already guessed {0}. Try another country.")]
    DuplicateGuess(String),
    #[error("Game is already over. Start a new game.")]
    GameAlreadyOver,
    #[error("Target country '{0}' is not in the catalog")]
    TargetNotInCatalog(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    target_country: String,
    guesses_made: Vec<String>, // Resolved names, in guess order
    max_guesses: usize,
    status: GameStatus,
}

/// What a successful guess produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessOutcome {
    Incorrect {
        feedback: Feedback,
    },
    Won {
        guesses: usize,
        feedback: Feedback,
    },
    Lost {
        target_country: String,
        feedback: Feedback,
    },
}

impl GuessOutcome {
    pub fn feedback(&self) -> &Feedback {
        match self {
            GuessOutcome::Incorrect { feedback }
            | GuessOutcome::Won { feedback, .. }
            | GuessOutcome::Lost { feedback, .. } => feedback,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GuessOutcome::Incorrect { .. })
    }

    /// Player-facing message for terminal outcomes
    pub fn message(&self, max_guesses: usize) -> Option<String> {
        match self {
            GuessOutcome::Incorrect { .. } => None,
            GuessOutcome::Won { guesses, .. } => Some(format!(
                "Congratulations! You guessed correctly in {} tries!",
                guesses
            )),
            GuessOutcome::Lost { target_country, .. } => Some(format!(
                "Game over! You've used all {} guesses. The correct country was {}.",
                max_guesses, target_country
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuessResult {
    pub session: GameSession,
    pub outcome: GuessOutcome,
}

impl GameSession {
    /// Starts an in-progress session. A budget below one guess is raised to one.
    pub fn new(target_country: String, max_guesses: usize) -> Self {
        Self {
            target_country,
            guesses_made: Vec::new(),
            max_guesses: max_guesses.max(1),
            status: GameStatus::InProgress,
        }
    }

    /// Resolves, checks and scores a guess, returning the updated session.
    ///
    /// On error `self` is untouched: terminal sessions reject every guess,
    /// unresolvable input and repeated countries are rejected before anything
    /// is recorded.
    pub fn submit_guess(&self, raw_input: &str, catalog: &Catalog) -> Result<GuessResult, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameAlreadyOver);
        }

        let target = catalog
            .get(&self.target_country)
            .ok_or_else(|| GameError::TargetNotInCatalog(self.target_country.clone()))?;

        let guess_name = resolve(raw_input, catalog)?;
        if self.has_guessed(guess_name) {
            return Err(GameError::DuplicateGuess(guess_name.to_string()));
        }
        // Resolution only returns catalog names, so the lookup cannot miss
        let guess = catalog
            .get(guess_name)
            .ok_or_else(|| GameError::UnknownCountry(guess_name.to_string()))?;

        let mut session = self.clone();
        session.guesses_made.push(guess_name.to_string());

        let feedback = score(guess, target, &session);
        let outcome = if guess_name == self.target_country {
            session.status = GameStatus::Won;
            GuessOutcome::Won {
                guesses: session.guesses_made.len(),
                feedback,
            }
        } else if session.guesses_made.len() >= session.max_guesses {
            session.status = GameStatus::Lost;
            GuessOutcome::Lost {
                target_country: session.target_country.clone(),
                feedback,
            }
        } else {
            GuessOutcome::Incorrect { feedback }
        };

        Ok(GuessResult { session, outcome })
    }

    pub fn target_country(&self) -> &str {
        &self.target_country
    }

    pub fn guesses_made(&self) -> &[String] {
        &self.guesses_made
    }

    pub fn has_guessed(&self, country: &str) -> bool {
        self.guesses_made.iter().any(|g| g == country)
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn guesses_remaining(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses_made.len())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}
