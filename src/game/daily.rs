use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::catalog::Catalog;

/// Calendar-day granularity used to key the daily challenge
pub const DAILY_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Date {date} is before the first game on {epoch}")]
    BeforeEpoch { date: NaiveDate, epoch: NaiveDate },
}

/// Picks the daily target for a UTC calendar date.
///
/// SHA-256 of the `YYYY-MM-DD` string, first 8 bytes read big-endian, modulo
/// the catalog size, indexed into the name-sorted country list. Depends only
/// on the date and the catalog's names.
pub fn daily_target(date: NaiveDate, catalog: &Catalog) -> &str {
    let key = date.format(DAILY_DATE_FORMAT).to_string();
    let digest = Sha256::digest(key.as_bytes());

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let seed = u64::from_be_bytes(prefix);

    // A built catalog is never empty
    let index = (seed % catalog.len() as u64) as usize;
    &catalog.list()[index]
}

/// Game counter: the epoch day is game 1
pub fn game_number(date: NaiveDate, epoch: NaiveDate) -> Result<u32, ScheduleError> {
    if date < epoch {
        return Err(ScheduleError::BeforeEpoch { date, epoch });
    }

    let days = (date - epoch).num_days();
    Ok(u32::try_from(days + 1).unwrap_or(u32::MAX))
}
