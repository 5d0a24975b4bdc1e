use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIter};

use super::core::GameSession;
use crate::catalog::{Coordinates, CountryRecord};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Both axis deltas below this many degrees count as the same location
pub const SAME_LOCATION_TOLERANCE: f64 = 0.001;

/// Percentage-point difference under which two shares are very similar
pub const VERY_SIMILAR_THRESHOLD: f64 = 2.0;
/// Percentage-point difference under which two shares are similar
pub const SIMILAR_THRESHOLD: f64 = 5.0;

/// How the guessed economy compares with the target's.
///
/// Rank 1 is the largest economy, so `Higher` means the guess has a
/// numerically smaller rank than the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GdpDirection {
    Equal,
    Higher,
    Lower,
}

impl GdpDirection {
    pub fn between(guess_rank: u32, target_rank: u32) -> Self {
        match guess_rank.cmp(&target_rank) {
            std::cmp::Ordering::Equal => GdpDirection::Equal,
            std::cmp::Ordering::Less => GdpDirection::Higher,
            std::cmp::Ordering::Greater => GdpDirection::Lower,
        }
    }
}

/// Heading from the guess toward the target, resolved per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum CompassDirection {
    #[serde(rename = "SAME")]
    #[strum(serialize = "SAME")]
    Same,
    #[serde(rename = "N")]
    #[strum(serialize = "N")]
    North,
    #[serde(rename = "NE")]
    #[strum(serialize = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    #[strum(serialize = "E")]
    East,
    #[serde(rename = "SE")]
    #[strum(serialize = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    South,
    #[serde(rename = "SW")]
    #[strum(serialize = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    West,
    #[serde(rename = "NW")]
    #[strum(serialize = "NW")]
    NorthWest,
}

impl CompassDirection {
    pub fn between(from: Coordinates, to: Coordinates) -> Self {
        let d_lat = to.lat - from.lat;
        let d_lng = to.lng - from.lng;

        if d_lat.abs() < SAME_LOCATION_TOLERANCE && d_lng.abs() < SAME_LOCATION_TOLERANCE {
            return CompassDirection::Same;
        }

        let north = d_lat > 0.0;
        let south = d_lat < 0.0;
        let east = d_lng > 0.0;
        let west = d_lng < 0.0;

        match (north, south, east, west) {
            (true, _, true, _) => CompassDirection::NorthEast,
            (true, _, _, true) => CompassDirection::NorthWest,
            (true, _, _, _) => CompassDirection::North,
            (_, true, true, _) => CompassDirection::SouthEast,
            (_, true, _, true) => CompassDirection::SouthWest,
            (_, true, _, _) => CompassDirection::South,
            (_, _, true, _) => CompassDirection::East,
            (_, _, _, true) => CompassDirection::West,
            _ => CompassDirection::Same,
        }
    }
}

/// Closeness of one commodity's export share between guess and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SimilarityBand {
    VerySimilar,
    Similar,
    Different,
    NotInTarget,
}

impl SimilarityBand {
    /// Bands a percentage-point difference (absolute value is taken)
    pub fn from_difference(difference: f64) -> Self {
        let difference = difference.abs();
        if difference < VERY_SIMILAR_THRESHOLD {
            SimilarityBand::VerySimilar
        } else if difference < SIMILAR_THRESHOLD {
            SimilarityBand::Similar
        } else {
            SimilarityBand::Different
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSimilarity {
    pub commodity: String,
    pub band: SimilarityBand,
    pub guess_share: f64,
    pub target_share: Option<f64>,
}

/// Comparison of a guessed country against the session's target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub country: String,
    pub continent: String,
    pub continent_match: bool,
    pub region_match: bool,
    pub subregion_match: bool,
    pub gdp_rank: u32,
    pub gdp_direction: GdpDirection,
    pub distance_km: u32,
    pub direction: CompassDirection,
    /// Commodities in both top-export lists, sorted
    pub export_overlap: Vec<String>,
    /// One entry per commodity the guess exports, in the guess's order
    pub export_similarity: Vec<ExportSimilarity>,
    pub guesses_remaining: usize,
}

/// Great-circle distance in kilometres (haversine)
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let (lat1, lng1) = (from.lat.to_radians(), from.lng.to_radians());
    let (lat2, lng2) = (to.lat.to_radians(), to.lng.to_radians());

    let d_lat = lat2 - lat1;
    let d_lng = lng2 - lng1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points
    2.0 * a.sqrt().min(1.0).asin() * EARTH_RADIUS_KM
}

pub fn export_overlap(guess: &CountryRecord, target: &CountryRecord) -> Vec<String> {
    let guess_top: BTreeSet<&String> = guess.top_exports.iter().collect();
    let target_top: BTreeSet<&String> = target.top_exports.iter().collect();

    guess_top
        .intersection(&target_top)
        .map(|commodity| (*commodity).clone())
        .collect()
}

pub fn export_similarity(guess: &CountryRecord, target: &CountryRecord) -> Vec<ExportSimilarity> {
    guess
        .exports
        .iter()
        .map(|entry| {
            let target_share = target.share_of(&entry.commodity);
            let band = match target_share {
                Some(share) => SimilarityBand::from_difference(entry.share - share),
                None => SimilarityBand::NotInTarget,
            };

            ExportSimilarity {
                commodity: entry.commodity.clone(),
                band,
                guess_share: entry.share,
                target_share,
            }
        })
        .collect()
}

/// Builds the full feedback for a guess. `session` must already include the
/// guess, so `guesses_remaining` reflects the post-guess budget.
pub fn score(guess: &CountryRecord, target: &CountryRecord, session: &GameSession) -> Feedback {
    Feedback {
        country: guess.name.clone(),
        continent: guess.continent.clone(),
        continent_match: guess.continent == target.continent,
        region_match: guess.region == target.region,
        subregion_match: guess.subregion == target.subregion,
        gdp_rank: guess.gdp_rank,
        gdp_direction: GdpDirection::between(guess.gdp_rank, target.gdp_rank),
        distance_km: haversine_km(guess.coordinates, target.coordinates).round() as u32,
        direction: CompassDirection::between(guess.coordinates, target.coordinates),
        export_overlap: export_overlap(guess, target),
        export_similarity: export_similarity(guess, target),
        guesses_remaining: session.guesses_remaining(),
    }
}
