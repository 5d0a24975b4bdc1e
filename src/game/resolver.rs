use tracing::debug;

use super::core::GameError;
use crate::catalog::Catalog;

/// Minimum similarity ratio for an approximate match to be accepted
pub const FUZZY_MATCH_CUTOFF: f64 = 0.8;

/// Maps free-text input onto a canonical catalog name.
///
/// Exact case-insensitive match first, then the closest name by
/// [`similarity_ratio`] if it reaches [`FUZZY_MATCH_CUTOFF`]. Ties on the best
/// ratio go to the name that sorts first.
pub fn resolve<'a>(raw_input: &str, catalog: &'a Catalog) -> Result<&'a str, GameError> {
    let guess = raw_input.trim();
    if guess.is_empty() {
        return Err(GameError::UnknownCountry(String::new()));
    }

    let lowered = guess.to_lowercase();
    if let Some(name) = catalog
        .list()
        .iter()
        .find(|name| name.to_lowercase() == lowered)
    {
        return Ok(name);
    }

    let guess_len = lowered.chars().count();
    let mut best: Option<(&str, f64)> = None;
    for name in catalog.list() {
        let candidate = name.to_lowercase();
        if length_ratio_bound(guess_len, candidate.chars().count()) < FUZZY_MATCH_CUTOFF {
            continue;
        }

        let ratio = similarity_ratio(&lowered, &candidate);
        if ratio >= FUZZY_MATCH_CUTOFF && best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((name, ratio));
        }
    }

    match best {
        Some((name, ratio)) => {
            debug!(guess = %guess, resolved = %name, ratio, "Resolved guess by approximate match");
            Ok(name)
        }
        None => Err(GameError::UnknownCountry(guess.to_string())),
    }
}

/// Upper bound on [`similarity_ratio`] from the two lengths alone; every
/// character of the shorter string matching gives `2 * min / (a + b)`
fn length_ratio_bound(a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    2.0 * a_len.min(b_len) as f64 / total as f64
}

/// Ratcliff/Obershelp similarity: `2 * M / T` where `M` is the number of
/// characters in matching blocks and `T` the combined length.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Sum of matching block lengths, found by taking the longest common block and
/// recursing on the pieces to either side of it
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, (a_lo, a_hi), (b_lo, b_hi));
        if size == 0 {
            continue;
        }

        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block within the given windows. Among equally long blocks,
/// the one starting earliest in `a` (then in `b`) wins.
fn longest_match(
    a: &[char],
    b: &[char],
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);

    // run_lengths[j - b_lo + 1] = length of the match ending at (i, j)
    let width = b_hi - b_lo + 1;
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let slot = j - b_lo + 1;
            if a[i] == b[j] {
                let size = previous[slot - 1] + 1;
                current[slot] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            } else {
                current[slot] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_size)
}
