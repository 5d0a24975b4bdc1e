use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::{errors::CatalogError, models::RawCountryRecord, sample::sample_records};

/// Reads processed country records from a JSON array on disk.
///
/// A missing file falls back to the built-in sample data; any other read
/// failure or malformed JSON is an error.
#[instrument]
pub fn load_records(path: &Path) -> Result<Vec<RawCountryRecord>, CatalogError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "No processed trade data found, using sample data");
            return Ok(sample_records());
        }
        Err(e) => return Err(CatalogError::Io(format!("{}: {}", path.display(), e))),
    };

    let records: Vec<RawCountryRecord> =
        serde_json::from_str(&contents).map_err(|e| CatalogError::Parse(e.to_string()))?;

    info!(
        path = %path.display(),
        record_count = records.len(),
        "Loaded processed trade data"
    );
    Ok(records)
}
