use thiserror::Error;

/// Malformed or missing catalog input. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("No country records supplied")]
    Empty,

    #[error("Record #{index} has no country name")]
    MissingName { index: usize },

    #[error("Country '{country}' is missing required field '{field}'")]
    MissingField {
        country: String,
        field: &'static str,
    },

    #[error("Country '{country}' has no export entries")]
    NoExports { country: String },

    #[error("Country '{country}' has invalid export value {value} for '{commodity}'")]
    InvalidExportValue {
        country: String,
        commodity: String,
        value: f64,
    },

    #[error("Country '{country}' has malformed coordinates '{raw}'")]
    InvalidCoordinates { country: String, raw: String },

    #[error("Country '{country}' has GDP rank 0, ranks start at 1")]
    InvalidGdpRank { country: String },

    #[error("Failed to read country data: {0}")]
    Io(String),

    #[error("Failed to parse country data: {0}")]
    Parse(String),
}
