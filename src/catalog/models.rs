use serde::{Deserialize, Serialize};

/// Number of leading commodities exposed as a country's top exports
pub const TOP_EXPORTS_LEN: usize = 5;

/// Raw export line as it comes out of the ingestion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExport {
    pub commodity: String,
    pub value: f64,
}

impl RawExport {
    pub fn new(commodity: impl Into<String>, value: f64) -> Self {
        Self {
            commodity: commodity.into(),
            value,
        }
    }
}

/// Already-parsed country attributes, before validation and aggregation.
///
/// Several records may share a name (one per ingested row); they are merged
/// when the catalog is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountryRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iso: Option<String>,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    /// Coordinate pair formatted as `"[lat, lng]"` or `"lat, lng"`
    #[serde(default)]
    pub latlng: Option<String>,
    #[serde(default)]
    pub gdp_rank: Option<u32>,
    #[serde(default)]
    pub exports: Vec<RawExport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses `"[38.0, -97.0]"` or `"38.0,-97.0"` into a validated pair
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
        let mut parts = trimmed.split(',').map(str::trim);

        let lat = parts.next()?.parse::<f64>().ok()?;
        let lng = parts.next()?.parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }

        Some(Self { lat, lng })
    }
}

/// One commodity line of a country's export profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub commodity: String,
    pub value: f64,
    /// Percentage of the country's total export value, 0 when the total is 0
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub iso: Option<String>,
    pub continent: String,
    pub region: String,
    pub subregion: String,
    pub coordinates: Coordinates,
    pub gdp_rank: u32,
    /// Sorted by value, largest first
    pub exports: Vec<ExportEntry>,
    pub top_exports: Vec<String>,
    pub total_exports: f64,
}

impl CountryRecord {
    /// Whether export shares are meaningful (non-zero total export value)
    pub fn has_percentages(&self) -> bool {
        self.total_exports > 0.0
    }

    pub fn export(&self, commodity: &str) -> Option<&ExportEntry> {
        self.exports.iter().find(|entry| entry.commodity == commodity)
    }

    /// Share of total exports for a commodity, `None` when not exported
    pub fn share_of(&self, commodity: &str) -> Option<f64> {
        self.export(commodity).map(|entry| entry.share)
    }
}
