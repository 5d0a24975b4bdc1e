//! Fluent builders for raw country records
#![allow(dead_code)] // Test utilities may not all be used in every test

use tradle::{
    catalog::{RawExport, sample_records},
    Catalog, RawCountryRecord,
};

// ============================================================================
// Country Records
// ============================================================================

pub struct CountryBuilder {
    record: RawCountryRecord,
}

impl CountryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            record: RawCountryRecord {
                name: name.to_string(),
                continent: "Europe".to_string(),
                region: "Europe".to_string(),
                subregion: "Western Europe".to_string(),
                latlng: Some("[0.0, 0.0]".to_string()),
                gdp_rank: Some(100),
                ..RawCountryRecord::default()
            },
        }
    }

    pub fn continent(mut self, continent: &str) -> Self {
        self.record.continent = continent.to_string();
        self
    }

    pub fn region(mut self, region: &str, subregion: &str) -> Self {
        self.record.region = region.to_string();
        self.record.subregion = subregion.to_string();
        self
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.record.latlng = Some(format!("[{lat}, {lng}]"));
        self
    }

    pub fn gdp_rank(mut self, rank: u32) -> Self {
        self.record.gdp_rank = Some(rank);
        self
    }

    pub fn export(mut self, commodity: &str, value: f64) -> Self {
        self.record.exports.push(RawExport::new(commodity, value));
        self
    }

    pub fn build(self) -> RawCountryRecord {
        self.record
    }
}

// ============================================================================
// Catalogs
// ============================================================================

pub struct CatalogBuilder {
    records: Vec<RawCountryRecord>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self { records: vec![] }
    }

    /// The five bundled demo countries
    pub fn with_sample_countries(mut self) -> Self {
        self.records.extend(sample_records());
        self
    }

    /// United States and Germany only
    pub fn with_two_countries(self) -> Self {
        self.with_country(
            CountryBuilder::new("United States")
                .continent("North America")
                .region("Americas", "Northern America")
                .at(38.0, -97.0)
                .gdp_rank(1)
                .export("Machinery", 400.0)
                .export("Vehicles", 150.0),
        )
        .with_country(
            CountryBuilder::new("Germany")
                .at(51.0, 9.0)
                .gdp_rank(4)
                .export("Vehicles", 250.0)
                .export("Machinery", 200.0),
        )
    }

    pub fn with_country(mut self, country: CountryBuilder) -> Self {
        self.records.push(country.build());
        self
    }

    pub fn records(self) -> Vec<RawCountryRecord> {
        self.records
    }

    pub fn build(self) -> Catalog {
        Catalog::build(self.records).unwrap()
    }
}
