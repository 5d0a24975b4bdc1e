use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

use super::{
    errors::CatalogError,
    models::{Coordinates, CountryRecord, ExportEntry, RawCountryRecord, TOP_EXPORTS_LEN},
};

/// Immutable set of playable countries, keyed and ordered by name.
///
/// Built once at startup and shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Catalog {
    countries: BTreeMap<String, CountryRecord>,
    names: Vec<String>,
}

/// Attributes gathered for one country while merging raw records
#[derive(Default)]
struct PendingCountry {
    iso: Option<String>,
    continent: String,
    region: String,
    subregion: String,
    latlng: Option<String>,
    gdp_rank: Option<u32>,
    exports: HashMap<String, f64>,
}

impl PendingCountry {
    fn merge(&mut self, record: RawCountryRecord, country: &str) -> Result<(), CatalogError> {
        // Later rows overwrite metadata, the same way row-by-row ingestion does
        if record.iso.is_some() {
            self.iso = record.iso;
        }
        if !record.continent.is_empty() {
            self.continent = record.continent;
        }
        if !record.region.is_empty() {
            self.region = record.region;
        }
        if !record.subregion.is_empty() {
            self.subregion = record.subregion;
        }
        if record.latlng.is_some() {
            self.latlng = record.latlng;
        }
        if record.gdp_rank.is_some() {
            self.gdp_rank = record.gdp_rank;
        }

        for export in record.exports {
            let commodity = export.commodity.trim();
            if commodity.is_empty() {
                return Err(CatalogError::MissingField {
                    country: country.to_string(),
                    field: "commodity",
                });
            }
            if !export.value.is_finite() || export.value < 0.0 {
                return Err(CatalogError::InvalidExportValue {
                    country: country.to_string(),
                    commodity: commodity.to_string(),
                    value: export.value,
                });
            }

            *self.exports.entry(commodity.to_string()).or_insert(0.0) += export.value;
        }

        Ok(())
    }

    fn finish(self, name: String) -> Result<CountryRecord, CatalogError> {
        let raw_latlng = self.latlng.ok_or_else(|| CatalogError::MissingField {
            country: name.clone(),
            field: "latlng",
        })?;
        let coordinates =
            Coordinates::parse(&raw_latlng).ok_or_else(|| CatalogError::InvalidCoordinates {
                country: name.clone(),
                raw: raw_latlng.clone(),
            })?;

        let gdp_rank = match self.gdp_rank {
            Some(0) => return Err(CatalogError::InvalidGdpRank { country: name }),
            Some(rank) => rank,
            None => {
                return Err(CatalogError::MissingField {
                    country: name,
                    field: "gdp_rank",
                })
            }
        };

        if self.exports.is_empty() {
            return Err(CatalogError::NoExports { country: name });
        }

        let mut sorted: Vec<(String, f64)> = self.exports.into_iter().collect();
        sorted.sort_by(|(a_name, a_value), (b_name, b_value)| {
            b_value.total_cmp(a_value).then_with(|| a_name.cmp(b_name))
        });

        let total_exports: f64 = sorted.iter().map(|(_, value)| value).sum();
        if total_exports <= 0.0 {
            debug!(country = %name, "Country has zero total export value, shares left at 0");
        }

        let exports: Vec<ExportEntry> = sorted
            .into_iter()
            .map(|(commodity, value)| ExportEntry {
                share: if total_exports > 0.0 {
                    value / total_exports * 100.0
                } else {
                    0.0
                },
                commodity,
                value,
            })
            .collect();

        let top_exports = exports
            .iter()
            .take(TOP_EXPORTS_LEN)
            .map(|entry| entry.commodity.clone())
            .collect();

        Ok(CountryRecord {
            name,
            iso: self.iso,
            continent: self.continent,
            region: self.region,
            subregion: self.subregion,
            coordinates,
            gdp_rank,
            exports,
            top_exports,
            total_exports,
        })
    }
}

impl Catalog {
    /// Validates and aggregates raw records into a catalog.
    ///
    /// Records sharing a name are merged, duplicate commodities are summed and
    /// each export list is sorted by value.
    #[instrument(skip(raw_records))]
    pub fn build(
        raw_records: impl IntoIterator<Item = RawCountryRecord>,
    ) -> Result<Self, CatalogError> {
        let mut pending: BTreeMap<String, PendingCountry> = BTreeMap::new();

        for (index, mut record) in raw_records.into_iter().enumerate() {
            let name = record.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::MissingName { index });
            }
            record.name.clone_from(&name);

            pending
                .entry(name.clone())
                .or_default()
                .merge(record, &name)?;
        }

        if pending.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut countries = BTreeMap::new();
        for (name, country) in pending {
            let record = country.finish(name.clone())?;
            countries.insert(name, record);
        }

        let mut seen_ranks: HashMap<u32, &str> = HashMap::new();
        for record in countries.values() {
            if let Some(other) = seen_ranks.insert(record.gdp_rank, &record.name) {
                warn!(
                    gdp_rank = record.gdp_rank,
                    first = %other,
                    second = %record.name,
                    "Duplicate GDP rank in catalog, comparisons between them score as equal"
                );
            }
        }

        let names = countries.keys().cloned().collect();
        info!(country_count = countries.len(), "Country catalog built");

        Ok(Self { countries, names })
    }

    pub fn get(&self, name: &str) -> Option<&CountryRecord> {
        self.countries.get(name)
    }

    /// Country names in ascending order
    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn all(&self) -> &BTreeMap<String, CountryRecord> {
        &self.countries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.countries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::RawExport;

    fn record(name: &str, exports: Vec<RawExport>) -> RawCountryRecord {
        RawCountryRecord {
            name: name.to_string(),
            continent: "Europe".to_string(),
            latlng: Some("[51, 9]".to_string()),
            gdp_rank: Some(4),
            exports,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_sorts_exports_and_computes_shares() {
        let catalog = Catalog::build(vec![record(
            "Germany",
            vec![
                RawExport::new("Chemicals", 25.0),
                RawExport::new("Vehicles", 50.0),
                RawExport::new("Machinery", 25.0),
            ],
        )])
        .unwrap();

        let germany = catalog.get("Germany").unwrap();
        let commodities: Vec<&str> = germany
            .exports
            .iter()
            .map(|e| e.commodity.as_str())
            .collect();
        // Equal values fall back to alphabetical order
        assert_eq!(commodities, vec!["Vehicles", "Chemicals", "Machinery"]);
        assert!((germany.total_exports - 100.0).abs() < 1e-9);
        assert!((germany.share_of("Vehicles").unwrap() - 50.0).abs() < 1e-9);

        let share_sum: f64 = germany.exports.iter().map(|e| e.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_commodities_are_summed() {
        let catalog = Catalog::build(vec![record(
            "Germany",
            vec![
                RawExport::new("Vehicles", 10.0),
                RawExport::new("Machinery", 15.0),
                RawExport::new("Vehicles", 10.0),
            ],
        )])
        .unwrap();

        let germany = catalog.get("Germany").unwrap();
        assert_eq!(germany.exports.len(), 2);
        assert_eq!(germany.exports[0].commodity, "Vehicles");
        assert!((germany.exports[0].value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_records_with_same_name_are_merged() {
        let mut second = record("Germany", vec![RawExport::new("Vehicles", 5.0)]);
        second.subregion = "Western Europe".to_string();
        second.latlng = None;

        let catalog = Catalog::build(vec![
            record("Germany", vec![RawExport::new("Machinery", 3.0)]),
            second,
        ])
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let germany = catalog.get("Germany").unwrap();
        assert_eq!(germany.exports.len(), 2);
        assert_eq!(germany.subregion, "Western Europe");
        assert!((germany.coordinates.lat - 51.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_exports_are_first_five_by_value() {
        let exports = (1..=7)
            .map(|i| RawExport::new(format!("Good {i}"), f64::from(i)))
            .collect();
        let catalog = Catalog::build(vec![record("Germany", exports)]).unwrap();

        assert_eq!(
            catalog.get("Germany").unwrap().top_exports,
            vec!["Good 7", "Good 6", "Good 5", "Good 4", "Good 3"]
        );
    }

    #[test]
    fn test_zero_total_exports_keeps_country_without_shares() {
        let catalog =
            Catalog::build(vec![record("Germany", vec![RawExport::new("Vehicles", 0.0)])])
                .unwrap();

        let germany = catalog.get("Germany").unwrap();
        assert!(!germany.has_percentages());
        assert_eq!(germany.share_of("Vehicles"), Some(0.0));
        assert_eq!(germany.top_exports, vec!["Vehicles"]);
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let catalog = Catalog::build(vec![
            record("Japan", vec![RawExport::new("Vehicles", 1.0)]),
            record("Brazil", vec![RawExport::new("Minerals", 1.0)]),
            record("Germany", vec![RawExport::new("Vehicles", 1.0)]),
        ])
        .unwrap();

        assert_eq!(catalog.list(), ["Brazil", "Germany", "Japan"]);
        assert_eq!(catalog.all().len(), 3);
        assert!(catalog.contains("Japan"));
        assert!(catalog.get("Atlantis").is_none());
    }

    #[test]
    fn test_names_are_trimmed() {
        let catalog =
            Catalog::build(vec![record("  Germany ", vec![RawExport::new("Vehicles", 1.0)])])
                .unwrap();
        assert!(catalog.contains("Germany"));
    }

    #[test]
    fn test_empty_input_fails() {
        let result = Catalog::build(Vec::new());
        assert_eq!(result.unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_missing_name_fails() {
        let result = Catalog::build(vec![
            record("Germany", vec![RawExport::new("Vehicles", 1.0)]),
            record("   ", vec![RawExport::new("Vehicles", 1.0)]),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::MissingName { index: 1 });
    }

    #[test]
    fn test_missing_exports_fails() {
        let result = Catalog::build(vec![record("Germany", vec![])]);
        assert!(matches!(result, Err(CatalogError::NoExports { .. })));
    }

    #[test]
    fn test_invalid_export_value_fails() {
        for value in [f64::NAN, f64::INFINITY, -1.0] {
            let result = Catalog::build(vec![record(
                "Germany",
                vec![RawExport::new("Vehicles", value)],
            )]);
            assert!(
                matches!(result, Err(CatalogError::InvalidExportValue { .. })),
                "value {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_blank_commodity_fails() {
        let result = Catalog::build(vec![record("Germany", vec![RawExport::new(" ", 1.0)])]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingField {
                field: "commodity",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_or_malformed_coordinates_fail() {
        let mut missing = record("Germany", vec![RawExport::new("Vehicles", 1.0)]);
        missing.latlng = None;
        assert!(matches!(
            Catalog::build(vec![missing]),
            Err(CatalogError::MissingField {
                field: "latlng",
                ..
            })
        ));

        let mut malformed = record("Germany", vec![RawExport::new("Vehicles", 1.0)]);
        malformed.latlng = Some("[fifty-one, nine]".to_string());
        assert!(matches!(
            Catalog::build(vec![malformed]),
            Err(CatalogError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_gdp_rank_must_be_present_and_positive() {
        let mut zero = record("Germany", vec![RawExport::new("Vehicles", 1.0)]);
        zero.gdp_rank = Some(0);
        assert!(matches!(
            Catalog::build(vec![zero]),
            Err(CatalogError::InvalidGdpRank { .. })
        ));

        let mut missing = record("Germany", vec![RawExport::new("Vehicles", 1.0)]);
        missing.gdp_rank = None;
        assert!(matches!(
            Catalog::build(vec![missing]),
            Err(CatalogError::MissingField {
                field: "gdp_rank",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_gdp_ranks_are_accepted() {
        let catalog = Catalog::build(vec![
            record("Germany", vec![RawExport::new("Vehicles", 1.0)]),
            record("Austria", vec![RawExport::new("Machinery", 1.0)]),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
