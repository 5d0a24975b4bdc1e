use super::models::{RawCountryRecord, RawExport};

/// Small demo data set used when no processed trade data is available
pub fn sample_records() -> Vec<RawCountryRecord> {
    vec![
        sample(
            "United States",
            "USA",
            ("North America", "Americas", "Northern America"),
            "[38, -97]",
            1,
            &[
                ("Machinery", 25.4),
                ("Electronics", 18.2),
                ("Vehicles", 14.7),
                ("Chemicals", 11.0),
                ("Food Products", 8.3),
            ],
        ),
        sample(
            "Germany",
            "DEU",
            ("Europe", "Europe", "Western Europe"),
            "[51, 9]",
            4,
            &[
                ("Vehicles", 23.1),
                ("Machinery", 18.7),
                ("Chemicals", 15.2),
                ("Electronics", 12.5),
                ("Pharmaceuticals", 10.8),
            ],
        ),
        sample(
            "Japan",
            "JPN",
            ("Asia", "Asia", "Eastern Asia"),
            "[36, 138]",
            3,
            &[
                ("Vehicles", 20.5),
                ("Electronics", 18.3),
                ("Machinery", 15.6),
                ("Chemicals", 10.2),
                ("Metals", 8.7),
            ],
        ),
        sample(
            "China",
            "CHN",
            ("Asia", "Asia", "Eastern Asia"),
            "[35, 105]",
            2,
            &[
                ("Electronics", 24.1),
                ("Machinery", 20.8),
                ("Textiles", 12.5),
                ("Metals", 10.1),
                ("Furniture", 7.5),
            ],
        ),
        sample(
            "Brazil",
            "BRA",
            ("South America", "Americas", "South America"),
            "[-10, -55]",
            9,
            &[
                ("Agricultural Products", 23.6),
                ("Minerals", 18.9),
                ("Food Products", 15.4),
                ("Metals", 12.1),
                ("Machinery", 6.8),
            ],
        ),
    ]
}

fn sample(
    name: &str,
    iso: &str,
    (continent, region, subregion): (&str, &str, &str),
    latlng: &str,
    gdp_rank: u32,
    exports: &[(&str, f64)],
) -> RawCountryRecord {
    RawCountryRecord {
        name: name.to_string(),
        iso: Some(iso.to_string()),
        continent: continent.to_string(),
        region: region.to_string(),
        subregion: subregion.to_string(),
        latlng: Some(latlng.to_string()),
        gdp_rank: Some(gdp_rank),
        exports: exports
            .iter()
            .map(|(commodity, value)| RawExport::new(*commodity, *value))
            .collect(),
    }
}
