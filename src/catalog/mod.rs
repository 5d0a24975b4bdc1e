// Public API - what other modules can use
pub use builder::Catalog;
pub use errors::CatalogError;
pub use loader::load_records;
pub use models::{
    Coordinates, CountryRecord, ExportEntry, RawCountryRecord, RawExport, TOP_EXPORTS_LEN,
};
pub use sample::sample_records;

// Internal modules
mod builder;
mod errors;
mod loader;
pub mod models;
mod sample;
