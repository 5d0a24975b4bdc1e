pub mod actions;
pub mod catalog_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use catalog_builders::{CatalogBuilder, CountryBuilder};
#[allow(unused_imports)]
pub use setup::{puzzle_day, TestApp, TestAppBuilder};
