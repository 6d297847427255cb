mod countries;
mod error;
mod features;
mod loader;
mod types;

pub use countries::CountryAtlas;
pub use error::CatalogError;
pub use types::{same_name, BandCoverage, Catalog, SatelliteConfig};
