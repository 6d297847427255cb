use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError, CountryAtlas};
use crate::coverage::CoverageComposer;

use super::config::Config;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub atlas: Arc<CountryAtlas>,
    pub composer: Arc<CoverageComposer>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, atlas: CountryAtlas) -> Self {
        let composer = config.composer();
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            atlas: Arc::new(atlas),
            composer: Arc::new(composer),
        }
    }

    /// Loads the catalog and country boundaries named by `config`
    pub fn load(config: Config) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.catalog)?;
        let atlas = CountryAtlas::load(&config.countries)?;
        log::info!(
            "Loaded {} satellites and {} countries",
            catalog.len(),
            atlas.len()
        );
        Ok(Self::new(config, catalog, atlas))
    }
}
