use std::collections::{BTreeMap, BTreeSet};

use geo::MultiPolygon;

use super::CatalogError;

/// Case-insensitive name comparison, used for countries, bands and satellites
pub fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Footprint of one frequency band of a satellite
#[derive(Debug, Clone, Default)]
pub struct BandCoverage {
    pub countries: BTreeSet<String>,
    pub coverage: Vec<MultiPolygon<f64>>,
}

impl BandCoverage {
    /// True if the band lists any of `countries`
    pub fn serves_any(&self, countries: &[String]) -> bool {
        countries
            .iter()
            .any(|wanted| self.countries.iter().any(|c| same_name(c, wanted)))
    }
}

#[derive(Debug, Clone)]
pub struct SatelliteConfig {
    pub name: String,
    pub orbital_longitude: f64,
    pub bands: BTreeMap<String, BandCoverage>,
}

impl SatelliteConfig {
    /// No country filter, or at least one band serving a selected country
    pub fn has_selected_countries(&self, countries: &[String]) -> bool {
        countries.is_empty() || self.bands.values().any(|band| band.serves_any(countries))
    }

    pub fn offers_any_band(&self, bands: &[String]) -> bool {
        self.bands
            .keys()
            .any(|name| bands.iter().any(|b| same_name(b, name)))
    }
}

/// Satellites grouped the way the catalog file groups them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub groups: BTreeMap<String, Vec<SatelliteConfig>>,
}

impl Catalog {
    /// All satellites, group by group
    pub fn satellites(&self) -> impl Iterator<Item = &SatelliteConfig> {
        self.groups.values().flatten()
    }

    pub fn find(&self, name: &str) -> Result<&SatelliteConfig, CatalogError> {
        self.satellites()
            .find(|s| same_name(&s.name, name))
            .ok_or_else(|| CatalogError::UnknownSatellite(name.to_string()))
    }

    pub fn band_names(&self) -> BTreeSet<String> {
        self.satellites()
            .flat_map(|s| s.bands.keys().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.satellites().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
