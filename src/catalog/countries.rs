use std::collections::HashMap;
use std::fs;
use std::path::Path;

use geo::MultiPolygon;
use geojson::FeatureCollection;

use super::features::feature_area;
use super::CatalogError;

#[derive(Debug, Clone)]
struct Country {
    name: String,
    boundary: MultiPolygon<f64>,
}

/// Country boundaries, looked up by display name regardless of case.
#[derive(Debug, Clone, Default)]
pub struct CountryAtlas {
    countries: HashMap<String, Country>,
}

impl CountryAtlas {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let collection: FeatureCollection = serde_json::from_str(&content)?;
        Ok(Self::from_features(&collection))
    }

    /// Builds the atlas from features carrying a `name` property. Features
    /// without a name or with non-areal geometry are skipped; for duplicate
    /// names the first one wins.
    pub fn from_features(collection: &FeatureCollection) -> Self {
        let mut countries = HashMap::new();

        for feature in &collection.features {
            let Some(name) = feature.property("name").and_then(|v| v.as_str()) else {
                log::warn!("Skipping country feature without a name");
                continue;
            };
            match feature_area(feature, name) {
                Ok(boundary) => {
                    countries
                        .entry(name.to_lowercase())
                        .or_insert_with(|| Country {
                            name: name.to_string(),
                            boundary,
                        });
                }
                Err(e) => log::warn!("Skipping country {}: {}", name, e),
            }
        }

        Self { countries }
    }

    pub fn lookup(&self, name: &str) -> Option<&MultiPolygon<f64>> {
        self.countries
            .get(&name.trim().to_lowercase())
            .map(|c| &c.boundary)
    }

    /// Display names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.countries.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
