use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use geojson::FeatureCollection;
use serde::Deserialize;

use super::features::collection_areas;
use super::{BandCoverage, Catalog, CatalogError, SatelliteConfig};

#[derive(Debug, Deserialize)]
struct RawSatellite {
    #[serde(rename = "sat", alias = "name")]
    name: String,
    #[serde(rename = "long", alias = "longitude")]
    longitude: f64,
    #[serde(default)]
    bands: BTreeMap<String, RawBand>,
}

#[derive(Debug, Deserialize)]
struct RawBand {
    #[serde(default)]
    countries: Vec<String>,
    #[serde(default)]
    coverage: Vec<FeatureCollection>,
}

impl Catalog {
    /// Load a catalog file: groups of satellites keyed by group name
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Satellites whose geometry does not convert are skipped with a warning
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Vec<RawSatellite>> = serde_json::from_str(json)?;

        let mut groups = BTreeMap::new();
        for (group, satellites) in raw {
            let mut converted = Vec::with_capacity(satellites.len());
            for satellite in satellites {
                match convert_satellite(satellite) {
                    Ok(s) => converted.push(s),
                    Err(e) => {
                        log::warn!("Skipping satellite in group {}: {}", group, e);
                    }
                }
            }
            groups.insert(group, converted);
        }

        Ok(Catalog { groups })
    }
}

fn convert_satellite(raw: RawSatellite) -> Result<SatelliteConfig, CatalogError> {
    if !(-180.0..=180.0).contains(&raw.longitude) {
        return Err(CatalogError::InvalidGeometry {
            context: raw.name,
            message: format!("orbital longitude {} out of range", raw.longitude),
        });
    }

    let mut bands = BTreeMap::new();
    for (band, data) in raw.bands {
        let context = format!("{} / {}", raw.name, band);
        let mut coverage = Vec::new();
        for collection in &data.coverage {
            coverage.extend(collection_areas(collection, &context)?);
        }
        bands.insert(
            band,
            BandCoverage {
                countries: data.countries.into_iter().collect(),
                coverage,
            },
        );
    }

    Ok(SatelliteConfig {
        name: raw.name,
        orbital_longitude: raw.longitude,
        bands,
    })
}
