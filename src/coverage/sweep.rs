use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{same_name, Catalog, CountryAtlas, SatelliteConfig};
use crate::geometry::GroundPoint;

use super::{CoverageComposer, CoverageFilter, CoveragePolygon, TargetSpec};

/// Coverage query across the catalog, or for one named satellite
#[derive(Debug, Clone, Default)]
pub struct SweepRequest {
    pub satellite: Option<String>,
    pub target: TargetSpec,
    pub filter: CoverageFilter,
    /// Ground station to test against each result
    pub station: Option<GroundPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteCoverage {
    pub satellite: String,
    /// Orbital longitude, degrees east
    pub longitude: f64,
    pub polygons: Vec<CoveragePolygon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_station: Option<bool>,
}

impl SweepRequest {
    fn selects(&self, satellite: &SatelliteConfig) -> bool {
        if let Some(name) = &self.satellite {
            if !same_name(name, &satellite.name) {
                return false;
            }
        }
        satellite.has_selected_countries(&self.filter.countries)
            && satellite.offers_any_band(&self.filter.bands)
    }
}

/// Serviceable areas of every eligible satellite, in catalog order. Empty
/// areas are kept so callers can report them.
pub fn sweep(
    composer: &CoverageComposer,
    catalog: &Catalog,
    atlas: &CountryAtlas,
    request: &SweepRequest,
) -> Vec<SatelliteCoverage> {
    let mut results = Vec::new();

    for satellite in catalog.satellites().filter(|s| request.selects(s)) {
        let area = composer.compose(satellite, &request.target, &request.filter, atlas);
        if area.is_empty() {
            log::info!("No serviceable area for {}", satellite.name);
        }

        let contains_station = request
            .station
            .map(|station| composer.engine().contains(area.geometry(), station));

        log::debug!(
            "{}: {} polygon(s), station covered: {:?}",
            satellite.name,
            area.polygons.len(),
            contains_station
        );

        results.push(SatelliteCoverage {
            satellite: satellite.name.clone(),
            longitude: satellite.orbital_longitude,
            polygons: area.polygons,
            contains_station,
        });
    }

    results
}
