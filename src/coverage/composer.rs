//! Serviceable-area pipeline: band coverage, country filter, elevation
//! annulus and azimuth wedge.

use geo::MultiPolygon;

use crate::catalog::{same_name, Catalog, CountryAtlas, SatelliteConfig};
use crate::geometry::{horizon_ground_distance_km, GroundPoint, LookAngles};
use crate::solver::{GridSearch, Solver};

use super::engine::continuous_area;
use super::visibility::visibility_radius_km;
use super::{Coverage, CoverageArea, EngineError, GeoEngine, PolygonEngine, TargetSpec};

/// Band and country selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageFilter {
    /// Bands to include; an empty selection includes nothing
    pub bands: Vec<String>,
    /// Countries to restrict to; empty means no restriction
    pub countries: Vec<String>,
}

impl CoverageFilter {
    /// Selects every band in the catalog when no band was named
    pub fn with_default_bands(mut self, catalog: &Catalog) -> Self {
        if self.bands.is_empty() {
            self.bands = catalog.band_names().into_iter().collect();
        }
        self
    }
}

/// Assembles serviceable-area polygons. Holds no state between calls.
pub struct CoverageComposer {
    solver: Box<dyn Solver + Send + Sync>,
    engine: Box<dyn PolygonEngine + Send + Sync>,
}

impl Default for CoverageComposer {
    fn default() -> Self {
        Self::new(
            Box::new(GridSearch::default()),
            Box::new(GeoEngine::default()),
        )
    }
}

/// Empty and failed geometry both mean "no coverage"
fn settle(step: &str, result: Result<Coverage, EngineError>) -> Option<Coverage> {
    match result {
        Ok(coverage) if coverage.0.is_empty() => {
            log::warn!("{} resulted in empty geometry", step);
            None
        }
        Ok(coverage) => Some(coverage),
        Err(e) => {
            log::error!("Error in {}: {}", step, e);
            None
        }
    }
}

/// Triangle from the sub-satellite point to the two boundary fixes
fn azimuth_wedge(center: GroundPoint, start: GroundPoint, end: GroundPoint) -> Coverage {
    continuous_area(center.longitude, [center, start, end, center])
}

/// Annulus radius bounded by the horizon. Elevations near zero resolve close
/// to the antipode, past the reach of a single visibility circle.
fn annulus_radius_km(radius_km: f64, elevation_deg: f64) -> f64 {
    let horizon = horizon_ground_distance_km();
    if radius_km > horizon {
        log::debug!(
            "radius {:.1} km at elevation {} is beyond the horizon, using {:.1} km",
            radius_km,
            elevation_deg,
            horizon
        );
        return horizon;
    }
    radius_km
}

impl CoverageComposer {
    pub fn new(
        solver: Box<dyn Solver + Send + Sync>,
        engine: Box<dyn PolygonEngine + Send + Sync>,
    ) -> Self {
        Self { solver, engine }
    }

    pub fn solver(&self) -> &dyn Solver {
        self.solver.as_ref()
    }

    pub fn engine(&self) -> &dyn PolygonEngine {
        self.engine.as_ref()
    }

    pub fn visibility_radius_km(&self, satellite_longitude: f64, elevation_deg: f64) -> f64 {
        visibility_radius_km(
            self.solver(),
            self.engine(),
            satellite_longitude,
            elevation_deg,
        )
    }

    /// Union of the selected bands' footprints, restricted to the selected
    /// countries. `None` when nothing is left.
    pub fn filtered_coverage(
        &self,
        satellite: &SatelliteConfig,
        filter: &CoverageFilter,
        atlas: &CountryAtlas,
    ) -> Option<Coverage> {
        let engine = self.engine();
        let mut coverage = MultiPolygon::new(Vec::new());

        for (band, data) in &satellite.bands {
            if !filter.bands.iter().any(|b| same_name(b, band)) {
                continue;
            }
            if !filter.countries.is_empty() && !data.serves_any(&filter.countries) {
                log::debug!(
                    "{} band {} serves none of the selected countries",
                    satellite.name,
                    band
                );
                continue;
            }
            for polygon in &data.coverage {
                coverage = settle("band union", engine.union(&coverage, polygon))?;
            }
        }

        if coverage.0.is_empty() {
            log::warn!(
                "No selected band of {} matches the selected countries",
                satellite.name
            );
            return None;
        }

        if filter.countries.is_empty() {
            return Some(coverage);
        }

        let mut countries = MultiPolygon::new(Vec::new());
        for name in &filter.countries {
            match atlas.lookup(name) {
                Some(boundary) => {
                    countries = settle("country union", engine.union(&countries, boundary))?;
                }
                None => log::warn!("Country not found: {}", name),
            }
        }

        settle(
            "country intersection",
            engine.intersect(&coverage, &countries),
        )
    }

    /// Applies the elevation annulus and azimuth wedge to `coverage`.
    pub fn constrain(
        &self,
        target: &TargetSpec,
        satellite_longitude: f64,
        coverage: &Coverage,
    ) -> CoverageArea {
        match self.constrain_geometry(target, satellite_longitude, coverage) {
            Some(area) => CoverageArea::new(self.engine.rings(&area), area),
            None => CoverageArea::empty(),
        }
    }

    fn constrain_geometry(
        &self,
        target: &TargetSpec,
        satellite_longitude: f64,
        coverage: &Coverage,
    ) -> Option<Coverage> {
        let engine = self.engine();
        let center = GroundPoint::sub_satellite(satellite_longitude);

        // higher elevation is reached closer to the sub-satellite point, so
        // the minimum elevation bounds the outer circle
        let outer_radius = annulus_radius_km(
            self.visibility_radius_km(satellite_longitude, target.elevation.min),
            target.elevation.min,
        );
        let inner_radius = annulus_radius_km(
            self.visibility_radius_km(satellite_longitude, target.elevation.max),
            target.elevation.max,
        );
        log::debug!(
            "visibility annulus around {}: {:.1} km to {:.1} km",
            satellite_longitude,
            inner_radius,
            outer_radius
        );

        let outer = settle(
            "minimum elevation circle",
            engine.circle(center, outer_radius),
        )?;
        let coverage = settle(
            "intersection with minimum elevation circle",
            engine.intersect(coverage, &outer),
        )?;

        let inner = settle(
            "maximum elevation circle",
            engine.circle(center, inner_radius),
        )?;
        let coverage = settle(
            "difference with maximum elevation circle",
            engine.difference(&coverage, &inner),
        )?;

        if target.covers_full_circle() {
            return Some(coverage);
        }

        let start = self.solver.resolve(
            LookAngles::new(target.azimuth.min, 0.0),
            satellite_longitude,
        );
        let end = self.solver.resolve(
            LookAngles::new(target.azimuth.max, 0.0),
            satellite_longitude,
        );
        let wedge = azimuth_wedge(center, start, end);

        settle("azimuth wedge intersection", engine.intersect(&wedge, &coverage))
    }

    /// Full pipeline for one satellite
    pub fn compose(
        &self,
        satellite: &SatelliteConfig,
        target: &TargetSpec,
        filter: &CoverageFilter,
        atlas: &CountryAtlas,
    ) -> CoverageArea {
        match self.filtered_coverage(satellite, filter, atlas) {
            Some(coverage) => self.constrain(target, satellite.orbital_longitude, &coverage),
            None => CoverageArea::empty(),
        }
    }
}

/// Constrains already filtered band coverage with the default solver and engine
pub fn compute_coverage_area(
    target: &TargetSpec,
    satellite: &SatelliteConfig,
    coverage: &Coverage,
) -> CoverageArea {
    CoverageComposer::default().constrain(target, satellite.orbital_longitude, coverage)
}

#[cfg(test)]
mod test {
    use std::collections::{BTreeMap, BTreeSet};

    use geo::{polygon, Contains};
    use geojson::FeatureCollection;

    use super::*;
    use crate::catalog::BandCoverage;
    use crate::coverage::{AngleRange, CoveragePolygon};

    fn rectangle(west: f64, south: f64, east: f64, north: f64) -> Coverage {
        MultiPolygon::new(vec![polygon![
            (x: west, y: south),
            (x: east, y: south),
            (x: east, y: north),
            (x: west, y: north),
        ]])
    }

    fn whole_earth() -> Coverage {
        rectangle(-180.0, -90.0, 180.0, 90.0)
    }

    fn satellite() -> SatelliteConfig {
        let mut bands = BTreeMap::new();
        bands.insert(
            "Ku".to_string(),
            BandCoverage {
                countries: BTreeSet::from(["Boxland".to_string()]),
                coverage: vec![whole_earth()],
            },
        );
        bands.insert(
            "C".to_string(),
            BandCoverage {
                countries: BTreeSet::from(["Elsewhere".to_string()]),
                coverage: vec![rectangle(100.0, 10.0, 110.0, 20.0)],
            },
        );
        SatelliteConfig {
            name: "TESTSAT 1".to_string(),
            orbital_longitude: 0.0,
            bands,
        }
    }

    fn atlas() -> CountryAtlas {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": { "name": "Boxland" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0, -45], [10, -45], [10, -35], [0, -35], [0, -45]]]
                    }
                }]
            }"#,
        )
        .unwrap();
        CountryAtlas::from_features(&collection)
    }

    fn filter(bands: &[&str], countries: &[&str]) -> CoverageFilter {
        CoverageFilter {
            bands: bands.iter().map(|b| b.to_string()).collect(),
            countries: countries.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Delegates everything except boolean operations, which always fail
    struct BrokenEngine(GeoEngine);

    impl PolygonEngine for BrokenEngine {
        fn union(&self, _: &Coverage, _: &Coverage) -> Result<Coverage, EngineError> {
            Err(EngineError::Failed { operation: "union" })
        }
        fn intersect(&self, _: &Coverage, _: &Coverage) -> Result<Coverage, EngineError> {
            Err(EngineError::Failed {
                operation: "intersection",
            })
        }
        fn difference(&self, _: &Coverage, _: &Coverage) -> Result<Coverage, EngineError> {
            Err(EngineError::Failed {
                operation: "difference",
            })
        }
        fn circle(&self, center: GroundPoint, radius_km: f64) -> Result<Coverage, EngineError> {
            self.0.circle(center, radius_km)
        }
        fn contains(&self, area: &Coverage, point: GroundPoint) -> bool {
            self.0.contains(area, point)
        }
        fn distance_km(&self, a: GroundPoint, b: GroundPoint) -> f64 {
            self.0.distance_km(a, b)
        }
        fn rings(&self, area: &Coverage) -> Vec<CoveragePolygon> {
            self.0.rings(area)
        }
    }

    #[test]
    fn wedge_vertices() {
        let wedge = azimuth_wedge(
            GroundPoint::new(0.0, 10.0),
            GroundPoint::new(-40.0, 0.0),
            GroundPoint::new(-40.0, 20.0),
        );
        assert_eq!(wedge.0.len(), 1);
        assert_eq!(wedge.0[0].exterior().0.len(), 4);
        assert!(wedge.contains(&geo::Point::new(10.0, -20.0)));
        assert!(!wedge.contains(&geo::Point::new(10.0, 20.0)));
    }

    #[test]
    fn default_bands_come_from_catalog() {
        let mut groups = BTreeMap::new();
        groups.insert("Europe".to_string(), vec![satellite()]);
        let catalog = Catalog { groups };

        let selection = filter(&[], &["Boxland"]).with_default_bands(&catalog);
        assert_eq!(selection.bands, vec!["C".to_string(), "Ku".to_string()]);
        assert_eq!(selection.countries, vec!["Boxland".to_string()]);

        let selection = filter(&["Ka"], &[]).with_default_bands(&catalog);
        assert_eq!(selection.bands, vec!["Ka".to_string()]);
    }

    #[test]
    fn unselected_bands_are_ignored() {
        let composer = CoverageComposer::default();
        let coverage = composer
            .filtered_coverage(&satellite(), &filter(&["c"], &[]), &atlas())
            .unwrap();
        assert!(composer
            .engine()
            .contains(&coverage, GroundPoint::new(15.0, 105.0)));
        assert!(!composer
            .engine()
            .contains(&coverage, GroundPoint::new(-40.0, 5.0)));

        assert!(composer
            .filtered_coverage(&satellite(), &filter(&[], &[]), &atlas())
            .is_none());
        assert!(composer
            .filtered_coverage(&satellite(), &filter(&["Ka"], &[]), &atlas())
            .is_none());
    }

    #[test]
    fn country_filter_restricts_coverage() {
        let composer = CoverageComposer::default();
        let coverage = composer
            .filtered_coverage(&satellite(), &filter(&["Ku", "C"], &["boxland"]), &atlas())
            .unwrap();
        let engine = composer.engine();
        assert!(engine.contains(&coverage, GroundPoint::new(-40.0, 5.0)));
        assert!(!engine.contains(&coverage, GroundPoint::new(-40.0, 15.0)));
        assert!(!engine.contains(&coverage, GroundPoint::new(15.0, 105.0)));
    }

    #[test]
    fn country_without_serving_band_yields_nothing() {
        let composer = CoverageComposer::default();
        assert!(composer
            .filtered_coverage(&satellite(), &filter(&["Ku"], &["Elsewhere"]), &atlas())
            .is_none());
    }

    #[test]
    fn unresolved_country_yields_nothing() {
        let mut satellite = satellite();
        satellite
            .bands
            .get_mut("Ku")
            .unwrap()
            .countries
            .insert("Atlantis".to_string());
        let composer = CoverageComposer::default();
        assert!(composer
            .filtered_coverage(&satellite, &filter(&["Ku"], &["Atlantis"]), &atlas())
            .is_none());
    }

    #[test]
    fn full_circle_annulus() {
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("0-360", "30-60").unwrap();
        let area = composer.constrain(&target, 0.0, &whole_earth());

        assert_eq!(area.polygons.len(), 1);
        assert_eq!(area.polygons[0].interiors.len(), 1);

        let engine = composer.engine();
        // 4448 km from the sub-satellite point, between the 60 and 30 degree radii
        assert!(engine.contains(area.geometry(), GroundPoint::new(-40.0, 0.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(5.0, 5.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(60.0, 0.0)));
    }

    #[test]
    fn annulus_across_antimeridian() {
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("0-360", "20-60").unwrap();
        let area = composer.constrain(&target, 150.0, &whole_earth());
        assert!(!area.is_empty());

        let engine = composer.engine();
        // 40 degrees east of the satellite, past the antimeridian
        assert!(engine.contains(area.geometry(), GroundPoint::new(0.0, -170.0)));
        assert!(engine.contains(area.geometry(), GroundPoint::new(0.0, 110.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(0.0, 150.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(0.0, 80.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(-55.0, -40.0)));
    }

    #[test]
    fn default_target_reaches_the_horizon() {
        let composer = CoverageComposer::default();
        let area = composer.constrain(&TargetSpec::default(), 0.0, &whole_earth());
        assert!(!area.is_empty());

        let engine = composer.engine();
        assert!(engine.contains(area.geometry(), GroundPoint::new(40.0, 0.0)));
        assert!(engine.contains(area.geometry(), GroundPoint::new(0.0, 60.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(0.0, 100.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(0.0, 170.0)));
    }

    #[test]
    fn annulus_radius_stops_at_horizon() {
        let horizon = horizon_ground_distance_km();
        assert_eq!(annulus_radius_km(20_014.0, 0.0), horizon);
        assert_eq!(annulus_radius_km(5834.0, 30.0), 5834.0);
    }

    #[test]
    fn collinear_wedge_yields_empty_area() {
        // both bounds resolve on the equator at the antimeridian
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("90-270", "30-60").unwrap();
        let area = composer.constrain(&target, 0.0, &whole_earth());

        let engine = composer.engine();
        assert!(!engine.contains(area.geometry(), GroundPoint::new(30.0, 0.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(-30.0, 0.0)));
        assert!(area
            .polygons
            .iter()
            .flat_map(CoveragePolygon::rings)
            .flatten()
            .all(|p| p.latitude.abs() < 1.0));
    }

    #[test]
    fn northern_wedge_keeps_northern_annulus() {
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("150-210", "40-80").unwrap();
        let area = composer.constrain(&target, 0.0, &whole_earth());
        assert!(!area.is_empty());

        let engine = composer.engine();
        assert!(engine.contains(area.geometry(), GroundPoint::new(20.0, 0.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(-20.0, 0.0)));
        assert!(!engine.contains(area.geometry(), GroundPoint::new(5.0, 0.0)));

        let center = GroundPoint::sub_satellite(0.0);
        for point in area.polygons.iter().flat_map(CoveragePolygon::rings).flatten() {
            assert!(point.latitude >= -1e-9, "{:?} is south of the satellite", point);
            let distance = engine.distance_km(center, *point);
            assert!(
                (944.0 * 0.97..=4820.0 * 1.01).contains(&distance),
                "{:?} is {:.1} km away",
                point,
                distance
            );
        }
    }

    #[test]
    fn country_inside_annulus() {
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("0-360", "30-60").unwrap();
        let area = composer.compose(
            &satellite(),
            &target,
            &filter(&["Ku"], &["Boxland"]),
            &atlas(),
        );
        assert_eq!(area.polygons.len(), 1);
        assert!(composer
            .engine()
            .contains(area.geometry(), GroundPoint::new(-40.0, 5.0)));
    }

    #[test]
    fn composition_is_repeatable() {
        let composer = CoverageComposer::default();
        let target = TargetSpec::parse("0-360", "30-60").unwrap();
        let selection = filter(&["Ku"], &["Boxland"]);
        let first = composer.compose(&satellite(), &target, &selection, &atlas());
        let second = composer.compose(&satellite(), &target, &selection, &atlas());
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_elevation_range_is_empty() {
        let composer = CoverageComposer::default();
        let target = TargetSpec {
            azimuth: AngleRange::new(0.0, 360.0),
            elevation: AngleRange::new(60.0, 30.0),
        };
        assert!(composer.constrain(&target, 0.0, &whole_earth()).is_empty());
    }

    #[test]
    fn engine_failure_yields_empty_area() {
        let composer = CoverageComposer::new(
            Box::new(GridSearch::default()),
            Box::new(BrokenEngine(GeoEngine::default())),
        );
        let target = TargetSpec::parse("0-360", "30-60").unwrap();
        assert!(composer.constrain(&target, 0.0, &whole_earth()).is_empty());
        assert!(composer
            .compose(&satellite(), &target, &filter(&["Ku"], &[]), &atlas())
            .is_empty());
    }

    #[test]
    fn free_function_uses_satellite_longitude() {
        let target = TargetSpec::parse("0-360", "30-60").unwrap();
        let area = compute_coverage_area(&target, &satellite(), &whole_earth());
        assert_eq!(area.polygons.len(), 1);
    }
}
