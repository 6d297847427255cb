use crate::geometry::{GroundPoint, LookAngles};
use crate::solver::{GridSearch, Solver};

use super::{GeoEngine, PolygonEngine};

/// Ground distance from the sub-satellite point at which the satellite is
/// seen at `elevation_deg`, measured along the bearing of the 0° azimuth fix.
pub fn visibility_radius_km(
    solver: &dyn Solver,
    engine: &dyn PolygonEngine,
    satellite_longitude: f64,
    elevation_deg: f64,
) -> f64 {
    let fix = solver.resolve(LookAngles::new(0.0, elevation_deg), satellite_longitude);
    engine.distance_km(GroundPoint::sub_satellite(satellite_longitude), fix)
}

/// [visibility_radius_km] with the default solver and engine
pub fn compute_visibility_radius(satellite_longitude: f64, elevation_deg: f64) -> f64 {
    visibility_radius_km(
        &GridSearch::default(),
        &GeoEngine::default(),
        satellite_longitude,
        elevation_deg,
    )
}
