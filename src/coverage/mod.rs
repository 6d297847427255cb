mod area;
mod composer;
mod engine;
mod range;
mod sweep;
mod visibility;

pub use area::{CoverageArea, CoveragePolygon};
pub use composer::{compute_coverage_area, CoverageComposer, CoverageFilter};
pub use engine::{Coverage, EngineError, GeoEngine, PolygonEngine};
pub use range::{AngleRange, RangeError, TargetSpec};
pub use sweep::{sweep, SatelliteCoverage, SweepRequest};
pub use visibility::{compute_visibility_radius, visibility_radius_km};
