//! Polygon boolean algebra used by the coverage pipeline.

use std::panic::{self, AssertUnwindSafe};

use geo::{
    coord, BooleanOps, Contains, Coord, CoordsIter, Destination, Distance, Haversine, LineString,
    MultiPolygon, Point, Polygon,
};
use thiserror::Error;

use super::CoveragePolygon;
use crate::geometry::GroundPoint;

/// Geometry flowing through the pipeline. Coordinates are (x = lon, y = lat).
pub type Coverage = MultiPolygon<f64>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input for {operation}: {reason}")]
    InvalidInput {
        operation: &'static str,
        reason: String,
    },
    #[error("{operation} failed on degenerate geometry")]
    Failed { operation: &'static str },
}

/// Boolean operations, circle construction and measurements over lon/lat
/// polygons. Empty results are returned as empty multipolygons.
pub trait PolygonEngine {
    fn union(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError>;
    fn intersect(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError>;
    fn difference(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError>;
    /// Geodesic circle around `center`. Circles reaching past ±180° longitude
    /// come back as a continuous ring plus its copy on the other side of the
    /// map. A circle that would enclose a pole is rejected.
    fn circle(&self, center: GroundPoint, radius_km: f64) -> Result<Coverage, EngineError>;
    fn contains(&self, area: &Coverage, point: GroundPoint) -> bool;
    /// Great-circle distance
    fn distance_km(&self, a: GroundPoint, b: GroundPoint) -> f64;
    fn rings(&self, area: &Coverage) -> Vec<CoveragePolygon>;
}

/// [PolygonEngine] backed by the `geo` crate
#[derive(Debug, Clone)]
pub struct GeoEngine {
    /// Vertices of constructed circles
    pub circle_steps: usize,
}

impl Default for GeoEngine {
    fn default() -> Self {
        Self { circle_steps: 64 }
    }
}

fn to_point(point: GroundPoint) -> Point<f64> {
    Point::new(point.longitude, point.latitude)
}

fn ring_points(ring: &LineString<f64>) -> Vec<GroundPoint> {
    ring.coords().map(|c| GroundPoint::new(c.y, c.x)).collect()
}

/// Longitude difference folded into [-180, 180)
fn wrap_longitude(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// Planar polygon for a ring given around `reference_longitude`. Vertex
/// longitudes are unwrapped to stay within 180° of the reference, and the
/// part reaching past ±180° is repeated on the other side of the map.
pub(crate) fn continuous_area(
    reference_longitude: f64,
    ring: impl IntoIterator<Item = GroundPoint>,
) -> Coverage {
    let ring: Vec<Coord<f64>> = ring
        .into_iter()
        .map(|p| coord! {
            x: reference_longitude + wrap_longitude(p.longitude - reference_longitude),
            y: p.latitude,
        })
        .collect();

    let (west, east) = ring
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(w, e), c| {
            (w.min(c.x), e.max(c.x))
        });

    let mut polygons = vec![shifted(&ring, 0.0)];
    if east > 180.0 {
        polygons.push(shifted(&ring, -360.0));
    }
    if west < -180.0 {
        polygons.push(shifted(&ring, 360.0));
    }
    MultiPolygon::new(polygons)
}

fn shifted(ring: &[Coord<f64>], offset: f64) -> Polygon<f64> {
    let ring = ring
        .iter()
        .map(|c| coord! { x: c.x + offset, y: c.y })
        .collect::<Vec<_>>();
    Polygon::new(LineString::new(ring), vec![])
}

fn check_finite(operation: &'static str, area: &Coverage) -> Result<(), EngineError> {
    if area.coords_iter().all(|c| c.x.is_finite() && c.y.is_finite()) {
        Ok(())
    } else {
        Err(EngineError::InvalidInput {
            operation,
            reason: "non-finite coordinate".into(),
        })
    }
}

fn boolean_op<F>(
    operation: &'static str,
    a: &Coverage,
    b: &Coverage,
    op: F,
) -> Result<Coverage, EngineError>
where
    F: FnOnce(&Coverage, &Coverage) -> Coverage,
{
    check_finite(operation, a)?;
    check_finite(operation, b)?;
    panic::catch_unwind(AssertUnwindSafe(|| op(a, b)))
        .map_err(|_| EngineError::Failed { operation })
}

impl PolygonEngine for GeoEngine {
    fn union(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError> {
        boolean_op("union", a, b, |a, b| a.union(b))
    }

    fn intersect(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError> {
        boolean_op("intersection", a, b, |a, b| a.intersection(b))
    }

    fn difference(&self, a: &Coverage, b: &Coverage) -> Result<Coverage, EngineError> {
        boolean_op("difference", a, b, |a, b| a.difference(b))
    }

    fn circle(&self, center: GroundPoint, radius_km: f64) -> Result<Coverage, EngineError> {
        if !center.is_finite() || !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(EngineError::InvalidInput {
                operation: "circle",
                reason: format!("center {:?}, radius {} km", center, radius_km),
            });
        }
        if self.circle_steps < 3 {
            return Err(EngineError::InvalidInput {
                operation: "circle",
                reason: format!("{} steps", self.circle_steps),
            });
        }

        let pole = GroundPoint::new(90.0_f64.copysign(center.latitude), center.longitude);
        if radius_km >= self.distance_km(center, pole) {
            return Err(EngineError::InvalidInput {
                operation: "circle",
                reason: format!(
                    "radius {:.1} km around {:?} would enclose a pole",
                    radius_km, center
                ),
            });
        }

        let origin = to_point(center);
        let radius_m = radius_km * 1000.0;
        let steps = self.circle_steps as f64;
        let ring = (0..self.circle_steps).map(|i| {
            let vertex = Haversine::destination(origin, -(i as f64) * 360.0 / steps, radius_m);
            GroundPoint::new(vertex.y(), vertex.x())
        });

        Ok(continuous_area(center.longitude, ring))
    }

    fn contains(&self, area: &Coverage, point: GroundPoint) -> bool {
        area.contains(&to_point(point))
    }

    fn distance_km(&self, a: GroundPoint, b: GroundPoint) -> f64 {
        Haversine::distance(to_point(a), to_point(b)) / 1000.0
    }

    fn rings(&self, area: &Coverage) -> Vec<CoveragePolygon> {
        area.iter()
            .map(|polygon| CoveragePolygon {
                exterior: ring_points(polygon.exterior()),
                interiors: polygon.interiors().iter().map(ring_points).collect(),
            })
            .collect()
    }
}
