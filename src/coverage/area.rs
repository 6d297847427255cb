use geo::MultiPolygon;
use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::GroundPoint;

/// One polygon of a coverage result, as closed rings of (lat, lon) points
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CoveragePolygon {
    pub exterior: Vec<GroundPoint>,
    pub interiors: Vec<Vec<GroundPoint>>,
}

impl CoveragePolygon {
    /// Exterior ring first, then holes
    pub fn rings(&self) -> impl Iterator<Item = &[GroundPoint]> {
        std::iter::once(self.exterior.as_slice()).chain(self.interiors.iter().map(Vec::as_slice))
    }
}

/// Serviceable area of one satellite
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageArea {
    pub polygons: Vec<CoveragePolygon>,
    geometry: MultiPolygon<f64>,
}

impl CoverageArea {
    pub fn new(polygons: Vec<CoveragePolygon>, geometry: MultiPolygon<f64>) -> Self {
        Self { polygons, geometry }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), MultiPolygon::new(Vec::new()))
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}
