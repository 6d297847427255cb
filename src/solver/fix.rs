use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::{azimuth_deg, elevation_deg, raw_elevation_deg, GroundPoint};

/// A resolved ground point together with the look angles it actually yields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LocationFix {
    pub point: GroundPoint,
    pub satellite_longitude: f64,
    /// Corrected elevation, as matched by the solver
    pub elevation_deg: f64,
    /// Geometric elevation, negative below the horizon
    pub raw_elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl LocationFix {
    pub fn evaluate(point: GroundPoint, satellite_longitude: f64) -> Self {
        Self {
            point,
            satellite_longitude,
            elevation_deg: elevation_deg(satellite_longitude, point.latitude, point.longitude),
            raw_elevation_deg: raw_elevation_deg(
                satellite_longitude,
                point.latitude,
                point.longitude,
            ),
            azimuth_deg: azimuth_deg(satellite_longitude, point.latitude, point.longitude),
        }
    }

    /// Visibility as judged by the solver's feasibility rule (corrected elevation)
    pub fn is_visible(&self) -> bool {
        self.elevation_deg > 0.0
    }

    /// Geometric line of sight
    pub fn has_line_of_sight(&self) -> bool {
        self.raw_elevation_deg > 0.0
    }
}
