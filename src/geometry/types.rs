use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A location on the spherical Earth, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct GroundPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GroundPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Point directly beneath a geostationary satellite
    pub fn sub_satellite(satellite_longitude: f64) -> Self {
        Self::new(0.0, satellite_longitude)
    }

    /// Parses `"lat, lon"` text
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self::new(lat, lon))
    }

    /// Same point with longitude wrapped into [-180, 180]
    pub fn normalized(self) -> Self {
        let mut longitude = self.longitude;
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        if longitude < -180.0 {
            longitude += 360.0;
        }
        Self::new(self.latitude, longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Direction towards the satellite as seen from a ground point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LookAngles {
    /// Compass bearing, clockwise from north
    pub azimuth_deg: f64,
    /// Angle above the local horizon
    pub elevation_deg: f64,
}

impl LookAngles {
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            azimuth_deg,
            elevation_deg,
        }
    }
}
