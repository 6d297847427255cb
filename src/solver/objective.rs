use serde::Deserialize;

use crate::geometry::{azimuth_deg, elevation_deg, magnetic_azimuth_deg, LookAngles};

/// North reference used when matching the target azimuth
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AzimuthReference {
    /// True north
    #[default]
    Geographic,
    /// Magnetic north, from the declination table
    Magnetic,
}

/// Squared look-angle mismatch at a candidate ground point.
#[derive(Debug, Clone, Copy)]
pub struct LookAngleError {
    pub target: LookAngles,
    pub satellite_longitude: f64,
    pub reference: AzimuthReference,
}

impl LookAngleError {
    pub fn new(target: LookAngles, satellite_longitude: f64, reference: AzimuthReference) -> Self {
        Self {
            target,
            satellite_longitude,
            reference,
        }
    }

    /// `(Δelevation)² + (Δazimuth)²`, or infinity where the satellite is not
    /// visible (elevation ≤ 0) or the azimuth is undefined.
    pub fn evaluate(&self, latitude: f64, longitude: f64) -> f64 {
        let elevation = elevation_deg(self.satellite_longitude, latitude, longitude);
        if elevation <= 0.0 {
            return f64::INFINITY;
        }

        let azimuth = match self.reference {
            AzimuthReference::Geographic => {
                azimuth_deg(self.satellite_longitude, latitude, longitude)
            }
            AzimuthReference::Magnetic => {
                match magnetic_azimuth_deg(self.satellite_longitude, latitude, longitude) {
                    Some(azimuth) => azimuth,
                    None => return f64::INFINITY,
                }
            }
        };

        (elevation - self.target.elevation_deg).powi(2)
            + (azimuth - self.target.azimuth_deg).powi(2)
    }
}
