mod error;
mod kernel;
mod magnetic;
mod types;

pub use error::GeometryError;
pub use kernel::{
    azimuth_deg, elevation_deg, horizon_ground_distance_km, raw_elevation_deg,
    slant_ground_distance_km, EARTH_RADIUS_KM, GEO_ALTITUDE_KM, GEO_RADIUS_RATIO,
    MEAN_EARTH_RADIUS_KM,
};
pub use magnetic::{declination_deg, magnetic_azimuth_deg};
pub use types::{GroundPoint, LookAngles};
