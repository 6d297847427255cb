//! Coarse magnetic declination model, for pointing with a compass.

use super::azimuth_deg;

const CELL_DEG: f64 = 30.0;
const ROWS: usize = 5;

/// Declination at the nodes of a 30° grid. Column-major: one column per
/// longitude from -180° to 180°, rows from 60°N down to 60°S.
const DECLINATION_TABLE: [f64; 65] = [
    2.73, 6.52, 9.69, 16.79, 47.45, 15.96, 11.36, 9.27, 17.5, 43.22, 18.28, 11.48, 8.62, 16.64,
    39.01, -7.5, -0.93, 3.24, 13.32, 28.59, -25.01, -15.4, -15.83, -10.12, 10.0, -15.8, -9.98,
    -17.7, -24.74, -5.7, -1.43, 0.12, -5.06, -22.39, -20.11, 10.72, 4.35, 1.67, -25.4, -41.87,
    17.47, 2.62, -3.6, -31.48, -62.34, 7.54, -0.32, -1.87, -16.13, -74.45, -13.19, -5.43, 0.25,
    0.47, -60.84, -11.28, -3.22, 5.04, 10.85, 42.14, 2.73, 6.52, 9.69, 16.79, 47.45,
];

/// Magnetic declination (degrees, east positive), bilinearly interpolated.
/// `None` outside the 60°S..60°N band covered by the table.
pub fn declination_deg(latitude: f64, longitude: f64) -> Option<f64> {
    if !latitude.is_finite() || !longitude.is_finite() || !(-60.0..=60.0).contains(&latitude) {
        return None;
    }

    let lat = latitude.min(60.0 - 1e-5);
    let mut lon = longitude;
    if lon > 180.0 {
        lon -= 360.0;
    }
    if lon < -180.0 {
        lon += 360.0;
    }
    let lon = lon.clamp(-180.0, 180.0 - 1e-5);

    let column = ((lon + 180.0) / CELL_DEG).floor() as usize;
    let row = 3 - ((lat + 60.0) / CELL_DEG).floor() as usize;
    let index = column * ROWS + row;

    // offsets from the southern/western edge of the cell
    let lat_offset = (lat + 60.0).rem_euclid(CELL_DEG);
    let lon_offset = lon + 180.0 - column as f64 * CELL_DEG;

    let table = &DECLINATION_TABLE;
    let west = table[index + 1] + (table[index] - table[index + 1]) * lat_offset / CELL_DEG;
    let east = table[index + ROWS + 1]
        + (table[index + ROWS] - table[index + ROWS + 1]) * lat_offset / CELL_DEG;

    Some(west + (east - west) * lon_offset / CELL_DEG)
}

/// Azimuth of the satellite relative to magnetic north.
/// `None` on the equator or outside the declination table.
pub fn magnetic_azimuth_deg(
    satellite_longitude: f64,
    latitude: f64,
    longitude: f64,
) -> Option<f64> {
    if latitude == 0.0 {
        return None;
    }
    let declination = declination_deg(latitude, longitude)?;
    let mut azimuth = azimuth_deg(satellite_longitude, latitude, longitude) - declination;
    if azimuth < -180.0 {
        azimuth += 360.0;
    }
    if azimuth > 360.0 {
        azimuth -= 360.0;
    }
    Some(azimuth)
}
