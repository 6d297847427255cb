//! Look-angle geometry between a ground point and a geostationary satellite,
//! spherical Earth.

use std::f64::consts::FRAC_PI_2;

use super::GeometryError;

/// Geostationary altitude above the surface
pub const GEO_ALTITUDE_KM: f64 = 35786.0;
/// Earth radius used by the look-angle formulas
pub const EARTH_RADIUS_KM: f64 = 6378.16;
/// Earth radius used by the ground-distance formula
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;
/// Orbit radius in Earth radii
pub const GEO_RADIUS_RATIO: f64 = 1.0 + GEO_ALTITUDE_KM / EARTH_RADIUS_KM;

/// Below this raw elevation the refraction correction kicks in
const REFRACTION_THRESHOLD_DEG: f64 = 30.0;
const REFRACTION_COEFFICIENT: f64 = 4.132;

/// Geometric elevation, without the low-elevation correction.
/// Negative when the satellite is below the horizon, 90° at the sub-satellite point.
pub fn raw_elevation_deg(satellite_longitude: f64, latitude: f64, longitude: f64) -> f64 {
    let dlon = (longitude - satellite_longitude).to_radians();
    let lat = latitude.to_radians();
    let cos_product = lat.cos() * dlon.cos();

    let term1 = GEO_RADIUS_RATIO * cos_product - 1.0;
    let term2 = GEO_RADIUS_RATIO * (1.0 - cos_product * cos_product).sqrt();
    (term1 / term2).atan().to_degrees()
}

/// Elevation angle of the satellite seen from (`latitude`, `longitude`).
///
/// Raw elevations under 30° go through the empirical correction
/// `(e + sqrt(e² + 4.132)) / 2`. The correction also applies to negative
/// raw values, so the returned elevation is strictly positive below 30°
/// even when there is no line of sight; use [raw_elevation_deg] to test
/// geometric visibility.
pub fn elevation_deg(satellite_longitude: f64, latitude: f64, longitude: f64) -> f64 {
    let raw = raw_elevation_deg(satellite_longitude, latitude, longitude);
    if raw < REFRACTION_THRESHOLD_DEG {
        (raw + (raw * raw + REFRACTION_COEFFICIENT).sqrt()) / 2.0
    } else {
        raw
    }
}

/// True azimuth of the satellite seen from (`latitude`, `longitude`), in [0, 360).
///
/// On the equator the tangent ratio diverges and the bearing saturates to
/// due east/west. The sub-satellite point itself has no defined azimuth (NaN).
pub fn azimuth_deg(satellite_longitude: f64, latitude: f64, longitude: f64) -> f64 {
    let dlon = (longitude - satellite_longitude).to_radians();
    let lat = latitude.to_radians();

    let mut azimuth = 180.0 + (dlon.tan() / lat.sin()).atan().to_degrees();
    if latitude < 0.0 {
        azimuth -= 180.0;
    }
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    azimuth
}

/// Ground distance from the sub-satellite point to where the satellite is
/// seen at `elevation_deg`. Requires an elevation in (0, 90].
pub fn slant_ground_distance_km(elevation_deg: f64) -> Result<f64, GeometryError> {
    if !(elevation_deg > 0.0 && elevation_deg <= 90.0) {
        return Err(GeometryError::InvalidArgument(format!(
            "elevation must lie in (0, 90] degrees, got {}",
            elevation_deg
        )));
    }

    let elevation = elevation_deg.to_radians();
    let ratio = 1.0 + GEO_ALTITUDE_KM / MEAN_EARTH_RADIUS_KM;
    let central_angle = FRAC_PI_2 - elevation - (elevation.cos() / ratio).asin();
    Ok(MEAN_EARTH_RADIUS_KM * central_angle)
}

/// Ground distance from the sub-satellite point to the geometric horizon,
/// where the satellite sits at zero raw elevation.
pub fn horizon_ground_distance_km() -> f64 {
    let ratio = 1.0 + GEO_ALTITUDE_KM / MEAN_EARTH_RADIUS_KM;
    MEAN_EARTH_RADIUS_KM * ratio.recip().acos()
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn zenith_at_sub_satellite_point() {
        for sat_lon in [-120.0, -30.0, 0.0, 74.0, 160.0] {
            let el = elevation_deg(sat_lon, 0.0, sat_lon);
            assert!((el - 90.0).abs() < 1e-9, "sat_lon={} el={}", sat_lon, el);
        }
    }

    #[test]
    fn elevation_peaks_below_satellite() {
        let sat_lon = 19.2;
        let peak = elevation_deg(sat_lon, 0.0, sat_lon);
        for lat in [-50.0, -10.0, -0.5, 0.5, 10.0, 50.0] {
            for dlon in [-40.0, -5.0, 0.0, 5.0, 40.0] {
                let el = elevation_deg(sat_lon, lat, sat_lon + dlon);
                assert!(el < peak, "lat={} dlon={} el={}", lat, dlon, el);
            }
        }
        assert!(elevation_deg(sat_lon, 0.0, sat_lon + 1.0) < peak);
    }

    #[test]
    fn elevation_above_correction_threshold() {
        // due north of the sub-satellite point, 45° elevation at ~38.86°N
        let el = elevation_deg(0.0, 38.86, 0.0);
        assert!((el - 45.0).abs() < 0.05, "el={}", el);
        assert_eq!(el, raw_elevation_deg(0.0, 38.86, 0.0));
    }

    #[test]
    fn low_elevation_correction() {
        let raw = raw_elevation_deg(0.0, 50.3, 40.7);
        assert!(raw > 0.0 && raw < 30.0);
        let expected = (raw + (raw * raw + 4.132).sqrt()) / 2.0;
        assert_eq!(elevation_deg(0.0, 50.3, 40.7), expected);
        assert!(expected > raw);
    }

    #[test]
    fn corrected_elevation_stays_positive_below_horizon() {
        // antipode of the sub-satellite point: no line of sight at all
        let raw = raw_elevation_deg(10.0, -1.0, -170.0);
        assert!(raw < -85.0, "raw={}", raw);
        let corrected = elevation_deg(10.0, -1.0, -170.0);
        assert!(corrected > 0.0 && corrected < 0.05, "corrected={}", corrected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-75.0)]
    #[case(74.0)]
    #[case(179.0)]
    fn azimuth_range(#[case] sat_lon: f64) {
        let mut lat = -80.0;
        while lat <= 80.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                if elevation_deg(sat_lon, lat, lon) > 0.0 && (lat != 0.0 || lon != sat_lon) {
                    let az = azimuth_deg(sat_lon, lat, lon);
                    assert!(
                        (0.0..360.0).contains(&az),
                        "sat_lon={} lat={} lon={} az={}",
                        sat_lon,
                        lat,
                        lon,
                        az
                    );
                }
                lon += 7.5;
            }
            lat += 2.5;
        }
    }

    #[rstest]
    #[case(0.0, 38.86, 0.0, 180.0)]
    #[case(0.0, -38.86, 0.0, 0.0)]
    #[case(74.0, 30.0, 90.0, 209.83)]
    #[case(-30.0, -25.5, -10.25, 320.17)]
    fn azimuth_values(
        #[case] sat_lon: f64,
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] expected: f64,
    ) {
        let az = azimuth_deg(sat_lon, lat, lon);
        assert!((az - expected).abs() < 0.01, "az={}", az);
    }

    #[test]
    fn equatorial_azimuth_saturates() {
        assert!((azimuth_deg(0.0, 0.0, 20.0) - 270.0).abs() < 1e-9);
        assert!((azimuth_deg(0.0, 0.0, -20.0) - 90.0).abs() < 1e-9);
        assert!(azimuth_deg(0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn slant_ground_distance() {
        assert!(slant_ground_distance_km(90.0).unwrap().abs() < 1e-9);

        let at_30 = slant_ground_distance_km(30.0).unwrap();
        assert!((at_30 - 5835.0).abs() < 5.0, "at_30={}", at_30);

        let at_5 = slant_ground_distance_km(5.0).unwrap();
        assert!(at_5 > at_30);
    }

    #[test]
    fn horizon_is_the_zero_elevation_limit() {
        let horizon = horizon_ground_distance_km();
        assert!((horizon - 9041.0).abs() < 1.0, "horizon={}", horizon);
        let near_horizon = slant_ground_distance_km(1e-9).unwrap();
        assert!((near_horizon - horizon).abs() < 1e-3);
        assert!(horizon > slant_ground_distance_km(5.0).unwrap());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(90.5)]
    #[case(f64::NAN)]
    fn slant_ground_distance_preconditions(#[case] elevation: f64) {
        assert!(matches!(
            slant_ground_distance_km(elevation),
            Err(GeometryError::InvalidArgument(_))
        ));
    }
}
