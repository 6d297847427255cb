use crate::geometry::{GroundPoint, LookAngles};

use super::{AzimuthReference, LookAngleError, Solver};

/// Exhaustive coarse lattice followed by a fine lattice around the coarse
/// minimizer. Fixed cost, deterministic.
#[derive(Debug, Clone)]
pub struct GridSearch {
    pub reference: AzimuthReference,
    pub latitude_bounds: (f64, f64),
    pub longitude_bounds: (f64, f64),
    pub coarse_step: f64,
    /// Half extent of the fine window, in both latitude and longitude
    pub fine_half_width: f64,
    pub fine_step: f64,
}

impl Default for GridSearch {
    fn default() -> Self {
        Self {
            reference: AzimuthReference::Geographic,
            latitude_bounds: (-60.0, 60.0),
            longitude_bounds: (-180.0, 180.0),
            coarse_step: 1.0,
            fine_half_width: 1.0,
            fine_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    latitude: f64,
    longitude: f64,
    error: f64,
}

impl Candidate {
    fn offer(&mut self, objective: &LookAngleError, latitude: f64, longitude: f64) {
        let error = objective.evaluate(latitude, longitude);
        if error < self.error {
            *self = Candidate {
                latitude,
                longitude,
                error,
            };
        }
    }
}

/// Lattice values from `start` by `step`, `count` of them
fn lattice(start: f64, step: f64, count: usize) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| start + i as f64 * step)
}

fn lattice_len(span: f64, step: f64) -> usize {
    (span / step).round() as usize + 1
}

impl Solver for GridSearch {
    fn resolve(&self, target: LookAngles, satellite_longitude: f64) -> GroundPoint {
        let objective = LookAngleError::new(target, satellite_longitude, self.reference);
        let mut best = Candidate {
            latitude: 0.0,
            longitude: 0.0,
            error: f64::INFINITY,
        };

        let (lat_min, lat_max) = self.latitude_bounds;
        let (lon_min, lon_max) = self.longitude_bounds;
        let lat_count = lattice_len(lat_max - lat_min, self.coarse_step);
        let lon_count = lattice_len(lon_max - lon_min, self.coarse_step);

        for lat in lattice(lat_min, self.coarse_step, lat_count) {
            for lon in lattice(lon_min, self.coarse_step, lon_count) {
                best.offer(&objective, lat, lon);
            }
        }

        let coarse = best;
        let fine_count = lattice_len(2.0 * self.fine_half_width, self.fine_step);

        for lat in lattice(
            coarse.latitude - self.fine_half_width,
            self.fine_step,
            fine_count,
        ) {
            for lon in lattice(
                coarse.longitude - self.fine_half_width,
                self.fine_step,
                fine_count,
            ) {
                best.offer(&objective, lat, lon);
            }
        }

        if !best.error.is_finite() {
            log::debug!(
                "no feasible point for az={} el={} (satellite at {})",
                target.azimuth_deg,
                target.elevation_deg,
                satellite_longitude
            );
        }

        GroundPoint::new(best.latitude, best.longitude).normalized()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{azimuth_deg, elevation_deg};
    use rstest::rstest;

    #[test]
    fn lattice_sizes() {
        assert_eq!(lattice_len(120.0, 1.0), 121);
        assert_eq!(lattice_len(360.0, 1.0), 361);
        assert_eq!(lattice_len(2.0, 0.01), 201);
        let values: Vec<f64> = lattice(-1.0, 0.5, 5).collect();
        assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[rstest]
    #[case(74.0, 30.37, 91.62)]
    #[case(-30.0, -25.5, -10.25)]
    #[case(0.0, 50.3, 40.7)]
    #[case(120.0, -12.34, 101.11)]
    fn round_trip(#[case] sat_lon: f64, #[case] lat: f64, #[case] lon: f64) {
        let elevation = elevation_deg(sat_lon, lat, lon);
        let azimuth = azimuth_deg(sat_lon, lat, lon);

        let point = GridSearch::default().resolve(LookAngles::new(azimuth, elevation), sat_lon);

        let resolved_el = elevation_deg(sat_lon, point.latitude, point.longitude);
        let resolved_az = azimuth_deg(sat_lon, point.latitude, point.longitude);
        assert!(
            (resolved_el - elevation).abs() < 0.05,
            "el {} vs {}",
            resolved_el,
            elevation
        );
        assert!(
            (resolved_az - azimuth).abs() < 0.05,
            "az {} vs {}",
            resolved_az,
            azimuth
        );
    }

    #[test]
    fn due_north_station() {
        let point = GridSearch::default().resolve(LookAngles::new(180.0, 45.0), 0.0);
        assert!((point.latitude - 38.86).abs() < 0.02, "{:?}", point);
        assert!(point.longitude.abs() < 0.02, "{:?}", point);
        assert!((elevation_deg(0.0, point.latitude, point.longitude) - 45.0).abs() < 0.05);
        assert!((azimuth_deg(0.0, point.latitude, point.longitude) - 180.0).abs() < 0.05);
    }

    #[test]
    fn deterministic() {
        let solver = GridSearch::default();
        let target = LookAngles::new(140.0, 20.0);
        assert_eq!(solver.resolve(target, 13.0), solver.resolve(target, 13.0));
    }

    #[test]
    fn zero_elevation_drifts_below_horizon() {
        // the corrected elevation never reaches zero, so the best match for a
        // 0° target is near the antipode of the sub-satellite point
        let point = GridSearch::default().resolve(LookAngles::new(0.0, 0.0), 0.0);
        assert!(point.latitude.abs() < 1.0, "{:?}", point);
        assert!(point.longitude.abs() > 179.0, "{:?}", point);
    }
}
