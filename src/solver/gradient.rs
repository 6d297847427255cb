use crate::geometry::{GroundPoint, LookAngles};

use super::{AzimuthReference, LookAngleError, Solver};

const ARMIJO_SLOPE: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 60;
const CONVERGED_ERROR: f64 = 1e-12;

/// Steepest descent on the error functional with central-difference
/// gradients and backtracking line search.
///
/// Cheaper than [super::GridSearch] but only finds the minimum of the basin
/// holding the initial guess.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    pub reference: AzimuthReference,
    /// Defaults to 10° off the equator below the satellite, on the
    /// hemisphere that faces the target azimuth
    pub initial_guess: Option<GroundPoint>,
    pub max_iterations: usize,
    pub derivative_step: f64,
    /// Longest move per iteration, degrees
    pub max_move: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            reference: AzimuthReference::Geographic,
            initial_guess: None,
            max_iterations: 1000,
            derivative_step: 1e-4,
            max_move: 5.0,
        }
    }
}

impl GradientDescent {
    fn initial_point(&self, target: LookAngles, satellite_longitude: f64) -> GroundPoint {
        self.initial_guess.unwrap_or_else(|| {
            // bearings between east and west through south are seen from the north
            let latitude = if target.azimuth_deg > 90.0 && target.azimuth_deg < 270.0 {
                10.0
            } else {
                -10.0
            };
            GroundPoint::new(latitude, satellite_longitude)
        })
    }

    fn gradient(&self, objective: &LookAngleError, point: GroundPoint) -> Option<(f64, f64)> {
        let h = self.derivative_step;
        let (lat, lon) = (point.latitude, point.longitude);
        let d_lat = (objective.evaluate(lat + h, lon) - objective.evaluate(lat - h, lon)) / (2.0 * h);
        let d_lon = (objective.evaluate(lat, lon + h) - objective.evaluate(lat, lon - h)) / (2.0 * h);
        if d_lat.is_finite() && d_lon.is_finite() {
            Some((d_lat, d_lon))
        } else {
            None
        }
    }
}

impl Solver for GradientDescent {
    fn resolve(&self, target: LookAngles, satellite_longitude: f64) -> GroundPoint {
        let objective = LookAngleError::new(target, satellite_longitude, self.reference);
        let mut point = self.initial_point(target, satellite_longitude);
        let mut error = objective.evaluate(point.latitude, point.longitude);
        let mut step: f64 = 1.0;

        for iteration in 0..self.max_iterations {
            if !error.is_finite() || error < CONVERGED_ERROR {
                break;
            }
            let Some((d_lat, d_lon)) = self.gradient(&objective, point) else {
                log::debug!("gradient undefined at {:?} (iteration {})", point, iteration);
                break;
            };
            let norm_sq = d_lat * d_lat + d_lon * d_lon;
            if norm_sq == 0.0 {
                break;
            }

            step = (step * 2.0).min(self.max_move / norm_sq.sqrt());
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let candidate = GroundPoint::new(
                    (point.latitude - step * d_lat).clamp(-90.0, 90.0),
                    point.longitude - step * d_lon,
                );
                let candidate_error = objective.evaluate(candidate.latitude, candidate.longitude);
                if candidate_error <= error - ARMIJO_SLOPE * step * norm_sq {
                    accepted = Some((candidate, candidate_error));
                    break;
                }
                step /= 2.0;
            }

            match accepted {
                Some((candidate, candidate_error)) => {
                    point = candidate;
                    error = candidate_error;
                }
                None => break,
            }
        }

        point.normalized()
    }
}
