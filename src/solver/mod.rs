//! Inverse look-angle problem: which ground point sees the satellite at a
//! given azimuth/elevation.

mod fix;
mod gradient;
mod grid;
mod objective;

use serde::Deserialize;

use crate::geometry::{GroundPoint, LookAngles};

pub use fix::LocationFix;
pub use gradient::GradientDescent;
pub use grid::GridSearch;
pub use objective::{AzimuthReference, LookAngleError};

/// Minimization strategy over the look-angle error functional.
pub trait Solver {
    /// Ground point whose look angles best match `target`.
    ///
    /// Always returns a point; an unreachable target yields the least-bad
    /// candidate, so callers check [LocationFix::is_visible] before trusting it.
    fn resolve(&self, target: LookAngles, satellite_longitude: f64) -> GroundPoint;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SolverKind {
    /// Coarse-to-fine lattice search
    #[default]
    Grid,
    /// Finite-difference gradient descent
    Gradient,
}

impl SolverKind {
    pub fn build(self, reference: AzimuthReference) -> Box<dyn Solver + Send + Sync> {
        match self {
            SolverKind::Grid => Box::new(GridSearch {
                reference,
                ..GridSearch::default()
            }),
            SolverKind::Gradient => Box::new(GradientDescent {
                reference,
                ..GradientDescent::default()
            }),
        }
    }
}

/// Resolves with the default [GridSearch]
pub fn resolve_location(
    target_azimuth: f64,
    target_elevation: f64,
    satellite_longitude: f64,
) -> GroundPoint {
    GridSearch::default().resolve(
        LookAngles::new(target_azimuth, target_elevation),
        satellite_longitude,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn solver_kind_names() {
        assert_eq!(SolverKind::Grid.to_string(), "grid");
        assert_eq!(SolverKind::Gradient.to_string(), "gradient");
        assert_eq!(SolverKind::default(), SolverKind::Grid);
    }

    #[test]
    fn strategies_agree_on_well_conditioned_target() {
        let target = LookAngles::new(209.834, 50.87);
        let grid = SolverKind::Grid
            .build(AzimuthReference::Geographic)
            .resolve(target, 74.0);
        let gradient = SolverKind::Gradient
            .build(AzimuthReference::Geographic)
            .resolve(target, 74.0);
        assert!((grid.latitude - gradient.latitude).abs() < 0.05);
        assert!((grid.longitude - gradient.longitude).abs() < 0.05);
    }
}
