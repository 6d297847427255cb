pub mod catalog;
pub mod coverage;
pub mod geometry;
pub mod solver;
pub mod web;

pub use coverage::{compute_coverage_area, compute_visibility_radius, CoverageComposer};
pub use solver::resolve_location;
