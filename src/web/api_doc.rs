use utoipa::OpenApi;

use super::api::coverage::{CoverageRequest, CoverageResponse, SatelliteSummary};
use super::api::error::ErrorResponse;
use super::api::locate::{LocateQuery, LocateResponse, RadiusQuery, RadiusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::locate::locate,
        super::api::locate::radius,
        super::api::coverage::compute_coverage,
        super::api::coverage::list_satellites,
    ),
    components(
        schemas(
            LocateQuery,
            LocateResponse,
            RadiusQuery,
            RadiusResponse,
            CoverageRequest,
            CoverageResponse,
            SatelliteSummary,
            ErrorResponse,
            crate::solver::LocationFix,
            crate::geometry::GroundPoint,
            crate::coverage::SatelliteCoverage,
            crate::coverage::CoveragePolygon,
        )
    ),
    info(
        title = "Sat-Footprint API",
        description = "Geostationary look angles and serviceable-area polygons",
        version = "0.1.0"
    ),
    tags(
        (name = "geometry", description = "Look-angle inversion and visibility radius"),
        (name = "coverage", description = "Satellite coverage areas")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/locate", "/api/radius", "/api/coverage", "/api/satellites"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
