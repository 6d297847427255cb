use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geometry::{slant_ground_distance_km, LookAngles};
use crate::solver::LocationFix;
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::api::run_blocking;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocateQuery {
    pub azimuth: f64,
    pub elevation: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocateResponse {
    pub fix: LocationFix,
    /// Corrected elevation is above the horizon
    pub visible: bool,
    /// Uncorrected elevation is above the horizon
    pub line_of_sight: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RadiusQuery {
    pub longitude: f64,
    pub elevation: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RadiusResponse {
    pub longitude: f64,
    pub elevation: f64,
    /// Distance from the sub-satellite point to the solver's boundary point
    pub radius_km: f64,
    /// Closed-form estimate; absent at zero elevation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slant_ground_distance_km: Option<f64>,
}

fn check(name: &str, value: f64, min: f64, max: f64) -> ApiResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        )))
    }
}

#[utoipa::path(
    get,
    path = "/api/locate",
    tag = "geometry",
    params(
        ("azimuth" = f64, Query, description = "Target azimuth (degrees)"),
        ("elevation" = f64, Query, description = "Target elevation (degrees)"),
        ("longitude" = f64, Query, description = "Satellite orbital longitude (degrees east)")
    ),
    responses(
        (status = 200, description = "Best matching ground point", body = LocateResponse),
        (status = 400, description = "Invalid parameters", body = crate::web::api::error::ErrorResponse),
        (status = 503, description = "Computation timed out")
    )
)]
pub async fn locate(
    State(state): State<AppState>,
    Query(query): Query<LocateQuery>,
) -> ApiResult<Json<LocateResponse>> {
    check("azimuth", query.azimuth, 0.0, 360.0)?;
    check("elevation", query.elevation, 0.0, 90.0)?;
    check("longitude", query.longitude, -180.0, 180.0)?;

    let composer = state.composer.clone();
    let fix = run_blocking(state.config.web.request_timeout, move || {
        let point = composer.solver().resolve(
            LookAngles::new(query.azimuth, query.elevation),
            query.longitude,
        );
        LocationFix::evaluate(point, query.longitude)
    })
    .await?;

    Ok(Json(LocateResponse {
        visible: fix.is_visible(),
        line_of_sight: fix.has_line_of_sight(),
        fix,
    }))
}

#[utoipa::path(
    get,
    path = "/api/radius",
    tag = "geometry",
    params(
        ("longitude" = f64, Query, description = "Satellite orbital longitude (degrees east)"),
        ("elevation" = f64, Query, description = "Elevation at the circle boundary (degrees)")
    ),
    responses(
        (status = 200, description = "Visibility radius", body = RadiusResponse),
        (status = 400, description = "Invalid parameters", body = crate::web::api::error::ErrorResponse),
        (status = 503, description = "Computation timed out")
    )
)]
pub async fn radius(
    State(state): State<AppState>,
    Query(query): Query<RadiusQuery>,
) -> ApiResult<Json<RadiusResponse>> {
    check("elevation", query.elevation, 0.0, 90.0)?;
    check("longitude", query.longitude, -180.0, 180.0)?;

    let composer = state.composer.clone();
    let radius_km = run_blocking(state.config.web.request_timeout, move || {
        composer.visibility_radius_km(query.longitude, query.elevation)
    })
    .await?;

    Ok(Json(RadiusResponse {
        longitude: query.longitude,
        elevation: query.elevation,
        radius_km,
        slant_ground_distance_km: slant_ground_distance_km(query.elevation).ok(),
    }))
}
