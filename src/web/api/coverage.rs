use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::coverage::{sweep, CoverageFilter, SatelliteCoverage, SweepRequest, TargetSpec};
use crate::geometry::GroundPoint;
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::api::run_blocking;
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CoverageRequest {
    /// Restrict to one satellite; all eligible satellites otherwise
    #[serde(default)]
    pub satellite: Option<String>,
    /// Azimuth range, `"min-max"` or a single value (default 0-360)
    #[serde(default)]
    pub azimuth: Option<String>,
    /// Elevation range, `"min-max"` or a single value (default 0-90)
    #[serde(default)]
    pub elevation: Option<String>,
    /// Bands to include; every catalog band when empty
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    /// Ground station as `"lat, lon"`
    #[serde(default)]
    pub station: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoverageResponse {
    pub satellites: Vec<SatelliteCoverage>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteSummary {
    pub group: String,
    pub name: String,
    pub longitude: f64,
    pub bands: Vec<String>,
}

impl CoverageRequest {
    fn into_sweep(self, state: &AppState) -> ApiResult<SweepRequest> {
        if let Some(name) = &self.satellite {
            state.catalog.find(name)?;
        }

        let target = TargetSpec::parse(
            self.azimuth.as_deref().unwrap_or_default(),
            self.elevation.as_deref().unwrap_or_default(),
        )?;

        let station = match self.station.as_deref() {
            Some(text) => Some(GroundPoint::from_coordinates(text).ok_or_else(|| {
                ApiError::Validation(format!("invalid station coordinates '{}'", text))
            })?),
            None => None,
        };

        let filter = CoverageFilter {
            bands: self.bands,
            countries: self.countries,
        }
        .with_default_bands(&state.catalog);

        Ok(SweepRequest {
            satellite: self.satellite,
            target,
            filter,
            station,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/coverage",
    tag = "coverage",
    request_body = CoverageRequest,
    responses(
        (status = 200, description = "Serviceable area per eligible satellite", body = CoverageResponse),
        (status = 400, description = "Invalid ranges or station", body = crate::web::api::error::ErrorResponse),
        (status = 404, description = "Unknown satellite", body = crate::web::api::error::ErrorResponse),
        (status = 503, description = "Computation timed out")
    )
)]
pub async fn compute_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageRequest>,
) -> ApiResult<Json<CoverageResponse>> {
    let request = request.into_sweep(&state)?;

    let timeout = state.config.web.request_timeout;
    let satellites = run_blocking(timeout, move || {
        sweep(&state.composer, &state.catalog, &state.atlas, &request)
    })
    .await?;

    Ok(Json(CoverageResponse {
        satellites,
        computed_at: Utc::now(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "coverage",
    responses(
        (status = 200, description = "Satellites in the catalog", body = Vec<SatelliteSummary>)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<SatelliteSummary>> {
    let satellites = state
        .catalog
        .groups
        .iter()
        .flat_map(|(group, satellites)| {
            satellites.iter().map(move |s| SatelliteSummary {
                group: group.clone(),
                name: s.name.clone(),
                longitude: s.orbital_longitude,
                bands: s.bands.keys().cloned().collect(),
            })
        })
        .collect();
    Json(satellites)
}
