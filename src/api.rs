//! JSON API consumed by the frontend.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use serde_json::json;

use crate::catalog::{self, City};
use crate::dashboard::{
    CurrentRequest, Dashboard, DashboardView, HistoricalRequest, SubmissionBounds,
    submission_bounds,
};
use crate::error::DashboardError;
use crate::units::UnitSystem;

/// Shared application state behind the router
pub struct AppState {
    pub dashboard: Dashboard,
}

#[derive(Serialize)]
pub struct ApiCity {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&City> for ApiCity {
    fn from(city: &City) -> Self {
        Self {
            name: city.name,
            latitude: city.latitude,
            longitude: city.longitude,
        }
    }
}

#[derive(Serialize)]
pub struct ApiUnitSystem {
    pub code: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct ApiUnits {
    pub systems: Vec<ApiUnitSystem>,
    /// Fixed-unit notice shown beside the selector
    pub notice: &'static str,
}

/// An error payload the frontend renders inline
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let status = match &err {
            DashboardError::Validation { .. } | DashboardError::UnknownCity { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DashboardError::Api { .. } | DashboardError::MalformedResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cities", get(get_cities))
        .route("/units", get(get_units))
        .route("/meta", get(get_meta))
        .route("/current", post(post_current))
        .route("/historical", post(post_historical))
        .with_state(state)
}

async fn get_cities() -> Json<Vec<ApiCity>> {
    Json(catalog::cities().iter().map(ApiCity::from).collect())
}

async fn get_units() -> Json<ApiUnits> {
    Json(ApiUnits {
        systems: UnitSystem::ALL
            .iter()
            .map(|units| ApiUnitSystem {
                code: units.code(),
                label: units.label(),
            })
            .collect(),
        notice: "Measurements for Air Pressure and Precipitation are only available in \
                 inches and millimeters respectively.",
    })
}

async fn get_meta() -> Json<SubmissionBounds> {
    Json(submission_bounds(Local::now()))
}

async fn post_current(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CurrentRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    tracing::info!(cities = request.cities.len(), "current-weather submission");
    let view = state.dashboard.current(&request).await?;
    Ok(Json(view))
}

async fn post_historical(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoricalRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    tracing::info!(city = %request.city, "historical submission");
    let view = state.dashboard.historical(&request).await?;
    Ok(Json(view))
}
