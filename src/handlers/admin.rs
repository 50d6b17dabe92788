use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use super::require_admin;
use crate::errors::{AppError, BookingError, StoreError};
use crate::models::{Booking, BookingStatus, Court, CourtStatus};
use crate::state::AppState;

// POST /api/admin/courts
#[derive(Deserialize)]
pub struct CreateCourtRequest {
    pub name: String,
    #[serde(default)]
    pub is_indoor: bool,
    pub hourly_rate: f64,
    pub peak_hour_rate: Option<f64>,
    pub status: Option<CourtStatus>,
}

pub async fn create_court(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<Court>), AppError> {
    require_admin(&headers, &state.config.admin_token)?;

    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("court name is required".to_string()));
    }
    let peak_hour_rate = body.peak_hour_rate.unwrap_or(body.hourly_rate);
    for rate in [body.hourly_rate, peak_hour_rate] {
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::BadRequest(format!("invalid rate: {rate}")));
        }
    }

    let now = state.bookings.now();
    let court = Court {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        is_indoor: body.is_indoor,
        hourly_rate: body.hourly_rate,
        peak_hour_rate,
        status: body.status.unwrap_or(CourtStatus::Available),
        created_at: now,
        updated_at: now,
    };
    state.courts.insert_court(&court)?;
    tracing::info!(court_id = %court.id, name = %court.name, "court created");

    Ok((StatusCode::CREATED, Json(court)))
}

// POST /api/admin/courts/:id/status
#[derive(Deserialize)]
pub struct CourtStatusRequest {
    pub status: CourtStatus,
}

pub async fn set_court_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CourtStatusRequest>,
) -> Result<Json<Court>, AppError> {
    require_admin(&headers, &state.config.admin_token)?;

    match state
        .courts
        .set_court_status(&id, body.status, state.bookings.now())
    {
        Ok(court) => {
            tracing::info!(court_id = %court.id, status = court.status.as_str(), "court status changed");
            Ok(Json(court))
        }
        Err(StoreError::NotFound) => Err(BookingError::CourtNotFound(id).into()),
        Err(e) => Err(e.into()),
    }
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    require_admin(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let status = match query.status.as_deref() {
        Some(s) => Some(
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status: {s}")))?,
        ),
        None => None,
    };

    Ok(Json(state.bookings.list_bookings(status, limit)?))
}

// POST /api/admin/sweep
pub async fn run_sweep(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&headers, &state.config.admin_token)?;
    let completed = state.bookings.complete_finished_bookings()?;
    Ok(Json(serde_json::json!({"completed": completed})))
}
