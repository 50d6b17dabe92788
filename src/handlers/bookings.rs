use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::requester;
use crate::errors::AppError;
use crate::models::{Booking, UserDashboard};
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub court_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let caller = requester(&headers, &state.config.admin_token)?;

    let booking = state
        .bookings
        .check_and_create_booking(&body.court_id, &caller.user_id, body.start_time, body.end_time)
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings
pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let caller = requester(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.user_bookings(&caller.user_id)?))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let caller = requester(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.get_booking(&id, &caller)?))
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let caller = requester(&headers, &state.config.admin_token)?;
    let booking = state.bookings.cancel_booking(&id, &caller).await?;
    Ok(Json(booking))
}

// GET /api/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserDashboard>, AppError> {
    let caller = requester(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.dashboard(&caller.user_id)?))
}
