use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, BookingError};
use crate::models::{Court, Slot};
use crate::state::AppState;

// GET /api/courts
pub async fn list_courts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Court>>, AppError> {
    Ok(Json(state.courts.list_courts()?))
}

// GET /api/courts/:id
pub async fn get_court(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Court>, AppError> {
    let court = state
        .courts
        .get_court(&id)?
        .ok_or(BookingError::CourtNotFound(id))?;
    Ok(Json(court))
}

// GET /api/courts/:id/availability?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    court_id: String,
    date: NaiveDate,
    slots: Vec<Slot>,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| state.bookings.now().date());
    let slots = state.bookings.get_availability(&id, date)?;

    Ok(Json(AvailabilityResponse {
        court_id: id,
        date,
        slots,
    }))
}
