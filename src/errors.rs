use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::BookingStatus;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("overlapping confirmed booking exists")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("database is busy")]
    Busy,

    #[error("database error: {0}")]
    Database(rusqlite::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                StoreError::Busy
            }
            Some(rusqlite::ErrorCode::ConstraintViolation) if is_overlap_trigger(&err) => {
                StoreError::Conflict
            }
            _ => StoreError::Database(err),
        }
    }
}

fn is_overlap_trigger(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("overlapping confirmed booking"))
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("start time must be before end time")]
    InvalidTimeRange,

    #[error("cannot book a time in the past")]
    InvalidTime,

    #[error("court not found: {0}")]
    CourtNotFound(String),

    #[error("court {0} is not accepting bookings")]
    CourtUnavailable(String),

    #[error("requested time is outside operating hours")]
    OutsideOperatingHours,

    #[error("that time slot is already booked")]
    SlotUnavailable,

    #[error("timed out waiting to check court availability, please retry")]
    ConflictCheckTimeout,

    #[error("booking not found: {0}")]
    BookingNotFound(String),

    #[error("not allowed to modify this booking")]
    Forbidden,

    #[error("booking is already cancelled")]
    AlreadyCancelled,

    #[error("cannot change a {} booking", .0.as_str())]
    InvalidStatusTransition(BookingStatus),

    #[error("storage failure: {0}")]
    Storage(StoreError),
}

impl BookingError {
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidTimeRange => "INVALID_TIME_RANGE",
            BookingError::InvalidTime => "INVALID_TIME",
            BookingError::CourtNotFound(_) => "COURT_NOT_FOUND",
            BookingError::CourtUnavailable(_) => "COURT_UNAVAILABLE",
            BookingError::OutsideOperatingHours => "OUTSIDE_OPERATING_HOURS",
            BookingError::SlotUnavailable => "SLOT_UNAVAILABLE",
            BookingError::ConflictCheckTimeout => "CONFLICT_CHECK_TIMEOUT",
            BookingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            BookingError::Forbidden => "FORBIDDEN",
            BookingError::AlreadyCancelled => "ALREADY_CANCELLED",
            BookingError::InvalidStatusTransition(_) => "INVALID_STATUS_TRANSITION",
            BookingError::Storage(_) => "STORAGE_FAILURE",
        }
    }

    /// Callers may retry these without changing the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::ConflictCheckTimeout | BookingError::Storage(_))
    }

    fn status(&self) -> StatusCode {
        match self {
            BookingError::InvalidTimeRange
            | BookingError::InvalidTime
            | BookingError::OutsideOperatingHours => StatusCode::BAD_REQUEST,
            BookingError::Forbidden => StatusCode::FORBIDDEN,
            BookingError::CourtNotFound(_) | BookingError::BookingNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BookingError::SlotUnavailable
            | BookingError::CourtUnavailable(_)
            | BookingError::AlreadyCancelled
            | BookingError::InvalidStatusTransition(_) => StatusCode::CONFLICT,
            BookingError::ConflictCheckTimeout => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => BookingError::SlotUnavailable,
            StoreError::Busy => BookingError::ConflictCheckTimeout,
            other => BookingError::Storage(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Booking(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, retryable) = match &self {
            AppError::Booking(e) => (e.status(), e.code(), e.is_retryable()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", false),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", false),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", false),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", false),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": code,
            "retryable": retryable,
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_booking_codes() {
        assert_eq!(BookingError::from(StoreError::Conflict).code(), "SLOT_UNAVAILABLE");
        assert_eq!(BookingError::from(StoreError::Busy).code(), "CONFLICT_CHECK_TIMEOUT");
        assert_eq!(BookingError::from(StoreError::Poisoned).code(), "STORAGE_FAILURE");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(BookingError::ConflictCheckTimeout.is_retryable());
        assert!(BookingError::Storage(StoreError::Poisoned).is_retryable());
        assert!(!BookingError::SlotUnavailable.is_retryable());
        assert!(!BookingError::Forbidden.is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BookingError::SlotUnavailable.status(), StatusCode::CONFLICT);
        assert_eq!(BookingError::ConflictCheckTimeout.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(BookingError::InvalidTime.status(), StatusCode::BAD_REQUEST);
        assert_eq!(BookingError::Forbidden.status(), StatusCode::FORBIDDEN);
    }
}
