pub mod admin;
pub mod bookings;
pub mod calendar;
pub mod courts;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::services::booking::Requester;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/courts", get(courts::list_courts))
        .route("/api/courts/:id", get(courts::get_court))
        .route("/api/courts/:id/availability", get(courts::get_availability))
        .route(
            "/api/bookings",
            get(bookings::list_my_bookings).post(bookings::create_booking),
        )
        .route("/api/bookings/:id", get(bookings::get_booking))
        .route("/api/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/api/dashboard", get(bookings::dashboard))
        .route("/api/admin/courts", post(admin::create_court))
        .route("/api/admin/courts/:id/status", post(admin::set_court_status))
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route("/api/admin/sweep", post(admin::run_sweep))
        .route("/calendar/:booking_id", get(calendar::download_ics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

fn is_admin(headers: &HeaderMap, admin_token: &str) -> bool {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    auth.strip_prefix("Bearer ")
        .map(|token| !token.is_empty() && token == admin_token)
        .unwrap_or(false)
}

fn require_admin(headers: &HeaderMap, admin_token: &str) -> Result<(), AppError> {
    if is_admin(headers, admin_token) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// The caller as asserted by the upstream auth layer: `X-User-Id` names the
/// user, the admin bearer token grants admin capability.
fn requester(headers: &HeaderMap, admin_token: &str) -> Result<Requester, AppError> {
    let is_admin = is_admin(headers, admin_token);
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty());

    match (user_id, is_admin) {
        (Some(id), _) => Ok(Requester {
            user_id: id.to_string(),
            is_admin,
        }),
        (None, true) => Ok(Requester {
            user_id: "admin".to_string(),
            is_admin: true,
        }),
        (None, false) => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn test_requester_from_user_header() {
        let r = requester(&headers(&[("x-user-id", "u1")]), "secret").unwrap();
        assert_eq!(r.user_id, "u1");
        assert!(!r.is_admin);
    }

    #[test]
    fn test_requester_admin_token() {
        let r = requester(&headers(&[("authorization", "Bearer secret")]), "secret").unwrap();
        assert!(r.is_admin);

        let r = requester(
            &headers(&[("authorization", "Bearer wrong"), ("x-user-id", "u1")]),
            "secret",
        )
        .unwrap();
        assert!(!r.is_admin);
    }

    #[test]
    fn test_requester_missing_identity() {
        assert!(matches!(
            requester(&HeaderMap::new(), "secret"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            requester(&headers(&[("x-user-id", "  ")]), "secret"),
            Err(AppError::Unauthorized)
        ));
    }
}
