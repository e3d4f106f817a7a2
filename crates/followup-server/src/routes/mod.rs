//! HTTP route handlers.

pub mod contacts;
pub mod dates;
pub mod interactions;
pub mod tasks;

use axum::Json;
use axum::http::StatusCode;
use followup_core::FollowupError;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Error body shape every handler returns.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Map a core error onto an HTTP status and JSON body. Every taxonomy
/// entry has a mapping; nothing internal leaks through unmapped.
pub fn map_error(err: FollowupError) -> ApiError {
    let status = match &err {
        FollowupError::Unauthenticated | FollowupError::SessionExpired => StatusCode::UNAUTHORIZED,
        FollowupError::ContactNotFound(_) | FollowupError::TaskNotFound(_) => StatusCode::NOT_FOUND,
        FollowupError::Validation(_) => StatusCode::BAD_REQUEST,
        FollowupError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        FollowupError::Remote { .. } | FollowupError::Unavailable(_) | FollowupError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}
