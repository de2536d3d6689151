pub mod bandwidth;
pub mod plans;
pub mod topologies;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::PlanErrorEntry;
use crate::planner::ErrorSet;

/// Error response - {"error": "message"} format
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Rejected plan response - {"errors": [{kind, message}]}
#[derive(Serialize)]
pub struct PlanErrorResponse {
    pub errors: Vec<PlanErrorEntry>,
}

/// API error type
pub struct ApiError {
    status: StatusCode,
    message: String,
    plan_errors: Vec<PlanErrorEntry>,
}

impl ApiError {
    fn with_status(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            plan_errors: Vec::new(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, msg.into())
    }

    pub fn not_found(resource: &str) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, format!("{} not found", resource))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, msg.into())
    }

    /// 422 carrying every error of a rejected plan
    pub fn unprocessable(errors: &ErrorSet) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: errors.to_string(),
            plan_errors: errors.entries(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.plan_errors.is_empty() {
            (self.status, Json(ErrorResponse::new(self.message))).into_response()
        } else {
            (
                self.status,
                Json(PlanErrorResponse {
                    errors: self.plan_errors,
                }),
            )
                .into_response()
        }
    }
}

impl From<ErrorSet> for ApiError {
    fn from(errors: ErrorSet) -> Self {
        Self::unprocessable(&errors)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Healthcheck endpoint - returns 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "portmapper",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
