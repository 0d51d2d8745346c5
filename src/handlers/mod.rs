//! HTTP handlers
//!
//! Handlers resolve the caller, call into `services`, and map
//! `DashboardError` onto a status code plus `ErrorResponse` body.

use axum::{http::StatusCode, Json};
use tracing::error;

use crate::error::DashboardError;
use crate::models::response::ErrorResponse;

pub mod auth;
pub mod bids;
pub mod contractors;
pub mod health;
pub mod jobs;
pub mod settings;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn map_service_error(err: DashboardError) -> ApiError {
    let status = match &err {
        DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
        DashboardError::DuplicateBid { .. } => StatusCode::CONFLICT,
        DashboardError::Conflict(_) => StatusCode::CONFLICT,
        DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
        DashboardError::Database(msg) => {
            error!("Database error: {}", msg);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error", err.code())),
            );
        }
    };

    (status, Json(ErrorResponse::new(err.to_string(), err.code())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DashboardError::not_found("Bid", 1), StatusCode::NOT_FOUND),
            (
                DashboardError::DuplicateBid {
                    contractor_id: 1,
                    job_id: 2,
                },
                StatusCode::CONFLICT,
            ),
            (DashboardError::Conflict("lost".into()), StatusCode::CONFLICT),
            (DashboardError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                DashboardError::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let code = err.code();
            let (status, Json(body)) = map_service_error(err);
            assert_eq!(status, expected);
            assert!(!body.success);
            assert_eq!(body.code.as_deref(), Some(code));
        }
    }

    #[test]
    fn test_database_detail_not_leaked() {
        let (_, Json(body)) = map_service_error(DashboardError::Database("relation bids".into()));
        assert_eq!(body.error, "Internal server error");
    }
}
