//! Caller identity extractors
//!
//! Administrators present `x-api-key` matching `ADMIN_API_KEY`. Contractors
//! arrive with `x-contractor-id`, set by the session layer in front of this
//! service. Services receive the resolved id explicitly.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    Json,
};
use tracing::{error, warn};

use super::ApiError;
use crate::models::response::ErrorResponse;
use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const CONTRACTOR_ID_HEADER: &str = "x-contractor-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Admin,
    Contractor(i32),
}

/// Rejects anything but an authenticated administrator
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller;

/// Rejects anything but a contractor; carries the contractor's id
#[derive(Debug, Clone, Copy)]
pub struct ContractorCaller(pub i32);

fn config_error() -> ApiError {
    error!("ADMIN_API_KEY not configured");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Server configuration error", "CONFIG_ERROR")),
    )
}

fn unauthorized(message: &str) -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(message, "UNAUTHORIZED")),
    )
}

fn forbidden(message: &str) -> ApiError {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new(message, "FORBIDDEN")),
    )
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        if let Some(provided) = header(parts, API_KEY_HEADER) {
            let admin_key = state.admin_api_key.as_deref().ok_or_else(config_error)?;
            if provided != admin_key {
                warn!("Invalid API key");
                return Err(unauthorized("Invalid or missing API key"));
            }
            return Ok(Caller::Admin);
        }

        match header(parts, CONTRACTOR_ID_HEADER) {
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(id) if id > 0 => Ok(Caller::Contractor(id)),
                _ => {
                    warn!(value = raw, "Malformed contractor id header");
                    Err(unauthorized("Invalid contractor id"))
                }
            },
            None => Err(unauthorized("Missing caller identity")),
        }
    }
}

impl<S> FromRequestParts<S> for AdminCaller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if AppState::from_ref(state).admin_api_key.is_none() {
            return Err(config_error());
        }

        match Caller::from_request_parts(parts, state).await? {
            Caller::Admin => Ok(AdminCaller),
            Caller::Contractor(_) => Err(forbidden("Admin access required")),
        }
    }
}

impl<S> FromRequestParts<S> for ContractorCaller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Caller::from_request_parts(parts, state).await? {
            Caller::Contractor(id) => Ok(ContractorCaller(id)),
            Caller::Admin => Err(forbidden("Contractor access required")),
        }
    }
}
