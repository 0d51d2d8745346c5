//! Bid endpoints
//!
//! Contractor: quote, submit, list own bids.
//! Admin: list, accept, reject, status override, delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use super::auth::{AdminCaller, ContractorCaller};
use super::{map_service_error, ApiError};
use crate::entities::bids;
use crate::models::bid::{
    AcceptBidQuery, AcceptedBid, BidDetails, BidQuote, BidSummary, ContractorBid, QuoteRequest,
    SetBidStatusRequest, SubmitBidRequest,
};
use crate::models::response::ActionResponse;
use crate::services::bids as bid_service;
use crate::AppState;

/// POST /api/bids/quote
pub async fn quote_bid(
    State(state): State<AppState>,
    ContractorCaller(contractor_id): ContractorCaller,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<BidQuote>, ApiError> {
    bid_service::quote_bid(&state.db, contractor_id, payload.job_id, &payload.pricing)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// POST /api/jobs/{job_id}/bids
pub async fn submit_bid(
    State(state): State<AppState>,
    ContractorCaller(contractor_id): ContractorCaller,
    Path(job_id): Path<i32>,
    Json(payload): Json<SubmitBidRequest>,
) -> Result<(StatusCode, Json<ActionResponse<bids::Model>>), ApiError> {
    let bid = bid_service::submit_bid(&state.db, contractor_id, job_id, payload)
        .await
        .map_err(map_service_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Bid submitted successfully", bid)),
    ))
}

/// GET /api/contractor/bids
pub async fn list_my_bids(
    State(state): State<AppState>,
    ContractorCaller(contractor_id): ContractorCaller,
) -> Result<Json<Vec<ContractorBid>>, ApiError> {
    bid_service::list_contractor_bids(&state.db, contractor_id)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// GET /api/admin/bids
pub async fn list_bids(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<Vec<BidSummary>>, ApiError> {
    bid_service::list_bids(&state.db)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// GET /api/admin/bids/{bid_id}
pub async fn get_bid(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(bid_id): Path<i32>,
) -> Result<Json<BidDetails>, ApiError> {
    bid_service::get_bid_with_calculation(&state.db, bid_id)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// POST /api/admin/bids/{bid_id}/accept
///
/// With `?expected_revision=N` the acceptance only applies if the job is
/// still at revision N; otherwise 409.
pub async fn accept_bid(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(bid_id): Path<i32>,
    Query(query): Query<AcceptBidQuery>,
) -> Result<Json<ActionResponse<AcceptedBid>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bid_id,
        expected_revision = ?query.expected_revision,
        "Accepting bid"
    );

    let result = match query.expected_revision {
        Some(revision) => bid_service::accept_bid_at(&state.db, bid_id, revision).await,
        None => bid_service::accept_bid(&state.db, bid_id).await,
    }
    .map_err(|e| {
        info!(correlation_id = %correlation_id, error = %e, "Bid acceptance failed");
        map_service_error(e)
    })?;

    Ok(Json(ActionResponse::ok(
        "Bid accepted successfully. Other bids for this job have been rejected.",
        result,
    )))
}

/// POST /api/admin/bids/{bid_id}/reject
pub async fn reject_bid(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(bid_id): Path<i32>,
) -> Result<Json<ActionResponse<bids::Model>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bid_id, "Rejecting bid");

    let bid = bid_service::reject_bid(&state.db, bid_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::ok("Bid rejected successfully", bid)))
}

/// PUT /api/admin/bids/{bid_id}/status
pub async fn set_bid_status(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(bid_id): Path<i32>,
    Json(payload): Json<SetBidStatusRequest>,
) -> Result<Json<ActionResponse<bids::Model>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bid_id, status = %payload.status, "Updating bid status");

    let status = bid_service::parse_bid_status(&payload.status).map_err(map_service_error)?;
    let bid = bid_service::set_bid_status(&state.db, bid_id, status)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::ok(
        format!("Bid status updated to {}", bid.status),
        bid,
    )))
}

/// DELETE /api/admin/bids/{bid_id}
pub async fn delete_bid(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(bid_id): Path<i32>,
) -> Result<Json<ActionResponse<()>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bid_id, "Deleting bid");

    bid_service::delete_bid(&state.db, bid_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::message("Bid deleted successfully")))
}
