use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use super::auth::{AdminCaller, Caller};
use super::{map_service_error, ApiError};
use crate::entities::jobs;
use crate::models::job::{JobRequest, JobSearchQuery, SetJobStatusRequest};
use crate::models::response::ActionResponse;
use crate::services::jobs as job_service;
use crate::AppState;

/// GET /api/jobs?search=
pub async fn list_open_jobs(
    State(state): State<AppState>,
    _caller: Caller,
    Query(query): Query<JobSearchQuery>,
) -> Result<Json<Vec<jobs::Model>>, ApiError> {
    job_service::list_open_jobs(&state.db, query.search.as_deref())
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// GET /api/jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    _caller: Caller,
    Path(job_id): Path<i32>,
) -> Result<Json<jobs::Model>, ApiError> {
    job_service::get_job(&state.db, job_id)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// GET /api/admin/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    _admin: AdminCaller,
) -> Result<Json<Vec<jobs::Model>>, ApiError> {
    job_service::list_jobs(&state.db)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// POST /api/admin/jobs
pub async fn create_job(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Json(payload): Json<JobRequest>,
) -> Result<(StatusCode, Json<ActionResponse<jobs::Model>>), ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, title = %payload.title, "Creating job");

    let job = job_service::create_job(&state.db, payload)
        .await
        .map_err(map_service_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Job created successfully", job)),
    ))
}

/// PUT /api/admin/jobs/{job_id}
pub async fn update_job(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(job_id): Path<i32>,
    Json(payload): Json<JobRequest>,
) -> Result<Json<ActionResponse<jobs::Model>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, job_id, "Updating job");

    let job = job_service::update_job(&state.db, job_id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::ok("Job updated successfully", job)))
}

/// PUT /api/admin/jobs/{job_id}/status
pub async fn set_job_status(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(job_id): Path<i32>,
    Json(payload): Json<SetJobStatusRequest>,
) -> Result<Json<ActionResponse<jobs::Model>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, job_id, status = %payload.status, "Changing job status");

    let status = job_service::parse_job_status(&payload.status).map_err(map_service_error)?;
    let job = job_service::set_job_status(&state.db, job_id, status)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::ok(
        format!("Job status updated to {}", job.status),
        job,
    )))
}

/// DELETE /api/admin/jobs/{job_id}
pub async fn delete_job(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Path(job_id): Path<i32>,
) -> Result<Json<ActionResponse<()>>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, job_id, "Deleting job");

    job_service::delete_job(&state.db, job_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::message("Job deleted successfully")))
}
