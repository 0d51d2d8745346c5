use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use uuid::Uuid;

use super::auth::AdminCaller;
use super::{map_service_error, ApiError};
use crate::entities::contractors;
use crate::models::contractor::CreateContractorRequest;
use crate::models::response::ActionResponse;
use crate::services::contractors as contractor_service;
use crate::AppState;

/// POST /api/admin/contractors
pub async fn create_contractor(
    State(state): State<AppState>,
    _admin: AdminCaller,
    Json(payload): Json<CreateContractorRequest>,
) -> Result<(StatusCode, Json<ActionResponse<contractors::Model>>), ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, company = %payload.company_name, "Registering contractor");

    let contractor = contractor_service::create_contractor(&state.db, payload)
        .await
        .map_err(map_service_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Contractor created successfully", contractor)),
    ))
}
