use axum::{extract::State, Json};

use super::auth::ContractorCaller;
use super::{map_service_error, ApiError};
use crate::models::response::ActionResponse;
use crate::models::settings::{SettingsResponse, UpdateSettingsRequest};
use crate::services::contractor_settings;
use crate::AppState;

/// GET /api/contractor/settings
pub async fn get_settings(
    State(state): State<AppState>,
    ContractorCaller(contractor_id): ContractorCaller,
) -> Result<Json<SettingsResponse>, ApiError> {
    contractor_settings::get_settings(&state.db, contractor_id)
        .await
        .map(Json)
        .map_err(map_service_error)
}

/// PUT /api/contractor/settings
pub async fn update_settings(
    State(state): State<AppState>,
    ContractorCaller(contractor_id): ContractorCaller,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<ActionResponse<SettingsResponse>>, ApiError> {
    let settings = contractor_settings::update_settings(&state.db, contractor_id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ActionResponse::ok(
        "Settings updated successfully",
        settings,
    )))
}
