//! Contractor records

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::info;

use crate::entities::{contractor_settings, contractors, prelude::Contractors};
use crate::error::{is_unique_violation, DashboardError};
use crate::models::contractor::CreateContractorRequest;
use crate::services::pricing::ContractorRateSettings;

const MAX_COMPANY_NAME_LENGTH: usize = 100;

/// Register a contractor together with a default settings row
pub async fn create_contractor(
    db: &DatabaseConnection,
    request: CreateContractorRequest,
) -> Result<contractors::Model, DashboardError> {
    let email = request.email.trim().to_lowercase();
    let company_name = request.company_name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(DashboardError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    if company_name.is_empty() || company_name.len() > MAX_COMPANY_NAME_LENGTH {
        return Err(DashboardError::Validation(format!(
            "Company name must be 1-{} characters",
            MAX_COMPANY_NAME_LENGTH
        )));
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    let contractor = contractors::ActiveModel {
        email: Set(email.clone()),
        company_name: Set(company_name),
        phone: Set(request.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())),
        created_at: Set(now.into()),
        updated_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DashboardError::Conflict(format!("Email {} is already registered", email))
        } else {
            e.into()
        }
    })?;

    let defaults = ContractorRateSettings::default();
    contractor_settings::ActiveModel {
        contractor_id: Set(contractor.id),
        labor_rate: Set(defaults.labor_rate),
        material_margin_pct: Set(defaults.material_margin_pct),
        travel_cost: Set(defaults.travel_cost),
        profit_margin_pct: Set(defaults.profit_margin_pct),
        preferred_locations: Set(String::new()),
        auto_calculate_bids: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(contractor_id = contractor.id, "Contractor registered");
    Ok(contractor)
}

pub async fn get_contractor(
    db: &DatabaseConnection,
    contractor_id: i32,
) -> Result<contractors::Model, DashboardError> {
    Contractors::find_by_id(contractor_id)
        .one(db)
        .await?
        .ok_or_else(|| DashboardError::not_found("Contractor", contractor_id))
}
