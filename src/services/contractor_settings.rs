//! Contractor rate settings
//!
//! Settings are owned by one contractor; the caller's own id is the only
//! key accepted here. A contractor without a stored row prices with the
//! defaults.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;

use crate::entities::{contractor_settings, prelude::ContractorSettings};
use crate::error::DashboardError;
use crate::models::settings::{SettingsResponse, UpdateSettingsRequest};
use crate::services::contractors::get_contractor;
use crate::services::pricing::ContractorRateSettings;

const MAX_LABOR_RATE: i64 = 1000;
const MAX_TRAVEL_COST: i64 = 500;
const MAX_PERCENTAGE: i64 = 100;
const MAX_PREFERRED_LOCATIONS_LENGTH: usize = 500;

pub async fn get_settings(
    db: &DatabaseConnection,
    contractor_id: i32,
) -> Result<SettingsResponse, DashboardError> {
    get_contractor(db, contractor_id).await?;

    let stored = find_settings(db, contractor_id).await?;
    Ok(stored
        .map(SettingsResponse::from)
        .unwrap_or_else(|| SettingsResponse::defaults(contractor_id)))
}

/// Rates used to seed bid calculations
pub async fn rate_settings(
    db: &DatabaseConnection,
    contractor_id: i32,
) -> Result<ContractorRateSettings, DashboardError> {
    Ok(get_settings(db, contractor_id).await?.rates())
}

pub async fn update_settings(
    db: &DatabaseConnection,
    contractor_id: i32,
    request: UpdateSettingsRequest,
) -> Result<SettingsResponse, DashboardError> {
    validate_settings(&request)?;
    get_contractor(db, contractor_id).await?;

    let now = Utc::now();
    let saved = match find_settings(db, contractor_id).await? {
        Some(existing) => {
            let mut active: contractor_settings::ActiveModel = existing.into();
            active.labor_rate = Set(request.labor_rate);
            active.material_margin_pct = Set(request.material_margin_pct);
            active.travel_cost = Set(request.travel_cost);
            active.profit_margin_pct = Set(request.profit_margin_pct);
            if let Some(locations) = request.preferred_locations {
                active.preferred_locations = Set(locations.trim().to_string());
            }
            if let Some(auto) = request.auto_calculate_bids {
                active.auto_calculate_bids = Set(auto);
            }
            active.updated_at = Set(now.into());
            active.update(db).await?
        }
        None => {
            contractor_settings::ActiveModel {
                contractor_id: Set(contractor_id),
                labor_rate: Set(request.labor_rate),
                material_margin_pct: Set(request.material_margin_pct),
                travel_cost: Set(request.travel_cost),
                profit_margin_pct: Set(request.profit_margin_pct),
                preferred_locations: Set(request
                    .preferred_locations
                    .map(|l| l.trim().to_string())
                    .unwrap_or_default()),
                auto_calculate_bids: Set(request.auto_calculate_bids.unwrap_or(true)),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    info!(contractor_id, "Contractor settings updated");
    Ok(saved.into())
}

async fn find_settings(
    db: &DatabaseConnection,
    contractor_id: i32,
) -> Result<Option<contractor_settings::Model>, DashboardError> {
    Ok(ContractorSettings::find()
        .filter(contractor_settings::Column::ContractorId.eq(contractor_id))
        .one(db)
        .await?)
}

/// Stored settings are validated strictly; only the pricing preview
/// tolerates out-of-range values.
fn validate_settings(request: &UpdateSettingsRequest) -> Result<(), DashboardError> {
    check_range("Labor rate", request.labor_rate, MAX_LABOR_RATE)?;
    check_range("Material margin", request.material_margin_pct, MAX_PERCENTAGE)?;
    check_range("Travel cost", request.travel_cost, MAX_TRAVEL_COST)?;
    check_range("Profit margin", request.profit_margin_pct, MAX_PERCENTAGE)?;

    if let Some(locations) = &request.preferred_locations {
        if locations.trim().len() > MAX_PREFERRED_LOCATIONS_LENGTH {
            return Err(DashboardError::Validation(format!(
                "Preferred locations cannot exceed {} characters",
                MAX_PREFERRED_LOCATIONS_LENGTH
            )));
        }
    }

    Ok(())
}

fn check_range(field: &str, value: Decimal, max: i64) -> Result<(), DashboardError> {
    if value < Decimal::ZERO || value > Decimal::from(max) {
        return Err(DashboardError::Validation(format!(
            "{} must be between 0 and {}",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(rate: Decimal, margin: Decimal, travel: Decimal, profit: Decimal) -> UpdateSettingsRequest {
        UpdateSettingsRequest {
            labor_rate: rate,
            material_margin_pct: margin,
            travel_cost: travel,
            profit_margin_pct: profit,
            preferred_locations: None,
            auto_calculate_bids: None,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(validate_settings(&request(dec!(0), dec!(0), dec!(0), dec!(0))).is_ok());
        assert!(validate_settings(&request(dec!(1000), dec!(100), dec!(500), dec!(100))).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = validate_settings(&request(dec!(-1), dec!(15), dec!(25), dec!(20))).unwrap_err();
        assert_eq!(
            err,
            DashboardError::Validation("Labor rate must be between 0 and 1000".to_string())
        );

        let err = validate_settings(&request(dec!(45), dec!(100.01), dec!(25), dec!(20))).unwrap_err();
        assert!(err.to_string().contains("Material margin"));

        assert!(validate_settings(&request(dec!(45), dec!(15), dec!(501), dec!(20))).is_err());
        assert!(validate_settings(&request(dec!(45), dec!(15), dec!(25), dec!(101))).is_err());
    }

    #[test]
    fn test_validate_preferred_locations_length() {
        let mut req = request(dec!(45), dec!(15), dec!(25), dec!(20));
        req.preferred_locations = Some("x".repeat(501));
        assert!(validate_settings(&req).is_err());
    }
}
