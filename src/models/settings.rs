//! Contractor rate settings models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::contractor_settings;
use crate::services::pricing::ContractorRateSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub contractor_id: i32,
    pub labor_rate: Decimal,
    pub material_margin_pct: Decimal,
    pub travel_cost: Decimal,
    pub profit_margin_pct: Decimal,
    pub preferred_locations: String,
    pub auto_calculate_bids: bool,
}

impl SettingsResponse {
    pub fn defaults(contractor_id: i32) -> Self {
        let rates = ContractorRateSettings::default();
        Self {
            contractor_id,
            labor_rate: rates.labor_rate,
            material_margin_pct: rates.material_margin_pct,
            travel_cost: rates.travel_cost,
            profit_margin_pct: rates.profit_margin_pct,
            preferred_locations: String::new(),
            auto_calculate_bids: true,
        }
    }

    pub fn rates(&self) -> ContractorRateSettings {
        ContractorRateSettings {
            labor_rate: self.labor_rate,
            material_margin_pct: self.material_margin_pct,
            travel_cost: self.travel_cost,
            profit_margin_pct: self.profit_margin_pct,
        }
    }
}

impl From<contractor_settings::Model> for SettingsResponse {
    fn from(model: contractor_settings::Model) -> Self {
        Self {
            contractor_id: model.contractor_id,
            labor_rate: model.labor_rate,
            material_margin_pct: model.material_margin_pct,
            travel_cost: model.travel_cost,
            profit_margin_pct: model.profit_margin_pct,
            preferred_locations: model.preferred_locations,
            auto_calculate_bids: model.auto_calculate_bids,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub labor_rate: Decimal,
    pub material_margin_pct: Decimal,
    pub travel_cost: Decimal,
    pub profit_margin_pct: Decimal,
    #[serde(default)]
    pub preferred_locations: Option<String>,
    #[serde(default)]
    pub auto_calculate_bids: Option<bool>,
}
