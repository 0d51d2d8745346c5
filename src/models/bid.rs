//! Bid request/response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{bid_calculations, bids, jobs};
use crate::services::pricing::{BidCalculation, ContractorRateSettings, JobCostInputs};

/// Raw pricing form values.
///
/// Each field may be a JSON number, a numeric string, or garbage (which
/// prices as zero). Absent fields fall back to the contractor's settings
/// and the job estimate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingInput {
    #[serde(default)]
    pub labor_hours: Option<Value>,
    #[serde(default)]
    pub material_cost: Option<Value>,
    #[serde(default)]
    pub labor_rate: Option<Value>,
    #[serde(default)]
    pub material_margin_pct: Option<Value>,
    #[serde(default)]
    pub travel_cost: Option<Value>,
    #[serde(default)]
    pub profit_margin_pct: Option<Value>,
}

/// Request to preview a bid price
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Job whose estimated hours seed `labor_hours`
    #[serde(default)]
    pub job_id: Option<i32>,
    #[serde(flatten)]
    pub pricing: PricingInput,
}

/// Priced bid: the sanitized inputs and the rounded breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidQuote {
    pub inputs: JobCostInputs,
    pub rates: ContractorRateSettings,
    pub breakdown: BidCalculation,
}

/// Request to submit a bid on a job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitBidRequest {
    /// Final amount; defaults to the computed total when omitted
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Pricing inputs the amount was derived from
    #[serde(default)]
    pub pricing: Option<PricingInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBidStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceptBidQuery {
    /// Job revision the caller last saw; a mismatch answers 409
    #[serde(default)]
    pub expected_revision: Option<i32>,
}

/// Outcome of an acceptance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedBid {
    pub accepted: bids::Model,
    pub rejected: Vec<bids::Model>,
    pub job: jobs::Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidDetails {
    pub bid: bids::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<bid_calculations::Model>,
}

/// Admin listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidSummary {
    pub bid: bids::Model,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

/// A contractor's bid together with the job it was placed on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorBid {
    pub bid: bids::Model,
    pub job: Option<jobs::Model>,
}
