//! Bid pricing engine
//!
//! Maps a job's cost inputs and a contractor's rate settings to a bid total
//! and its cost breakdown:
//!
//! ```text
//! labor_cost             = labor_hours * labor_rate
//! material_margin_amount = material_cost * material_margin_pct / 100
//! material_total         = material_cost + material_margin_amount
//! subtotal               = labor_cost + material_total + travel_cost
//! profit_amount          = subtotal * profit_margin_pct / 100
//! total_bid              = subtotal + profit_amount
//! ```
//!
//! Everything here is pure. Invalid numbers never produce an error: this
//! feeds a live preview, so anything non-numeric or negative counts as zero
//! and percentages are capped at 100. Values keep full precision until
//! `BidCalculation::rounded` is called for display or persistence.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::entities::contractor_settings;
use crate::models::bid::PricingInput;

lazy_static! {
    /// Leading numeric prefix, the way a browser `parseFloat` reads it
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").unwrap();
}

/// A contractor's pricing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractorRateSettings {
    /// Currency per hour
    pub labor_rate: Decimal,
    pub material_margin_pct: Decimal,
    pub travel_cost: Decimal,
    pub profit_margin_pct: Decimal,
}

impl Default for ContractorRateSettings {
    fn default() -> Self {
        Self {
            labor_rate: Decimal::new(4500, 2),
            material_margin_pct: Decimal::new(1500, 2),
            travel_cost: Decimal::new(2500, 2),
            profit_margin_pct: Decimal::new(2000, 2),
        }
    }
}

impl From<&contractor_settings::Model> for ContractorRateSettings {
    fn from(model: &contractor_settings::Model) -> Self {
        Self {
            labor_rate: model.labor_rate,
            material_margin_pct: model.material_margin_pct,
            travel_cost: model.travel_cost,
            profit_margin_pct: model.profit_margin_pct,
        }
    }
}

/// Per-job quantities the contractor prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCostInputs {
    pub labor_hours: Decimal,
    pub material_cost: Decimal,
}

/// Cost breakdown of a bid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidCalculation {
    pub labor_cost: Decimal,
    pub material_margin_amount: Decimal,
    pub material_total: Decimal,
    pub travel_cost: Decimal,
    pub subtotal: Decimal,
    pub profit_amount: Decimal,
    pub total_bid: Decimal,
}

impl BidCalculation {
    /// Every component rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            labor_cost: round_currency(self.labor_cost),
            material_margin_amount: round_currency(self.material_margin_amount),
            material_total: round_currency(self.material_total),
            travel_cost: round_currency(self.travel_cost),
            subtotal: round_currency(self.subtotal),
            profit_amount: round_currency(self.profit_amount),
            total_bid: round_currency(self.total_bid),
        }
    }
}

/// Compute the bid breakdown. Inputs are sanitized first, so this accepts
/// anything and never fails.
pub fn compute_bid(inputs: &JobCostInputs, settings: &ContractorRateSettings) -> BidCalculation {
    let labor_hours = non_negative(inputs.labor_hours);
    let material_cost = non_negative(inputs.material_cost);
    let labor_rate = non_negative(settings.labor_rate);
    let travel_cost = non_negative(settings.travel_cost);
    let material_margin_pct = clamp_percentage(settings.material_margin_pct);
    let profit_margin_pct = clamp_percentage(settings.profit_margin_pct);

    // Saturating ops: absurdly large inputs pin to Decimal::MAX instead of panicking
    let labor_cost = labor_hours.saturating_mul(labor_rate);
    let material_margin_amount =
        material_cost.saturating_mul(material_margin_pct / Decimal::ONE_HUNDRED);
    let material_total = material_cost.saturating_add(material_margin_amount);
    let subtotal = labor_cost
        .saturating_add(material_total)
        .saturating_add(travel_cost);
    let profit_amount = subtotal.saturating_mul(profit_margin_pct / Decimal::ONE_HUNDRED);
    let total_bid = subtotal.saturating_add(profit_amount);

    BidCalculation {
        labor_cost,
        material_margin_amount,
        material_total,
        travel_cost,
        subtotal,
        profit_amount,
        total_bid,
    }
}

/// Build engine inputs from a raw form payload.
///
/// Fields present in `raw` override the contractor's settings and the job's
/// estimated hours; present-but-garbage fields count as zero.
pub fn resolve_inputs(
    raw: &PricingInput,
    settings: &ContractorRateSettings,
    estimated_hours: Option<Decimal>,
) -> (JobCostInputs, ContractorRateSettings) {
    let pick = |value: &Option<Value>, fallback: Decimal| {
        value.as_ref().map(sanitize_value).unwrap_or(fallback)
    };

    let inputs = JobCostInputs {
        labor_hours: pick(&raw.labor_hours, estimated_hours.unwrap_or(Decimal::ZERO)),
        material_cost: pick(&raw.material_cost, Decimal::ZERO),
    };
    let rates = ContractorRateSettings {
        labor_rate: pick(&raw.labor_rate, settings.labor_rate),
        material_margin_pct: pick(&raw.material_margin_pct, settings.material_margin_pct),
        travel_cost: pick(&raw.travel_cost, settings.travel_cost),
        profit_margin_pct: pick(&raw.profit_margin_pct, settings.profit_margin_pct),
    };

    (inputs, rates)
}

/// Coerce an arbitrary JSON value to a non-negative decimal
pub fn sanitize_value(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_leading_number(s),
        _ => Decimal::ZERO,
    };
    non_negative(parsed)
}

/// Parse the numeric prefix of a string ("12.5 hours" → 12.5, "abc" → 0)
pub fn parse_leading_number(input: &str) -> Decimal {
    LEADING_NUMBER
        .find(input.trim_start())
        .map(|m| parse_decimal(m.as_str()))
        .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(s: &str) -> Decimal {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };
    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    // "5." and ".5" are valid prefixes but not Decimal literals
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    let digits = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    // Out-of-range exponents count as zero, like an infinite parseFloat
    let value = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", digits, exp)),
        None => Decimal::from_str(&digits),
    }
    .unwrap_or(Decimal::ZERO);
    if negative { -value } else { value }
}

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp a percentage into [0, 100]
pub fn clamp_percentage(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Round to cents, half away from zero
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
