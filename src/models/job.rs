//! Job posting request models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create or replace a job posting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub budget_range: Option<String>,
    /// Construction, Renovation, Repair, ...
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<Decimal>,
    #[serde(default)]
    pub required_materials: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Only honoured on update
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetJobStatusRequest {
    pub status: String,
}
