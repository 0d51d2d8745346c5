//! `SeaORM` Entity for jobs table
//!
//! Posted work items contractors bid on. `revision` is bumped by every bid
//! acceptance and is compared on write to detect concurrent awards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job lifecycle: Active → Awarded → InProgress → Completed, or Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum JobStatus {
    /// Open for bids
    #[sea_orm(string_value = "Active")]
    #[serde(alias = "Open")]
    Active,
    #[sea_orm(string_value = "Awarded")]
    Awarded,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl JobStatus {
    pub fn accepts_bids(&self) -> bool {
        matches!(self, JobStatus::Active)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Active => write!(f, "Active"),
            JobStatus::Awarded => write!(f, "Awarded"),
            JobStatus::InProgress => write!(f, "InProgress"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "open" => Ok(JobStatus::Active),
            "awarded" => Ok(JobStatus::Awarded),
            "inprogress" | "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub budget_range: String,
    /// Construction, Renovation, Repair, ...
    pub job_type: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub estimated_hours: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub required_materials: Option<String>,
    pub status: JobStatus,
    pub revision: i32,
    pub posted_at: DateTimeWithTimeZone,
    pub deadline: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
