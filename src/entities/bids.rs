//! `SeaORM` Entity for bids table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bid review status
///
/// Submitted → UnderReview → Accepted | Rejected. Accepted and Rejected are
/// terminal under normal flow but remain overridable by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BidStatus {
    #[sea_orm(string_value = "Submitted")]
    Submitted,
    #[sea_orm(string_value = "UnderReview")]
    UnderReview,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BidStatus::Submitted => write!(f, "Submitted"),
            BidStatus::UnderReview => write!(f, "UnderReview"),
            BidStatus::Accepted => write!(f, "Accepted"),
            BidStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl std::str::FromStr for BidStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" => Ok(BidStatus::Submitted),
            "underreview" | "under_review" => Ok(BidStatus::UnderReview),
            "accepted" => Ok(BidStatus::Accepted),
            "rejected" => Ok(BidStatus::Rejected),
            _ => Err(format!("Unknown bid status: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub contractor_id: i32,
    pub job_id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status: BidStatus,
    pub submitted_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contractors::Entity",
        from = "Column::ContractorId",
        to = "super::contractors::Column::Id",
        on_delete = "Cascade"
    )]
    Contractors,
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id",
        on_delete = "Cascade"
    )]
    Jobs,
    #[sea_orm(has_one = "super::bid_calculations::Entity")]
    BidCalculations,
}

impl Related<super::contractors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contractors.def()
    }
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl Related<super::bid_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BidCalculations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
