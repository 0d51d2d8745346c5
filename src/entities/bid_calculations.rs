//! `SeaORM` Entity for bid_calculations table
//!
//! Audit record of the pricing inputs and breakdown a bid was built from.
//! Rows are written once, alongside the bid, and never updated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bid_calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bid_id: i32,
    // Inputs
    #[sea_orm(column_type = "Decimal(None)")]
    pub labor_hours: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub material_cost: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub labor_rate: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub material_margin_pct: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub profit_margin_pct: Decimal,
    // Breakdown
    #[sea_orm(column_type = "Decimal(None)")]
    pub labor_cost: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub material_margin_amount: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub material_total: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub travel_cost: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub profit_amount: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub total_bid: Decimal,
    pub calculated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bids::Entity",
        from = "Column::BidId",
        to = "super::bids::Column::Id",
        on_delete = "Cascade"
    )]
    Bids,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
