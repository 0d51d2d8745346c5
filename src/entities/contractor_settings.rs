//! `SeaORM` Entity for contractor_settings table
//!
//! A contractor's default pricing parameters, one row per contractor.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contractor_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub contractor_id: i32,
    /// Currency per hour
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub labor_rate: Decimal,
    /// Percentage added on top of material cost (0-100)
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub material_margin_pct: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub travel_cost: Decimal,
    /// Percentage added on top of the subtotal (0-100)
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub profit_margin_pct: Decimal,
    pub preferred_locations: String,
    pub auto_calculate_bids: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
}

impl Related<super::contractors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contractors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
