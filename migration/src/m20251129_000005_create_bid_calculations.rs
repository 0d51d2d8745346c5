use sea_orm_migration::prelude::*;

use crate::m20251129_000004_create_bids::Bids;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pricing breakdown kept as provenance for each bid (1:1)
        manager
            .create_table(
                Table::create()
                    .table(BidCalculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BidCalculations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BidCalculations::BidId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(money(BidCalculations::LaborHours))
                    .col(money(BidCalculations::MaterialCost))
                    .col(money(BidCalculations::LaborRate))
                    .col(money(BidCalculations::MaterialMarginPct))
                    .col(money(BidCalculations::ProfitMarginPct))
                    .col(money(BidCalculations::LaborCost))
                    .col(money(BidCalculations::MaterialMarginAmount))
                    .col(money(BidCalculations::MaterialTotal))
                    .col(money(BidCalculations::TravelCost))
                    .col(money(BidCalculations::Subtotal))
                    .col(money(BidCalculations::ProfitAmount))
                    .col(money(BidCalculations::TotalBid))
                    .col(
                        ColumnDef::new(BidCalculations::CalculatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bid_calculations_bid")
                            .from(BidCalculations::Table, BidCalculations::BidId)
                            .to(Bids::Table, Bids::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BidCalculations::Table).to_owned())
            .await
    }
}

// Unconstrained numeric: pricing inputs are unbounded, so the breakdown
// can exceed any fixed precision
fn money(col: BidCalculations) -> ColumnDef {
    ColumnDef::new(col).decimal().not_null().to_owned()
}

#[derive(Iden)]
enum BidCalculations {
    Table,
    Id,
    BidId,
    LaborHours,
    MaterialCost,
    LaborRate,
    MaterialMarginPct,
    ProfitMarginPct,
    LaborCost,
    MaterialMarginAmount,
    MaterialTotal,
    TravelCost,
    Subtotal,
    ProfitAmount,
    TotalBid,
    CalculatedAt,
}
