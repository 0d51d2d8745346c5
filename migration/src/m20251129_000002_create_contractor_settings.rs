use sea_orm_migration::prelude::*;

use crate::m20251129_000001_create_contractors::Contractors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One settings row per contractor, removed with the contractor
        manager
            .create_table(
                Table::create()
                    .table(ContractorSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractorSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::ContractorId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::LaborRate)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(45.00),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::MaterialMarginPct)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(15.00),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::TravelCost)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(25.00),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::ProfitMarginPct)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(20.00),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::PreferredLocations)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::AutoCalculateBids)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractorSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contractor_settings_contractor")
                            .from(ContractorSettings::Table, ContractorSettings::ContractorId)
                            .to(Contractors::Table, Contractors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContractorSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContractorSettings {
    Table,
    Id,
    ContractorId,
    LaborRate,
    MaterialMarginPct,
    TravelCost,
    ProfitMarginPct,
    PreferredLocations,
    AutoCalculateBids,
    CreatedAt,
    UpdatedAt,
}
