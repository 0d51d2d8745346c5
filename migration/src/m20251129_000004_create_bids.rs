use sea_orm_migration::prelude::*;

use crate::m20251129_000001_create_contractors::Contractors;
use crate::m20251129_000003_create_jobs::Jobs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bids::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bids::ContractorId).integer().not_null())
                    .col(ColumnDef::new(Bids::JobId).integer().not_null())
                    .col(ColumnDef::new(Bids::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Bids::Notes).text().null())
                    .col(
                        ColumnDef::new(Bids::Status)
                            .string_len(20)
                            .not_null()
                            .default("Submitted"),
                    )
                    .col(
                        ColumnDef::new(Bids::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bids::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_contractor")
                            .from(Bids::Table, Bids::ContractorId)
                            .to(Contractors::Table, Contractors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bids_job")
                            .from(Bids::Table, Bids::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One bid per contractor per job
        manager
            .create_index(
                Index::create()
                    .name("idx_bids_contractor_job_unique")
                    .table(Bids::Table)
                    .col(Bids::ContractorId)
                    .col(Bids::JobId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bids_job_id")
                    .table(Bids::Table)
                    .col(Bids::JobId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bids::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bids {
    Table,
    Id,
    ContractorId,
    JobId,
    Amount,
    Notes,
    Status,
    SubmittedAt,
    UpdatedAt,
}
