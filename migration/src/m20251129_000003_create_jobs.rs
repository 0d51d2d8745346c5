use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Jobs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Jobs::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Jobs::Description).text().not_null())
                    .col(ColumnDef::new(Jobs::Location).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Jobs::BudgetRange)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Jobs::JobType)
                            .string_len(50)
                            .not_null()
                            .default("Construction"),
                    )
                    .col(ColumnDef::new(Jobs::EstimatedHours).decimal_len(10, 2).null())
                    .col(ColumnDef::new(Jobs::RequiredMaterials).text().null())
                    .col(
                        ColumnDef::new(Jobs::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    // Bumped by every bid acceptance; guards against double awards
                    .col(
                        ColumnDef::new(Jobs::Revision)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Jobs::PostedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Jobs::Deadline)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Jobs {
    Table,
    Id,
    Title,
    Description,
    Location,
    BudgetRange,
    JobType,
    EstimatedHours,
    RequiredMaterials,
    Status,
    Revision,
    PostedAt,
    Deadline,
    UpdatedAt,
}
