use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contractors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contractors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Contractors::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Contractors::CompanyName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contractors::Phone).string_len(32).null())
                    .col(
                        ColumnDef::new(Contractors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contractors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contractors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Contractors {
    Table,
    Id,
    Email,
    CompanyName,
    Phone,
    CreatedAt,
    UpdatedAt,
}
