//! Create violations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Violations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Violations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Violations::PlateNumber).string().not_null())
                    .col(
                        ColumnDef::new(Violations::ViolationType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Violations::Location).string().not_null())
                    .col(
                        ColumnDef::new(Violations::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Violations::Status)
                            .string_len(20)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Violations::Description).string())
                    .col(ColumnDef::new(Violations::FineAmount).double())
                    .col(
                        ColumnDef::new(Violations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Violations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_violations_plate_number")
                    .table(Violations::Table)
                    .col(Violations::PlateNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_violations_date_time")
                    .table(Violations::Table)
                    .col(Violations::DateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Violations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Violations {
    Table,
    Id,
    PlateNumber,
    ViolationType,
    Location,
    DateTime,
    Status,
    Description,
    FineAmount,
    CreatedAt,
    UpdatedAt,
}
