//! Create scans table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scans::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Scans::PlateNumber).string().not_null())
                    .col(ColumnDef::new(Scans::Location).string().not_null())
                    .col(
                        ColumnDef::new(Scans::ScanTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scans::ConfidenceScore).double())
                    .col(ColumnDef::new(Scans::ImageUrl).string())
                    .col(ColumnDef::new(Scans::CameraId).string())
                    .col(
                        ColumnDef::new(Scans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scans_plate_number")
                    .table(Scans::Table)
                    .col(Scans::PlateNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scans_scan_time")
                    .table(Scans::Table)
                    .col(Scans::ScanTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Scans {
    Table,
    Id,
    PlateNumber,
    Location,
    ScanTime,
    ConfidenceScore,
    ImageUrl,
    CameraId,
    CreatedAt,
}
