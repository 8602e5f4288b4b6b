//! Create vehicles table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::PlateNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Make).string().not_null())
                    .col(ColumnDef::new(Vehicles::Model).string().not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(ColumnDef::new(Vehicles::Color).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::VehicleType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicles::EngineNumber).string().not_null())
                    .col(ColumnDef::new(Vehicles::ChassisNumber).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerName).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerPhone).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerEmail).string().not_null())
                    .col(ColumnDef::new(Vehicles::OwnerAddress).string().not_null())
                    .col(ColumnDef::new(Vehicles::RegistrationDate).date().not_null())
                    .col(ColumnDef::new(Vehicles::ExpiryDate).date().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_plate_number")
                    .table(Vehicles::Table)
                    .col(Vehicles::PlateNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_expiry_date")
                    .table(Vehicles::Table)
                    .col(Vehicles::ExpiryDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    PlateNumber,
    Make,
    Model,
    Year,
    Color,
    VehicleType,
    EngineNumber,
    ChassisNumber,
    OwnerName,
    OwnerPhone,
    OwnerEmail,
    OwnerAddress,
    RegistrationDate,
    ExpiryDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
